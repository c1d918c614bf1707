//! Metadata operator method names and their symbolic forms

use std::collections::HashMap;

const OPERATORS: &[(&str, &str)] = &[
    // Unary
    ("op_UnaryPlus", "operator +"),
    ("op_UnaryNegation", "operator -"),
    ("op_LogicalNot", "operator !"),
    ("op_OnesComplement", "operator ~"),
    ("op_Increment", "operator ++"),
    ("op_Decrement", "operator --"),
    ("op_True", "operator true"),
    ("op_False", "operator false"),
    // Arithmetic and bitwise
    ("op_Addition", "operator +"),
    ("op_Subtraction", "operator -"),
    ("op_Multiply", "operator *"),
    ("op_Division", "operator /"),
    ("op_Modulus", "operator %"),
    ("op_BitwiseAnd", "operator &"),
    ("op_BitwiseOr", "operator |"),
    ("op_ExclusiveOr", "operator ^"),
    ("op_LeftShift", "operator <<"),
    ("op_RightShift", "operator >>"),
    ("op_UnsignedRightShift", "operator >>>"),
    ("op_LogicalAnd", "operator &&"),
    ("op_LogicalOr", "operator ||"),
    ("op_Assign", "operator ="),
    // Comparison
    ("op_Equality", "operator =="),
    ("op_Inequality", "operator !="),
    ("op_LessThan", "operator <"),
    ("op_GreaterThan", "operator >"),
    ("op_LessThanOrEqual", "operator <="),
    ("op_GreaterThanOrEqual", "operator >="),
    // Conversion
    ("op_Implicit", "implicit operator"),
    ("op_Explicit", "explicit operator"),
];

/// Immutable map from `op_*` method names to symbolic operator names
///
/// Built once and shared by the table builder and the resolver.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    symbolic: HashMap<&'static str, &'static str>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self {
            symbolic: OPERATORS.iter().copied().collect(),
        }
    }

    /// Symbolic form of an operator method name, if it is one
    pub fn symbolic(&self, metadata_name: &str) -> Option<&'static str> {
        self.symbolic.get(metadata_name).copied()
    }

    /// Conversion operators are the only members whose return type takes
    /// part in overload identity
    pub fn is_conversion(metadata_name: &str) -> bool {
        matches!(metadata_name, "op_Implicit" | "op_Explicit")
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}
