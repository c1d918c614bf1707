//! Test utilities for metadoc
//!
//! Builders for small symbol tables, so tests can describe a library in a
//! few lines instead of going through JSON metadata.

use crate::doc::DocComment;
use crate::symbols::{
    MemberKind, MemberSymbol, ParamModifier, ParamSymbol, SymbolTable, TypeKind, TypeSymbol,
    Visibility,
};
use crate::typename::{CanonicalType, TypeExpr};

/// Decode a raw type name, yielding the unknown sentinel on failure
pub fn decoded(raw: &str) -> CanonicalType {
    TypeExpr::parse(raw)
        .map(|expr| CanonicalType::from(&expr))
        .unwrap_or_else(|_| CanonicalType::unknown())
}

/// A public class with the given generic parameters
pub fn class(namespace: &str, name: &str, generic_params: &[&str]) -> TypeSymbol {
    TypeSymbol::new(namespace, name, TypeKind::Class, Visibility::Public)
        .with_generic_params(generic_params.iter().copied())
}

/// A by-value parameter of the given raw type
pub fn param(name: &str, raw_type: &str) -> ParamSymbol {
    ParamSymbol {
        name: name.to_string(),
        ty: decoded(raw_type),
        modifier: ParamModifier::None,
    }
}

/// A public instance method taking by-value parameters of the given raw
/// types
pub fn method(name: &str, param_types: &[&str]) -> MemberSymbol {
    invocable(name, MemberKind::Method, param_types)
}

/// A public generic method
pub fn generic_method(name: &str, generic_params: &[&str], param_types: &[&str]) -> MemberSymbol {
    let mut member = method(name, param_types);
    member.generic_params = generic_params.iter().map(|p| (*p).to_string()).collect();
    member
}

/// A public instance constructor
pub fn constructor(owner_name: &str, param_types: &[&str]) -> MemberSymbol {
    invocable(owner_name, MemberKind::Constructor, param_types)
}

/// A public static operator with a return type
pub fn operator(symbolic: &str, param_types: &[&str], return_type: &str) -> MemberSymbol {
    let mut member = invocable(symbolic, MemberKind::Operator, param_types);
    member.is_static = true;
    member.ty = Some(decoded(return_type));
    member
}

/// A public field of the given raw type
pub fn field(name: &str, raw_type: &str) -> MemberSymbol {
    typed(name, MemberKind::Field, raw_type)
}

/// A public property of the given raw type
pub fn property(name: &str, raw_type: &str) -> MemberSymbol {
    typed(name, MemberKind::Property, raw_type)
}

/// A public event of the given raw delegate type
pub fn event(name: &str, raw_type: &str) -> MemberSymbol {
    typed(name, MemberKind::Event, raw_type)
}

/// A doc comment with only a summary
pub fn doc(summary: &str) -> DocComment {
    DocComment {
        summary: summary.to_string(),
        ..DocComment::default()
    }
}

fn invocable(name: &str, kind: MemberKind, param_types: &[&str]) -> MemberSymbol {
    let mut member = MemberSymbol::new(name, kind, Visibility::Public);
    member.params = param_types
        .iter()
        .enumerate()
        .map(|(i, ty)| param(&format!("arg{i}"), ty))
        .collect();
    member
}

fn typed(name: &str, kind: MemberKind, raw_type: &str) -> MemberSymbol {
    let mut member = MemberSymbol::new(name, kind, Visibility::Public);
    member.ty = Some(decoded(raw_type));
    member
}

/// A small library covering overloads, constructors, operators, generics,
/// nested types and the global namespace
///
/// ```text
/// Sample.Calculator           .ctor(), static .cctor(), Add(int), Add(int, string),
///                             Precision, Total, Changed, System#IDisposable#Dispose
/// Sample.Money                explicit operator -> decimal / double, operator +
/// Sample.CalculatorException
/// Library.Collections.Bag<T>  Add(T), Select<TResult>(Func<T, TResult>), this[int]
/// Library.Collections.Bag<T>.Enumerator
/// GlobalHelper                (no namespace)
/// ```
pub fn sample_table() -> SymbolTable {
    let mut table = SymbolTable::new();

    let mut calculator = class("Sample", "Calculator", &[]);
    calculator.add_member(constructor("Calculator", &[]));
    let mut cctor = constructor("Calculator", &[]);
    cctor.is_static = true;
    cctor.visibility = Visibility::Private;
    calculator.add_member(cctor);
    calculator.add_member(method("Add", &["System.Int32"]));
    calculator.add_member(method("Add", &["System.Int32", "System.String"]));
    calculator.add_member(field("Precision", "System.Int32"));
    calculator.add_member(property("Total", "System.Decimal"));
    calculator.add_member(event("Changed", "System.EventHandler"));
    let mut dispose = method("System#IDisposable#Dispose", &[]);
    dispose.visibility = Visibility::Private;
    calculator.add_member(dispose);
    table.insert_type(calculator);

    let mut money = TypeSymbol::new("Sample", "Money", TypeKind::Struct, Visibility::Public);
    money.add_member(operator("explicit operator", &["Sample.Money"], "System.Decimal"));
    money.add_member(operator("explicit operator", &["Sample.Money"], "System.Double"));
    money.add_member(operator(
        "operator +",
        &["Sample.Money", "Sample.Money"],
        "Sample.Money",
    ));
    table.insert_type(money);

    table.insert_type(class("Sample", "CalculatorException", &[]));

    let mut bag = class("Library.Collections", "Bag`1", &["T"]);
    bag.add_member(method("Add", &["T"]));
    bag.add_member(generic_method(
        "Select",
        &["TResult"],
        &["System.Func`2<T,TResult>"],
    ));
    let mut indexer = property("Item", "T");
    indexer.params.push(param("index", "System.Int32"));
    bag.add_member(indexer);
    table.insert_type(bag);
    table.insert_type(class("Library.Collections", "Bag`1/Enumerator", &["T"]));

    table.insert_type(class("", "GlobalHelper", &[]));

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_table_shape() {
        let table = sample_table();
        assert_eq!(table.namespaces().count(), 3);
        let (types, members) = table.symbol_counts();
        assert_eq!(types, 6);
        assert_eq!(members, 14);
    }

    #[test]
    fn test_decoded_helper() {
        assert_eq!(decoded("System.Func`2<T,TResult>").comparison, "System.Func{T,TResult}");
        assert!(decoded("List`1[[").is_unknown());
    }
}
