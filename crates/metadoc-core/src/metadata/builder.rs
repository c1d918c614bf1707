//! Symbol table builder - walks module metadata and decodes every type
//! reference

use tracing::debug;

use super::{MemberMetadata, ModuleMetadata, ParamMetadata, TypeMetadata};
use crate::diagnostics::DiagnosticSink;
use crate::resolve::OperatorTable;
use crate::symbols::{
    MemberKind, MemberSymbol, ParamModifier, ParamSymbol, SymbolTable, TypeHandle, TypeSymbol,
    NESTED_SEPARATOR,
};
use crate::typename::decode;

/// Metadata name of instance constructors
const CTOR: &str = ".ctor";
/// Metadata name of static constructors
const CCTOR: &str = ".cctor";

/// Builds a [`SymbolTable`] from module metadata
pub struct SymbolTableBuilder<'a> {
    operators: &'a OperatorTable,
    table: SymbolTable,
}

impl<'a> SymbolTableBuilder<'a> {
    /// Create a builder producing an empty table
    pub fn new(operators: &'a OperatorTable) -> Self {
        Self {
            operators,
            table: SymbolTable::new(),
        }
    }

    /// Add every namespace and type of a module
    pub fn add_module(&mut self, module: &ModuleMetadata, diagnostics: &mut dyn DiagnosticSink) {
        debug!(module = %module.name, types = module.types.len(), "building symbol table");
        for namespace in &module.namespaces {
            self.table.insert_namespace(namespace);
        }
        for ty in &module.types {
            self.add_type(ty, diagnostics);
        }
    }

    /// Add one type and its members
    ///
    /// Undecodable type references are reported and stored as the unknown
    /// sentinel; the member is still added.
    pub fn add_type(
        &mut self,
        ty: &TypeMetadata,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> TypeHandle {
        let name = ty.name.replace('+', &NESTED_SEPARATOR.to_string());
        let mut symbol = TypeSymbol::new(&ty.namespace, &name, ty.kind, ty.visibility)
            .with_generic_params(ty.generic_params.iter().cloned());

        for member in &ty.members {
            let member = self.build_member(member, symbol.own_name(), diagnostics);
            symbol.add_member(member);
        }

        self.table.insert_type(symbol)
    }

    /// Finish building
    pub fn build(self) -> SymbolTable {
        self.table
    }

    fn build_member(
        &self,
        member: &MemberMetadata,
        own_name: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> MemberSymbol {
        let (name, kind, is_static) = self.lookup_name(member, own_name);

        let mut symbol = MemberSymbol::new(&name, kind, member.visibility);
        symbol.is_static = is_static;
        symbol.generic_params = member.generic_params.clone();
        symbol.params = member
            .params
            .iter()
            .map(|param| Self::build_param(param, diagnostics))
            .collect();
        symbol.ty = member.ty.as_deref().map(|raw| decode(raw, diagnostics));
        symbol
    }

    /// The name and kind a member is stored under
    fn lookup_name(&self, member: &MemberMetadata, own_name: &str) -> (String, MemberKind, bool) {
        match member.name.as_str() {
            CTOR => (own_name.to_string(), MemberKind::Constructor, false),
            CCTOR => (own_name.to_string(), MemberKind::Constructor, true),
            _ if member.kind == MemberKind::Constructor => {
                (own_name.to_string(), MemberKind::Constructor, member.is_static)
            }
            name => match (member.kind, self.operators.symbolic(name)) {
                (MemberKind::Method | MemberKind::Operator, Some(symbolic)) => {
                    (symbolic.to_string(), MemberKind::Operator, member.is_static)
                }
                (kind, _) => (explicit_interface_name(name), kind, member.is_static),
            },
        }
    }

    fn build_param(param: &ParamMetadata, diagnostics: &mut dyn DiagnosticSink) -> ParamSymbol {
        let modifier = match param.modifier {
            ParamModifier::None if param.ty.trim_end().ends_with('&') => ParamModifier::Ref,
            modifier => modifier,
        };
        ParamSymbol {
            name: param.name.clone(),
            ty: decode(&param.ty, diagnostics),
            modifier,
        }
    }
}

/// Spell an explicit interface implementation name the way documentation
/// identifiers do: `System.IDisposable.Dispose` → `System#IDisposable#Dispose`
fn explicit_interface_name(name: &str) -> String {
    if !name.contains('.') {
        return name.to_string();
    }
    name.chars()
        .map(|c| match c {
            '.' => '#',
            '<' => '{',
            '>' => '}',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use crate::symbols::{TypeKind, Visibility};

    fn member(name: &str, kind: MemberKind) -> MemberMetadata {
        MemberMetadata {
            name: name.to_string(),
            kind,
            visibility: Visibility::Public,
            is_static: false,
            generic_params: Vec::new(),
            params: Vec::new(),
            ty: None,
        }
    }

    fn param(ty: &str) -> ParamMetadata {
        ParamMetadata {
            name: "value".to_string(),
            ty: ty.to_string(),
            modifier: ParamModifier::None,
        }
    }

    fn generic_type(members: Vec<MemberMetadata>) -> TypeMetadata {
        TypeMetadata {
            namespace: "Sample".to_string(),
            name: "Outer`1+Inner".to_string(),
            kind: TypeKind::Class,
            visibility: Visibility::Public,
            generic_params: vec!["T".to_string()],
            members,
        }
    }

    #[test]
    fn test_reserved_names_mapped() {
        let ops = OperatorTable::new();
        let mut builder = SymbolTableBuilder::new(&ops);
        let mut log = DiagnosticLog::new();

        let mut add = member("op_Addition", MemberKind::Method);
        add.is_static = true;
        let handle = builder.add_type(
            &generic_type(vec![
                member(".ctor", MemberKind::Method),
                member(".cctor", MemberKind::Method),
                add,
                member("System.IDisposable.Dispose", MemberKind::Method),
            ]),
            &mut log,
        );
        let table = builder.build();
        let ty = table.type_symbol(&handle).unwrap();

        assert_eq!(ty.name, "Outer`1/Inner");
        let ctors: Vec<_> = ty.members_named("Inner", &[MemberKind::Constructor]).collect();
        assert_eq!(ctors.len(), 2);
        assert!(!ctors[0].2.is_static);
        assert!(ctors[1].2.is_static);
        assert_eq!(ty.members_named("operator +", &[MemberKind::Operator]).count(), 1);
        assert_eq!(
            ty.members_named("System#IDisposable#Dispose", &[MemberKind::Method])
                .count(),
            1
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_type_references_decoded() {
        let ops = OperatorTable::new();
        let mut builder = SymbolTableBuilder::new(&ops);
        let mut log = DiagnosticLog::new();

        let mut get = member("Get", MemberKind::Method);
        get.params = vec![
            param("System.Collections.Generic.List`1[[System.Int32, mscorlib]]"),
            param("System.Int32&"),
        ];
        get.ty = Some("T[,]".to_string());
        let handle = builder.add_type(&generic_type(vec![get]), &mut log);
        let table = builder.build();

        let ty = table.type_symbol(&handle).unwrap();
        let (_, _, get) = ty.members_named("Get", &[MemberKind::Method]).next().unwrap();
        assert_eq!(
            get.params[0].ty.display,
            "System.Collections.Generic.List<System.Int32>"
        );
        assert_eq!(get.params[1].signature_form(), "System.Int32@");
        assert_eq!(get.ty.as_ref().unwrap().comparison, "T[0:,]");
    }

    #[test]
    fn test_bad_type_reference_is_sentinel() {
        let ops = OperatorTable::new();
        let mut builder = SymbolTableBuilder::new(&ops);
        let mut log = DiagnosticLog::new();

        let mut field = member("values", MemberKind::Field);
        field.ty = Some("List`1[[System.Int32".to_string());
        let handle = builder.add_type(&generic_type(vec![field]), &mut log);
        let table = builder.build();

        let ty = table.type_symbol(&handle).unwrap();
        let (_, _, field) = ty.members_named("values", &[MemberKind::Field]).next().unwrap();
        assert!(field.ty.as_ref().unwrap().is_unknown());
        assert_eq!(log.warning_count(), 1);
    }

    #[test]
    fn test_add_module_creates_empty_namespaces() {
        let ops = OperatorTable::new();
        let mut builder = SymbolTableBuilder::new(&ops);
        let mut log = DiagnosticLog::new();
        let module = ModuleMetadata {
            name: "Sample".to_string(),
            namespaces: vec!["Sample.Empty".to_string()],
            types: vec![generic_type(Vec::new())],
        };
        builder.add_module(&module, &mut log);
        let table = builder.build();
        assert!(table.contains_namespace("Sample.Empty"));
        assert!(table.contains_namespace("Sample"));
    }

    #[test]
    fn test_explicit_interface_name() {
        assert_eq!(explicit_interface_name("Dispose"), "Dispose");
        assert_eq!(
            explicit_interface_name("System.Collections.Generic.IEnumerable<T>.GetEnumerator"),
            "System#Collections#Generic#IEnumerable{T}#GetEnumerator"
        );
    }
}
