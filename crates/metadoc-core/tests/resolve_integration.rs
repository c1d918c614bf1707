//! Integration tests for decoding, identifier resolution and ingestion

use metadoc_core::config::ResolverSettings;
use metadoc_core::doc::{parse_doc_xml, DocEntry};
use metadoc_core::symbols::{MemberKind, SymbolHandle};
use metadoc_core::testutil::{class, doc, method, sample_table};
use metadoc_core::{
    decode, DiagnosticLog, DiagnosticSink, DocIngester, ModuleMetadata, Resolver, SymbolTable,
    SymbolTableBuilder,
};

fn resolve(table: &SymbolTable, raw: &str) -> (Option<SymbolHandle>, DiagnosticLog) {
    let mut log = DiagnosticLog::new();
    let handle = Resolver::new().resolve_str(table, raw, &mut log);
    (handle, log)
}

#[test]
fn test_plain_names_round_trip() {
    let mut log = DiagnosticLog::new();
    for raw in ["System.Object", "Sample.Outer/Inner", "Sample.Outer+Inner", "T"] {
        let ty = decode(raw, &mut log);
        assert_eq!(ty.display, raw);
        assert_eq!(ty.comparison, raw);
    }

    let ty = decode("System.String, mscorlib, Version=4.0.0.0, Culture=neutral", &mut log);
    assert_eq!(ty.display, "System.String");
    assert_eq!(ty.comparison, "System.String");
    assert_eq!(log.warning_count(), 0);
}

#[test]
fn test_array_group_forms() {
    let mut log = DiagnosticLog::new();
    let ty = decode("N[][,]", &mut log);
    assert_eq!(ty.display, "N[,][]");
    assert_eq!(ty.comparison, "N[][0:,]");
}

#[test]
fn test_nested_generic_arguments() {
    let mut log = DiagnosticLog::new();
    let ty = decode("Outer`1[[Inner`1[[System.Int32]]]]", &mut log);
    assert!(ty.display.contains("Outer<Inner<System.Int32>>"));

    let ty = decode(
        "System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[System.Int32[], mscorlib]]",
        &mut log,
    );
    assert_eq!(
        ty.display,
        "System.Collections.Generic.Dictionary<System.String, System.Int32[]>"
    );
    assert_eq!(
        ty.comparison,
        "System.Collections.Generic.Dictionary{System.String,System.Int32[]}"
    );
    assert_eq!(log.warning_count(), 0);
}

#[test]
fn test_unmatched_bracket_is_one_warning() {
    let mut log = DiagnosticLog::new();
    let ty = decode("List`1[[System.Int32", &mut log);
    assert!(ty.is_unknown());
    assert_eq!(log.warning_count(), 1);
}

#[test]
fn test_decoding_is_deterministic() {
    let raw = "Sample.Outer`1+Inner`1[[System.Int32],[System.String]][,]";
    let mut log = DiagnosticLog::new();
    assert_eq!(decode(raw, &mut log), decode(raw, &mut log));
}

#[test]
fn test_overload_selected_by_parameter_count() {
    let mut table = SymbolTable::new();
    let mut ty = class("N", "C", &[]);
    ty.add_member(method("M", &["System.Int32", "System.String"]));
    ty.add_member(method("M", &["System.Int32"]));
    table.insert_type(ty);

    let (handle, log) = resolve(&table, "M:N.C.M(System.Int32)");
    let member = table.member(&handle.expect("resolved")).unwrap();
    assert_eq!(member.params.len(), 1);
    assert_eq!(log.warning_count(), 0);
}

#[test]
fn test_outer_back_reference_matches_type_parameter() {
    let mut table = SymbolTable::new();
    let mut ty = class("N", "C`1", &["T"]);
    ty.add_member(method("M", &["T"]));
    ty.add_member(method("M", &["System.Int32"]));
    table.insert_type(ty);

    let (handle, _) = resolve(&table, "M:N.C`1.M(`0)");
    let member = table.member(&handle.expect("resolved")).unwrap();
    assert_eq!(member.params[0].ty.comparison, "T");
}

#[test]
fn test_unknown_namespace_does_not_stop_ingestion() {
    let mut table = sample_table();
    let resolver = Resolver::new();
    let mut log = DiagnosticLog::new();
    let entries = vec![
        DocEntry {
            id: "T:Unknown.Namespace.Type".to_string(),
            doc: doc("Lost."),
        },
        DocEntry {
            id: "M:Sample.Calculator.Add(System.Int32)".to_string(),
            doc: doc("Adds."),
        },
    ];

    let stats = DocIngester::new(&resolver, ResolverSettings::default())
        .ingest(&mut table, entries, &mut log);
    assert_eq!(stats.unresolved, 1);
    assert_eq!(stats.attached, 1);
    assert_eq!(log.warning_count(), 1);
    assert_eq!(log.error_count(), 0);
}

#[test]
fn test_members_of_each_kind() {
    let table = sample_table();
    let cases = [
        ("M:Sample.Calculator.#ctor", MemberKind::Constructor),
        ("M:Sample.Calculator.#cctor", MemberKind::Constructor),
        ("M:Sample.Money.op_Addition(Sample.Money,Sample.Money)", MemberKind::Operator),
        ("F:Sample.Calculator.Precision", MemberKind::Field),
        ("P:Sample.Calculator.Total", MemberKind::Property),
        ("E:Sample.Calculator.Changed", MemberKind::Event),
        ("P:Library.Collections.Bag`1.Item(System.Int32)", MemberKind::Property),
    ];
    for (raw, kind) in cases {
        let (handle, log) = resolve(&table, raw);
        let member = table.member(&handle.expect(raw)).unwrap();
        assert_eq!(member.kind, kind, "{raw}");
        assert!(log.is_empty(), "{raw}");
    }
}

#[test]
fn test_nested_type_resolution() {
    let table = sample_table();
    let (handle, _) = resolve(&table, "T:Library.Collections.Bag`1.Enumerator");
    match handle {
        Some(SymbolHandle::Type(ty)) => assert_eq!(ty.name, "Bag`1/Enumerator"),
        other => panic!("expected type handle, got {other:?}"),
    }
}

#[test]
fn test_malformed_identifiers_are_warnings() {
    let table = sample_table();
    for raw in ["M:NoDot", "Q:Sample.Calculator", "M:Sample.Calculator.Add(System.Int32"] {
        let (handle, log) = resolve(&table, raw);
        assert!(handle.is_none(), "{raw}");
        assert_eq!(log.warning_count(), 1, "{raw}");
    }
}

#[test]
fn test_json_metadata_and_xml_documentation() {
    let module = ModuleMetadata::parse(
        r#"{
            "name": "Sample",
            "types": [
                {"namespace": "Sample.Collections", "name": "Map`2", "kind": "class",
                 "visibility": "public", "generic_params": ["TKey", "TValue"],
                 "members": [
                    {"name": "TryGet", "kind": "method", "visibility": "public",
                     "params": [{"name": "key", "type": "TKey"},
                                {"name": "value", "type": "TValue&", "modifier": "out"}],
                     "type": "System.Boolean"},
                    {"name": "Convert", "kind": "method", "visibility": "public",
                     "generic_params": ["TResult"],
                     "params": [{"name": "f", "type": "System.Func`2[[TValue],[TResult]]"}],
                     "type": "Sample.Collections.Map`2[[TKey],[TResult]]"},
                    {"name": "Grid", "kind": "field", "visibility": "private",
                     "type": "TValue[][,]"}
                 ]},
                {"namespace": "", "name": "Startup", "kind": "class", "visibility": "internal",
                 "members": [{"name": ".cctor", "kind": "constructor", "visibility": "private",
                              "is_static": true}]}
            ]
        }"#,
    )
    .unwrap();

    let docs = parse_doc_xml(
        r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Sample</name></assembly>
    <members>
        <member name="T:Sample.Collections.Map`2">
            <summary>A map.</summary>
            <typeparam name="TKey">Key type.</typeparam>
        </member>
        <member name="M:Sample.Collections.Map`2.TryGet(`0,`1@)">
            <summary>Looks up <paramref name="key"/>.</summary>
            <exception cref="T:Sample.Collections.Map`2">Never.</exception>
        </member>
        <member name="M:Sample.Collections.Map`2.Convert``1(System.Func{`1,``0})">
            <summary>Converts values.</summary>
        </member>
        <member name="F:Sample.Collections.Map`2.Grid">
            <summary>Storage.</summary>
        </member>
        <member name="M:Startup.#cctor">
            <summary>Initializes.</summary>
        </member>
    </members>
</doc>"#,
    )
    .unwrap();

    let resolver = Resolver::new();
    let mut log = DiagnosticLog::new();
    let mut builder = SymbolTableBuilder::new(resolver.operators());
    builder.add_module(&module, &mut log);
    let mut table = builder.build();

    let stats = DocIngester::new(&resolver, ResolverSettings::default())
        .ingest_file(&mut table, docs, &mut log);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.attached, 5, "{:?}", log.entries());
    assert_eq!(stats.exception_refs, 1);
    assert_eq!(stats.exception_refs_unresolved, 0);
    assert_eq!(log.warning_count(), 0);

    let (handle, _) = resolve(&table, "F:Sample.Collections.Map`2.Grid");
    let grid = table.member(&handle.unwrap()).unwrap();
    assert_eq!(grid.ty.as_ref().unwrap().display, "TValue[,][]");
    assert_eq!(grid.doc.as_ref().unwrap().summary, "Storage.");
}
