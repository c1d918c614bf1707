//! Benchmark suite for type-name decoding and identifier resolution
//!
//! Decoding runs once per type reference while a table is built, resolution
//! once per documentation entry; both sit on the ingestion hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use metadoc_core::symbols::{MemberKind, MemberSymbol, ParamSymbol, SymbolTable, Visibility};
use metadoc_core::testutil::{class, decoded, param};
use metadoc_core::{decode, DiagnosticLog, Resolver};

const RAW_NAMES: &[&str] = &[
    "System.String",
    "System.Int32[][,]",
    "System.Collections.Generic.List`1[[System.Int32, mscorlib, Version=4.0.0.0]]",
    "System.Collections.Generic.Dictionary`2[[System.String, mscorlib],[System.Collections.Generic.List`1[[System.Int32, mscorlib]], mscorlib]]",
    "Sample.Outer`1+Inner`1<System.Int32,System.String>",
    "Sample.Program+<>c__DisplayClass1_0",
];

/// A table with one type holding `overloads` overloads of `Run`, each taking
/// one more `System.Int32` parameter than the last
fn generate_overload_table(overloads: usize) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut ty = class("Bench", "Target", &[]);
    for arity in 0..overloads {
        let mut member = MemberSymbol::new("Run", MemberKind::Method, Visibility::Public);
        member.params = (0..arity)
            .map(|i| param(&format!("p{i}"), "System.Int32"))
            .collect::<Vec<ParamSymbol>>();
        member.ty = Some(decoded("System.Void"));
        ty.add_member(member);
    }
    table.insert_type(ty);
    table
}

fn identifier_for(arity: usize) -> String {
    let params = vec!["System.Int32"; arity].join(",");
    format!("M:Bench.Target.Run({params})")
}

/// Benchmark decoding of representative raw names
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (i, raw) in RAW_NAMES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), raw, |b, raw| {
            b.iter(|| {
                let mut log = DiagnosticLog::new();
                black_box(decode(raw, &mut log))
            });
        });
    }

    group.finish();
}

/// Benchmark overload disambiguation against growing overload sets
fn bench_resolve_overloads(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_overloads");
    let resolver = Resolver::new();

    for size in [1, 8, 32].iter() {
        let table = generate_overload_table(*size);
        let id = identifier_for(size - 1);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &id, |b, id| {
            b.iter(|| {
                let mut log = DiagnosticLog::new();
                black_box(resolver.resolve_str(&table, id, &mut log))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_resolve_overloads);

criterion_main!(benches);
