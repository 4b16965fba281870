//! Lookup and Formatting Benchmarks
//!
//! Measures the per-call cost of the hot paths: document lookup with
//! fallback, path resolution, and template rendering.
//!
//! Run benchmarks:
//!   cargo bench --bench lookup_benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use lingon::{FormatArg, Lingon, Locale, LocalizedValue};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;

// ============================================================================
// Fixtures
// ============================================================================

fn fixture() -> (TempDir, Lingon) {
    let dir = TempDir::new().expect("temp dir");
    let en = dir.path().join("languages/en_US/command");
    let zh = dir.path().join("languages/zh_TW/command");
    fs::create_dir_all(&en).expect("create en_US");
    fs::create_dir_all(&zh).expect("create zh_TW");

    let items: Vec<String> = (0..100).map(|i| format!("item {i}")).collect();
    let en_doc = serde_json::json!({
        "usage": "Usage: {0} [options]",
        "list": items,
        "nested": {"deep": {"deeper": {"value": "found"}}},
    });
    fs::write(en.join("help.json"), en_doc.to_string()).expect("write en_US");
    fs::write(zh.join("help.json"), r#"{"usage": "用法: {0} [選項]"}"#).expect("write zh_TW");

    let lingon = Lingon::new(dir.path(), Locale::en_us()).expect("open lingon");
    (dir, lingon)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let (_dir, lingon) = fixture();
    let zh = Locale::zh_tw();

    let mut group = c.benchmark_group("lookup");

    group.bench_function("get_bundle", |b| {
        b.iter(|| black_box(lingon.get(black_box(&zh), "command.help")))
    });

    let bundle = lingon.get(&zh, "command.help");

    group.bench_function("primary_hit", |b| {
        b.iter(|| black_box(bundle.get(black_box("usage"))))
    });

    group.bench_function("fallback_hit", |b| {
        b.iter(|| black_box(bundle.get(black_box("nested.deep.deeper.value"))))
    });

    group.bench_function("indexed_path", |b| {
        b.iter(|| black_box(bundle.get(black_box("list[99]"))))
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(bundle.get(black_box("no.such.key"))))
    });

    group.finish();
}

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("templates");

    let named = LocalizedValue::new("Hello {name}, you have {count} messages", Locale::en_us());
    group.bench_function("substitute", |b| {
        b.iter(|| black_box(named.substitute([("name", "Jerry"), ("count", "12")])))
    });

    let positional = LocalizedValue::new(
        "{0} has {1,number,integer} items worth {2,number,currency}",
        Locale::en_us(),
    );
    let args = [
        FormatArg::from("Ann"),
        FormatArg::from(1234),
        FormatArg::from(99.5),
    ];
    group.bench_function("format", |b| {
        b.iter(|| black_box(positional.format(black_box(&args))))
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_templates);
criterion_main!(benches);
