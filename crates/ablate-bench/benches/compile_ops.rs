//! Criterion micro-benchmarks for loading, compiling and rendering.

use ablate_bench::{reference_profile, stress_profile};
use ablate_core::FilesRequired;
use ablate_family::{ElmerLibNuma, Family, Sanitizer};
use ablate_model::Simulation;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_load(c: &mut Criterion) {
    let description = reference_profile();
    c.bench_function("load_reference", |b| {
        b.iter(|| {
            let mut files = FilesRequired::new();
            let sim = Simulation::load(black_box(&description), "input", &mut files).unwrap();
            black_box(sim);
        });
    });
}

fn bench_compile(c: &mut Criterion) {
    let family = ElmerLibNuma::default();
    for (name, description) in [
        ("compile_reference", reference_profile()),
        ("compile_stress", stress_profile()),
    ] {
        let sim = Simulation::load(&description, "input", &mut FilesRequired::new()).unwrap();
        c.bench_function(name, |b| {
            b.iter(|| black_box(family.compile(black_box(&sim)).unwrap()));
        });
    }
}

fn bench_render(c: &mut Criterion) {
    let family = ElmerLibNuma::default();
    let document = family
        .translate(&stress_profile(), &mut FilesRequired::new())
        .unwrap();
    c.bench_function("to_xml_stress", |b| {
        b.iter(|| black_box(document.to_xml()));
    });
    c.bench_function("fingerprint_stress", |b| {
        b.iter(|| black_box(document.fingerprint()));
    });
}

fn bench_sanitizer(c: &mut Criterion) {
    let sanitizer = Sanitizer::default();
    let content = "dose = T .* t; ".repeat(256);
    c.bench_function("sanitize_4k", |b| {
        b.iter(|| black_box(sanitizer.check("dose", black_box(&content)).is_ok()));
    });
}

criterion_group!(benches, bench_load, bench_compile, bench_render, bench_sanitizer);
criterion_main!(benches);
