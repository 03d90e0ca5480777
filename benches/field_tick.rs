//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plexus::connections::find_links;
use plexus::{Canvas, Field, FieldConfig, LinkStrategy};

fn seeded(count: usize, strategy: LinkStrategy) -> FieldConfig {
    FieldConfig {
        particle_count: count,
        link_strategy: strategy,
        seed: Some(7),
        ..FieldConfig::default()
    }
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for count in [50, 500, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field = Field::with_config(1280.0, 720.0, seeded(count, LinkStrategy::AllPairs));
            field.on_pointer_move(640.0, 360.0);
            b.iter(|| field.step())
        });
    }

    group.finish();
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("links");

    for count in [50, 500] {
        for (name, strategy) in [("all_pairs", LinkStrategy::AllPairs), ("grid", LinkStrategy::Grid)] {
            let config = seeded(count, strategy);
            let field = Field::with_config(1280.0, 720.0, config.clone());
            group.bench_with_input(BenchmarkId::new(name, count), &count, |b, _| {
                b.iter(|| black_box(find_links(black_box(field.particles()), &config)))
            });
        }
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_canvas");
    group.sample_size(30);

    for count in [50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let field = Field::with_config(1280.0, 720.0, seeded(count, LinkStrategy::Grid));
            let mut canvas = Canvas::new(1280, 720);
            b.iter(|| field.render(&mut canvas))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_links, bench_render);
criterion_main!(benches);
