// benches/mutation_bench.rs
//! Benchmarks for normalization, mutators and rendering at realistic sizes.

use content_blocks::{
    normalize, render_collection, Block, BlockCollection, BlockId, BlockKind, LanguageCode,
    LocalizedText, RawBlock, RenderContext,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Builds a collection cycling through the rendered kinds.
fn create_sample_collection(size: usize) -> BlockCollection {
    let kinds = [
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::Image,
        BlockKind::Divider,
    ];
    let blocks = (0..size)
        .map(|i| {
            let mut block = Block::new(
                BlockId::parse(&format!("block-{}", i)).unwrap(),
                kinds[i % kinds.len()].clone(),
            )
            .with_content(
                LocalizedText::new()
                    .with("en", format!("Block number {} with some text", i))
                    .with("ar", format!("الكتلة رقم {}", i)),
            );
            block.order = i;
            block
        })
        .collect();
    BlockCollection::from_blocks(blocks)
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for (size, name) in [(10, "small"), (50, "cap"), (500, "oversized")] {
        let raw: Vec<RawBlock> = create_sample_collection(size).into_raw();
        group.bench_with_input(BenchmarkId::new("normalize", name), &raw, |b, raw| {
            b.iter(|| normalize(black_box(raw.clone())));
        });
    }

    group.finish();
}

fn bench_mutators(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutators");
    let collection = create_sample_collection(50);
    let first = BlockId::parse("block-0").unwrap();
    let last = BlockId::parse("block-49").unwrap();

    group.bench_function("add_after_first", |b| {
        b.iter(|| collection.add(BlockKind::Paragraph, Some(black_box(&first)), 100));
    });
    group.bench_function("duplicate_first", |b| {
        b.iter(|| collection.duplicate(black_box(&first), 100));
    });
    group.bench_function("move_last_to_first", |b| {
        b.iter(|| collection.move_block(black_box(&last), black_box(&first)));
    });
    group.bench_function("remove_first", |b| {
        b.iter(|| collection.remove(black_box(&first)));
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let collection = create_sample_collection(50);

    for language in ["en", "ar"] {
        let read_only = RenderContext::read_only(LanguageCode::parse(language).unwrap());
        let editing = RenderContext::new(LanguageCode::parse(language).unwrap())
            .with_focus(Some(BlockId::parse("block-10").unwrap()));

        group.bench_with_input(
            BenchmarkId::new("read_only", language),
            &read_only,
            |b, ctx| b.iter(|| render_collection(black_box(&collection), ctx)),
        );
        group.bench_with_input(
            BenchmarkId::new("editing", language),
            &editing,
            |b, ctx| b.iter(|| render_collection(black_box(&collection), ctx)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_mutators, bench_rendering);
criterion_main!(benches);
