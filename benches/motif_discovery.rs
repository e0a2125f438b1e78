use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use motif_finder::{
    Alphabet, GeneratorConfig, MotifConfig, MotifSelector, MotifSet, ParallelAggregator,
    RepeatScoring, SequenceGenerator,
};

fn corpus(num_sequences: usize) -> Vec<String> {
    SequenceGenerator::new(
        GeneratorConfig {
            num_sequences,
            seed: 1,
            ..Default::default()
        },
        Alphabet::dna(),
    )
    .and_then(|generator| generator.generate())
    .expect("benchmark corpus")
}

fn bench_aggregation(c: &mut Criterion) {
    let sequences = corpus(20_000);
    let symbols: usize = sequences.iter().map(String::len).sum();

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Bytes(symbols as u64));
    for motif_size in [4, 6, 8] {
        let set = Arc::new(MotifSet::enumerate(&Alphabet::dna(), motif_size).unwrap());
        let aggregator = ParallelAggregator::new(0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(motif_size), &set, |b, set| {
            b.iter(|| aggregator.aggregate(black_box(&sequences), set).unwrap())
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let sequences = corpus(5_000);

    let mut group = c.benchmark_group("select");
    for scoring in [RepeatScoring::TiedOnly, RepeatScoring::Exhaustive] {
        let selector = MotifSelector::new(&MotifConfig {
            repeat_scoring: scoring,
            ..Default::default()
        })
        .unwrap();
        group.bench_function(format!("{:?}", scoring), |b| {
            b.iter(|| selector.select(black_box(&sequences)).unwrap())
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10).measurement_time(Duration::from_secs(10));
    targets = bench_aggregation, bench_selection
}
criterion_main!(benches);
