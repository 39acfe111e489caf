use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use genloop::{
    evolution::GeneticAlgorithm,
    list::{Alphabet, AlphabetInitializer, ListGenotype, NPivot, RandomGene, RandomMask},
    replacement::{HighElitism, LowElitism},
    selection::{RouletteWheel, Tournament},
    stop::NumSteps,
};

type Bits = ListGenotype<u8>;

fn ones(genes: &Vec<u8>) -> f64 {
    genes.iter().filter(|&&g| g == 1).count() as f64
}

fn tournament_onemax(population_size: usize) -> GeneticAlgorithm<Bits> {
    let alphabet = Alphabet::binary();
    GeneticAlgorithm::builder()
        .with_population_size(population_size)
        .with_initializer(AlphabetInitializer::new(alphabet.clone(), 64).with_seed(1))
        .with_fitness(ones)
        .with_selection(Tournament::new(3).unwrap().with_seed(2))
        .with_recombination(NPivot::new(2).unwrap().with_seed(3))
        .with_mutation(RandomGene::new(alphabet).with_seed(4))
        .with_mutation_probability(0.01)
        .with_replacement(LowElitism)
        .with_stop_condition(NumSteps(20))
        .build()
        .unwrap()
}

fn roulette_onemax(population_size: usize) -> GeneticAlgorithm<Bits> {
    let alphabet = Alphabet::binary();
    GeneticAlgorithm::builder()
        .with_population_size(population_size)
        .with_initializer(AlphabetInitializer::new(alphabet.clone(), 64).with_seed(5))
        .with_fitness(ones)
        .with_selection(RouletteWheel::new().with_replacement().with_seed(6))
        .with_recombination(RandomMask::new().with_seed(7))
        .with_mutation(RandomGene::new(alphabet).with_seed(8))
        .with_mutation_probability(0.01)
        .with_replacement(HighElitism)
        .with_replacement_ratio(0.5)
        .with_stop_condition(NumSteps(20))
        .build()
        .unwrap()
}

fn bench_generations(c: &mut Criterion) {
    let mut group = c.benchmark_group("twenty_generations");

    for size in [50, 500].iter() {
        group.bench_with_input(BenchmarkId::new("tournament", size), size, |b, &size| {
            b.iter(|| {
                let mut ga = tournament_onemax(size);
                black_box(ga.run().map(|history| history.len()).unwrap())
            })
        });

        group.bench_with_input(BenchmarkId::new("roulette", size), size, |b, &size| {
            b.iter(|| {
                let mut ga = roulette_onemax(size);
                black_box(ga.run().map(|history| history.len()).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generations);
criterion_main!(benches);
