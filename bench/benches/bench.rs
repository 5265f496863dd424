#[macro_use]
extern crate criterion;
use criterion::{BenchmarkId, Criterion};
use num_bigint::BigInt;
use num_residue::{
    MontgomeryVariant, MutInt, RandInteger, Reducer, Reduction, ReductionConfig,
    WordMontgomeryReduction,
};

pub fn bench_power(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut group = c.benchmark_group("modular power");

    for bits in [256usize, 1024, 2048] {
        let mut n: MutInt = rng.gen_integer(bits);
        n.set_bit(bits - 1).set_bit(0);
        let base: MutInt = rng.gen_integer_below(&n);
        let exponent: MutInt = rng.gen_integer(bits);

        let configs = [
            ("naive", ReductionConfig::naive()),
            ("montgomery sos", ReductionConfig::montgomery(MontgomeryVariant::Sos)),
            ("montgomery cios", ReductionConfig::montgomery(MontgomeryVariant::Cios)),
            ("barrett", ReductionConfig::barrett()),
        ];
        for (name, config) in configs {
            let reducer = config.build(&n).unwrap();
            group.bench_with_input(BenchmarkId::new(name, bits), &bits, |b, _| {
                b.iter(|| reducer.power(&base, &exponent).unwrap())
            });
        }

        let (big_n, big_base, big_exp) =
            (BigInt::from(&n), BigInt::from(&base), BigInt::from(&exponent));
        group.bench_with_input(BenchmarkId::new("num-bigint", bits), &bits, |b, _| {
            b.iter(|| big_base.modpow(&big_exp, &big_n))
        });
    }

    group.finish();
}

pub fn bench_word_power(c: &mut Criterion) {
    const COUNT: usize = 1000;
    let mut rng = rand::thread_rng();
    let inputs: Vec<(u64, u64, u64)> = (0..COUNT)
        .map(|_| {
            let n: u64 = rng.gen_integer(64);
            (n | 1, rng.gen_integer(64), rng.gen_integer(64))
        })
        .collect();

    let mut group = c.benchmark_group("modular power (u64)");
    group.bench_function("word montgomery", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|(n, a, e)| {
                    let reducer = WordMontgomeryReduction.build(n).unwrap();
                    reducer.power(a, e).unwrap()
                })
                .fold(0u64, |acc, v| acc ^ v)
        })
    });
    group.bench_function("mutint montgomery", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|(n, a, e)| {
                    let reducer = ReductionConfig::default().build(&MutInt::from(*n)).unwrap();
                    reducer.power(&MutInt::from(*a), e).unwrap().limbs().len()
                })
                .sum::<usize>()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_power, bench_word_power);
criterion_main!(benches);
