use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use strtable::ChainedMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chained_insert_10k", |b| {
        b.iter_batched(
            || ChainedMap::<u64>::new(),
            |mut m| {
                // Starts at 8 slots, so this includes every rebuild on the way up.
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.set(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chained_get_hit", |b| {
        let mut m = ChainedMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.set(k.as_str(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chained_get_miss", |b| {
        let mut m = ChainedMap::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.set(key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.try_get(&k));
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("chained_remove_reinsert", |b| {
        let mut m = ChainedMap::new();
        let keys: Vec<_> = lcg(13).take(5_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.set(k.as_str(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = m.remove(k).unwrap();
            m.set(k.as_str(), v);
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_remove_reinsert
}
criterion_main!(benches);
