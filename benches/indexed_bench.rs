use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexed_data::{
    ArrayData, BitPackedData, BitPool, IndexedData, IndexedDataExt, SignedInt, SlotData,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;

fn random_words(rng: &mut StdRng, bits: u32, len: usize) -> Vec<u64> {
    let mask = (1u64 << bits) - 1;
    (0..len).map(|_| rng.gen::<u64>() & mask).collect()
}

fn bench_bit_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_pool");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let len = 1 << 16;
    group.throughput(Throughput::Elements(len as u64));
    let mut rng = StdRng::seed_from_u64(42);

    // 8 and 16 are word-aligned; 15 and 63 straddle word boundaries.
    for bits in [8u32, 15, 16, 63] {
        let values = random_words(&mut rng, bits, len);
        let mut pool = BitPool::new(bits, len as u64).unwrap();

        group.bench_with_input(BenchmarkId::new("set", bits), &bits, |bench, _| {
            bench.iter(|| {
                for (i, &v) in values.iter().enumerate() {
                    pool.set(i as u64, black_box(v)).unwrap();
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("get", bits), &bits, |bench, _| {
            bench.iter(|| {
                let mut acc = 0u64;
                for i in 0..len as u64 {
                    acc ^= pool.get(black_box(i)).unwrap();
                }
                acc
            })
        });
    }
    group.finish();
}

fn bench_packed_vs_slot(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed_i15");
    let len = 1u64 << 14;
    group.throughput(Throughput::Elements(len));
    let mut rng = StdRng::seed_from_u64(7);

    let values: Vec<SignedInt<15>> = (0..len)
        .map(|_| SignedInt::new(rng.gen_range(-16384..16384)).unwrap())
        .collect();
    let mut packed = BitPackedData::<SignedInt<15>>::new(len).unwrap();
    let mut slots = SlotData::<SignedInt<15>, u16>::new(len).unwrap();
    for (i, v) in values.iter().enumerate() {
        packed.set(i as u64, v).unwrap();
        slots.set(i as u64, v).unwrap();
    }

    group.bench_function("bit_packed", |bench| {
        bench.iter(|| {
            let mut out = SignedInt::default();
            let mut acc = 0i64;
            for i in 0..len {
                packed.get(i, &mut out).unwrap();
                acc += out.get();
            }
            acc
        })
    });
    group.bench_function("u16_slots", |bench| {
        bench.iter(|| {
            let mut out = SignedInt::default();
            let mut acc = 0i64;
            for i in 0..len {
                slots.get(i, &mut out).unwrap();
                acc += out.get();
            }
            acc
        })
    });
    group.finish();
}

fn bench_view_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_traversal");
    let len = 1usize << 16;
    group.throughput(Throughput::Elements(len as u64));
    let mut rng = StdRng::seed_from_u64(1);
    let data: ArrayData<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();

    let sum = |view: &dyn Fn(u64, &mut f64), n: u64| {
        let mut out = 0.0;
        let mut acc = 0.0;
        for i in 0..n {
            view(i, &mut out);
            acc += out;
        }
        acc
    };

    group.bench_function("direct", |bench| {
        bench.iter(|| sum(&|i, out| data.get(i, out).unwrap(), len as u64))
    });

    let mut backing = data.clone();
    let nested = backing
        .by_ref()
        .reversed()
        .sequenced(1, 2, (len / 2) as u64)
        .unwrap()
        .transformed(|v: &f64| v * 2.0, |v: &f64| v / 2.0);
    group.bench_function("reversed_strided_transformed", |bench| {
        bench.iter(|| sum(&|i, out| nested.get(i, out).unwrap(), (len / 2) as u64))
    });
    group.finish();
}

criterion_group!(benches, bench_bit_pool, bench_packed_vs_slot, bench_view_traversal);
criterion_main!(benches);
