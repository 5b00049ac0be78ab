use approx::assert_relative_eq;
use indexed_data::{
    ArrayData, BitPackedData, BitPool, Concatenated, Conditional, ErrorKind, IndexedData,
    IndexedDataExt, Masked, Padded, Procedural, ReadOnly, ReadOnlyWidening, ReflectPadding,
    Reversed, SegmentedData, Sequenced, SignedInt, SlotData, UnsignedInt, WriteNotifying,
};
use num_complex::Complex;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn iota(n: usize) -> ArrayData<i32> {
    ArrayData::from_fn(n, |i| i as i32)
}

// ============================================================================
// View semantics
// ============================================================================

#[test]
fn test_double_reverse_over_every_backend() {
    init_tracing();
    let values: Vec<u16> = (0..37).map(|i| (i * 97 % 4096) as u16).collect();

    let mut array = ArrayData::from_vec(values.clone());
    let mut segmented = SegmentedData::with_segment_len(values.len() as u64, 8).unwrap();
    let mut packed = BitPackedData::<UnsignedInt<12>>::new(values.len() as u64).unwrap();
    for (i, &v) in values.iter().enumerate() {
        segmented.set(i as u64, &v).unwrap();
        packed
            .set(i as u64, &UnsignedInt::new(u64::from(v)).unwrap())
            .unwrap();
    }

    let twice = Reversed::new(Reversed::new(&mut array));
    let twice_segmented = Reversed::new(Reversed::new(&mut segmented));
    let twice_packed = Reversed::new(Reversed::new(&mut packed));
    for i in 0..values.len() as u64 {
        assert_eq!(twice.get_value(i).unwrap(), values[i as usize]);
        assert_eq!(twice_segmented.get_value(i).unwrap(), values[i as usize]);
        assert_eq!(
            u64::from(twice_packed.get_value(i).unwrap()),
            u64::from(values[i as usize])
        );
    }
}

#[test]
fn test_strided_walk() {
    let view = Sequenced::new(iota(16), 3, 2, 5).unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![3, 5, 7, 9, 11]);
}

#[test]
fn test_cyclic_masks() {
    let data = ArrayData::from_vec(vec![1, 2, 3, 4, 5]);
    let alternate = ArrayData::from_vec(vec![false, true]);
    let all = ArrayData::from_vec(vec![true]);
    assert_eq!(
        Masked::new(data.clone(), &alternate).unwrap().to_vec().unwrap(),
        vec![2, 4]
    );
    assert_eq!(
        Masked::new(data, &all).unwrap().to_vec().unwrap(),
        vec![1, 2, 3, 4, 5]
    );
}

#[test]
fn test_predicate_view_guards_writes() {
    let mut data = iota(8);
    let mut view = Conditional::new(&mut data, |v: &i32| v % 2 != 0).unwrap();
    assert_eq!(view.to_vec().unwrap(), vec![1, 3, 5, 7]);
    assert_eq!(view.set(3, &8).unwrap_err().kind(), ErrorKind::WriteRejected);
    view.set(3, &9).unwrap();
    assert_eq!(data.get_value(7).unwrap(), 9);
}

#[test]
fn test_read_views_share_one_backing() {
    let data = ArrayData::from_vec(vec![1, 2, 3]);
    let mut twice = Concatenated::new(&data, &data).unwrap();
    let reversed = ReadOnly::new(&data).reversed();

    assert_eq!(twice.to_vec().unwrap(), vec![1, 2, 3, 1, 2, 3]);
    assert_eq!(reversed.to_vec().unwrap(), vec![3, 2, 1]);
    assert_eq!(data.get_value(1).unwrap(), 2);
    assert!(!twice.is_writable());
    assert_eq!(twice.set(4, &0).unwrap_err().kind(), ErrorKind::WriteRejected);
    assert_eq!(data.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_zero_padding() {
    let view = Padded::zero(ArrayData::from_vec(vec![1, 2, 3, 4]));
    let mut out = -1;
    view.get_signed(-1, &mut out).unwrap();
    assert_eq!(out, 0);
    assert_eq!(view.get_value(4).unwrap(), 0);
    for i in 0..4 {
        assert_eq!(view.get_value(i).unwrap(), i as i32 + 1);
    }
}

#[test]
fn test_write_notifications() {
    init_tracing();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut view = WriteNotifying::new(SegmentedData::<i64>::new(1 << 40));
    let log = Arc::clone(&seen);
    view.subscribe(move |data: &SegmentedData<i64>, index| {
        log.lock().unwrap().push(data.get_value(index).unwrap());
    });

    let writes = [(0u64, 11i64), ((1 << 40) - 1, -22), (1 << 20, 33)];
    for (index, value) in writes {
        view.set(index, &value).unwrap();
    }
    assert_eq!(*seen.lock().unwrap(), vec![11, -22, 33]);
    assert_eq!(view.inner().allocated_segments(), 3);
}

// ============================================================================
// Duplicate independence
// ============================================================================

fn assert_independent<S>(mut original: S, a: i32, b: i32)
where
    S: IndexedData<i32>,
{
    let before = original.get_value(0).unwrap();
    let mut copy = original.duplicate();

    copy.set(0, &a).unwrap();
    assert_eq!(original.get_value(0).unwrap(), before);

    original.set(0, &b).unwrap();
    assert_eq!(copy.get_value(0).unwrap(), a);
}

#[test]
fn test_duplicate_independence() {
    assert_independent(iota(4), 100, 200);
    assert_independent(SegmentedData::<i32>::new(10), 100, 200);
    assert_independent(BitPackedData::<i32>::new(3).unwrap(), -100, -200);
    assert_independent(SlotData::<i32, u16>::new(3).unwrap(), -100, -200);
    assert_independent(iota(8).trimmed(2, 4).unwrap(), 100, 200);
    assert_independent(iota(8).sequenced(7, -2, 4).unwrap(), 100, 200);
    assert_independent(iota(8).reversed(), 100, 200);
    assert_independent(iota(2).concat(iota(3)).unwrap(), 100, 200);
    assert_independent(
        iota(6).masked(&ArrayData::from_vec(vec![true, false])).unwrap(),
        100,
        200,
    );
    assert_independent(iota(6).conditional(|v: &i32| *v >= 0).unwrap(), 100, 200);
    assert_independent(
        ArrayData::from_vec(vec![1i64, 2]).transformed(|v: &i64| *v as i32, |v: &i32| i64::from(*v)),
        100,
        200,
    );
    assert_independent(iota(3).padded(ReflectPadding), 100, 200);
    assert_independent(iota(3).notifying(), 100, 200);
}

#[test]
fn test_duplicate_through_borrowed_view() {
    let mut data = iota(5);
    let view = data.by_ref().trimmed(1, 3).unwrap().reversed();
    let mut copy = view.duplicate();
    copy.set(0, &-4).unwrap();
    assert_eq!(data.to_vec().unwrap(), vec![0, 1, 2, 3, 4]);
    assert_eq!(copy.to_vec().unwrap(), vec![-4, 2, 1]);
}

// ============================================================================
// Packed storage
// ============================================================================

#[test]
fn test_bit_pool_randomized_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for bits in 1..=63u32 {
        let len = rng.gen_range(1..200u64);
        let mut pool = BitPool::new(bits, len).unwrap();
        let mask = (1u64 << bits) - 1;
        let values: Vec<u64> = (0..len).map(|_| rng.gen::<u64>() & mask).collect();
        for (i, &v) in values.iter().enumerate() {
            pool.set(i as u64, v).unwrap();
        }
        for (i, &v) in values.iter().enumerate() {
            assert_eq!(pool.get(i as u64).unwrap(), v, "bits={bits} i={i}");
        }
    }
}

#[test]
fn test_packed_15_bit_signed_straddles() {
    // Element 3 of a 15-bit pool sits at bit 45; element 4 at bit 60 straddles.
    let mut data = BitPackedData::<SignedInt<15>>::new(10).unwrap();
    let values = [-16384, 16383, -1, 0, 12345, -12345, 1, -2, 3, -4];
    for (i, &v) in values.iter().enumerate() {
        data.set(i as u64, &SignedInt::new(v).unwrap()).unwrap();
    }
    assert_eq!(data.pool().word_index(4), 0);
    assert_eq!(data.pool().bit_offset(4), 60);
    let read: Vec<i64> = data.to_vec().unwrap().into_iter().map(i64::from).collect();
    assert_eq!(read, values);

    let restored = BitPackedData::<SignedInt<15>>::from_pool(data.pool().clone()).unwrap();
    assert_eq!(restored.get_value(4).unwrap().get(), 12345);
}

#[test]
fn test_packed_complex_widening() {
    let mut data = BitPackedData::<SignedInt<15>>::new(2).unwrap();
    data.set(0, &SignedInt::new(-300).unwrap()).unwrap();
    data.set(1, &SignedInt::new(7).unwrap()).unwrap();
    let wide: ReadOnlyWidening<_, f64, _> = ReadOnlyWidening::new(data);
    assert_relative_eq!(wide.get_value(0).unwrap(), -300.0);

    let mut complex = BitPackedData::<Complex<UnsignedInt<12>>>::new(1).unwrap();
    let z = Complex::new(UnsignedInt::new(4095).unwrap(), UnsignedInt::new(1).unwrap());
    complex.set(0, &z).unwrap();
    assert_eq!(complex.get_value(0).unwrap(), z);
    assert_eq!(complex.pool().len(), 2);
}

#[test]
fn test_float_widening() {
    let data = ArrayData::from_vec(vec![0.1f32, 2.5e-3]);
    let wide = data.widened::<f64>();
    assert_relative_eq!(wide.get_value(0).unwrap(), 0.1, max_relative = 1e-7);
    assert_relative_eq!(wide.get_value(1).unwrap(), 2.5e-3, max_relative = 1e-7);
}

// ============================================================================
// Procedural sources
// ============================================================================

#[test]
fn test_procedural_window_and_padding() {
    let ramp = Procedural::new(|i| i as f64 * 0.5);
    let window = ramp.trimmed(10, 4).unwrap();
    let padded = Padded::clamp(window);
    let mut out = 0.0;
    padded.get_signed(-3, &mut out).unwrap();
    assert_relative_eq!(out, 5.0);
    assert_relative_eq!(padded.get_value(100).unwrap(), 6.5);
    assert!(!padded.is_writable());
}
