use std::sync::OnceLock;

use parkernel::{BubbleSort, MergeSort, WorkerPool};
use proptest::prelude::*;

fn pool() -> &'static WorkerPool {
    static POOL: OnceLock<WorkerPool> = OnceLock::new();
    POOL.get_or_init(|| WorkerPool::new(4).unwrap())
}

proptest! {
    #[test]
    fn bubble_sort_returns_sorted_permutation(input in proptest::collection::vec(any::<i64>(), 0..200)) {
        let mut expected = input.clone();
        expected.sort_unstable();

        let mut data = input;
        BubbleSort::default().sort(pool(), &mut data);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn merge_sort_returns_sorted_permutation(
        input in proptest::collection::vec(-50i64..50, 0..500),
        cutoff in 0usize..64,
    ) {
        let mut expected = input.clone();
        expected.sort();

        let mut data = input;
        MergeSort::new(cutoff).sort_all(pool(), &mut data);
        prop_assert_eq!(data, expected);
    }

    #[test]
    fn sorted_output_is_a_fixed_point(input in proptest::collection::vec(any::<i64>(), 0..150)) {
        let mut data = input;
        MergeSort::new(8).sort_all(pool(), &mut data);
        let once = data.clone();

        BubbleSort::default().sort(pool(), &mut data);
        prop_assert_eq!(&data, &once);
        MergeSort::new(8).sort_all(pool(), &mut data);
        prop_assert_eq!(data, once);
    }

    #[test]
    fn sub_range_sort_only_touches_the_range(
        input in proptest::collection::vec(any::<i64>(), 1..120),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (lo, hi) = {
            let x = a.index(input.len());
            let y = b.index(input.len());
            (x.min(y), x.max(y))
        };
        let mut data = input.clone();
        MergeSort::new(4).sort(pool(), &mut data, lo, hi).unwrap();

        let mut expected_mid = input[lo..=hi].to_vec();
        expected_mid.sort();
        prop_assert_eq!(&data[..lo], &input[..lo]);
        prop_assert_eq!(&data[lo..=hi], &expected_mid[..]);
        prop_assert_eq!(&data[hi + 1..], &input[hi + 1..]);
    }
}
