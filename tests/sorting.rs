use parkernel::{odd_even_sort, BubbleMode, BubbleSort, Error, MergeSort, WorkerPool};

#[derive(Debug, Clone, Copy)]
struct Record {
    key: i32,
    seq: usize,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

fn pseudo_random(len: usize, seed: u64) -> Vec<i64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 1000) as i64 - 500
        })
        .collect()
}

#[test]
fn both_sorts_handle_the_sample_array() {
    let pool = WorkerPool::new(4).unwrap();

    let mut bubble = vec![5, 2, 9, 1, 5];
    BubbleSort::default().sort(&pool, &mut bubble);
    assert_eq!(bubble, vec![1, 2, 5, 5, 9]);

    let mut merge = vec![5, 2, 9, 1, 5];
    MergeSort::default().sort(&pool, &mut merge, 0, 4).unwrap();
    assert_eq!(merge, vec![1, 2, 5, 5, 9]);
}

#[test]
fn odd_even_sorts_random_input_for_any_worker_count() {
    let input = pseudo_random(600, 7);
    let mut expected = input.clone();
    expected.sort_unstable();

    for threads in [1, 2, 4, 8] {
        let pool = WorkerPool::new(threads).unwrap();
        let mut data = input.clone();
        BubbleSort::new(BubbleMode::OddEven).sort(&pool, &mut data);
        assert_eq!(data, expected, "threads = {threads}");
    }
}

#[test]
fn merge_sort_matches_std_across_cutoffs() {
    let input = pseudo_random(5_000, 42);
    let mut expected = input.clone();
    expected.sort();
    let pool = WorkerPool::new(4).unwrap();

    for cutoff in [0, 2, 64, 1024, 10_000] {
        let mut data = input.clone();
        MergeSort::new(cutoff).sort_all(&pool, &mut data);
        assert_eq!(data, expected, "cutoff = {cutoff}");
    }
}

#[test]
fn merge_sort_is_stable() {
    let keys = [3, 1, 3, 2, 1, 3, 2, 2, 1, 0, 3, 1];
    let records: Vec<Record> = keys
        .iter()
        .enumerate()
        .map(|(seq, &key)| Record { key, seq })
        .collect();
    let pool = WorkerPool::new(4).unwrap();

    for cutoff in [1, 4, 64] {
        let mut data = records.clone();
        MergeSort::new(cutoff).sort_all(&pool, &mut data);
        for pair in data.windows(2) {
            assert!(pair[0].key <= pair[1].key);
            if pair[0].key == pair[1].key {
                assert!(pair[0].seq < pair[1].seq, "cutoff = {cutoff}: {pair:?}");
            }
        }
    }
}

#[test]
fn sorting_sorted_output_is_a_no_op() {
    let pool = WorkerPool::new(4).unwrap();
    let mut data = pseudo_random(300, 3);
    MergeSort::default().sort_all(&pool, &mut data);
    let once = data.clone();

    MergeSort::default().sort_all(&pool, &mut data);
    assert_eq!(data, once);
    let passes = BubbleSort::default().sort(&pool, &mut data);
    assert_eq!(data, once);
    assert_eq!(passes, 2);
}

#[test]
fn boundary_arrays_are_unchanged() {
    let pool = WorkerPool::new(2).unwrap();

    let mut single = vec![42];
    BubbleSort::default().sort(&pool, &mut single);
    MergeSort::default().sort(&pool, &mut single, 0, 0).unwrap();
    assert_eq!(single, vec![42]);

    let mut equal = vec![7; 33];
    BubbleSort::default().sort(&pool, &mut equal);
    MergeSort::new(1).sort_all(&pool, &mut equal);
    assert_eq!(equal, vec![7; 33]);

    let mut empty: Vec<i64> = Vec::new();
    BubbleSort::default().sort(&pool, &mut empty);
    MergeSort::default().sort_all(&pool, &mut empty);
    MergeSort::default().sort(&pool, &mut empty, 0, 0).unwrap_err();
    assert!(empty.is_empty());
}

#[test]
fn merge_sort_range_validation() {
    let pool = WorkerPool::new(2).unwrap();
    let mut data = vec![4, 3, 2, 1];

    assert!(matches!(
        MergeSort::default().sort(&pool, &mut data, 1, 4),
        Err(Error::InvalidRange { lo: 1, hi: 4, len: 4 })
    ));
    assert_eq!(data, vec![4, 3, 2, 1]);

    MergeSort::default().sort(&pool, &mut data, 4, 3).unwrap();
    assert_eq!(data, vec![4, 3, 2, 1]);

    MergeSort::default().sort(&pool, &mut data, 0, 2).unwrap();
    assert_eq!(data, vec![2, 3, 4, 1]);
}

#[test]
fn odd_even_sort_is_generic() {
    let pool = WorkerPool::new(3).unwrap();
    let mut words = vec!["pear", "apple", "fig", "kiwi", "banana"];
    odd_even_sort(&pool, &mut words);
    assert_eq!(words, vec!["apple", "banana", "fig", "kiwi", "pear"]);
}

#[test]
fn legacy_bubble_sort_only_moves_existing_values() {
    let input = pseudo_random(64, 11);
    let pool = WorkerPool::new(4).unwrap();
    let mut data = input.clone();
    BubbleSort::new(BubbleMode::Legacy).sort(&pool, &mut data);

    assert_eq!(data.len(), input.len());
    assert!(data.iter().all(|v| input.contains(v)));
}

#[test]
fn legacy_bubble_sort_with_one_worker_sorts() {
    let input = pseudo_random(200, 5);
    let mut expected = input.clone();
    expected.sort_unstable();

    let pool = WorkerPool::new(1).unwrap();
    let mut data = input;
    BubbleSort::new(BubbleMode::Legacy).sort(&pool, &mut data);
    assert_eq!(data, expected);
}
