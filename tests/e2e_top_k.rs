//! Property tests for the top-K reducer.

use graphalgo_core::TopKConsumer;
use graphalgo_core::util::top_k;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn smallest(mut items: Vec<i32>, k: usize) -> Vec<i32> {
    items.sort();
    items.truncate(k);
    items
}

fn consume(items: &[i32], k: usize) -> TopKConsumer<i32> {
    let mut consumer = TopKConsumer::new(k);
    consumer.extend(items.iter().copied());
    consumer
}

proptest! {
    #[test]
    fn keeps_the_k_smallest(items in prop::collection::vec(-50i32..50, 0..200), k in 0usize..20) {
        let consumer = consume(&items, k);
        prop_assert_eq!(consumer.len(), items.len().min(k));
        prop_assert_eq!(consumer.into_vec(), smallest(items, k));
    }

    #[test]
    fn merge_of_any_split_matches_one_pass(
        items in prop::collection::vec(-50i32..50, 0..200),
        k in 0usize..20,
        cut in any::<prop::sample::Index>(),
    ) {
        let cut = cut.index(items.len() + 1);
        let (left, right) = items.split_at(cut);

        let mut merged = consume(left, k);
        merged.merge(consume(right, k));
        prop_assert_eq!(merged.into_vec(), consume(&items, k).into_vec());
    }

    #[test]
    fn merge_order_does_not_matter(
        a in prop::collection::vec(-50i32..50, 0..60),
        b in prop::collection::vec(-50i32..50, 0..60),
        c in prop::collection::vec(-50i32..50, 0..60),
        k in 1usize..12,
    ) {
        let mut left = consume(&a, k);
        left.merge(consume(&b, k));
        left.merge(consume(&c, k));

        let mut tail = consume(&b, k);
        tail.merge(consume(&c, k));
        let mut right = consume(&a, k);
        right.merge(tail);

        prop_assert_eq!(left.into_vec(), right.into_vec());
    }

    #[test]
    fn merging_empty_changes_nothing(items in prop::collection::vec(any::<i32>(), 0..100), k in 0usize..20) {
        let mut consumer = consume(&items, k);
        let before = consumer.clone();
        consumer.merge(TopKConsumer::new(k));
        prop_assert_eq!(consumer, before);
    }

    #[test]
    fn zero_capacity_retains_nothing(items in prop::collection::vec(any::<i32>(), 0..100)) {
        prop_assert!(consume(&items, 0).is_empty());
    }
}

#[test]
fn test_example_sequence() {
    assert_eq!(consume(&[5, 3, 8, 1, 4], 2).into_vec(), vec![1, 3]);
    assert_eq!(consume(&[0, 9], 2).into_vec(), vec![0, 9]);

    let mut merged = consume(&[5, 3, 8, 1, 4], 2);
    merged.merge(consume(&[0, 9], 2));
    assert_eq!(merged.into_vec(), vec![0, 1]);
}

#[test]
fn test_ranks_tuples() {
    // (score, node) pairs: ties on score broken by node id
    let scored = vec![(3, 7u32), (1, 2), (3, 1), (2, 9), (1, 5)];
    assert_eq!(top_k(scored, 3), vec![(1, 2), (1, 5), (2, 9)]);
}

#[test]
fn test_parallel_reduction() {
    use rayon::prelude::*;

    let items: Vec<i32> = (0..50_000i64).map(|i| ((i * 104_729) % 65_521) as i32).collect();
    let reduced = items
        .par_chunks(997)
        .map(|chunk| consume(chunk, 40))
        .reduce(
            || TopKConsumer::new(40),
            |mut acc, part| {
                acc.merge(part);
                acc
            },
        );
    assert_eq!(reduced.into_vec(), smallest(items, 40));
}
