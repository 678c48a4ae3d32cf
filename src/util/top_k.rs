//! Bounded top-K selection.
//!
//! [`TopKConsumer`] keeps the `k` smallest items it has seen, sorted
//! ascending. Two consumers over different parts of an input can be merged
//! and give the same result as one consumer over the whole input, so the
//! usual pattern is one consumer per partition, merged afterwards:
//!
//! ```
//! use graphalgo_core::TopKConsumer;
//!
//! let mut left = TopKConsumer::new(2);
//! left.extend([5, 3, 8, 1, 4]);
//! let mut right = TopKConsumer::new(2);
//! right.extend([0, 9]);
//!
//! left.merge(right);
//! assert_eq!(left.as_slice(), &[0, 1]);
//! ```
//!
//! Not meant for concurrent use of one instance: build one per thread.

/// Upper bound on the capacity reserved up front.
const PREALLOCATE_LIMIT: usize = 1024;

/// The `k` smallest items seen so far, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopKConsumer<T> {
    k: usize,
    items: Vec<T>,
}

impl<T: Ord> TopKConsumer<T> {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k.min(PREALLOCATE_LIMIT)),
        }
    }

    /// Offer one item. Returns whether it was retained.
    ///
    /// Admitted while fewer than `k` items are held, afterwards only when
    /// strictly smaller than the current boundary, which is then evicted.
    /// Equal items keep their arrival order.
    pub fn accept(&mut self, item: T) -> bool {
        if self.k == 0 {
            return false;
        }
        if self.is_full() {
            match self.items.last() {
                Some(boundary) if item < *boundary => {}
                _ => return false,
            }
            self.items.pop();
        }
        let idx = self.items.partition_point(|held| *held <= item);
        self.items.insert(idx, item);
        true
    }

    /// Fold another consumer's items into this one.
    ///
    /// Same result as offering `other`'s items one by one in ascending order.
    pub fn merge(&mut self, other: TopKConsumer<T>) {
        let Some(smallest) = other.items.first() else { return };
        if self.is_full() && self.boundary().is_some_and(|boundary| smallest >= boundary) {
            return;
        }
        for item in other.items {
            // other is ascending: once one item is turned away, so is the rest
            if !self.accept(item) {
                break;
            }
        }
    }

    /// Largest retained item, the one the next admission would evict.
    pub fn boundary(&self) -> Option<&T> {
        self.items.last()
    }
}

impl<T> TopKConsumer<T> {
    /// The `k` this consumer was built with.
    pub fn capacity(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.k
    }

    /// Retained items, ascending. Can be called any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Ord> Extend<T> for TopKConsumer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.accept(item);
        }
    }
}

impl<T> IntoIterator for TopKConsumer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TopKConsumer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The `k` smallest items of `items`, ascending.
pub fn top_k<T: Ord>(items: impl IntoIterator<Item = T>, k: usize) -> Vec<T> {
    let mut consumer = TopKConsumer::new(k);
    consumer.extend(items);
    consumer.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumer(k: usize, items: &[i32]) -> TopKConsumer<i32> {
        let mut c = TopKConsumer::new(k);
        c.extend(items.iter().copied());
        c
    }

    #[test]
    fn test_keeps_smallest_sorted() {
        let c = consumer(2, &[5, 3, 8, 1, 4]);
        assert_eq!(c.as_slice(), &[1, 3]);
        assert_eq!(c.boundary(), Some(&3));
        assert!(c.is_full());
    }

    #[test]
    fn test_fewer_items_than_k() {
        let c = consumer(10, &[4, 2, 9]);
        assert_eq!(c.as_slice(), &[2, 4, 9]);
        assert!(!c.is_full());
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut c = consumer(0, &[3, 1, 2]);
        assert!(c.is_empty());
        assert!(!c.accept(-100));
        c.merge(consumer(3, &[1, 2]));
        assert!(c.is_empty());
    }

    #[test]
    fn test_accept_reports_admission() {
        let mut c = TopKConsumer::new(2);
        assert!(c.accept(5));
        assert!(c.accept(7));
        assert!(!c.accept(7));
        assert!(!c.accept(9));
        assert!(c.accept(6));
        assert_eq!(c.as_slice(), &[5, 6]);
    }

    #[test]
    fn test_duplicates() {
        let c = consumer(3, &[2, 2, 2, 1, 2]);
        assert_eq!(c.as_slice(), &[1, 2, 2]);
    }

    #[test]
    fn test_merge_example() {
        let mut left = consumer(2, &[5, 3, 8, 1, 4]);
        let right = consumer(2, &[0, 9]);
        assert_eq!(right.as_slice(), &[0, 9]);
        left.merge(right);
        assert_eq!(left.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_merge_into_empty_receiver() {
        let mut empty = TopKConsumer::new(3);
        empty.merge(consumer(3, &[7, 1, 4]));
        assert_eq!(empty.as_slice(), &[1, 4, 7]);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut c = consumer(3, &[7, 1, 4]);
        c.merge(TopKConsumer::new(3));
        assert_eq!(c.as_slice(), &[1, 4, 7]);
    }

    #[test]
    fn test_merge_skips_when_nothing_can_displace() {
        let mut c = consumer(2, &[1, 2]);
        c.merge(consumer(2, &[2, 3]));
        assert_eq!(c.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let c = consumer(3, &[3, 1, 2]);
        let first: Vec<_> = c.iter().copied().collect();
        let second: Vec<_> = (&c).into_iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(c.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_top_k_helper() {
        assert_eq!(top_k(vec![9, 8, 7, 6], 2), vec![6, 7]);
        assert_eq!(top_k(Vec::<i32>::new(), 2), Vec::<i32>::new());
    }

    #[test]
    fn test_rayon_reduction_matches_sequential() {
        use rayon::prelude::*;

        let items: Vec<i64> = (0..10_000).map(|i| (i * 7919) % 10_007).collect();
        let reduced = items
            .par_iter()
            .fold(|| TopKConsumer::new(25), |mut c, &x| {
                c.accept(x);
                c
            })
            .reduce(|| TopKConsumer::new(25), |mut a, b| {
                a.merge(b);
                a
            });

        assert_eq!(reduced.into_vec(), top_k(items, 25));
    }
}
