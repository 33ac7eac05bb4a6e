use serde::Serialize;

use super::{BoundarySet, KeyOrdering};

pub const DEFAULT_LINEAR_SEARCH_THRESHOLD: usize = 128;

/// Maps keys to partition indices over a set of range boundaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangePartitioner<K> {
    boundaries: BoundarySet<K>,
    ordering: KeyOrdering,
    linear_search_threshold: usize,
}

impl<K: Ord> RangePartitioner<K> {
    pub const fn new(boundaries: BoundarySet<K>, ordering: KeyOrdering) -> Self {
        Self {
            boundaries,
            ordering,
            linear_search_threshold: DEFAULT_LINEAR_SEARCH_THRESHOLD,
        }
    }

    pub fn with_linear_search_threshold(mut self, linear_search_threshold: usize) -> Self {
        self.linear_search_threshold = linear_search_threshold;
        self
    }

    pub const fn boundaries(&self) -> &BoundarySet<K> {
        &self.boundaries
    }

    pub const fn ordering(&self) -> KeyOrdering {
        self.ordering
    }

    pub fn nr_partitions(&self) -> usize {
        self.boundaries.nr_partitions()
    }

    /// A key equal to a boundary belongs to that boundary's partition.
    pub fn partition_for(&self, key: &K) -> usize {
        let bounds = self.boundaries.as_slice();
        let index = if bounds.len() <= self.linear_search_threshold {
            bounds.iter().take_while(|b| *b < key).count()
        } else {
            bounds.partition_point(|b| b < key)
        };

        match self.ordering {
            KeyOrdering::Ascending => index,
            KeyOrdering::Descending => bounds.len() - index,
        }
    }
}

#[cfg(test)]
mod tests {
    use claims::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn partitioner(bounds: Vec<i64>, ordering: KeyOrdering) -> RangePartitioner<i64> {
        RangePartitioner::new(assert_ok!(BoundarySet::new(bounds)), ordering)
    }

    #[test]
    fn test_partition_for_ascending() {
        let p = partitioner(vec![5, 9], KeyOrdering::Ascending);
        assert_eq!(p.nr_partitions(), 3);
        let actual: Vec<usize> = [1, 5, 6, 9, 10].iter().map(|k| p.partition_for(k)).collect();
        assert_eq!(actual, vec![0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_partition_for_descending_mirrors() {
        let p = partitioner(vec![5, 9], KeyOrdering::Descending);
        let actual: Vec<usize> = [1, 5, 6, 9, 10].iter().map(|k| p.partition_for(k)).collect();
        assert_eq!(actual, vec![2, 2, 1, 1, 0]);
    }

    #[test]
    fn test_single_partition() {
        let p = RangePartitioner::new(BoundarySet::<i64>::default(), KeyOrdering::Descending);
        assert_eq!(p.nr_partitions(), 1);
        assert_eq!(p.partition_for(&i64::MIN), 0);
        assert_eq!(p.partition_for(&i64::MAX), 0);
    }

    proptest! {
        #[test]
        fn test_linear_and_binary_lookup_agree(
            bounds in prop::collection::btree_set(-10_000_i64..10_000, 0..400),
            keys in prop::collection::vec(-11_000_i64..11_000, 1..100),
        ) {
            let bounds = BoundarySet::new(bounds.into_iter().collect()).unwrap();
            let linear = RangePartitioner::new(bounds.clone(), KeyOrdering::Ascending)
                .with_linear_search_threshold(usize::MAX);
            let binary = RangePartitioner::new(bounds, KeyOrdering::Ascending).with_linear_search_threshold(0);

            for key in keys {
                let index = linear.partition_for(&key);
                prop_assert_eq!(index, binary.partition_for(&key));
                prop_assert!(index < linear.nr_partitions());
            }
        }
    }
}
