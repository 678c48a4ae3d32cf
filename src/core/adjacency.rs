//! Node-indexed neighbor storage.
//!
//! The matrix is preallocated with one (empty) row per node and direction.
//! During an import it is never shared as a whole: [`AdjacencyMatrix::split_rows`]
//! hands out [`AdjacencyRows`], each an exclusive `&mut` slice covering one
//! contiguous node range. Since the slices come from `split_at_mut`, two
//! handles can never alias, so import tasks write without locks.

use std::ops::Range;

use crate::model::Direction;
use crate::{Error, Result};

type Row = Vec<u32>;

/// Outgoing and/or incoming neighbor rows per internal node id.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    node_count: usize,
    outgoing: Option<Vec<Row>>,
    incoming: Option<Vec<Row>>,
    sorted: bool,
}

impl AdjacencyMatrix {
    /// Allocate `node_count` empty rows for each requested direction.
    pub fn new(node_count: usize, outgoing: bool, incoming: bool, sorted: bool) -> Self {
        Self {
            node_count,
            outgoing: outgoing.then(|| vec![Row::new(); node_count]),
            incoming: incoming.then(|| vec![Row::new(); node_count]),
            sorted,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn has_outgoing_rows(&self) -> bool {
        self.outgoing.is_some()
    }

    pub fn has_incoming_rows(&self) -> bool {
        self.incoming.is_some()
    }

    /// Split into exclusive handles of `batch_size` consecutive rows each.
    ///
    /// The last handle may be shorter. Handles are returned in node order and
    /// together cover `[0, node_count)` exactly once.
    pub fn split_rows(&mut self, batch_size: usize) -> Vec<AdjacencyRows<'_>> {
        let batch_size = batch_size.max(1);
        let sorted = self.sorted;
        let mut outgoing = self.outgoing.as_deref_mut();
        let mut incoming = self.incoming.as_deref_mut();

        let mut handles = Vec::with_capacity(self.node_count.div_ceil(batch_size));
        let mut offset = 0;
        while offset < self.node_count {
            let len = batch_size.min(self.node_count - offset);
            handles.push(AdjacencyRows {
                offset: offset as u32,
                len: len as u32,
                outgoing: split_head(&mut outgoing, len),
                incoming: split_head(&mut incoming, len),
                sorted,
            });
            offset += len;
        }
        handles
    }

    /// Outgoing neighbors of `node`. Empty when outgoing rows are not kept.
    #[inline]
    pub fn outgoing(&self, node: u32) -> &[u32] {
        row(&self.outgoing, node)
    }

    /// Incoming neighbors of `node`. Empty when incoming rows are not kept.
    #[inline]
    pub fn incoming(&self, node: u32) -> &[u32] {
        row(&self.incoming, node)
    }

    pub fn out_degree(&self, node: u32) -> usize {
        self.outgoing(node).len()
    }

    pub fn in_degree(&self, node: u32) -> usize {
        self.incoming(node).len()
    }

    /// Whether `target` is in the outgoing row of `source`.
    ///
    /// Binary search on sorted matrices, linear scan otherwise.
    pub fn has_outgoing(&self, source: u32, target: u32) -> bool {
        self.contains(self.outgoing(source), target)
    }

    /// Whether `source` is in the incoming row of `target`.
    pub fn has_incoming(&self, source: u32, target: u32) -> bool {
        self.contains(self.incoming(target), source)
    }

    /// Total number of entries over all rows of `dir`.
    ///
    /// `Both` adds outgoing and incoming entries.
    pub fn relationship_count(&self, dir: Direction) -> usize {
        let count = |rows: &Option<Vec<Row>>| -> usize {
            rows.as_ref().map_or(0, |rows| rows.iter().map(Vec::len).sum())
        };
        match dir {
            Direction::Outgoing => count(&self.outgoing),
            Direction::Incoming => count(&self.incoming),
            Direction::Both => count(&self.outgoing) + count(&self.incoming),
        }
    }

    fn contains(&self, row: &[u32], value: u32) -> bool {
        if self.sorted {
            row.binary_search(&value).is_ok()
        } else {
            row.contains(&value)
        }
    }
}

fn row(rows: &Option<Vec<Row>>, node: u32) -> &[u32] {
    rows.as_ref()
        .and_then(|rows| rows.get(node as usize))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn split_head<'a>(rest: &mut Option<&'a mut [Row]>, len: usize) -> Option<&'a mut [Row]> {
    let rows = rest.take()?;
    let (head, tail) = rows.split_at_mut(len);
    *rest = Some(tail);
    Some(head)
}

// ============================================================================
// AdjacencyRows
// ============================================================================

/// Exclusive write access to the rows of one contiguous node range.
///
/// Only obtainable from [`AdjacencyMatrix::split_rows`].
#[derive(Debug)]
pub struct AdjacencyRows<'a> {
    offset: u32,
    len: u32,
    outgoing: Option<&'a mut [Row]>,
    incoming: Option<&'a mut [Row]>,
    sorted: bool,
}

impl AdjacencyRows<'_> {
    /// First node id of the range.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Number of nodes in the range.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn range(&self) -> Range<u32> {
        self.offset..self.offset + self.len
    }

    #[inline]
    pub fn owns(&self, node: u32) -> bool {
        self.range().contains(&node)
    }

    pub fn loads_outgoing(&self) -> bool {
        self.outgoing.is_some()
    }

    pub fn loads_incoming(&self) -> bool {
        self.incoming.is_some()
    }

    /// Append `target` to the outgoing row of `node`.
    ///
    /// No-op when outgoing rows are not kept.
    pub fn add_outgoing(&mut self, node: u32, target: u32) -> Result<()> {
        let local = self.local(node)?;
        if let Some(rows) = self.outgoing.as_deref_mut() {
            rows[local].push(target);
        }
        Ok(())
    }

    /// Append `source` to the incoming row of `node`.
    ///
    /// No-op when incoming rows are not kept.
    pub fn add_incoming(&mut self, node: u32, source: u32) -> Result<()> {
        let local = self.local(node)?;
        if let Some(rows) = self.incoming.as_deref_mut() {
            rows[local].push(source);
        }
        Ok(())
    }

    /// Sort the rows of `node` if the matrix is sorted.
    pub fn finish_node(&mut self, node: u32) -> Result<()> {
        if !self.sorted {
            return Ok(());
        }
        let local = self.local(node)?;
        for rows in [self.outgoing.as_deref_mut(), self.incoming.as_deref_mut()].into_iter().flatten() {
            rows[local].sort_unstable();
        }
        Ok(())
    }

    fn local(&self, node: u32) -> Result<usize> {
        if self.owns(node) {
            Ok((node - self.offset) as usize)
        } else {
            Err(Error::RowOwnership { node, range: self.range() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_covers_all_rows_once() {
        let mut matrix = AdjacencyMatrix::new(10, true, true, false);
        let ranges: Vec<_> = matrix.split_rows(4).iter().map(AdjacencyRows::range).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_split_empty_matrix() {
        let mut matrix = AdjacencyMatrix::new(0, true, false, false);
        assert!(matrix.split_rows(4).is_empty());
    }

    #[test]
    fn test_writes_land_in_owned_rows() {
        let mut matrix = AdjacencyMatrix::new(4, true, true, false);
        {
            let mut handles = matrix.split_rows(2);
            let (first, second) = handles.split_at_mut(1);
            first[0].add_outgoing(1, 3).unwrap();
            second[0].add_incoming(3, 1).unwrap();
            second[0].add_outgoing(2, 0).unwrap();
        }
        assert_eq!(matrix.outgoing(1), &[3]);
        assert_eq!(matrix.incoming(3), &[1]);
        assert_eq!(matrix.outgoing(2), &[0]);
        assert!(matrix.outgoing(0).is_empty());
        assert_eq!(matrix.relationship_count(Direction::Outgoing), 2);
        assert_eq!(matrix.relationship_count(Direction::Both), 3);
    }

    #[test]
    fn test_write_outside_range_is_rejected() {
        let mut matrix = AdjacencyMatrix::new(4, true, false, false);
        let mut handles = matrix.split_rows(2);
        let err = handles[0].add_outgoing(2, 0).unwrap_err();
        assert!(matches!(err, Error::RowOwnership { node: 2, .. }));
    }

    #[test]
    fn test_missing_direction_is_noop() {
        let mut matrix = AdjacencyMatrix::new(2, true, false, false);
        {
            let mut handles = matrix.split_rows(2);
            assert!(!handles[0].loads_incoming());
            handles[0].add_incoming(0, 1).unwrap();
        }
        assert!(matrix.incoming(0).is_empty());
        assert!(!matrix.has_incoming_rows());
    }

    #[test]
    fn test_sorted_rows_and_lookup() {
        let mut matrix = AdjacencyMatrix::new(3, true, false, true);
        {
            let mut handles = matrix.split_rows(3);
            for target in [2, 0, 1] {
                handles[0].add_outgoing(0, target).unwrap();
            }
            handles[0].finish_node(0).unwrap();
        }
        assert_eq!(matrix.outgoing(0), &[0, 1, 2]);
        assert!(matrix.has_outgoing(0, 1));
        assert!(!matrix.has_outgoing(1, 0));
    }
}
