//! Load strategies: which of a node's relationships go into which row.

use crate::config::GraphSetup;
use crate::model::{Direction, NodeId, Relationship};
use crate::storage::GraphSource;
use crate::Result;

/// Adjacency row a relationship is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Outgoing,
    Incoming,
}

/// Reads one node's relationships and reports each as `(row, other end, relationship)`.
pub trait RelationshipReader: Send + Sync {
    fn read(
        &self,
        source: &dyn GraphSource,
        node: NodeId,
        rel_type: Option<&str>,
        sink: &mut dyn FnMut(Row, NodeId, &Relationship) -> Result<()>,
    ) -> Result<()>;
}

/// Keeps relationship direction: outgoing ones to the outgoing row, incoming
/// ones to the incoming row.
#[derive(Debug, Clone, Copy)]
pub struct DirectedReader {
    pub outgoing: bool,
    pub incoming: bool,
}

impl RelationshipReader for DirectedReader {
    fn read(
        &self,
        source: &dyn GraphSource,
        node: NodeId,
        rel_type: Option<&str>,
        sink: &mut dyn FnMut(Row, NodeId, &Relationship) -> Result<()>,
    ) -> Result<()> {
        if self.outgoing {
            for rel in source.relationships(node, Direction::Outgoing, rel_type)? {
                sink(Row::Outgoing, rel.dst, &rel)?;
            }
        }
        if self.incoming {
            for rel in source.relationships(node, Direction::Incoming, rel_type)? {
                sink(Row::Incoming, rel.src, &rel)?;
            }
        }
        Ok(())
    }
}

/// Ignores direction: every relationship touching the node goes to its
/// outgoing row. Each endpoint records the other, so rows come out symmetric.
#[derive(Debug, Clone, Copy)]
pub struct UndirectedReader;

impl RelationshipReader for UndirectedReader {
    fn read(
        &self,
        source: &dyn GraphSource,
        node: NodeId,
        rel_type: Option<&str>,
        sink: &mut dyn FnMut(Row, NodeId, &Relationship) -> Result<()>,
    ) -> Result<()> {
        for rel in source.relationships(node, Direction::Both, rel_type)? {
            let Some(other) = rel.other_node(node) else { continue };
            sink(Row::Outgoing, other, &rel)?;
        }
        Ok(())
    }
}

/// Strategy for `setup`.
pub fn reader_for(setup: &GraphSetup) -> Box<dyn RelationshipReader> {
    if setup.load_as_undirected {
        Box::new(UndirectedReader)
    } else {
        Box::new(DirectedReader {
            outgoing: setup.load_outgoing,
            incoming: setup.load_incoming,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyMap;
    use crate::storage::MemoryBackend;

    fn collect(reader: &dyn RelationshipReader, db: &MemoryBackend, node: NodeId) -> Vec<(Row, NodeId)> {
        let mut seen = Vec::new();
        reader
            .read(db, node, None, &mut |row, other, _| {
                seen.push((row, other));
                Ok(())
            })
            .unwrap();
        seen
    }

    fn triangle() -> (MemoryBackend, [NodeId; 3]) {
        let db = MemoryBackend::new();
        let a = db.create_node(&[], PropertyMap::new());
        let b = db.create_node(&[], PropertyMap::new());
        let c = db.create_node(&[], PropertyMap::new());
        db.create_relationship(a, b, "R", PropertyMap::new()).unwrap();
        db.create_relationship(c, a, "R", PropertyMap::new()).unwrap();
        (db, [a, b, c])
    }

    #[test]
    fn test_directed_outgoing_only() {
        let (db, [a, b, _]) = triangle();
        let reader = DirectedReader { outgoing: true, incoming: false };
        assert_eq!(collect(&reader, &db, a), vec![(Row::Outgoing, b)]);
    }

    #[test]
    fn test_directed_both_rows() {
        let (db, [a, b, c]) = triangle();
        let reader = DirectedReader { outgoing: true, incoming: true };
        assert_eq!(
            collect(&reader, &db, a),
            vec![(Row::Outgoing, b), (Row::Incoming, c)]
        );
    }

    #[test]
    fn test_undirected_reports_other_end() {
        let (db, [a, b, c]) = triangle();
        let mut seen = collect(&UndirectedReader, &db, a);
        seen.sort_by_key(|(_, n)| *n);
        assert_eq!(seen, vec![(Row::Outgoing, b), (Row::Outgoing, c)]);
    }

    #[test]
    fn test_undirected_self_loop_points_at_itself() {
        let db = MemoryBackend::new();
        let a = db.create_node(&[], PropertyMap::new());
        db.create_relationship(a, a, "R", PropertyMap::new()).unwrap();
        assert_eq!(collect(&UndirectedReader, &db, a), vec![(Row::Outgoing, a)]);
    }

    #[test]
    fn test_reader_selection() {
        let setup = GraphSetup::default().with_directions(false, true);
        let (db, [a, _, c]) = triangle();
        assert_eq!(collect(reader_for(&setup).as_ref(), &db, a), vec![(Row::Incoming, c)]);
        let undirected = setup.undirected();
        assert_eq!(collect(reader_for(&undirected).as_ref(), &db, a).len(), 2);
    }
}
