//! Graph store adapter: pattern-matched access to a set of triples, guarded by
//! a single-writer / multi-reader lock scope.

mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryGraph;
pub use sqlite::SqliteGraph;

use std::sync::RwLock;

use crate::error::Result;
use crate::types::{Iri, Term, Triple};

/// Matching statements in unspecified order. Dropping the iterator releases
/// whatever cursor the backend holds.
pub type Statements<'a> = Box<dyn Iterator<Item = Triple> + 'a>;

/// Read access to a graph. `None` in a pattern position matches anything.
pub trait TripleSource {
    fn find(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<Statements<'_>>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn contains(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<bool> {
        Ok(self.find(subject, predicate, object)?.next().is_some())
    }

    /// Returns true if the resource appears as the subject or object of any statement.
    fn mentions(&self, resource: &Iri) -> Result<bool> {
        if self.contains(Some(resource), None, None)? {
            return Ok(true);
        }
        self.contains(None, None, Some(&Term::Iri(resource.clone())))
    }
}

/// Write access to a graph. Only reachable through `SharedGraph::with_write`
/// once a graph is shared.
pub trait TripleSink: TripleSource {
    /// Adds a statement. Returns false if it was already present.
    fn add(&mut self, triple: Triple) -> Result<bool>;

    /// Removes every statement matching the pattern and returns how many were removed.
    fn remove_matching(
        &mut self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<usize>;

    fn remove_all_about(&mut self, subject: &Iri) -> Result<usize> {
        self.remove_matching(Some(subject), None, None)
    }
}

/// SharedGraph owns a graph and hands out lock scopes over it.
///
/// A scope lasts exactly as long as the closure passed to `with_read` or
/// `with_write`; the guard is released on return, on `?` and on unwind. Code
/// inside a write scope reads through the same `&mut G` and never re-locks.
/// There is no timeout: a caller waits until the scope is available.
pub struct SharedGraph<G> {
    graph: RwLock<G>,
}

impl<G: TripleSink> SharedGraph<G> {
    pub fn new(graph: G) -> Self {
        Self {
            graph: RwLock::new(graph),
        }
    }

    pub fn with_read<T>(&self, f: impl FnOnce(&G) -> T) -> T {
        let guard = self.graph.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    pub fn with_write<T>(&self, f: impl FnOnce(&mut G) -> T) -> T {
        let mut guard = self.graph.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn into_inner(self) -> G {
        self.graph.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}
