use std::collections::BTreeSet;

use super::{Statements, TripleSink, TripleSource};
use crate::error::Result;
use crate::types::{Iri, Term, Triple};

/// In-process graph with set semantics.
#[derive(Debug, Default, Clone)]
pub struct MemoryGraph {
    triples: BTreeSet<Triple>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<Triple> for MemoryGraph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl TripleSource for MemoryGraph {
    fn find(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<Statements<'_>> {
        let subject = subject.cloned();
        let predicate = predicate.cloned();
        let object = object.cloned();

        Ok(Box::new(
            self.triples
                .iter()
                .filter(move |t| t.matches(subject.as_ref(), predicate.as_ref(), object.as_ref()))
                .cloned(),
        ))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.triples.len())
    }
}

impl TripleSink for MemoryGraph {
    fn add(&mut self, triple: Triple) -> Result<bool> {
        Ok(self.triples.insert(triple))
    }

    fn remove_matching(
        &mut self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<usize> {
        let before = self.triples.len();
        self.triples
            .retain(|t| !t.matches(subject, predicate, object));
        Ok(before - self.triples.len())
    }
}
