use crate::error::Result;
use crate::graph::TripleSource;
use crate::types::{Iri, Term};

use super::vocab::RDF_TYPE;

/// Returns true if the graph holds an explicit `rdf:type` statement linking
/// `resource` to `class`.
///
/// No inference is performed: a resource typed only with a subclass of
/// `class` is reported as not being a `class`. Writers must stamp every type
/// they expect to query later.
pub fn has_type<G: TripleSource + ?Sized>(graph: &G, resource: &Iri, class: &Iri) -> Result<bool> {
    graph.contains(Some(resource), Some(&RDF_TYPE), Some(&Term::Iri(class.clone())))
}

/// Returns the subjects of every statement typing a resource as `class`.
pub fn subjects_of_type<G: TripleSource + ?Sized>(graph: &G, class: &Iri) -> Result<Vec<Iri>> {
    let object = Term::Iri(class.clone());
    Ok(graph
        .find(None, Some(&RDF_TYPE), Some(&object))?
        .map(|t| t.subject)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MemoryGraph, TripleSink};
    use crate::mapping::vocab::{ROOT_USER_ACCOUNT, USER_ACCOUNT};
    use crate::types::Triple;

    #[test]
    fn test_has_type_requires_explicit_statement() {
        let mut g = MemoryGraph::new();
        let r = Iri::new("urn:r");
        g.add(Triple::new(r.clone(), RDF_TYPE, USER_ACCOUNT)).unwrap();

        assert!(has_type(&g, &r, &USER_ACCOUNT).unwrap());
        assert!(!has_type(&g, &r, &ROOT_USER_ACCOUNT).unwrap());
        assert!(!has_type(&g, &Iri::new("urn:missing"), &USER_ACCOUNT).unwrap());
    }

    #[test]
    fn test_subtype_membership_is_a_false_negative() {
        let mut g = MemoryGraph::new();
        let subclass_of = Iri::from_static("http://www.w3.org/2000/01/rdf-schema#subClassOf");
        let admin = Iri::new("urn:AdminAccount");
        let r = Iri::new("urn:r");
        g.add(Triple::new(admin.clone(), subclass_of, USER_ACCOUNT)).unwrap();
        g.add(Triple::new(r.clone(), RDF_TYPE, admin.clone())).unwrap();

        assert!(has_type(&g, &r, &admin).unwrap());
        assert!(!has_type(&g, &r, &USER_ACCOUNT).unwrap());
    }

    #[test]
    fn test_subjects_of_type() {
        let mut g = MemoryGraph::new();
        g.add(Triple::new(Iri::new("urn:a"), RDF_TYPE, USER_ACCOUNT)).unwrap();
        g.add(Triple::new(Iri::new("urn:b"), RDF_TYPE, ROOT_USER_ACCOUNT)).unwrap();

        assert_eq!(subjects_of_type(&g, &USER_ACCOUNT).unwrap(), vec![Iri::new("urn:a")]);
    }
}
