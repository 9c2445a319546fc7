//! Conversion between typed field values and statements.
//!
//! Every write helper treats a missing value (or an empty string) as "no
//! statement": nothing is written by `add`, and `update` leaves the property
//! without any statement.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::graph::{TripleSink, TripleSource};
use crate::types::{
    Iri, Literal, Term, Triple, XSD_BOOLEAN, XSD_DATE_TIME, XSD_INT, XSD_LONG, XSD_STRING,
};

/// A scalar that can be stored as a single literal.
pub trait PropertyValue: Sized {
    const DATATYPE: Iri;

    /// Returns `None` when the value should not produce a statement.
    fn to_literal(&self) -> Option<Literal>;

    fn from_literal(literal: &Literal) -> Result<Self>;
}

impl PropertyValue for String {
    const DATATYPE: Iri = XSD_STRING;

    fn to_literal(&self) -> Option<Literal> {
        if self.is_empty() {
            None
        } else {
            Some(Literal::string(self.as_str()))
        }
    }

    fn from_literal(literal: &Literal) -> Result<Self> {
        Ok(literal.lexical().to_string())
    }
}

impl PropertyValue for bool {
    const DATATYPE: Iri = XSD_BOOLEAN;

    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::boolean(*self))
    }

    fn from_literal(literal: &Literal) -> Result<Self> {
        match literal.lexical().trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(Error::parse(other, Self::DATATYPE.as_str())),
        }
    }
}

impl PropertyValue for i32 {
    const DATATYPE: Iri = XSD_INT;

    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::int(*self))
    }

    fn from_literal(literal: &Literal) -> Result<Self> {
        literal
            .lexical()
            .trim()
            .parse()
            .map_err(|_| Error::parse(literal.lexical(), Self::DATATYPE.as_str()))
    }
}

impl PropertyValue for i64 {
    const DATATYPE: Iri = XSD_LONG;

    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::long(*self))
    }

    fn from_literal(literal: &Literal) -> Result<Self> {
        literal
            .lexical()
            .trim()
            .parse()
            .map_err(|_| Error::parse(literal.lexical(), Self::DATATYPE.as_str()))
    }
}

impl PropertyValue for DateTime<Utc> {
    const DATATYPE: Iri = XSD_DATE_TIME;

    fn to_literal(&self) -> Option<Literal> {
        Some(Literal::date_time(self))
    }

    fn from_literal(literal: &Literal) -> Result<Self> {
        DateTime::parse_from_rfc3339(literal.lexical().trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| Error::parse(literal.lexical(), Self::DATATYPE.as_str()))
    }
}

/// Reads the first value of `predicate` on `subject`, in store order.
///
/// Returns `Ok(None)` when there is no statement. A stored object that cannot
/// be read as `T` is an error rather than a missing value.
pub fn read<T, G>(graph: &G, subject: &Iri, predicate: &Iri) -> Result<Option<T>>
where
    T: PropertyValue,
    G: TripleSource + ?Sized,
{
    let Some(triple) = graph.find(Some(subject), Some(predicate), None)?.next() else {
        return Ok(None);
    };

    match &triple.object {
        Term::Literal(literal) => T::from_literal(literal).map(Some),
        Term::Iri(iri) => Err(Error::parse(iri.as_str(), T::DATATYPE.as_str())),
    }
}

pub fn add<T, G>(graph: &mut G, subject: &Iri, predicate: &Iri, value: Option<&T>) -> Result<()>
where
    T: PropertyValue,
    G: TripleSink + ?Sized,
{
    if let Some(literal) = value.and_then(T::to_literal) {
        graph.add(Triple::new(subject.clone(), predicate.clone(), literal))?;
    }
    Ok(())
}

/// Replaces every value of `predicate` on `subject` with `value`.
pub fn update<T, G>(graph: &mut G, subject: &Iri, predicate: &Iri, value: Option<&T>) -> Result<()>
where
    T: PropertyValue,
    G: TripleSink + ?Sized,
{
    graph.remove_matching(Some(subject), Some(predicate), None)?;
    add(graph, subject, predicate, value)
}

/// Replaces a boolean property. With `remove_if_false`, `false` is stored as
/// the absence of a statement; otherwise an explicit `false` literal is written.
pub fn update_bool<G>(
    graph: &mut G,
    subject: &Iri,
    predicate: &Iri,
    value: bool,
    remove_if_false: bool,
) -> Result<()>
where
    G: TripleSink + ?Sized,
{
    graph.remove_matching(Some(subject), Some(predicate), None)?;
    if value || !remove_if_false {
        graph.add(Triple::new(
            subject.clone(),
            predicate.clone(),
            Literal::boolean(value),
        ))?;
    }
    Ok(())
}

/// Reads every IRI value of `predicate` on `subject`, in store order.
/// Literal values are not references and are skipped.
pub fn read_uris<G>(graph: &G, subject: &Iri, predicate: &Iri) -> Result<Vec<Iri>>
where
    G: TripleSource + ?Sized,
{
    Ok(graph
        .find(Some(subject), Some(predicate), None)?
        .filter_map(|t| match t.object {
            Term::Iri(iri) => Some(iri),
            Term::Literal(_) => None,
        })
        .collect())
}

pub fn add_uris<G>(graph: &mut G, subject: &Iri, predicate: &Iri, uris: &[Iri]) -> Result<()>
where
    G: TripleSink + ?Sized,
{
    for uri in uris {
        graph.add(Triple::new(subject.clone(), predicate.clone(), uri.clone()))?;
    }
    Ok(())
}

pub fn update_uris<G>(graph: &mut G, subject: &Iri, predicate: &Iri, uris: &[Iri]) -> Result<()>
where
    G: TripleSink + ?Sized,
{
    graph.remove_matching(Some(subject), Some(predicate), None)?;
    add_uris(graph, subject, predicate, uris)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::graph::MemoryGraph;

    fn s() -> Iri {
        Iri::new("urn:subject")
    }

    fn p() -> Iri {
        Iri::new("urn:predicate")
    }

    fn count(g: &MemoryGraph) -> usize {
        g.find(Some(&s()), Some(&p()), None).unwrap().count()
    }

    #[test]
    fn test_read_missing_is_none() {
        let g = MemoryGraph::new();
        assert_eq!(read::<String, _>(&g, &s(), &p()).unwrap(), None);
        assert_eq!(read::<bool, _>(&g, &s(), &p()).unwrap(), None);
        assert!(read_uris(&g, &s(), &p()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_string_writes_nothing() {
        let mut g = MemoryGraph::new();
        add(&mut g, &s(), &p(), Some(&String::new())).unwrap();
        add::<String, _>(&mut g, &s(), &p(), None).unwrap();
        assert_eq!(count(&g), 0);
    }

    #[test]
    fn test_update_replaces_previous_value() {
        let mut g = MemoryGraph::new();
        add(&mut g, &s(), &p(), Some(&"old".to_string())).unwrap();
        update(&mut g, &s(), &p(), Some(&"new".to_string())).unwrap();

        assert_eq!(count(&g), 1);
        assert_eq!(read::<String, _>(&g, &s(), &p()).unwrap().as_deref(), Some("new"));

        update::<String, _>(&mut g, &s(), &p(), None).unwrap();
        assert_eq!(count(&g), 0);
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut once = MemoryGraph::new();
        update(&mut once, &s(), &p(), Some(&17_i32)).unwrap();

        let mut twice = MemoryGraph::new();
        update(&mut twice, &s(), &p(), Some(&17_i32)).unwrap();
        update(&mut twice, &s(), &p(), Some(&17_i32)).unwrap();

        let a: Vec<_> = once.find(None, None, None).unwrap().collect();
        let b: Vec<_> = twice.find(None, None, None).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bool_remove_if_false() {
        let mut g = MemoryGraph::new();

        update_bool(&mut g, &s(), &p(), false, true).unwrap();
        assert_eq!(count(&g), 0);
        assert_eq!(read::<bool, _>(&g, &s(), &p()).unwrap().unwrap_or_default(), false);

        update_bool(&mut g, &s(), &p(), true, true).unwrap();
        assert_eq!(count(&g), 1);
        assert_eq!(read::<bool, _>(&g, &s(), &p()).unwrap(), Some(true));
    }

    #[test]
    fn test_bool_explicit_false_is_distinguishable_from_absent() {
        let mut g = MemoryGraph::new();
        update_bool(&mut g, &s(), &p(), false, false).unwrap();
        assert_eq!(count(&g), 1);
        assert_eq!(read::<bool, _>(&g, &s(), &p()).unwrap(), Some(false));
    }

    #[test]
    fn test_numeric_and_timestamp_values() {
        let mut g = MemoryGraph::new();
        let when = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap();
        let expires = Iri::new("urn:expires");
        let at = Iri::new("urn:at");

        add(&mut g, &s(), &expires, Some(&1_700_000_000_000_i64)).unwrap();
        add(&mut g, &s(), &at, Some(&when)).unwrap();

        assert_eq!(read::<i64, _>(&g, &s(), &expires).unwrap(), Some(1_700_000_000_000));
        assert_eq!(read::<DateTime<Utc>, _>(&g, &s(), &at).unwrap(), Some(when));
    }

    #[test]
    fn test_malformed_literal_is_a_parse_error() {
        let mut g = MemoryGraph::new();
        g.add(Triple::new(s(), p(), Literal::new("twelve", XSD_INT)))
            .unwrap();

        let err = read::<i32, _>(&g, &s(), &p()).unwrap_err();
        assert!(matches!(err, Error::Parse { ref value, .. } if value == "twelve"));
        assert!(read::<bool, _>(&g, &s(), &p()).is_err());
        // Any literal reads as a string.
        assert_eq!(read::<String, _>(&g, &s(), &p()).unwrap().as_deref(), Some("twelve"));
    }

    #[test]
    fn test_iri_object_where_literal_expected_is_a_parse_error() {
        let mut g = MemoryGraph::new();
        g.add(Triple::new(s(), p(), Iri::new("urn:o"))).unwrap();
        assert!(matches!(
            read::<String, _>(&g, &s(), &p()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_uri_lists() {
        let mut g = MemoryGraph::new();
        let uris = vec![Iri::new("urn:c"), Iri::new("urn:a"), Iri::new("urn:b")];
        add_uris(&mut g, &s(), &p(), &uris).unwrap();
        g.add(Triple::new(s(), p(), Literal::string("not a reference")))
            .unwrap();

        let mut read_back = read_uris(&g, &s(), &p()).unwrap();
        read_back.sort();
        assert_eq!(read_back, vec![Iri::new("urn:a"), Iri::new("urn:b"), Iri::new("urn:c")]);

        update_uris(&mut g, &s(), &p(), &[Iri::new("urn:z")]).unwrap();
        assert_eq!(read_uris(&g, &s(), &p()).unwrap(), vec![Iri::new("urn:z")]);
        assert_eq!(count(&g), 1);
    }
}
