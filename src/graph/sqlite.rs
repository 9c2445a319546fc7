use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};

use super::schema::SCHEMA;
use super::{Statements, TripleSink, TripleSource};
use crate::error::{Error, Result};
use crate::types::{Iri, Literal, Term, Triple};

const KIND_IRI: i64 = 0;
const KIND_LITERAL: i64 = 1;

/// Graph persisted in a SQLite `triples` table.
pub struct SqliteGraph {
    conn: Mutex<Connection>,
}

impl SqliteGraph {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn encode_object(object: &Term) -> (i64, String, String) {
    match object {
        Term::Iri(iri) => (KIND_IRI, iri.as_str().to_string(), String::new()),
        Term::Literal(lit) => (
            KIND_LITERAL,
            lit.lexical().to_string(),
            lit.datatype().as_str().to_string(),
        ),
    }
}

fn decode_object(kind: i64, value: String, datatype: String) -> Result<Term> {
    match kind {
        KIND_IRI => Ok(Term::Iri(Iri::new(value))),
        KIND_LITERAL => Ok(Term::Literal(Literal::new(value, Iri::new(datatype)))),
        other => Err(Error::parse(other.to_string(), "object kind")),
    }
}

/// Builds a WHERE clause for the bound positions of a pattern.
fn pattern_clause(
    subject: Option<&Iri>,
    predicate: Option<&Iri>,
    object: Option<&Term>,
) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(s) = subject {
        conditions.push("subject = ?");
        values.push(Value::Text(s.as_str().to_string()));
    }
    if let Some(p) = predicate {
        conditions.push("predicate = ?");
        values.push(Value::Text(p.as_str().to_string()));
    }
    if let Some(o) = object {
        let (kind, value, datatype) = encode_object(o);
        conditions.push("object_kind = ? AND object_value = ? AND datatype = ?");
        values.push(Value::Integer(kind));
        values.push(Value::Text(value));
        values.push(Value::Text(datatype));
    }

    if conditions.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), values)
    }
}

impl TripleSource for SqliteGraph {
    fn find(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<Statements<'_>> {
        let (clause, values) = pattern_clause(subject, predicate, object);
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT subject, predicate, object_kind, object_value, datatype
             FROM triples{clause} ORDER BY rowid"
        ))?;

        let rows = stmt.query_map(params_from_iter(values), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut triples = Vec::new();
        for row in rows {
            let (s, p, kind, value, datatype) = row?;
            triples.push(Triple::new(
                Iri::new(s),
                Iri::new(p),
                decode_object(kind, value, datatype)?,
            ));
        }

        Ok(Box::new(triples.into_iter()))
    }

    fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM triples", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn contains(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<bool> {
        let (clause, values) = pattern_clause(subject, predicate, object);
        let exists: bool = self.conn().query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM triples{clause})"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

impl TripleSink for SqliteGraph {
    fn add(&mut self, triple: Triple) -> Result<bool> {
        let (kind, value, datatype) = encode_object(&triple.object);
        let rows = self.conn().execute(
            "INSERT OR IGNORE INTO triples (subject, predicate, object_kind, object_value, datatype)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                triple.subject.as_str(),
                triple.predicate.as_str(),
                kind,
                value,
                datatype,
            ],
        )?;
        Ok(rows > 0)
    }

    fn remove_matching(
        &mut self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Result<usize> {
        let (clause, values) = pattern_clause(subject, predicate, object);
        let rows = self
            .conn()
            .execute(&format!("DELETE FROM triples{clause}"), params_from_iter(values))?;
        Ok(rows)
    }
}
