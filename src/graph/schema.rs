pub const SCHEMA: &str = r#"
-- One row per statement; object_kind 0 = IRI, 1 = literal
CREATE TABLE IF NOT EXISTS triples (
    subject TEXT NOT NULL,
    predicate TEXT NOT NULL,
    object_kind INTEGER NOT NULL,
    object_value TEXT NOT NULL,

    -- Empty for IRI objects
    datatype TEXT NOT NULL DEFAULT '',

    UNIQUE (subject, predicate, object_kind, object_value, datatype)
);

CREATE INDEX IF NOT EXISTS idx_triples_subject ON triples(subject);
CREATE INDEX IF NOT EXISTS idx_triples_predicate_object ON triples(predicate, object_value);
CREATE INDEX IF NOT EXISTS idx_triples_object ON triples(object_value);
"#;
