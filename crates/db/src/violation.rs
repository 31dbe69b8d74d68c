//! Structured constraint-violation extraction.
//!
//! Turns a PostgreSQL error report into a [`Violation`] naming the API
//! fields involved. Field names are resolved, in order, from the
//! constraint registry below, from the `detail` text of the report, and
//! finally from the reported column.

use fabula_core::error::CoreError;
use fabula_core::fields::snake_to_camel;
use sqlx::postgres::PgDatabaseError;

/// SQLSTATE `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE `not_null_violation`.
pub const NOT_NULL_VIOLATION: &str = "23502";
/// SQLSTATE `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE `check_violation`.
pub const CHECK_VIOLATION: &str = "23514";

/// Named constraints from `db/migrations` and the API fields they guard.
const CONSTRAINT_FIELDS: &[(&str, &[&str])] = &[
    ("uq_authors_name", &["name"]),
    ("uq_characters_name_novel", &["name", "novelId"]),
    ("fk_novels_author", &["authorId"]),
    ("fk_characters_novel", &["novelId"]),
    ("ck_novels_year", &["year"]),
    ("ck_characters_age", &["age"]),
];

/// A datastore constraint failure, with the API fields it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Unique { fields: Vec<String> },
    NotNull { fields: Vec<String> },
    ForeignKey { fields: Vec<String> },
    Check { fields: Vec<String> },
}

impl Violation {
    pub fn fields(&self) -> &[String] {
        match self {
            Violation::Unique { fields }
            | Violation::NotNull { fields }
            | Violation::ForeignKey { fields }
            | Violation::Check { fields } => fields,
        }
    }
}

impl From<Violation> for CoreError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::Unique { fields } => CoreError::Conflict { fields },
            Violation::NotNull { fields } | Violation::Check { fields } => {
                CoreError::Validation { fields }
            }
            Violation::ForeignKey { fields } => CoreError::InvalidReference { fields },
        }
    }
}

/// The parts of a database error report the classifier looks at.
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorReport<'a> {
    pub code: Option<&'a str>,
    pub constraint: Option<&'a str>,
    pub column: Option<&'a str>,
    pub detail: Option<&'a str>,
}

/// Look up the API fields guarded by a named constraint.
pub fn fields_for_constraint(constraint: &str) -> Option<&'static [&'static str]> {
    CONSTRAINT_FIELDS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, fields)| *fields)
}

/// Extract the column list from a PostgreSQL `detail` line such as
/// `Key (name, novel_id)=(Case, 2) already exists.`
///
/// Only used when the constraint is not in the registry.
pub fn fields_from_detail(detail: &str) -> Vec<String> {
    let Some(start) = detail.find("Key (") else {
        return Vec::new();
    };
    let rest = &detail[start + "Key (".len()..];
    let Some(end) = rest.find(")=(") else {
        return Vec::new();
    };
    rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|col| !col.is_empty())
        .map(snake_to_camel)
        .collect()
}

/// Classify an error report. Returns `None` for anything that is not a
/// constraint violation.
pub fn from_report(report: ErrorReport<'_>) -> Option<Violation> {
    let fields = resolve_fields(&report);
    match report.code? {
        UNIQUE_VIOLATION => Some(Violation::Unique { fields }),
        NOT_NULL_VIOLATION => Some(Violation::NotNull { fields }),
        FOREIGN_KEY_VIOLATION => Some(Violation::ForeignKey { fields }),
        CHECK_VIOLATION => Some(Violation::Check { fields }),
        _ => None,
    }
}

/// Classify a raw sqlx error. Non-database errors yield `None`.
pub fn violation(err: &sqlx::Error) -> Option<Violation> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };

    if let Some(pg) = db_err.try_downcast_ref::<PgDatabaseError>() {
        return from_report(ErrorReport {
            code: Some(pg.code()),
            constraint: pg.constraint(),
            column: pg.column(),
            detail: pg.detail(),
        });
    }

    let code = db_err.code();
    from_report(ErrorReport {
        code: code.as_deref(),
        constraint: db_err.constraint(),
        column: None,
        detail: None,
    })
}

fn resolve_fields(report: &ErrorReport<'_>) -> Vec<String> {
    if let Some(fields) = report.constraint.and_then(fields_for_constraint) {
        return fields.iter().map(|f| f.to_string()).collect();
    }
    if let Some(detail) = report.detail {
        let fields = fields_from_detail(detail);
        if !fields.is_empty() {
            return fields;
        }
    }
    report.column.map(snake_to_camel).into_iter().collect()
}
