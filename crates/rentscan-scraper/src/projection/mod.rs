//! Declarative projection of nested JSON onto flat, fixed-shape records.
//!
//! A [`FieldMapping`] is compiled once from a table of
//! `(output_field, path)` pairs and then applied to any number of source
//! objects. Every output field is always present; a path that does not
//! resolve produces `null`.

mod expr;
pub mod fields;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path for field \"{field}\" at byte {position}: {reason}")]
    Syntax {
        field: String,
        position: usize,
        reason: String,
    },

    #[error("output field \"{0}\" is mapped more than once")]
    DuplicateField(String),
}

/// A flat output record with exactly the keys of the mapping that built it,
/// in mapping order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectedRecord(Map<String, Value>);

impl ProjectedRecord {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Compiled output-field → path table.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    fields: Vec<(String, Expr)>,
}

impl FieldMapping {
    /// Parses every path in `table` once.
    ///
    /// # Errors
    ///
    /// - [`PathError::Syntax`] if a path is empty or not in the supported
    ///   expression subset.
    /// - [`PathError::DuplicateField`] if an output name appears twice.
    pub fn compile<K, P>(table: &[(K, P)]) -> Result<Self, PathError>
    where
        K: AsRef<str>,
        P: AsRef<str>,
    {
        let mut seen = HashSet::with_capacity(table.len());
        let mut fields = Vec::with_capacity(table.len());

        for (name, path) in table {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(PathError::DuplicateField(name.to_owned()));
            }
            let compiled = expr::parse(path.as_ref()).map_err(|e| PathError::Syntax {
                field: name.to_owned(),
                position: e.position,
                reason: e.reason,
            })?;
            fields.push((name.to_owned(), compiled));
        }

        Ok(Self { fields })
    }

    /// Mapping that copies each named top-level key to itself.
    #[must_use]
    pub fn identity<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<(String, Expr)> = Vec::new();
        for name in names {
            let name = name.into();
            if fields.iter().all(|(existing, _)| *existing != name) {
                fields.push((name.clone(), Expr::Field(name)));
            }
        }
        Self { fields }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Projects one source object. Total: never fails.
    #[must_use]
    pub fn project(&self, source: &Value) -> ProjectedRecord {
        let record = self
            .fields
            .iter()
            .map(|(name, expr)| (name.clone(), expr.eval(source)))
            .collect();
        ProjectedRecord(record)
    }

    /// Projects every source object with the same compiled mapping.
    pub fn project_all<'a, I>(&self, sources: I) -> Vec<ProjectedRecord>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        sources.into_iter().map(|s| self.project(s)).collect()
    }
}
