//! Namespaced configuration lookup backed by a TOML document.
//!
//! # File layout
//!
//! Each namespace is a TOML table.  A lookup first consults the primary
//! namespace and then the secondary one, so report-wide defaults can live in
//! a shared `[Report]` table and be overridden per report:
//!
//! ```toml
//! [Report]
//! warmup    = 100.0
//! reportDir = "reports"
//!
//! [ContactsPositionsReport]
//! granularity = 5
//!
//! [World]
//! bounds = [0, 4500, 0, 3400]
//! ```
//!
//! Keys outside any table are visible only to a `Settings` with no primary
//! namespace.  Integers are accepted wherever a double is expected.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use toml::{Table, Value};

use crate::{CoreError, CoreResult};

/// A read-only view of a settings document, scoped to a namespace.
///
/// Cloning is cheap: the parsed document is shared behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    root:      Arc<Table>,
    namespace: Option<String>,
    secondary: Option<String>,
}

impl Settings {
    /// Settings with no keys at all; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and parse a TOML settings file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// The same document scoped to primary namespace `ns`.
    ///
    /// The secondary namespace is kept.
    pub fn with_namespace(&self, ns: &str) -> Settings {
        Settings {
            root:      Arc::clone(&self.root),
            namespace: Some(ns.to_owned()),
            secondary: self.secondary.clone(),
        }
    }

    /// The same view with `ns` as fallback namespace.
    pub fn with_secondary(&self, ns: &str) -> Settings {
        Settings {
            root:      Arc::clone(&self.root),
            namespace: self.namespace.clone(),
            secondary: Some(ns.to_owned()),
        }
    }

    /// The primary namespace, or `""` for the document root.
    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// Whether `name` resolves in the primary or secondary namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn get_double(&self, name: &str) -> CoreResult<f64> {
        let value = self.require(name)?;
        as_double(value).ok_or_else(|| self.invalid(name, format!("expected a number, found {value}")))
    }

    /// Like [`get_double`][Self::get_double] but returns `default` when the
    /// key is absent.  A present but malformed value is still an error.
    pub fn get_double_or(&self, name: &str, default: f64) -> CoreResult<f64> {
        if self.contains(name) {
            self.get_double(name)
        } else {
            Ok(default)
        }
    }

    /// Exactly `expected` doubles, given either as a TOML array or as a
    /// comma-separated string (`"0, 4500, 0, 3400"`).
    pub fn get_csv_doubles(&self, name: &str, expected: usize) -> CoreResult<Vec<f64>> {
        let value = self.require(name)?;
        let values = match value {
            Value::Array(items) => items
                .iter()
                .map(|v| as_double(v).ok_or_else(|| self.invalid(name, format!("non-numeric element {v}"))))
                .collect::<CoreResult<Vec<f64>>>()?,
            Value::String(s) => s
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse::<f64>()
                        .map_err(|e| self.invalid(name, format!("{part:?}: {e}")))
                })
                .collect::<CoreResult<Vec<f64>>>()?,
            other => return Err(self.invalid(name, format!("expected a list of numbers, found {other}"))),
        };
        if values.len() != expected {
            return Err(self.invalid(
                name,
                format!("expected {expected} values, found {}", values.len()),
            ));
        }
        Ok(values)
    }

    pub fn get_string(&self, name: &str) -> CoreResult<String> {
        match self.require(name)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.invalid(name, format!("expected a string, found {other}"))),
        }
    }

    pub fn get_string_or(&self, name: &str, default: &str) -> CoreResult<String> {
        if self.contains(name) {
            self.get_string(name)
        } else {
            Ok(default.to_owned())
        }
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn lookup(&self, name: &str) -> Option<&Value> {
        let in_table = |ns: &str| {
            self.root
                .get(ns)
                .and_then(Value::as_table)
                .and_then(|t| t.get(name))
        };
        match self.namespace.as_deref() {
            Some(ns) => in_table(ns),
            None => self.root.get(name),
        }
        .or_else(|| self.secondary.as_deref().and_then(in_table))
    }

    fn require(&self, name: &str) -> CoreResult<&Value> {
        self.lookup(name)
            .ok_or_else(|| self.invalid(name, "missing".to_owned()))
    }

    fn invalid(&self, name: &str, reason: String) -> CoreError {
        CoreError::Setting {
            namespace: self.namespace().to_owned(),
            name:      name.to_owned(),
            reason,
        }
    }
}

impl FromStr for Settings {
    type Err = CoreError;

    fn from_str(text: &str) -> CoreResult<Self> {
        let root = text
            .parse::<Table>()
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(Settings {
            root:      Arc::new(root),
            namespace: None,
            secondary: None,
        })
    }
}

fn as_double(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}
