//! Per-query alias allocation.
//!
//! The same table can be joined several times via different paths, and
//! column names repeat across tables, so every select-list entry and join
//! target gets a short alias unique within the statement. Allocation is
//! deterministic: the generator asks in path-model order, repeated requests
//! are memoized, and collisions are resolved with a numeric suffix in
//! first-come order. Two runs over the same path model therefore produce
//! identical assignments.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// What a selected column holds, from result-assembly's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasRole {
    /// A mapped entity column (id, version and data columns alike).
    Data,
    /// The list-index / map-key qualifier of the owning path. Reserved so
    /// key aliases can never collide with element-column aliases at the
    /// same path.
    Key,
}

/// Per-query allocator for table and column aliases. Created fresh for one
/// statement and discarded with it.
#[derive(Debug, Default)]
pub struct AliasFactory {
    used: HashSet<String>,
    tables: HashMap<String, String>,
    columns: HashMap<(String, String, AliasRole), String>,
}

impl AliasFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for the table joined at `path`.
    pub fn table_alias(&mut self, path: &str) -> String {
        if let Some(existing) = self.tables.get(path) {
            return existing.clone();
        }
        let alias = self.uniquify(sanitize(path));
        self.tables.insert(path.to_string(), alias.clone());
        alias
    }

    /// Alias for a data column at `path` (empty path = root).
    pub fn column_alias(&mut self, path: &str, column: &str) -> String {
        self.role_alias(path, column, AliasRole::Data)
    }

    /// Alias for the qualifier (key/index) column of `path`.
    pub fn key_alias(&mut self, path: &str) -> String {
        self.role_alias(path, "key", AliasRole::Key)
    }

    fn role_alias(&mut self, path: &str, column: &str, role: AliasRole) -> String {
        let memo_key = (path.to_string(), column.to_string(), role);
        if let Some(existing) = self.columns.get(&memo_key) {
            return existing.clone();
        }
        let base = if path.is_empty() {
            sanitize(column)
        } else {
            format!("{}__{}", sanitize(path), sanitize(column))
        };
        let alias = self.uniquify(base);
        self.columns.insert(memo_key, alias.clone());
        alias
    }

    fn uniquify(&mut self, base: String) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Path separators become `__` so the owning path stays readable inside an
/// alias; anything else outside `[a-z0-9_]` folds to `_`.
fn sanitize(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len());
    for c in identifier.chars() {
        if c == '.' {
            out.push_str("__");
        } else if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_lowercase());
        } else {
            out.push('_');
        }
    }
    out
}
