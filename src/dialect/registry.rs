//! Dialect resolution.
//!
//! A registry holds an explicit ordered list of providers; resolution walks
//! the list once and the first provider recognizing the connection's product
//! name wins. The caller owns the registry and its registration order;
//! there is no process-global singleton. Custom providers registered with
//! [`DialectRegistry::register_first`] take precedence over the built-ins.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::builtin;
use super::errors::DialectError;
use super::Dialect;

lazy_static! {
    static ref POSTGRES: Arc<Dialect> = Arc::new(builtin::postgres());
    static ref MYSQL: Arc<Dialect> = Arc::new(builtin::mysql());
    static ref ORACLE: Arc<Dialect> = Arc::new(builtin::oracle());
    static ref ANSI: Arc<Dialect> = Arc::new(builtin::ansi());
}

/// A registrable predicate-plus-descriptor pair consulted at resolution time.
pub trait DialectProvider: Send + Sync {
    /// The dialect for a connection metadata name, if this provider
    /// recognizes it.
    fn dialect_for(&self, product_name: &str) -> Option<Arc<Dialect>>;
}

/// Provider matching on case-insensitive substrings of the product name.
pub struct NameMatchProvider {
    patterns: Vec<String>,
    dialect: Arc<Dialect>,
}

impl NameMatchProvider {
    pub fn new(patterns: &[&str], dialect: Arc<Dialect>) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
            dialect,
        }
    }
}

impl DialectProvider for NameMatchProvider {
    fn dialect_for(&self, product_name: &str) -> Option<Arc<Dialect>> {
        let name = product_name.to_lowercase();
        self.patterns
            .iter()
            .any(|p| name.contains(p))
            .then(|| Arc::clone(&self.dialect))
    }
}

/// Ordered provider list; first match wins.
#[derive(Default)]
pub struct DialectRegistry {
    providers: Vec<Box<dyn DialectProvider>>,
}

impl DialectRegistry {
    /// Empty registry with no providers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in providers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NameMatchProvider::new(
            &["postgres"],
            Arc::clone(&POSTGRES),
        )));
        registry.register(Box::new(NameMatchProvider::new(
            &["mysql", "mariadb"],
            Arc::clone(&MYSQL),
        )));
        registry.register(Box::new(NameMatchProvider::new(
            &["oracle"],
            Arc::clone(&ORACLE),
        )));
        registry.register(Box::new(NameMatchProvider::new(
            &["sqlite", "h2", "hsql", "ansi"],
            Arc::clone(&ANSI),
        )));
        registry
    }

    /// Append a provider after all currently registered ones.
    pub fn register(&mut self, provider: Box<dyn DialectProvider>) {
        self.providers.push(provider);
    }

    /// Register a provider ahead of all currently registered ones, so it is
    /// consulted before the built-ins.
    pub fn register_first(&mut self, provider: Box<dyn DialectProvider>) {
        self.providers.insert(0, provider);
    }

    /// Resolve a connection metadata name to a dialect.
    pub fn resolve(&self, product_name: &str) -> Result<Arc<Dialect>, DialectError> {
        for provider in &self.providers {
            if let Some(dialect) = provider.dialect_for(product_name) {
                log::debug!("resolved `{}` to dialect `{}`", product_name, dialect.name);
                return Ok(dialect);
            }
        }
        Err(DialectError::DialectNotFound {
            name: product_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_builtins_case_insensitively() {
        let registry = DialectRegistry::with_builtins();
        assert_eq!(registry.resolve("PostgreSQL 16.2").unwrap().name, "postgresql");
        assert_eq!(registry.resolve("MySQL").unwrap().name, "mysql");
        assert_eq!(registry.resolve("MariaDB 11").unwrap().name, "mysql");
        assert_eq!(registry.resolve("Oracle Database").unwrap().name, "oracle");
        assert_eq!(registry.resolve("SQLite 3").unwrap().name, "ansi");
    }

    #[test]
    fn unknown_product_name_is_an_error() {
        let registry = DialectRegistry::with_builtins();
        let err = registry.resolve("CockroachLabs Cloud").unwrap_err();
        assert_eq!(
            err,
            DialectError::DialectNotFound {
                name: "CockroachLabs Cloud".to_string()
            }
        );
    }

    #[test]
    fn custom_provider_registered_first_takes_precedence() {
        let mut registry = DialectRegistry::with_builtins();
        let mut custom = builtin::postgres();
        custom.name = "cockroach".to_string();
        registry.register_first(Box::new(NameMatchProvider::new(
            &["postgres", "cockroach"],
            Arc::new(custom),
        )));
        // both the custom provider and the built-in match this name
        assert_eq!(registry.resolve("PostgreSQL").unwrap().name, "cockroach");
    }
}
