//! Bind-marker allocation.
//!
//! Three interchangeable placeholder styles, selected per dialect:
//! indexed (`$1`, `$2`, ...), anonymous (`?` for every parameter) and named
//! (`:p0`, `:p1total`, ...). A [`BindMarkers`] instance is created per
//! statement and never shared across statements; the only mutable state is an
//! atomically incremented counter local to the instance.

use std::sync::atomic::{AtomicU32, Ordering};

use super::errors::DialectError;

/// Minimum characters reserved for the counter inside a named marker's
/// length budget, so that hints can never squeeze the uniqueness counter
/// out. The reserve grows with the counter's actual width, shrinking the
/// hint budget instead of overrunning the maximum length.
const COUNTER_RESERVE: usize = 2;

/// A placeholder in SQL text plus the identifier the execution layer binds
/// the value by. The identifier is absent for the anonymous style, whose
/// markers are positional only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMarker {
    pub placeholder: String,
    pub identifier: Option<String>,
}

/// Placeholder style of a dialect. Validated at construction; creating
/// [`BindMarkers`] from a validated strategy cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindMarkerStrategy {
    /// `prefix + counter`, counter starting at `begin_with`.
    Indexed { prefix: String, begin_with: u32 },
    /// One fixed placeholder reused for every parameter.
    Anonymous { placeholder: String },
    /// `prefix + name_prefix + counter [+ hint]`, the generated name capped
    /// at `max_length` characters to satisfy database identifier limits.
    Named {
        prefix: String,
        name_prefix: String,
        max_length: usize,
    },
}

impl BindMarkerStrategy {
    pub fn indexed(prefix: impl Into<String>, begin_with: u32) -> Result<Self, DialectError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(DialectError::bind_marker_config(
                "indexed marker prefix must not be empty",
            ));
        }
        Ok(BindMarkerStrategy::Indexed { prefix, begin_with })
    }

    pub fn anonymous(placeholder: impl Into<String>) -> Result<Self, DialectError> {
        let placeholder = placeholder.into();
        if placeholder.is_empty() {
            return Err(DialectError::bind_marker_config(
                "anonymous marker placeholder must not be empty",
            ));
        }
        Ok(BindMarkerStrategy::Anonymous { placeholder })
    }

    /// A named strategy must leave room for the uniqueness counter after the
    /// name prefix, otherwise distinct markers could render identical names.
    pub fn named(
        prefix: impl Into<String>,
        name_prefix: impl Into<String>,
        max_length: usize,
    ) -> Result<Self, DialectError> {
        let prefix = prefix.into();
        let name_prefix = name_prefix.into();
        if prefix.is_empty() {
            return Err(DialectError::bind_marker_config(
                "named marker prefix must not be empty",
            ));
        }
        if name_prefix.len() + COUNTER_RESERVE > max_length {
            return Err(DialectError::bind_marker_config(format!(
                "name prefix `{}` leaves no room for the counter within max length {}",
                name_prefix, max_length
            )));
        }
        Ok(BindMarkerStrategy::Named {
            prefix,
            name_prefix,
            max_length,
        })
    }

    /// Whether markers of this style can be re-bound by name/index. Anonymous
    /// markers are positional only.
    pub fn identifiable_placeholders(&self) -> bool {
        !matches!(self, BindMarkerStrategy::Anonymous { .. })
    }

    /// Create a fresh per-statement allocator.
    pub fn create_markers(&self) -> BindMarkers {
        BindMarkers {
            strategy: self.clone(),
            counter: AtomicU32::new(0),
        }
    }
}

/// Per-statement marker sequence. Each call returns a marker distinct from
/// all previously returned markers of the same instance, except under the
/// anonymous strategy where all placeholders render the same text.
#[derive(Debug)]
pub struct BindMarkers {
    strategy: BindMarkerStrategy,
    counter: AtomicU32,
}

impl BindMarkers {
    pub fn next(&self) -> BindMarker {
        self.allocate(None)
    }

    /// Allocate a marker with a human-readable hint (typically the source
    /// property name). Indexed and anonymous strategies ignore the hint.
    pub fn next_with_hint(&self, hint: &str) -> BindMarker {
        self.allocate(Some(hint))
    }

    pub fn identifiable_placeholders(&self) -> bool {
        self.strategy.identifiable_placeholders()
    }

    fn allocate(&self, hint: Option<&str>) -> BindMarker {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        match &self.strategy {
            BindMarkerStrategy::Indexed { prefix, begin_with } => {
                let index = begin_with + n;
                BindMarker {
                    placeholder: format!("{}{}", prefix, index),
                    identifier: Some(index.to_string()),
                }
            }
            BindMarkerStrategy::Anonymous { placeholder } => BindMarker {
                placeholder: placeholder.clone(),
                identifier: None,
            },
            BindMarkerStrategy::Named {
                prefix,
                name_prefix,
                max_length,
            } => {
                let counter = n.to_string();
                let reserve = counter.len().max(COUNTER_RESERVE);
                let budget = max_length.saturating_sub(name_prefix.len() + reserve);
                let hint: String = hint
                    .unwrap_or("")
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .take(budget)
                    .collect();
                let name = format!("{}{}{}", name_prefix, counter, hint);
                BindMarker {
                    placeholder: format!("{}{}", prefix, name),
                    identifier: Some(name),
                }
            }
        }
    }
}
