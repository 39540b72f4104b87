use super::errors::DialectError;

/// Escapes LIKE-pattern wildcards in user-supplied values.
///
/// The escape character is validated at construction: the wildcards
/// themselves and alphanumerics are disallowed, so an escaped pattern can
/// never be ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeEscaper {
    escape_character: char,
}

impl LikeEscaper {
    pub fn new(escape_character: char) -> Result<Self, DialectError> {
        if escape_character == '%'
            || escape_character == '_'
            || escape_character.is_ascii_alphanumeric()
        {
            return Err(DialectError::bind_marker_config(format!(
                "`{}` is not a valid LIKE escape character",
                escape_character
            )));
        }
        Ok(Self { escape_character })
    }

    pub fn escape_character(&self) -> char {
        self.escape_character
    }

    /// Escape `%`, `_` and the escape character itself in a value.
    pub fn escape(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            if c == '%' || c == '_' || c == self.escape_character {
                escaped.push(self.escape_character);
            }
            escaped.push(c);
        }
        escaped
    }
}

impl Default for LikeEscaper {
    fn default() -> Self {
        Self {
            escape_character: '\\',
        }
    }
}
