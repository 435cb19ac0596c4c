//! Identifier - Composite identifiers for relationships without a remote ID
//!
//! Several controller objects are addressed only by a tuple of names. The
//! tuple is stored as one delimiter-joined string; these helpers check the
//! arity on the way in and refuse parts that would make the split ambiguous.

/// Default delimiter between natural keys
pub const DELIMITER: &str = "~";

/// Delimiter between a gateway and one of its domains
pub const PAIR_DELIMITER: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("invalid identifier '{id}': expected {expected} parts separated by '{delimiter}', got {got}")]
    Arity {
        id: String,
        delimiter: String,
        expected: usize,
        got: usize,
    },

    #[error("invalid identifier '{id}': part {index} is empty")]
    EmptyPart { id: String, index: usize },

    #[error("identifier part '{part}' must not contain '{delimiter}'")]
    DelimiterInPart { part: String, delimiter: String },
}

/// Join exactly `N` natural keys with `delimiter`
pub fn join<const N: usize>(parts: [&str; N], delimiter: &str) -> Result<String, IdentifierError> {
    for (index, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(IdentifierError::EmptyPart {
                id: parts.join(delimiter),
                index,
            });
        }
        if part.contains(delimiter) {
            return Err(IdentifierError::DelimiterInPart {
                part: part.to_string(),
                delimiter: delimiter.to_string(),
            });
        }
    }
    Ok(parts.join(delimiter))
}

/// Split `id` into exactly `N` non-empty natural keys
pub fn split<const N: usize>(id: &str, delimiter: &str) -> Result<[String; N], IdentifierError> {
    let parts: Vec<String> = id.split(delimiter).map(str::to_string).collect();
    let got = parts.len();

    let parts: [String; N] = parts.try_into().map_err(|_| IdentifierError::Arity {
        id: id.to_string(),
        delimiter: delimiter.to_string(),
        expected: N,
        got,
    })?;

    if let Some(index) = parts.iter().position(String::is_empty) {
        return Err(IdentifierError::EmptyPart {
            id: id.to_string(),
            index,
        });
    }
    Ok(parts)
}

/// Identifier for singleton configuration owned by a controller
pub fn controller_id(controller_ip: &str) -> String {
    controller_ip.replace('.', "-")
}
