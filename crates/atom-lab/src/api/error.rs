//! Error types for catalog loading and configuration.
//!
//! Stepping the simulation never fails: degenerate requests are declined
//! and logged instead. Only data coming from outside the crate (catalog and
//! config JSON) can produce an [`Error`].

use thiserror::Error;

/// Errors raised while loading catalogs or configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The JSON document could not be parsed.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An element record carries values the simulation cannot use.
    #[error("invalid element '{symbol}': {detail}")]
    InvalidElement {
        /// Symbol of the offending record (may be empty).
        symbol: String,
        /// Description of the problem.
        detail: String,
    },

    /// Two element records share a symbol.
    #[error("duplicate element symbol '{0}'")]
    DuplicateElement(String),

    /// A chemical formula could not be parsed.
    #[error("invalid formula '{formula}': {detail}")]
    InvalidFormula {
        /// The formula text as given.
        formula: String,
        /// Description of the problem.
        detail: String,
    },

    /// A target molecule references an element missing from the element catalog.
    #[error("molecule '{molecule}' requires unknown element '{symbol}'")]
    UnknownElement {
        /// Name of the target molecule.
        molecule: String,
        /// The unresolved element symbol.
        symbol: String,
    },

    /// A catalog that must not be empty has no records.
    #[error("{0} catalog is empty")]
    EmptyCatalog(&'static str),
}

impl Error {
    /// Creates an [`InvalidElement`](Error::InvalidElement) error.
    pub fn invalid_element(symbol: &str, detail: impl Into<String>) -> Self {
        Self::InvalidElement {
            symbol: symbol.to_string(),
            detail: detail.into(),
        }
    }

    /// Creates an [`InvalidFormula`](Error::InvalidFormula) error.
    pub fn invalid_formula(formula: &str, detail: impl Into<String>) -> Self {
        Self::InvalidFormula {
            formula: formula.to_string(),
            detail: detail.into(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::invalid_formula("H2o", "unexpected 'o'");
        assert_eq!(err.to_string(), "invalid formula 'H2o': unexpected 'o'");

        let err = Error::UnknownElement {
            molecule: "Water".into(),
            symbol: "Xx".into(),
        };
        assert!(err.to_string().contains("Xx"));
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
