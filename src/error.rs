//! Top-level error type for the load-and-route pipeline

use thiserror::Error;

use crate::design::DesignError;
use crate::file::FileError;

#[derive(Debug, Error)]
pub enum Error {
    /// Reading or parsing the design file
    #[error(transparent)]
    File(#[from] FileError),

    /// Building the design or routing a connector
    #[error(transparent)]
    Design(#[from] DesignError),
}

impl Error {
    /// Format the error for a terminal, with source context where available
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            Error::File(e) => e.format(source, filename),
            Error::Design(e) => match e.suggestions() {
                Some(names) if !names.is_empty() => {
                    format!("{}: {}\n  did you mean: {}?", filename, e, names.join(", "))
                }
                _ => format!("{}: {}", filename, e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_error_lists_suggestions() {
        let err = Error::from(DesignError::unknown_component(
            "Q3",
            vec!["Q1".to_string(), "Q2".to_string()],
        ));
        assert_eq!(
            err.format("", "chip.toml"),
            "chip.toml: lookup failed: unknown component 'Q3'\n  did you mean: Q1, Q2?"
        );
    }

    #[test]
    fn test_design_error_without_suggestions() {
        let err = Error::from(DesignError::UnknownVariable("gap".to_string()));
        assert_eq!(
            err.format("", "chip.toml"),
            "chip.toml: unknown design variable 'gap'"
        );
    }
}
