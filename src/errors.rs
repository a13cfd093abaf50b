// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.

use std::fmt;

/// Error indicating the dataset could not be loaded
#[derive(Debug)]
pub struct DatasetNotFoundError {
    pub foods_path: String,
    pub synonyms_path: String,
    pub reason: String,
}

impl fmt::Display for DatasetNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not load the dataset: {}\n\n\
             Suggestion: Point mamma at the food and synonym tables.\n\
             Example: mamma --foods {} --synonyms {} search 커피\n\
             Or set foods_path / synonyms_path in .mammarc.toml",
            self.reason, self.foods_path, self.synonyms_path
        )
    }
}

impl std::error::Error for DatasetNotFoundError {}

/// Error indicating no food matched the query
#[derive(Debug)]
pub struct NoResultsError {
    pub query: String,
}

impl fmt::Display for NoResultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", suggestions::no_results_suggestion(&self.query))
    }
}

impl std::error::Error for NoResultsError {}

/// Error indicating a verdict tab name was not recognized
#[derive(Debug)]
pub struct UnknownVerdictError {
    pub value: String,
}

impl fmt::Display for UnknownVerdictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown verdict: '{}'\n\n\
             Accepted values: all, safe, conditional, caution, avoid\n\
             Example: mamma search 커피 --verdict caution",
            self.value
        )
    }
}

impl std::error::Error for UnknownVerdictError {}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Get suggestion for no results
    pub fn no_results_suggestion(query: &str) -> String {
        format!(
            "No foods found for '{}'\n\n\
             Try:\n\
             - A shorter name (e.g. just the main ingredient)\n\
             - Checking the hints: mamma hints \"{}\"\n\
             - Asking the advisory service: mamma advise \"{}\"",
            query, query, query
        )
    }

    /// Get suggestion for an unknown food in `show`
    pub fn unknown_food_suggestion(name: &str) -> String {
        format!(
            "No food named '{}' in the dataset\n\n\
             Search first to find the exact name:\n\
             $ mamma search \"{}\"",
            name, name
        )
    }
}
