//! Two-part function summaries.

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, AtlasResult};

/// Reserved delimiter separating the two parts of an oracle response.
pub const SUMMARY_DELIMITER: &str = "---";

/// A two-part natural-language summary of one function: a business-intent
/// abstract and an implementation-detail abstract.
///
/// Produced once per symbol per run by the summarisation oracle; write-once
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Overall purpose and intended use, in abstract terms.
    pub business: String,

    /// Technical description of how the code works internally.
    pub implementation: String,
}

impl Summary {
    pub fn new(business: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            business: business.into(),
            implementation: implementation.into(),
        }
    }

    /// Parses a raw oracle response.
    ///
    /// The response must contain the `---` delimiter exactly once; anything
    /// else is an [`AtlasError::OracleResponseMalformed`] for the given
    /// symbol. Both parts are trimmed.
    pub fn parse(symbol: &str, text: &str) -> AtlasResult<Self> {
        let occurrences = text.matches(SUMMARY_DELIMITER).count();
        if occurrences != 1 {
            return Err(AtlasError::OracleResponseMalformed {
                symbol: symbol.to_string(),
                occurrences,
            });
        }

        let (business, implementation) = text
            .split_once(SUMMARY_DELIMITER)
            .expect("delimiter occurrence already counted");

        Ok(Self {
            business: business.trim().to_string(),
            implementation: implementation.trim().to_string(),
        })
    }

    /// Renders the summary back into delimiter-separated text.
    pub fn to_text(&self) -> String {
        format!("{}\n{}\n{}", self.business, SUMMARY_DELIMITER, self.implementation)
    }
}
