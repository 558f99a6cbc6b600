//! Question listing orders and the derived activity timestamp.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// The three retrieval orders for question listings.
///
/// Parsed from an external string key with [`FromStr`]; an unrecognized key
/// is a [`CoreError::Validation`], never a silent default. Callers that want
/// "missing key means newest" spell it with [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionOrder {
    /// Most recently asked first.
    #[default]
    Newest,
    /// Most recent activity first: latest answer, or the ask date for
    /// questions without answers.
    Active,
    /// Only questions with zero answers, most recently asked first.
    Unanswered,
}

impl QuestionOrder {
    /// Stable string key, matching the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionOrder::Newest => "newest",
            QuestionOrder::Active => "active",
            QuestionOrder::Unanswered => "unanswered",
        }
    }
}

impl FromStr for QuestionOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(QuestionOrder::Newest),
            "active" => Ok(QuestionOrder::Active),
            "unanswered" => Ok(QuestionOrder::Unanswered),
            other => Err(CoreError::Validation(format!(
                "Unknown question order '{other}'. Must be one of: newest, active, unanswered"
            ))),
        }
    }
}

/// Latest activity on a question: the newest answer timestamp, or the ask
/// date when no answer is newer (or none exists).
///
/// Computed once over already-loaded answer timestamps during aggregation;
/// this is deliberately not a lazily re-queried property.
pub fn most_recent_activity<I>(asked_at: Timestamp, answer_times: I) -> Timestamp
where
    I: IntoIterator<Item = Timestamp>,
{
    answer_times
        .into_iter()
        .max()
        .map_or(asked_at, |latest| latest.max(asked_at))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
