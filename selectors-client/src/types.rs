//! Directory data model and the client-side result of an operation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A signature mapping as stored by the directory service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub text_signature: String,
    pub hex_signature: String,
    /// Raw selector bytes, rendered by the service as a string.
    pub bytes_signature: String,
}

/// One page of search results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<SignatureRecord>,
}

impl SearchResponse {
    /// Only the first page is used; `count` stays the service total.
    pub fn into_outcome(self) -> Outcome {
        if self.count == 0 || self.results.is_empty() {
            Outcome::NoMatches
        } else {
            Outcome::Matches {
                count: self.count,
                records: self.results,
            }
        }
    }
}

/// What a successful lookup or register produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoMatches,
    Matches {
        records: Vec<SignatureRecord>,
        count: u64,
    },
    Created(SignatureRecord),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Resolve a hex selector to text signatures.
    #[default]
    Decode,
    /// Submit a new text signature.
    Add,
}

impl Mode {
    pub fn toggle(self) -> Self {
        match self {
            Mode::Decode => Mode::Add,
            Mode::Add => Mode::Decode,
        }
    }

    /// Label of the submit action.
    pub fn action_label(self) -> &'static str {
        match self {
            Mode::Decode => "Decode",
            Mode::Add => "Add",
        }
    }

    /// Shown while a request of this mode is pending.
    pub fn pending_label(self) -> &'static str {
        match self {
            Mode::Decode => "Decoding...",
            Mode::Add => "Adding...",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Decode => "0xa9059cbb",
            Mode::Add => "transfer(address,uint256)",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Decode => f.write_str("decode"),
            Mode::Add => f.write_str("add"),
        }
    }
}
