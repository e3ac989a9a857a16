//! selectors-client: decode and register Ethereum function selectors
//!
//! This crate provides:
//! - Validated hex and text signature types
//! - A `SignatureDirectory` seam with an HTTP implementation for the public directory
//! - A client session that keeps at most one request in flight
//! - Display panels for results, errors and the static help content
//! - Local Keccak-256 selector hashing

pub mod directory;
pub mod display;
pub mod error;
pub mod help;
pub mod selector;
pub mod session;
pub mod types;
pub mod validation;

pub use directory::{HttpDirectory, SignatureDirectory};
pub use display::{Panel, PanelBody, Row};
pub use error::{ClientError, ClientResult};
pub use help::{HelpEntry, HelpPanel, HELP_ENTRIES};
pub use selector::selector_of;
pub use session::{lookup, register, Request, Session};
pub use types::{Mode, Outcome, SearchResponse, SignatureRecord};
pub use validation::{HexSignature, TextSignature};

/// Public signature directory used when nothing else is configured.
pub const DEFAULT_DIRECTORY_URL: &str = "https://www.4byte.directory/api/v1";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
