//! URL helpers shared by the scanner and the trust engine.
//!
//! Everything here is lenient: unparsable input yields `None` rather than an
//! error, since callers treat a bad URL the same as a missing one.

mod host;
mod path;

pub use host::{hostname, is_https};
pub use path::{filename_from_url_path, join_link, parent_directory};
