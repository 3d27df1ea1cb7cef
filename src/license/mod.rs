//! License identification.
//!
//! - [`spdx`] — turns a manifest's declared license (string, `{type}` object,
//!   array, flat AND/OR expression) into canonical identifiers.
//! - [`signatures`] — ordered table of known license texts used to recognize
//!   a package's license file.

pub mod signatures;
pub mod spdx;
