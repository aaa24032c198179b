//! Codec layer for compression and character-set handling.
//!
//! # Submodules
//!
//! - [`compression`][]: gzip sniffing with plain-text fallback
//! - [`charset`][]: conversion of line bytes into UTF-8

pub mod charset;
pub mod compression;
