//! # zbin Core
//!
//! Low-level binary input primitives for container and bitstream parsers.
//!
//! This crate provides the building blocks that format parsers sit on:
//!
//! - [`reader`]: Cursor-based random-access file reader with endian-aware
//!   fixed-width reads
//! - [`cache`]: The single-window byte cache behind the reader
//! - [`bitstream`]: MSB-first bit cursors with Exp-Golomb codes
//! - [`order`]: Stored byte order to `reverse` flag conversion
//! - [`path`]: Drive/directory/name/extension decomposition
//! - [`config`]: Reader configuration
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Caller: container / codec parser (MP4 boxes, NAL units) │
//! ├────────────────────────────┬────────────────────────────┤
//! │ BinaryReader               │ BitsReader / BitsWriter    │
//! │   byte cursor, u8..u64,    │   bit cursor over a        │
//! │   strings, peeks           │   borrowed slice, ue/se    │
//! ├────────────────────────────┤                            │
//! │ FixedWindowCache           │                            │
//! │   one window, refill on    │                            │
//! │   miss                     │                            │
//! ├────────────────────────────┤                            │
//! │ File (Read + Seek)         │                            │
//! └────────────────────────────┴────────────────────────────┘
//! ```
//!
//! The two families never call each other; a caller that needs sub-byte
//! fields reads the bytes with [`BinaryReader`] and wraps them in a
//! [`BitsReader`].
//!
//! ## Example
//!
//! ```no_run
//! use zbin_core::{BinaryReader, BitsReader, ByteOrder, ReaderConfig};
//!
//! let mut reader = BinaryReader::from_path("stream.bin", ReaderConfig::default())?;
//! let length = reader.read_u16(ByteOrder::Big.needs_reverse())?;
//!
//! let mut header = vec![0u8; length as usize];
//! let got = reader.read(&mut header)?;
//!
//! let mut bits = BitsReader::new(&header[..got]);
//! let profile = bits.read_bits(8);
//! let id = bits.read_golomb();
//! println!("profile {profile}, id {id}");
//! # Ok::<(), zbin_core::ZbinError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod cache;
pub mod config;
pub mod error;
pub mod order;
pub mod path;
pub mod reader;

// Re-exports for convenience
pub use bitstream::{BitsReader, BitsWriter};
pub use cache::FixedWindowCache;
pub use config::{DEFAULT_WINDOW_CAPACITY, ReaderConfig};
pub use error::{Result, ZbinError};
pub use order::ByteOrder;
pub use path::PathParts;
pub use reader::BinaryReader;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitsReader, BitsWriter};
    pub use crate::config::ReaderConfig;
    pub use crate::error::{Result, ZbinError};
    pub use crate::order::ByteOrder;
    pub use crate::reader::BinaryReader;
}
