//! Command implementations for zbin CLI.

pub mod dump;
pub mod golomb;
pub mod info;
pub mod read;

pub use dump::cmd_dump;
pub use golomb::{GolombOptions, cmd_golomb};
pub use info::cmd_info;
pub use read::{FieldKind, cmd_read, cmd_str};
