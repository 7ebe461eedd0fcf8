//! Byte-order helpers.
//!
//! Every fixed-width read on [`BinaryReader`](crate::reader::BinaryReader)
//! takes a raw `reverse` flag meaning "swap relative to the host".
//! [`ByteOrder`] lets callers state the order the data was stored in and
//! derive that flag instead.

/// Byte order of stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
    /// Whatever the host uses.
    #[default]
    Native,
}

impl ByteOrder {
    /// The host's byte order, resolved to `Big` or `Little`.
    pub const fn host() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// Whether values stored in this order must be swapped on this host.
    pub fn needs_reverse(self) -> bool {
        match self {
            Self::Native => false,
            order => order != Self::host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_never_reverses() {
        assert!(!ByteOrder::Native.needs_reverse());
        assert!(!ByteOrder::host().needs_reverse());
    }

    #[test]
    fn test_exactly_one_explicit_order_reverses() {
        assert_ne!(
            ByteOrder::Big.needs_reverse(),
            ByteOrder::Little.needs_reverse()
        );
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_little_endian_host() {
        assert!(ByteOrder::Big.needs_reverse());
        assert!(!ByteOrder::Little.needs_reverse());
    }
}
