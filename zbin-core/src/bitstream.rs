//! Bit-level cursors over borrowed byte buffers.
//!
//! [`BitsReader`] and [`BitsWriter`] walk a caller-owned slice one bit at a
//! time, including Exp-Golomb universal codes as found in video bitstream
//! headers (parameter sets and slice headers).
//!
//! # Bit Ordering
//!
//! Both cursors are MSB-first: bit 7 of each byte comes first in the
//! logical stream, and multi-bit values are accumulated most significant
//! bit first.
//!
//! # Saturation
//!
//! Neither cursor ever fails. Reading past the end yields zero bits without
//! moving the cursor, and writing past the end is a no-op. Callers decoding
//! untrusted data should check [`BitsReader::is_exhausted`] afterwards to
//! tell a genuine zero from a truncated stream.
//!
//! # Example
//!
//! ```
//! use zbin_core::bitstream::{BitsReader, BitsWriter};
//!
//! let mut buf = [0u8; 2];
//! {
//!     let mut writer = BitsWriter::new(&mut buf);
//!     writer.write_bits(3, 0b101);
//!     writer.write_golomb(6); // 00111
//! }
//! assert_eq!(buf, [0b1010_0111, 0]);
//!
//! let mut reader = BitsReader::new(&buf);
//! assert_eq!(reader.read_bits(3), 0b101);
//! assert_eq!(reader.read_golomb(), 6);
//! ```

/// An MSB-first bit reader over a borrowed slice.
#[derive(Debug, Clone)]
pub struct BitsReader<'a> {
    /// Borrowed input.
    data: &'a [u8],
    /// Capacity in bits.
    size_bits: u64,
    /// Next bit to read.
    position: u64,
}

impl<'a> BitsReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            size_bits: data.len() as u64 * 8,
            position: 0,
        }
    }

    /// Get the underlying slice.
    pub fn get_ref(&self) -> &'a [u8] {
        self.data
    }

    /// Current bit position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Capacity in bits.
    pub fn size_bits(&self) -> u64 {
        self.size_bits
    }

    /// Bits left before the end of the buffer.
    pub fn remaining_bits(&self) -> u64 {
        self.size_bits - self.position
    }

    /// Whether every bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.size_bits
    }

    /// Read one bit, or 0 without advancing once the buffer is exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> u8 {
        if self.position >= self.size_bits {
            return 0;
        }

        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8) as u8;
        self.position += 1;
        (byte >> shift) & 1
    }

    /// Read `count` bits, first bit read ending up most significant.
    ///
    /// Only the last 64 bits survive when `count` exceeds 64. Reading 0
    /// bits returns 0 and does not move the cursor.
    pub fn read_bits(&mut self, count: u32) -> u64 {
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | u64::from(self.read_bit());
        }
        value
    }

    /// Decode an unsigned order-0 Exp-Golomb code, ue(v).
    ///
    /// Counts leading zero bits up to the first 1-bit, then reads that many
    /// bits of suffix: `value = 2^n - 1 + suffix`. If the buffer runs out
    /// before the terminating 1-bit, counting stops there and the suffix is
    /// made of saturated zero bits. Prefixes of 64 or more zeros cannot be
    /// represented and decode to `u64::MAX`.
    pub fn read_golomb(&mut self) -> u64 {
        let mut leading_zeros = 0u32;
        while self.read_bit() == 0 && self.position < self.size_bits {
            leading_zeros += 1;
        }

        let suffix = self.read_bits(leading_zeros);
        if leading_zeros >= 64 {
            return u64::MAX;
        }
        ((1u64 << leading_zeros) - 1) + suffix
    }

    /// Decode a signed Exp-Golomb code, se(v).
    ///
    /// Code numbers map to 0, 1, -1, 2, -2, ... in that order.
    pub fn read_signed_golomb(&mut self) -> i64 {
        let code = self.read_golomb();
        let magnitude = i64::try_from(code / 2 + code % 2).unwrap_or(i64::MAX);
        if code % 2 == 1 { magnitude } else { -magnitude }
    }

    /// Skip `count` bits, stopping at the end of the buffer.
    pub fn skip_bits(&mut self, count: u64) {
        self.position = self.position.saturating_add(count).min(self.size_bits);
    }

    /// Skip to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        self.position = self.position.next_multiple_of(8).min(self.size_bits);
    }
}

/// An MSB-first bit writer over a borrowed mutable slice.
///
/// Writes modify bits in place; bits that are not written keep whatever
/// value the buffer already held.
#[derive(Debug)]
pub struct BitsWriter<'a> {
    /// Borrowed output.
    data: &'a mut [u8],
    /// Capacity in bits.
    size_bits: u64,
    /// Next bit to write.
    position: u64,
}

impl<'a> BitsWriter<'a> {
    /// Create a writer positioned at the first bit of `data`.
    pub fn new(data: &'a mut [u8]) -> Self {
        let size_bits = data.len() as u64 * 8;
        Self {
            data,
            size_bits,
            position: 0,
        }
    }

    /// Current bit position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Capacity in bits.
    pub fn size_bits(&self) -> u64 {
        self.size_bits
    }

    /// Bits left before the end of the buffer.
    pub fn remaining_bits(&self) -> u64 {
        self.size_bits - self.position
    }

    /// Number of bytes touched so far, counting a partial final byte.
    pub fn bytes_written(&self) -> usize {
        self.position.div_ceil(8) as usize
    }

    /// Write the low bit of `value`; a no-op once the buffer is full.
    #[inline]
    pub fn write_bit(&mut self, value: u8) {
        if self.position >= self.size_bits {
            return;
        }

        let index = (self.position / 8) as usize;
        let shift = 7 - (self.position % 8) as u8;
        let byte = self.data[index];
        self.data[index] = (byte & !(1 << shift)) | ((value & 1) << shift);
        self.position += 1;
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// Bit positions above 63 are written as zeros.
    pub fn write_bits(&mut self, count: u32, value: u64) {
        for i in (0..count).rev() {
            let bit = value.checked_shr(i).unwrap_or(0) & 1;
            self.write_bit(bit as u8);
        }
    }

    /// Encode `value` as an unsigned order-0 Exp-Golomb code, ue(v).
    pub fn write_golomb(&mut self, value: u64) {
        self.write_golomb_code(u128::from(value) + 1);
    }

    /// Encode `value` as a signed Exp-Golomb code, se(v).
    pub fn write_signed_golomb(&mut self, value: i64) {
        let value = i128::from(value);
        let code = if value > 0 { 2 * value - 1 } else { -2 * value };
        self.write_golomb_code(code as u128 + 1);
    }

    /// Write `code` (the code number plus one) as zeros then its binary form.
    fn write_golomb_code(&mut self, code: u128) {
        let len = 128 - code.leading_zeros();
        for _ in 1..len {
            self.write_bit(0);
        }
        for i in (0..len).rev() {
            self.write_bit(((code >> i) & 1) as u8);
        }
    }

    /// Pad with zero bits up to the next byte boundary.
    pub fn align_to_byte(&mut self) {
        while self.position % 8 != 0 && self.position < self.size_bits {
            self.write_bit(0);
        }
    }
}
