//! Golomb command implementation.

use std::path::PathBuf;
use zbin_core::{BinaryReader, BitsReader, ReaderConfig};

/// Options for Exp-Golomb decoding.
pub struct GolombOptions {
    pub offset: u64,
    pub length: usize,
    pub skip_bits: u64,
    pub count: usize,
    pub signed: bool,
}

/// Decode `count` codes from `data`, returning each value with the bit
/// position it started at, and whether the buffer ran out.
fn decode(data: &[u8], skip_bits: u64, count: usize, signed: bool) -> (Vec<(u64, String)>, bool) {
    let mut bits = BitsReader::new(data);
    bits.skip_bits(skip_bits);

    // Every code takes at least one bit.
    let bound = data.len().saturating_mul(8).saturating_add(1);
    let mut values = Vec::with_capacity(count.min(bound));
    for _ in 0..count {
        if bits.is_exhausted() {
            return (values, true);
        }
        let at = bits.position();
        let value = if signed {
            bits.read_signed_golomb().to_string()
        } else {
            bits.read_golomb().to_string()
        };
        values.push((at, value));
    }
    // Saturated reads look like zeros, so an exhausted reader is the only
    // hint that the last code may have been cut short.
    (values, bits.is_exhausted())
}

pub fn cmd_golomb(
    file: &PathBuf,
    config: ReaderConfig,
    options: &GolombOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BinaryReader::from_path(file, config)?;
    reader.set_cursor(options.offset)?;

    let length = usize::try_from(reader.remaining())
        .map_or(options.length, |remaining| options.length.min(remaining));
    let mut data = vec![0u8; length];
    let n = reader.read(&mut data)?;
    data.truncate(n);
    tracing::debug!(offset = options.offset, bytes = n, "loaded bit buffer");

    let (values, exhausted) = decode(&data, options.skip_bits, options.count, options.signed);
    let kind = if options.signed { "se" } else { "ue" };
    for (i, (at, value)) in values.iter().enumerate() {
        println!("bit {:>6}: {}[{}] = {}", at, kind, i, value);
    }
    if exhausted {
        println!("(bit buffer exhausted; trailing values may be truncated)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_unsigned() {
        // 1 | 010 | 00111 | padding
        let data = [0b1010_0011, 0b1000_0000];
        let (values, exhausted) = decode(&data, 0, 3, false);
        assert_eq!(
            values,
            vec![(0, "0".to_string()), (1, "1".to_string()), (4, "6".to_string())]
        );
        assert!(!exhausted);
    }

    #[test]
    fn test_decode_signed_with_skip() {
        // 4 skipped bits, then 010 (se=1) and 011 (se=-1)
        let data = [0b1111_0100, 0b1100_0000];
        let (values, _) = decode(&data, 4, 2, true);
        assert_eq!(values, vec![(4, "1".to_string()), (7, "-1".to_string())]);
    }

    #[test]
    fn test_decode_huge_count() {
        let (values, exhausted) = decode(&[0b1000_0000], 0, usize::MAX, false);
        assert!(exhausted);
        assert_eq!(values[0], (0, "0".to_string()));
        assert!(values.len() <= 9);
    }

    #[test]
    fn test_decode_runs_out() {
        let data = [0b1000_0000];
        let (values, exhausted) = decode(&data, 0, 20, false);
        assert!(exhausted);
        assert!(values.len() < 20);
    }
}
