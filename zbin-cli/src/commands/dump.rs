//! Dump command implementation.

use std::path::PathBuf;
use zbin_core::{BinaryReader, ReaderConfig};

const BYTES_PER_LINE: usize = 16;

/// Format one hex dump line: offset, hex bytes, printable ASCII.
fn format_line(offset: u64, bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(BYTES_PER_LINE * 3 + 1);
    for i in 0..BYTES_PER_LINE {
        if i == BYTES_PER_LINE / 2 {
            hex.push(' ');
        }
        match bytes.get(i) {
            Some(b) => hex.push_str(&format!("{:02x} ", b)),
            None => hex.push_str("   "),
        }
    }

    let ascii: String = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        })
        .collect();

    format!("{:08x}  {} |{}|", offset, hex, ascii)
}

pub fn cmd_dump(
    file: &PathBuf,
    config: ReaderConfig,
    offset: u64,
    length: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BinaryReader::from_path(file, config)?;
    let start = reader.set_cursor(offset)?;
    let end = start.saturating_add(length).min(reader.file_size());

    let mut line = [0u8; BYTES_PER_LINE];
    while reader.cursor() < end {
        let want = ((end - reader.cursor()) as usize).min(BYTES_PER_LINE);
        let at = reader.cursor();
        let n = reader.read(&mut line[..want])?;
        if n == 0 {
            break;
        }
        println!("{}", format_line(at, &line[..n]));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_line() {
        let bytes: Vec<u8> = (0x41..0x51).collect();
        let line = format_line(0x10, &bytes);
        assert!(line.starts_with("00000010  41 42"));
        assert!(line.ends_with("|ABCDEFGHIJKLMNOP|"));
    }

    #[test]
    fn test_format_partial_line() {
        let line = format_line(0, &[0x00, 0x7F, b'z']);
        assert!(line.starts_with("00000000  00 7f 7a "));
        assert!(line.ends_with("|..z|"));
    }
}
