//! Read and str command implementations.

use clap::ValueEnum;
use std::path::PathBuf;
use zbin_core::{BinaryReader, ByteOrder, ReaderConfig};

/// Integer field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    S8,
    /// Unsigned 16-bit
    U16,
    /// Signed 16-bit
    S16,
    /// Unsigned 32-bit
    U32,
    /// Signed 32-bit
    S32,
    /// Unsigned 64-bit
    U64,
    /// Signed 64-bit
    S64,
    /// Unsigned, `--width` bytes
    Un,
    /// Signed, `--width` bytes
    Sn,
}

impl FieldKind {
    /// Size of one field in bytes.
    fn size(self, width: u16) -> u64 {
        match self {
            Self::U8 | Self::S8 => 1,
            Self::U16 | Self::S16 => 2,
            Self::U32 | Self::S32 => 4,
            Self::U64 | Self::S64 => 8,
            Self::Un | Self::Sn => u64::from(width),
        }
    }
}

/// Read one field and render it as `decimal (0xhex)`.
fn read_field(
    reader: &mut BinaryReader,
    kind: FieldKind,
    width: u16,
    reverse: bool,
) -> zbin_core::Result<String> {
    let rendered = match kind {
        FieldKind::U8 => {
            let v = reader.read_u8()?;
            format!("{} ({:#04x})", v, v)
        }
        FieldKind::S8 => {
            let v = reader.read_s8()?;
            format!("{} ({:#04x})", v, v)
        }
        FieldKind::U16 => {
            let v = reader.read_u16(reverse)?;
            format!("{} ({:#06x})", v, v)
        }
        FieldKind::S16 => {
            let v = reader.read_s16(reverse)?;
            format!("{} ({:#06x})", v, v)
        }
        FieldKind::U32 => {
            let v = reader.read_u32(reverse)?;
            format!("{} ({:#010x})", v, v)
        }
        FieldKind::S32 => {
            let v = reader.read_s32(reverse)?;
            format!("{} ({:#010x})", v, v)
        }
        FieldKind::U64 => {
            let v = reader.read_u64(reverse)?;
            format!("{} ({:#018x})", v, v)
        }
        FieldKind::S64 => {
            let v = reader.read_s64(reverse)?;
            format!("{} ({:#018x})", v, v)
        }
        FieldKind::Un => {
            let v = reader.read_un(width, reverse)?;
            format!("{} ({:#x})", v, v)
        }
        FieldKind::Sn => {
            let v = reader.read_sn(width, reverse)?;
            format!("{} ({:#x})", v, v)
        }
    };
    Ok(rendered)
}

pub fn cmd_read(
    file: &PathBuf,
    config: ReaderConfig,
    offset: u64,
    kind: FieldKind,
    width: u16,
    order: ByteOrder,
    count: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(kind, FieldKind::Un | FieldKind::Sn) && !(1..=8).contains(&width) {
        return Err(format!("width must be between 1 and 8 bytes, got {}", width).into());
    }

    let mut reader = BinaryReader::from_path(file, config)?;
    reader.set_cursor(offset)?;
    let reverse = order.needs_reverse();
    let size = kind.size(width);

    for _ in 0..count {
        let at = reader.cursor();
        if reader.remaining() < size {
            tracing::warn!(offset = at, size, "field runs past end of file");
            println!("{:#010x}: <end of file>", at);
            break;
        }
        println!("{:#010x}: {}", at, read_field(&mut reader, kind, width, reverse)?);
    }

    Ok(())
}

pub fn cmd_str(
    file: &PathBuf,
    config: ReaderConfig,
    offset: u64,
    max: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BinaryReader::from_path(file, config)?;
    let start = reader.set_cursor(offset)?;
    let text = reader.read_str(max)?;

    println!("{:#010x}: {:?}", start, text);
    println!("consumed {} bytes", reader.cursor() - start);
    Ok(())
}
