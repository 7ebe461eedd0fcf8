//! Info command implementation.

use serde::Serialize;
use std::path::PathBuf;
use zbin_core::{BinaryReader, ReaderConfig};

/// JSON serializable file information.
#[derive(Debug, Serialize)]
struct FileInfoJson {
    path: String,
    size: u64,
    drive: String,
    dir: String,
    base_name: String,
    ext: String,
    window_capacity: usize,
}

pub fn cmd_info(
    file: &PathBuf,
    config: ReaderConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BinaryReader::from_path(file, config)?;
    let parts = reader.path_parts().cloned().unwrap_or_default();

    if json {
        let info = FileInfoJson {
            path: file.display().to_string(),
            size: reader.file_size(),
            drive: parts.drive,
            dir: parts.dir,
            base_name: parts.base_name,
            ext: parts.ext,
            window_capacity: config.window_capacity,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File Information");
        println!("================");
        println!("File: {}", file.display());
        println!("Size: {} bytes", reader.file_size());
        if !parts.drive.is_empty() {
            println!("Drive: {}", parts.drive);
        }
        println!("Directory: {}", parts.dir);
        println!("Base name: {}", parts.base_name);
        println!("Extension: {}", parts.ext);

        let mut magic = [0u8; 16];
        let n = reader.peek(&mut magic)?;
        println!("Leading bytes: {:02X?}", &magic[..n]);
    }

    reader.close()?;
    Ok(())
}
