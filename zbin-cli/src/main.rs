//! zbin CLI - binary file inspector
//!
//! Thin front end over `zbin-core`: file info, hex dumps, typed field reads,
//! NUL-terminated strings and Exp-Golomb decoding at arbitrary offsets.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    FieldKind, GolombOptions, cmd_dump, cmd_golomb, cmd_info, cmd_read, cmd_str,
};
use std::path::PathBuf;
use zbin_core::{ByteOrder, DEFAULT_WINDOW_CAPACITY, ReaderConfig};

#[derive(Parser)]
#[command(name = "zbin")]
#[command(author, version, about = "Inspect binary files field by field")]
#[command(long_about = "
zbin reads binary files through a cached random-access reader and decodes
fixed-width integers, strings and Exp-Golomb codes at any offset.

Examples:
  zbin info clip.mp4
  zbin dump clip.mp4 --offset 0x20 --length 64
  zbin read clip.mp4 --offset 0 --type u32 --order big
  zbin read table.bin --offset 12 --type un --width 3 --order little --count 4
  zbin str index.dat --offset 0x100 --max 32
  zbin golomb sps.bin --offset 1 --length 16 --count 4
")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Cache window size in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_WINDOW_CAPACITY)]
    window: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show size and path components of a file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Hex dump a byte range
    #[command(alias = "d")]
    Dump {
        /// File to dump
        file: PathBuf,

        /// Start offset (decimal or 0x-prefixed hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: u64,

        /// Number of bytes to dump
        #[arg(short = 'n', long, default_value_t = 256)]
        length: u64,
    },

    /// Read typed integer fields
    #[command(alias = "r")]
    Read {
        /// File to read
        file: PathBuf,

        /// Start offset (decimal or 0x-prefixed hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: u64,

        /// Field type
        #[arg(short = 't', long = "type", value_enum)]
        kind: FieldKind,

        /// Width in bytes for `un`/`sn` fields
        #[arg(short, long, default_value_t = 3)]
        width: u16,

        /// Byte order the field is stored in
        #[arg(long, value_enum, default_value = "native")]
        order: OrderArg,

        /// Number of consecutive fields to read
        #[arg(short, long, default_value_t = 1)]
        count: u64,
    },

    /// Read a NUL-terminated string
    #[command(alias = "s")]
    Str {
        /// File to read
        file: PathBuf,

        /// Start offset (decimal or 0x-prefixed hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: u64,

        /// Maximum number of bytes to consume
        #[arg(short, long, default_value_t = 256)]
        max: u64,
    },

    /// Decode Exp-Golomb codes from a byte range
    #[command(alias = "g")]
    Golomb {
        /// File to read
        file: PathBuf,

        /// Start offset (decimal or 0x-prefixed hex)
        #[arg(short, long, default_value = "0", value_parser = parse_offset)]
        offset: u64,

        /// Number of bytes to load into the bit reader
        #[arg(short = 'n', long, default_value_t = 64)]
        length: usize,

        /// Bits to skip before the first code
        #[arg(long, default_value_t = 0)]
        skip_bits: u64,

        /// Number of codes to decode
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Decode signed se(v) codes instead of ue(v)
        #[arg(short, long)]
        signed: bool,
    },
}

/// Stored byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum OrderArg {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
    /// Host byte order (default)
    #[default]
    Native,
}

impl From<OrderArg> for ByteOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Big => ByteOrder::Big,
            OrderArg::Little => ByteOrder::Little,
            OrderArg::Native => ByteOrder::Native,
        }
    }
}

fn parse_offset(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{}': {}", s, e))
}

/// Filter used when RUST_LOG is unset. The binary's own target is `zbin`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "zbin_core=debug,zbin=debug"
    } else {
        "warn"
    }
}

fn init_logging(verbose: bool) {
    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ReaderConfig::new().window_capacity(cli.window);

    let result = match cli.command {
        Commands::Info { file, json } => cmd_info(&file, config, json),
        Commands::Dump {
            file,
            offset,
            length,
        } => cmd_dump(&file, config, offset, length),
        Commands::Read {
            file,
            offset,
            kind,
            width,
            order,
            count,
        } => cmd_read(&file, config, offset, kind, width, order.into(), count),
        Commands::Str { file, offset, max } => cmd_str(&file, config, offset, max),
        Commands::Golomb {
            file,
            offset,
            length,
            skip_bits,
            count,
            signed,
        } => cmd_golomb(
            &file,
            config,
            &GolombOptions {
                offset,
                length,
                skip_bits,
                count,
                signed,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("42"), Ok(42));
        assert_eq!(parse_offset("0x20"), Ok(32));
        assert_eq!(parse_offset("0XfF"), Ok(255));
        assert!(parse_offset("0xzz").is_err());
        assert!(parse_offset("-1").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "zbin", "read", "f.bin", "--offset", "0x10", "--type", "un", "--width", "5",
            "--order", "little",
        ])
        .unwrap();
        match cli.command {
            Commands::Read {
                offset,
                kind,
                width,
                order,
                ..
            } => {
                assert_eq!(offset, 16);
                assert_eq!(kind, FieldKind::Un);
                assert_eq!(width, 5);
                assert_eq!(order, OrderArg::Little);
            }
            _ => panic!("expected read command"),
        }
        assert_eq!(cli.window, DEFAULT_WINDOW_CAPACITY);
    }

    #[test]
    fn test_default_filter_covers_binary_target() {
        assert_eq!(module_path!().split("::").next(), Some("zbin"));
        assert!(default_filter(true).split(',').any(|d| d == "zbin=debug"));
        assert!(default_filter(true).contains("zbin_core=debug"));
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
