//! Cursor-based random-access reader over a cached file.
//!
//! [`BinaryReader`] opens a file, keeps a logical cursor into it, and routes
//! every byte-level read through a [`FixedWindowCache`]. On top of that it
//! offers fixed-width integer reads with an optional byte swap, NUL-terminated
//! string reads, and reads that leave the cursor where it was.
//!
//! # Cursor rules
//!
//! The cursor always lies in `0..=file_size`. Sequential reads advance it by
//! the number of bytes actually read; seeks clamp to the file size. Reading
//! near the end yields fewer bytes than requested (a short read), which is
//! reported only through the returned count. Fixed-width reads build their
//! value from whatever bytes were available, zero-padded.
//!
//! # Example
//!
//! ```no_run
//! use zbin_core::reader::BinaryReader;
//! use zbin_core::order::ByteOrder;
//!
//! let mut reader = BinaryReader::new();
//! reader.open("clip.mp4")?;
//!
//! let size = reader.read_u32(ByteOrder::Big.needs_reverse())?;
//! let mut kind = [0u8; 4];
//! reader.read(&mut kind)?;
//! println!("box {:?} of {} bytes", kind, size);
//!
//! reader.close()?;
//! # Ok::<(), zbin_core::error::ZbinError>(())
//! ```

use crate::cache::FixedWindowCache;
use crate::config::ReaderConfig;
use crate::error::{Result, ZbinError};
use crate::path::PathParts;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// State that exists only while a file is open.
#[derive(Debug)]
struct OpenFile {
    cache: FixedWindowCache<File>,
    path: PathBuf,
    parts: PathParts,
}

/// Generates a fixed-width read with an optional byte swap.
macro_rules! read_fixed {
    ($(#[$doc:meta])* $name:ident, $ty:ty) => {
        $(#[$doc])*
        ///
        /// The bytes are taken in host order; `reverse` swaps them afterwards.
        /// A short read yields a value built from the bytes that were
        /// available, zero-padded.
        pub fn $name(&mut self, reverse: bool) -> Result<$ty> {
            let mut bytes = [0u8; std::mem::size_of::<$ty>()];
            self.read(&mut bytes)?;
            let value = <$ty>::from_ne_bytes(bytes);
            Ok(if reverse { value.swap_bytes() } else { value })
        }
    };
}

/// A random-access binary file reader with a single-window cache.
#[derive(Debug, Default)]
pub struct BinaryReader {
    config: ReaderConfig,
    file: Option<OpenFile>,
    cursor: u64,
}

impl BinaryReader {
    /// Create an unopened reader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unopened reader with the given configuration.
    pub fn with_config(config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            file: None,
            cursor: 0,
        })
    }

    /// Create a reader and open `path` with it.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        let mut reader = Self::with_config(config)?;
        reader.open(path)?;
        Ok(reader)
    }

    /// Open `path`, replacing any file that is currently open.
    ///
    /// The previous file stays open if this fails. On success the cursor is
    /// reset to 0 and the cache window is primed at offset 0.
    ///
    /// # Errors
    ///
    /// - [`ZbinError::NotFound`] if the path does not exist
    /// - [`ZbinError::PermissionDenied`] if it cannot be read
    /// - [`ZbinError::IsDirectory`] if it names a directory
    /// - [`ZbinError::OpenFailed`] for any other OS failure
    /// - [`ZbinError::FatalIo`] if priming the window fails
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();

        let metadata = std::fs::metadata(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "cannot access file");
            ZbinError::from_open(path, e)
        })?;
        if metadata.is_dir() {
            tracing::warn!(path = %path.display(), "path is a directory");
            return Err(ZbinError::IsDirectory {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "cannot open file");
            ZbinError::from_open(path, e)
        })?;
        let file_size = file
            .metadata()
            .map_err(|e| ZbinError::from_open(path, e))?
            .len();

        let cache = FixedWindowCache::new(file, file_size, self.config.window_capacity)?;

        if let Some(previous) = self.file.take() {
            tracing::debug!(path = %previous.path.display(), "closing previous file");
        }

        self.file = Some(OpenFile {
            cache,
            path: path.to_path_buf(),
            parts: PathParts::split(&path.to_string_lossy()),
        });
        self.cursor = 0;

        tracing::debug!(path = %path.display(), size = file_size, "opened file");
        Ok(())
    }

    /// Close the open file and release its cache.
    pub fn close(&mut self) -> Result<()> {
        let file = self.file.take().ok_or(ZbinError::NotOpen)?;
        self.cursor = 0;
        tracing::debug!(path = %file.path.display(), "closed file");
        Ok(())
    }

    /// Whether a file is open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// The configuration this reader was built with.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Size of the open file, or 0 when nothing is open.
    pub fn file_size(&self) -> u64 {
        self.file.as_ref().map_or(0, |f| f.cache.source_len())
    }

    /// Current logical read position.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Bytes between the cursor and the end of the file.
    pub fn remaining(&self) -> u64 {
        self.file_size().saturating_sub(self.cursor)
    }

    /// Path of the open file.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }

    /// Decomposed path of the open file.
    pub fn path_parts(&self) -> Option<&PathParts> {
        self.file.as_ref().map(|f| &f.parts)
    }

    fn open_file(&mut self) -> Result<&mut OpenFile> {
        self.file.as_mut().ok_or(ZbinError::NotOpen)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.file.is_some() {
            Ok(())
        } else {
            Err(ZbinError::NotOpen)
        }
    }

    /// Copy bytes at the cursor into `buf` without moving the cursor.
    fn read_at_cursor(&mut self, buf: &mut [u8]) -> Result<usize> {
        let cursor = self.cursor;
        let capacity = self.config.window_capacity;
        let file = self.open_file()?;

        let read = if buf.len() <= capacity {
            let bytes = file.cache.service(cursor, buf.len())?;
            buf[..bytes.len()].copy_from_slice(bytes);
            bytes.len()
        } else {
            // Bulk transfer: larger than the window, go straight to the file.
            file.cache.read_uncached(cursor, buf)?
        };

        if read < buf.len() {
            tracing::trace!(
                offset = cursor,
                requested = buf.len(),
                read,
                "short read near end of file"
            );
        }
        Ok(read)
    }

    /// Read up to `buf.len()` bytes at the cursor and advance past them.
    ///
    /// Returns the number of bytes read, which is smaller than requested
    /// only near the end of the file. Bytes of `buf` beyond that count are
    /// left untouched.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let read = self.read_at_cursor(buf)?;
        self.cursor += read as u64;
        Ok(read)
    }

    /// Read up to `buf.len()` bytes at the cursor without advancing.
    pub fn peek(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.read_at_cursor(buf)
    }

    /// Advance the cursor by up to `len` bytes without copying anything.
    ///
    /// Returns the number of bytes actually skipped.
    pub fn skip(&mut self, len: u64) -> Result<u64> {
        self.ensure_open()?;
        let step = len.min(self.remaining());
        self.cursor += step;
        Ok(step)
    }

    /// Read up to `buf.len()` bytes at absolute offset `pos`.
    ///
    /// This is an out-of-band read: it goes directly to the file, bypassing
    /// the cache, and leaves the cursor exactly where it was. Offsets past
    /// the end read nothing.
    pub fn jump_read(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize> {
        let file = self.open_file()?;
        let pos = pos.min(file.cache.source_len());
        file.cache.read_uncached(pos, buf)
    }

    /// Read a NUL-terminated string of at most `max_len` bytes.
    ///
    /// Stops at the first NUL byte (consumed, not returned) or after
    /// `max_len` bytes, whichever comes first. `max_len` is clamped to the
    /// bytes remaining. Invalid UTF-8 is replaced lossily.
    pub fn read_str(&mut self, max_len: u64) -> Result<String> {
        self.ensure_open()?;
        let end = self.cursor + max_len.min(self.remaining());

        let mut bytes = Vec::new();
        while self.cursor < end {
            let byte = self.read_u8()?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read `data_len` bytes into `buf`, optionally byte-order corrected.
    ///
    /// Without `reverse` the bytes land at the front of `buf`. With
    /// `reverse` they land right-aligned in the tail of `buf` and then the
    /// whole `buf` is reversed, which widens a narrower stored field into
    /// a `buf.len()`-byte value in the opposite byte order. A short read in
    /// that mode returns 0 and leaves `buf` unswapped.
    pub fn read_data(&mut self, buf: &mut [u8], data_len: usize, reverse: bool) -> Result<usize> {
        if data_len > buf.len() {
            return Err(ZbinError::invalid_argument(format!(
                "data length {} exceeds buffer length {}",
                data_len,
                buf.len()
            )));
        }

        if !reverse {
            return self.read(&mut buf[..data_len]);
        }

        let start = buf.len() - data_len;
        let read = self.read(&mut buf[start..])?;
        if read < data_len {
            return Ok(0);
        }
        buf.reverse();
        Ok(read)
    }

    /// Read an unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read(&mut byte)?;
        Ok(byte[0])
    }

    /// Read a signed byte.
    pub fn read_s8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_fixed!(
        /// Read a `u16`.
        read_u16,
        u16
    );
    read_fixed!(
        /// Read an `i16`.
        read_s16,
        i16
    );
    read_fixed!(
        /// Read a `u32`.
        read_u32,
        u32
    );
    read_fixed!(
        /// Read an `i32`.
        read_s32,
        i32
    );
    read_fixed!(
        /// Read a `u64`.
        read_u64,
        u64
    );
    read_fixed!(
        /// Read an `i64`.
        read_s64,
        i64
    );

    /// Accumulate `bytes` single-byte reads most-significant byte first.
    fn read_accumulated(&mut self, bytes: u16) -> Result<u64> {
        let mut value = 0u64;
        for _ in 0..bytes {
            value = (value << 8) | u64::from(self.read_u8()?);
        }
        Ok(value)
    }

    /// Read an unsigned integer `bytes` wide.
    ///
    /// Widths 1, 2, 4 and 8 behave exactly like the fixed-width reads. Any
    /// other width is accumulated most-significant byte first (big-endian);
    /// `reverse` then swaps the full 64-bit value and shifts the padding
    /// back out, yielding the little-endian interpretation. Widths over 8
    /// keep only the last 8 bytes read; width 0 reads nothing.
    pub fn read_un(&mut self, bytes: u16, reverse: bool) -> Result<u64> {
        match bytes {
            0 => Ok(0),
            1 => Ok(u64::from(self.read_u8()?)),
            2 => Ok(u64::from(self.read_u16(reverse)?)),
            4 => Ok(u64::from(self.read_u32(reverse)?)),
            8 => self.read_u64(reverse),
            n => {
                let value = self.read_accumulated(n)?;
                if reverse {
                    let padding = u32::from(8u16.saturating_sub(n)) * 8;
                    Ok(value.swap_bytes() >> padding)
                } else {
                    Ok(value)
                }
            }
        }
    }

    /// Read a signed integer `bytes` wide, sign-extended to 64 bits.
    ///
    /// Byte ordering follows [`read_un`](Self::read_un); the sign comes from
    /// the most significant byte of the resulting interpretation. Odd widths
    /// are sign-extended as a whole value, never byte by byte, so the bits
    /// above the sign bit are always copies of it.
    pub fn read_sn(&mut self, bytes: u16, reverse: bool) -> Result<i64> {
        match bytes {
            0 => Ok(0),
            1 => Ok(i64::from(self.read_s8()?)),
            2 => Ok(i64::from(self.read_s16(reverse)?)),
            4 => Ok(i64::from(self.read_s32(reverse)?)),
            8 => self.read_s64(reverse),
            n => {
                let value = self.read_accumulated(n)?;
                let padding = u32::from(8u16.saturating_sub(n)) * 8;
                if reverse {
                    Ok((value.swap_bytes() as i64) >> padding)
                } else {
                    Ok(((value << padding) as i64) >> padding)
                }
            }
        }
    }

    /// Move the logical cursor to `pos`, clamped to the file size.
    ///
    /// Returns the new cursor.
    pub fn set_cursor(&mut self, pos: u64) -> Result<u64> {
        self.ensure_open()?;
        self.cursor = pos.min(self.file_size());
        Ok(self.cursor)
    }

    /// Move both the OS-level file position and the cursor to `abs_offset`,
    /// clamped to the file size.
    ///
    /// # Errors
    ///
    /// [`ZbinError::SeekFailed`] if the OS rejects the seek; the cursor is
    /// left unchanged in that case.
    pub fn set_file_cursor(&mut self, abs_offset: u64) -> Result<u64> {
        let file = self.open_file()?;
        let pos = file.cache.seek_source(abs_offset)?;
        self.cursor = pos;
        Ok(pos)
    }
}

fn to_io_error(err: ZbinError) -> io::Error {
    match err {
        ZbinError::Io(e) => e,
        ZbinError::NotOpen => io::Error::new(io::ErrorKind::NotConnected, err),
        other => io::Error::other(other),
    }
}

impl Read for BinaryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BinaryReader::read(self, buf).map_err(to_io_error)
    }
}

impl Seek for BinaryReader {
    /// Seeks clamp to the file size, so the returned position may be
    /// smaller than requested.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::End(offset) => self.file_size() as i128 + offset as i128,
            SeekFrom::Current(offset) => self.cursor as i128 + offset as i128,
        };

        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to negative position",
            ));
        }

        let target = u64::try_from(target).unwrap_or(u64::MAX);
        self.set_cursor(target).map_err(to_io_error)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.cursor)
    }
}
