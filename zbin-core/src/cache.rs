//! Single-window byte cache over a seekable source.
//!
//! [`FixedWindowCache`] keeps one contiguous copy of the source in memory.
//! A read that fits inside the window is served without I/O. Any read that
//! does not fit replaces the whole window with a fresh one anchored at the
//! requested offset, so after every serviced read the requested range lies
//! entirely inside the window.
//!
//! There is deliberately no multi-region or LRU policy: the expected access
//! pattern is sequential or tightly clustered parsing, where one window
//! anchored at the last miss gives nearly every subsequent read for free.
//!
//! # Example
//!
//! ```
//! use zbin_core::cache::FixedWindowCache;
//! use std::io::Cursor;
//!
//! let data: Vec<u8> = (0..64).collect();
//! let mut cache = FixedWindowCache::new(Cursor::new(data), 64, 16).unwrap();
//!
//! assert_eq!(cache.service(4, 4).unwrap(), &[4, 5, 6, 7]);
//! assert_eq!(cache.service(40, 2).unwrap(), &[40, 41]); // miss, window moves
//! assert_eq!(cache.window_start(), 40);
//! assert!(cache.service(64, 1).unwrap().is_empty());
//! ```

use crate::error::{Result, ZbinError};
use std::io::{Read, Seek, SeekFrom};

/// A cache of size one: a single window of at most `capacity` bytes.
#[derive(Debug)]
pub struct FixedWindowCache<R: Read + Seek> {
    /// Underlying byte source.
    source: R,
    /// Total source length, fixed at construction.
    source_len: u64,
    /// Maximum window size.
    capacity: usize,
    /// Window storage, allocated once.
    window: Box<[u8]>,
    /// Absolute offset of `window[0]`.
    window_start: u64,
    /// Number of valid bytes in the window.
    window_len: usize,
    /// Number of refills performed (including the initial one).
    refills: u64,
}

impl<R: Read + Seek> FixedWindowCache<R> {
    /// Create a cache over `source` and prime the window at offset 0.
    ///
    /// `source_len` is trusted as the source's size; a source that turns out
    /// shorter produces [`ZbinError::FatalIo`] on refill.
    pub fn new(source: R, source_len: u64, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ZbinError::invalid_argument(
                "window capacity must be at least one byte",
            ));
        }

        // The window can never hold more than the whole source.
        let storage = usize::try_from(source_len).map_or(capacity, |len| len.min(capacity));

        let mut cache = Self {
            source,
            source_len,
            capacity,
            window: vec![0u8; storage].into_boxed_slice(),
            window_start: 0,
            window_len: 0,
            refills: 0,
        };

        if source_len > 0 {
            cache.refill(0)?;
        }

        Ok(cache)
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    ///
    /// Moving the source's position is harmless: every refill seeks first.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Consume the cache and return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Total length of the source.
    pub fn source_len(&self) -> u64 {
        self.source_len
    }

    /// Maximum window size.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Absolute offset of the first cached byte.
    pub fn window_start(&self) -> u64 {
        self.window_start
    }

    /// Number of valid bytes currently cached.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Number of window refills performed so far.
    pub fn refills(&self) -> u64 {
        self.refills
    }

    /// Serve up to `len` bytes starting at `pos`.
    ///
    /// Returns an empty slice when `pos` is at or past the end of the
    /// source. Otherwise returns `min(len, source_len - pos, capacity)`
    /// bytes, refilling the window first if they are not all cached.
    pub fn service(&mut self, pos: u64, len: usize) -> Result<&[u8]> {
        if pos >= self.source_len || len == 0 {
            return Ok(&[]);
        }

        let available = (self.source_len - pos).min(len as u64) as usize;
        let available = available.min(self.capacity);

        let window_end = self.window_start + self.window_len as u64;
        if pos < self.window_start || pos + available as u64 > window_end {
            self.refill(pos)?;
        }

        let offset = (pos - self.window_start) as usize;
        Ok(&self.window[offset..offset + available])
    }

    /// Read directly from the source at `pos`, bypassing the window.
    ///
    /// Reads until `buf` is full or the source is exhausted and returns the
    /// number of bytes read. The window is left untouched.
    pub fn read_uncached(&mut self, pos: u64, buf: &mut [u8]) -> Result<usize> {
        if pos >= self.source_len {
            return Ok(0);
        }

        self.source.seek(SeekFrom::Start(pos))?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        tracing::trace!(offset = pos, requested = buf.len(), read = filled, "uncached read");
        Ok(filled)
    }

    /// Reposition the source itself, clamped to the source length.
    pub fn seek_source(&mut self, pos: u64) -> Result<u64> {
        let target = pos.min(self.source_len);
        self.source
            .seek(SeekFrom::Start(target))
            .map_err(|e| ZbinError::seek_failed(target, e))
    }

    /// Replace the window with the bytes starting at `pos`.
    fn refill(&mut self, pos: u64) -> Result<()> {
        let len = (self.source_len - pos).min(self.window.len() as u64) as usize;
        // The window is garbage until the read below completes.
        self.window_len = 0;

        self.source.seek(SeekFrom::Start(pos)).map_err(|e| {
            tracing::error!(offset = pos, error = %e, "cache refill seek failed");
            ZbinError::fatal_io(pos, len, e)
        })?;
        self.source
            .read_exact(&mut self.window[..len])
            .map_err(|e| {
                tracing::error!(offset = pos, len, error = %e, "cache refill read failed");
                ZbinError::fatal_io(pos, len, e)
            })?;

        self.window_start = pos;
        self.window_len = len;
        self.refills += 1;

        tracing::debug!(offset = pos, len, "cache window refilled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn sequential(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    /// A source whose reads fail after the first `good_reads` calls.
    struct FlakySource {
        inner: Cursor<Vec<u8>>,
        good_reads: usize,
    }

    impl Read for FlakySource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.good_reads == 0 {
                return Err(io::Error::other("device error"));
            }
            self.good_reads -= 1;
            self.inner.read(buf)
        }
    }

    impl Seek for FlakySource {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_primed_at_zero() {
        let cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 32).unwrap();
        assert_eq!(cache.window_start(), 0);
        assert_eq!(cache.window_len(), 32);
        assert_eq!(cache.refills(), 1);
    }

    #[test]
    fn test_hit_does_not_refill() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 32).unwrap();
        assert_eq!(cache.service(0, 4).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(cache.service(28, 4).unwrap(), &[28, 29, 30, 31]);
        assert_eq!(cache.refills(), 1);
    }

    #[test]
    fn test_miss_past_window_end() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 32).unwrap();
        // Straddles the window end, so the whole window moves to 30.
        assert_eq!(cache.service(30, 4).unwrap(), &[30, 31, 32, 33]);
        assert_eq!(cache.window_start(), 30);
        assert_eq!(cache.refills(), 2);
    }

    #[test]
    fn test_miss_before_window_start() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 32).unwrap();
        cache.service(50, 1).unwrap();
        assert_eq!(cache.window_start(), 50);
        assert_eq!(cache.service(49, 2).unwrap(), &[49, 50]);
        assert_eq!(cache.window_start(), 49);
    }

    #[test]
    fn test_final_window_is_short() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 32).unwrap();
        assert_eq!(cache.service(90, 32).unwrap().len(), 10);
        assert_eq!(cache.window_start(), 90);
        assert_eq!(cache.window_len(), 10);
    }

    #[test]
    fn test_past_end_is_empty() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(10)), 10, 32).unwrap();
        assert!(cache.service(10, 1).unwrap().is_empty());
        assert!(cache.service(1000, 1).unwrap().is_empty());
        assert_eq!(cache.refills(), 1);
    }

    #[test]
    fn test_empty_source() {
        let mut cache = FixedWindowCache::new(Cursor::new(Vec::new()), 0, 32).unwrap();
        assert_eq!(cache.refills(), 0);
        assert!(cache.service(0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = FixedWindowCache::new(Cursor::new(sequential(10)), 10, 0);
        assert!(matches!(result, Err(ZbinError::InvalidArgument { .. })));
    }

    #[test]
    fn test_request_larger_than_capacity_is_clamped() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 8).unwrap();
        assert_eq!(cache.service(0, 20).unwrap().len(), 8);
    }

    #[test]
    fn test_refill_failure_is_fatal() {
        let source = FlakySource {
            inner: Cursor::new(sequential(100)),
            good_reads: 1,
        };
        let mut cache = FixedWindowCache::new(source, 100, 16).unwrap();
        let err = cache.service(64, 4).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, ZbinError::FatalIo { offset: 64, .. }));
    }

    #[test]
    fn test_refill_recovers_after_failure() {
        let source = FlakySource {
            inner: Cursor::new(sequential(100)),
            good_reads: 1,
        };
        let mut cache = FixedWindowCache::new(source, 100, 16).unwrap();
        assert!(cache.service(64, 4).is_err());
        assert_eq!(cache.window_len(), 0);

        cache.get_mut().good_reads = 1;
        assert_eq!(cache.service(2, 3).unwrap(), &[2, 3, 4]);
        assert_eq!(cache.window_start(), 2);
    }

    #[test]
    fn test_truncated_source_is_fatal() {
        // Claimed length exceeds what the source actually holds.
        let result = FixedWindowCache::new(Cursor::new(sequential(10)), 50, 64);
        assert!(matches!(result, Err(ZbinError::FatalIo { .. })));
    }

    #[test]
    fn test_read_uncached() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 16).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(cache.read_uncached(96, &mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], &[96, 97, 98, 99]);
        assert_eq!(cache.read_uncached(100, &mut buf).unwrap(), 0);
        assert_eq!(cache.window_start(), 0);
    }

    #[test]
    fn test_seek_source_clamps() {
        let mut cache = FixedWindowCache::new(Cursor::new(sequential(100)), 100, 16).unwrap();
        assert_eq!(cache.seek_source(500).unwrap(), 100);
        assert_eq!(cache.get_ref().position(), 100);
    }
}
