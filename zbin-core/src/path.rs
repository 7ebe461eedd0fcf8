//! Path decomposition into drive, directory, base name and extension.
//!
//! This is plain string splitting; nothing touches the filesystem.
//!
//! ```
//! use zbin_core::path::PathParts;
//!
//! let parts = PathParts::split("/a/b/c.bin");
//! assert_eq!(parts.dir, "/a/b/");
//! assert_eq!(parts.base_name, "c");
//! assert_eq!(parts.ext, ".bin");
//! ```

/// Components of a path string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// Drive prefix including the colon (`C:`), or empty.
    pub drive: String,
    /// Directory including the trailing separator, or empty.
    pub dir: String,
    /// File name without extension.
    pub base_name: String,
    /// Extension including the leading dot, or empty.
    pub ext: String,
}

impl PathParts {
    /// Split `path` into its parts.
    ///
    /// The drive ends at the first `:`. The directory ends at the last `/`,
    /// or at the last `\` when the path contains no `/`. The extension
    /// starts at the last `.`.
    pub fn split(path: &str) -> Self {
        let mut parts = Self::default();

        let drive_end = match path.find(':') {
            Some(i) => {
                parts.drive = path[..=i].to_string();
                i + 1
            }
            None => 0,
        };

        let name_start = match path.rfind('/').or_else(|| path.rfind('\\')) {
            Some(i) if i + 1 >= drive_end => {
                parts.dir = path[drive_end..=i].to_string();
                i + 1
            }
            _ => drive_end,
        };

        let ext_start = match path.rfind('.') {
            Some(i) if i >= name_start => {
                parts.ext = path[i..].to_string();
                i
            }
            _ => path.len(),
        };

        parts.base_name = path[name_start..ext_start].to_string();
        parts
    }

    /// File name with extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_path() {
        let parts = PathParts::split("/a/b/c.bin");
        assert_eq!(parts.drive, "");
        assert_eq!(parts.dir, "/a/b/");
        assert_eq!(parts.base_name, "c");
        assert_eq!(parts.ext, ".bin");
        assert_eq!(parts.file_name(), "c.bin");
    }

    #[test]
    fn test_windows_path() {
        let parts = PathParts::split("C:\\media\\clip.h264");
        assert_eq!(parts.drive, "C:");
        assert_eq!(parts.dir, "\\media\\");
        assert_eq!(parts.base_name, "clip");
        assert_eq!(parts.ext, ".h264");
    }

    #[test]
    fn test_bare_name() {
        let parts = PathParts::split("stream");
        assert_eq!(parts.dir, "");
        assert_eq!(parts.base_name, "stream");
        assert_eq!(parts.ext, "");
    }

    #[test]
    fn test_dot_in_directory_only() {
        let parts = PathParts::split("./data/raw");
        assert_eq!(parts.dir, "./data/");
        assert_eq!(parts.base_name, "raw");
        assert_eq!(parts.ext, "");
    }

    #[test]
    fn test_multiple_extensions() {
        let parts = PathParts::split("dir/archive.tar.gz");
        assert_eq!(parts.dir, "dir/");
        assert_eq!(parts.base_name, "archive.tar");
        assert_eq!(parts.ext, ".gz");
    }
}
