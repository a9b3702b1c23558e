//! One-shot reading of a simulation log.
//!
//! The whole log is read into memory and the handle is dropped before
//! extraction begins. Failing to read the log is the only fatal condition of
//! the analyzer and is always returned to the caller.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Buffer size for reading log files (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Error type for log loading failures.
#[derive(Debug)]
pub enum LogLoadError {
    NotFound(PathBuf),
    ReadError { source_name: String, error: io::Error },
}

impl std::fmt::Display for LogLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLoadError::NotFound(path) => write!(f, "Log file not found: {}", path.display()),
            LogLoadError::ReadError { source_name, error } => write!(f, "Failed to read {}: {}", source_name, error),
        }
    }
}

impl std::error::Error for LogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogLoadError::NotFound(_) => None,
            LogLoadError::ReadError { error, .. } => Some(error),
        }
    }
}

/// Read the log at `path`, or standard input when `path` is `-`.
pub fn load_log(path: &Path) -> Result<String, LogLoadError> {
    if path.as_os_str() == STDIN_PATH {
        return read_log(io::stdin().lock(), "stdin");
    }

    let file = File::open(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => LogLoadError::NotFound(path.to_path_buf()),
        _ => LogLoadError::ReadError {
            source_name: path.display().to_string(),
            error,
        },
    })?;

    let text = read_log(BufReader::with_capacity(BUFFER_SIZE, file), &path.display().to_string())?;
    log::info!("Loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Read a log from any reader until EOF.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_log<R: Read>(mut reader: R, source_name: &str) -> Result<String, LogLoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|error| LogLoadError::ReadError {
        source_name: source_name.to_string(),
        error,
    })?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{} is not valid UTF-8, replacing invalid sequences", source_name);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_log_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TEST_TYPE: HASHED_READS").unwrap();
        writeln!(file, "Total dropp: 5").unwrap();

        let text = load_log(file.path()).unwrap();
        assert_eq!(text, "TEST_TYPE: HASHED_READS\nTotal dropp: 5\n");
    }

    #[test]
    fn test_load_log_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation_missing.txt");

        let err = load_log(&path).unwrap_err();
        assert!(matches!(err, LogLoadError::NotFound(ref p) if p == &path));
        assert!(err.to_string().contains("simulation_missing.txt"));
    }

    #[test]
    fn test_load_log_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_log(dir.path()).is_err());
    }

    #[test]
    fn test_read_log_replaces_invalid_utf8() {
        let bytes: &[u8] = b"Total dropp: 5\n\xff\xfe\nTotal switch collisions: 20\n";
        let text = read_log(bytes, "buffer").unwrap();
        assert!(text.contains("Total dropp: 5"));
        assert!(text.contains("Total switch collisions: 20"));
    }

    #[test]
    fn test_read_log_propagates_io_error() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device unplugged"))
            }
        }

        let err = read_log(FailingReader, "pipe").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read pipe: device unplugged");
    }
}
