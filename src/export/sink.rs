//! Output sinks for finished PNG buffers.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Receives one encoded PNG per exported document.
pub trait OutputSink {
    fn deliver(&mut self, name: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Writes files into a directory, creating it on first delivery.
///
/// A name is written at most once per sink: a second document mapping to
/// the same `<stem>.png` is refused instead of overwriting the first.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    written: HashSet<String>,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: HashSet::new(),
        }
    }
}

impl OutputSink for DirSink {
    fn deliver(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        if self.written.contains(name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("`{name}` was already written by this export"),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), bytes)?;
        self.written.insert(name.to_string());
        Ok(())
    }
}

/// Keeps delivered buffers in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl OutputSink for MemorySink {
    fn deliver(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        self.files.push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dir_sink_creates_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/png");
        let mut sink = DirSink::new(&out);

        sink.deliver("logo.png", b"\x89PNG").unwrap();
        assert_eq!(fs::read(out.join("logo.png")).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_dir_sink_reports_io_errors() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let mut sink = DirSink::new(&blocker);
        assert!(sink.deliver("a.png", b"").is_err());
    }

    #[test]
    fn test_dir_sink_refuses_second_write_of_same_name() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirSink::new(dir.path());

        sink.deliver("logo.png", b"first").unwrap();
        let err = sink.deliver("logo.png", b"second").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(dir.path().join("logo.png")).unwrap(), b"first");

        // Files from earlier runs are replaced as usual
        let mut next_run = DirSink::new(dir.path());
        next_run.deliver("logo.png", b"third").unwrap();
        assert_eq!(fs::read(dir.path().join("logo.png")).unwrap(), b"third");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        sink.deliver("a.png", &[1, 2]).unwrap();
        assert_eq!(sink.files, vec![("a.png".to_string(), vec![1, 2])]);
    }
}
