//! Score file retrieval.

use std::path::Path;

use tracing::debug;

/// Read a score file. Any failure yields empty text, which parses to an empty score.
pub fn read_file(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "score unreadable, using empty text");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.laras");
        std::fs::write(&path, "title = \"Song\"\n").unwrap();
        assert_eq!(read_file(&path), "title = \"Song\"\n");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_file(&dir.path().join("missing.laras")), "");
    }

    #[test]
    fn directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_file(dir.path()), "");
    }

    #[test]
    fn invalid_utf8_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.laras");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert_eq!(read_file(&path), "");
    }
}
