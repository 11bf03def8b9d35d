//! Content-based text/binary classification. The decision is made from a
//! bounded prefix of the file's bytes, never from its extension.

use content_inspector::{ContentType, inspect};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of bytes sniffed for content detection.
const SNIFF_LEN: usize = 512;

/// Decides whether `path` holds text content by sniffing its first bytes.
///
/// Classification failure is non-fatal and conservative: a file that cannot
/// be opened or read is reported as not text. An empty file is text.
pub fn is_text_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let mut buffer = [0u8; SNIFF_LEN];
    let read = match file.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return false,
    };
    if read == 0 {
        return true;
    }

    inspect(&buffer[..read]) != ContentType::BINARY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_file_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, b"").unwrap();

        assert!(is_text_file(&path));
    }

    #[test]
    fn test_plain_text_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "plain old text\nwith two lines\n").unwrap();

        assert!(is_text_file(&path));
    }

    #[test]
    fn test_json_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"key\": \"value\"}").unwrap();

        assert!(is_text_file(&path));
    }

    #[test]
    fn test_binary_prefix_is_not_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob");
        fs::write(&path, [0x00, 0xFF, 0x00, 0xFF]).unwrap();

        assert!(!is_text_file(&path));
    }

    #[test]
    fn test_missing_file_is_not_text() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_text_file(&dir.path().join("does-not-exist")));
    }

    /// The decision is a pure function of the content prefix; asking twice
    /// gives the same answer.
    #[test]
    fn test_classification_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stable.md");
        fs::write(&path, "# heading\n").unwrap();

        assert_eq!(is_text_file(&path), is_text_file(&path));
    }
}
