//! Concatenation output. The sink owns at most one file handle, opened
//! lazily in append mode when the first admitted file arrives; directories
//! with zero matches never create or touch the output file.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Lazily-opened owner of the output file handle.
#[derive(Debug)]
pub struct OutputSink {
    path: PathBuf,
    file: Option<File>,
}

impl OutputSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }

    /// The resolved output path, whether or not it has been opened yet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether any admitted file has opened the output so far.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Returns the output handle, opening the file in append mode on first
    /// use. Failure to open is fatal for the run.
    pub fn handle(&mut self) -> io::Result<&mut File> {
        let file = match self.file.take() {
            Some(file) => file,
            None => OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)?,
        };
        Ok(self.file.insert(file))
    }

    /// Flushes the handle if one was ever opened. Dropping the sink closes
    /// the file either way, so early error returns release it too.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Writes one source file to the output: a `// File: <display>` header, a
/// blank line, the raw bytes verbatim, then a single newline separator.
/// Failure here is a per-file condition; the caller reports it and moves on.
pub fn write_file(output: &mut File, source: &Path, display: &str) -> Result<()> {
    let mut input =
        File::open(source).with_context(|| format!("error opening file {}", source.display()))?;

    write!(output, "// File: {display}\n\n")
        .context("error writing file header to output file")?;
    io::copy(&mut input, output)
        .with_context(|| format!("error copying content from {}", source.display()))?;
    output
        .write_all(b"\n")
        .context("error writing separator to output file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sink_is_not_created_until_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");

        let mut sink = OutputSink::new(out.clone());
        assert!(!sink.is_open());
        assert!(!out.exists());

        sink.finish().unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_handle_opens_once_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        fs::write(&out, "existing\n").unwrap();

        let mut sink = OutputSink::new(out.clone());
        write!(sink.handle().unwrap(), "one\n").unwrap();
        write!(sink.handle().unwrap(), "two\n").unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "existing\none\ntwo\n");
    }

    #[test]
    fn test_write_file_block_format() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("hello.txt");
        fs::write(&source, "Hello, world!").unwrap();
        let out = dir.path().join("out.txt");

        let mut sink = OutputSink::new(out.clone());
        write_file(sink.handle().unwrap(), &source, "hello.txt").unwrap();
        sink.finish().unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "// File: hello.txt\n\nHello, world!\n"
        );
    }

    /// Content is copied byte for byte: no line-ending normalization, no
    /// trailing-newline fixups beyond the single separator.
    #[test]
    fn test_write_file_copies_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("crlf.txt");
        fs::write(&source, b"line one\r\nline two\r\n").unwrap();
        let out = dir.path().join("out.txt");

        let mut sink = OutputSink::new(out.clone());
        write_file(sink.handle().unwrap(), &source, "crlf.txt").unwrap();
        sink.finish().unwrap();

        assert_eq!(
            fs::read(&out).unwrap(),
            b"// File: crlf.txt\n\nline one\r\nline two\r\n\n"
        );
    }

    #[test]
    fn test_missing_source_is_an_error_but_sink_survives() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");

        let mut sink = OutputSink::new(out.clone());
        let missing = dir.path().join("gone.txt");
        assert!(write_file(sink.handle().unwrap(), &missing, "gone.txt").is_err());

        // The sink stays usable for the next file.
        let source = dir.path().join("next.txt");
        fs::write(&source, "next").unwrap();
        write_file(sink.handle().unwrap(), &source, "next.txt").unwrap();
        sink.finish().unwrap();

        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "// File: next.txt\n\nnext\n"
        );
    }
}
