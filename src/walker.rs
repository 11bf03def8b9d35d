//! Recursive traversal: single-threaded, depth-first, pre-order. Entries are
//! visited in whatever order the directory listing returns them, and files
//! reach the output in exactly that order.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{FilterConfig, absolutize};
use crate::filter;
use crate::writer::{self, OutputSink};

pub struct Walker<'a> {
    config: &'a FilterConfig,
    sink: &'a mut OutputSink,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a FilterConfig, sink: &'a mut OutputSink) -> Self {
        Self { config, sink }
    }

    /// Walks every root in order. Returns whether any admitted file was
    /// handed to the writer. A missing or non-directory root is skipped
    /// with a message; a listing failure below a root aborts the run.
    pub fn walk(&mut self, roots: &[PathBuf]) -> Result<bool> {
        let mut any_processed = false;

        for root in roots {
            let abs = absolutize(&self.config.base_dir, root);

            let metadata = match fs::metadata(&abs) {
                Ok(metadata) => metadata,
                Err(_) => {
                    info!("Directory does not exist: {}", abs.display());
                    continue;
                }
            };
            if !metadata.is_dir() {
                info!("Not a directory, skipping: {}", abs.display());
                continue;
            }

            if self.walk_dir(&abs)? {
                any_processed = true;
            } else {
                info!(
                    "No text files found in {}",
                    self.config.relative_display(&abs)
                );
            }
        }

        Ok(any_processed)
    }

    /// Processes one directory and its subtree. The returned bool says
    /// whether this directory or any descendant contributed a file, so a
    /// parent only reports "nothing found" when that holds for the whole
    /// subtree.
    fn walk_dir(&mut self, dir: &Path) -> Result<bool> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("error reading directory {}", dir.display()))?;

        let mut processed = false;

        for entry in entries {
            let entry =
                entry.with_context(|| format!("error reading directory {}", dir.display()))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry
                .file_type()
                .with_context(|| format!("error inspecting {}", path.display()))?;

            if file_type.is_dir() {
                if let Some(skip) = filter::check_dir(self.config, &name, &path) {
                    debug!(
                        "Skipping directory {}: {}",
                        self.config.relative_display(&path),
                        skip.reason()
                    );
                    continue;
                }

                if self.walk_dir(&path)? {
                    processed = true;
                } else {
                    debug!(
                        "No text files found in {}",
                        self.config.relative_display(&path)
                    );
                }
            } else {
                let display = self.config.relative_display(&path);

                if let Some(skip) = filter::check_file(self.config, &name, &path) {
                    debug!("Skipping file {display}: {}", skip.reason());
                    continue;
                }

                // Opening the output is the only fatal failure here. A file
                // that cannot be read counts as processed: it was admitted,
                // and its failure is reported without aborting the batch.
                let output = self
                    .sink
                    .handle()
                    .context("error creating/opening output file")?;

                info!("Processing {display}");
                if let Err(err) = writer::write_file(output, &path, &display) {
                    warn!("Error processing file {display}: {err:#}");
                }
                processed = true;
            }
        }

        Ok(processed)
    }
}
