//! Filter configuration: built once from the CLI arguments (plus an optional
//! `textcat.toml` defaults file) before traversal begins, read-only afterwards.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::cli::Args;

/// Name of the optional defaults file looked up in the invocation root.
pub const CONFIG_FILE_NAME: &str = "textcat.toml";

/// Immutable configuration consumed by the walker and the path filter.
#[derive(Debug)]
pub struct FilterConfig {
    /// The working directory in effect at startup. Relative paths are
    /// resolved and displayed against this root; it is threaded explicitly
    /// instead of being read from process state during the walk.
    pub base_dir: PathBuf,
    /// Lower-cased, dot-prefixed extensions. Empty means no restriction.
    pub include_extensions: HashSet<String>,
    /// Lower-cased, dot-prefixed extensions to reject.
    pub exclude_extensions: HashSet<String>,
    /// Slash-normalized directory paths relative to `base_dir`. Matching
    /// directories are not descended into at all.
    pub exclude_dirs: HashSet<String>,
    /// File-name regexes a candidate must match (when non-empty).
    pub include_patterns: Vec<Regex>,
    /// File-name regexes that reject a candidate outright.
    pub exclude_patterns: Vec<Regex>,
    /// Absolute paths that are never read: the running executable and the
    /// resolved output file. Keeps the tool from concatenating its own output.
    pub excluded_paths: HashSet<PathBuf>,
}

impl FilterConfig {
    /// Builds the configuration from parsed arguments merged over the
    /// defaults file. Fails on an invalid regex pattern.
    pub fn new(
        args: &Args,
        defaults: Defaults,
        base_dir: PathBuf,
        output_path: PathBuf,
        exe_path: PathBuf,
    ) -> Result<Self> {
        let include_extensions =
            normalize_extensions(defaults.include_ext.iter().chain(&args.include_ext));
        let exclude_extensions =
            normalize_extensions(defaults.exclude_ext.iter().chain(&args.exclude_ext));

        let exclude_dirs = defaults
            .exclude_dir
            .iter()
            .chain(&args.exclude_dir)
            .filter_map(|dir| {
                let trimmed = dir.trim();
                (!trimmed.is_empty()).then(|| slash_normalize(Path::new(trimmed)))
            })
            .collect();

        let include_patterns =
            compile_patterns(defaults.include_file_pattern.iter().chain(&args.include_file_pattern))?;
        let exclude_patterns =
            compile_patterns(defaults.exclude_file_pattern.iter().chain(&args.exclude_file_pattern))?;

        let excluded_paths = HashSet::from([exe_path, output_path]);

        Ok(Self {
            base_dir,
            include_extensions,
            exclude_extensions,
            exclude_dirs,
            include_patterns,
            exclude_patterns,
            excluded_paths,
        })
    }

    /// Renders `path` relative to the invocation root with `/` separators,
    /// falling back to the full path when it lies outside the root.
    pub fn relative_display(&self, path: &Path) -> String {
        match path.strip_prefix(&self.base_dir) {
            Ok(rel) if !rel.as_os_str().is_empty() => slash_normalize(rel),
            _ => path.display().to_string(),
        }
    }
}

/// Default filter lists read from `textcat.toml`, all optional. CLI values
/// are appended to these rather than replacing them.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Defaults {
    pub include_ext: Vec<String>,
    pub exclude_ext: Vec<String>,
    pub exclude_dir: Vec<String>,
    pub exclude_file_pattern: Vec<String>,
    pub include_file_pattern: Vec<String>,
}

/// Loads the defaults file from the invocation root, if present. A missing
/// file yields empty defaults; a malformed one is an error.
pub fn load_defaults(base_dir: &Path) -> Result<Defaults> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(Defaults::default());
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("error reading {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("error parsing {}", path.display()))
}

/// Resolves `path` against `base` lexically. No filesystem access: `.`
/// components are dropped and `..` pops the previous component, so the
/// result compares cleanly against other paths built the same way.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    resolved
}

/// Joins a path's components with forward slashes, regardless of platform.
pub fn slash_normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn compile_patterns<'a, I>(patterns: I) -> Result<Vec<Regex>>
where
    I: IntoIterator<Item = &'a String>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            Regex::new(pattern).with_context(|| format!("invalid file pattern {pattern:?}"))
        })
        .collect()
}

fn normalize_extensions<'a, I>(raw: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    raw.into_iter()
        .filter_map(|ext| normalize_extension(ext))
        .collect()
}

/// Trims, prefixes the dot when missing, and lower-cases an extension.
/// Blank entries (for example from a trailing comma) are dropped.
fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let dotted = if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{trimmed}")
    };
    Some(dotted.to_lowercase())
}
