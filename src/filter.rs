//! Per-entry inclusion rules. The checks form an ordered sequence and the
//! first matching exclusion wins; later rules are never consulted.

use std::path::Path;

use crate::classify::is_text_file;
use crate::config::FilterConfig;

/// Why an entry was rejected, in rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Hidden,
    ExcludedPath,
    ExcludedDir,
    PatternExcluded,
    PatternNotIncluded,
    ExtensionNotIncluded,
    ExtensionExcluded,
    NotText,
}

impl Skip {
    pub fn reason(self) -> &'static str {
        match self {
            Skip::Hidden => "hidden",
            Skip::ExcludedPath => "excluded path",
            Skip::ExcludedDir => "excluded directory",
            Skip::PatternExcluded => "matches exclude pattern",
            Skip::PatternNotIncluded => "does not match include patterns",
            Skip::ExtensionNotIncluded => "does not match include extensions",
            Skip::ExtensionExcluded => "excluded by extension",
            Skip::NotText => "not a text file",
        }
    }
}

/// Hidden entries (leading dot) are skipped, files and directories alike.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Decides whether to descend into a directory. `None` means descend.
pub fn check_dir(config: &FilterConfig, name: &str, path: &Path) -> Option<Skip> {
    if is_hidden(name) {
        return Some(Skip::Hidden);
    }
    if config.excluded_paths.contains(path) {
        return Some(Skip::ExcludedPath);
    }
    if config.exclude_dirs.contains(&config.relative_display(path)) {
        return Some(Skip::ExcludedDir);
    }
    None
}

/// Decides whether a file is admitted. `None` means admitted: the file
/// passed every applicable rule, including text classification.
pub fn check_file(config: &FilterConfig, name: &str, path: &Path) -> Option<Skip> {
    if is_hidden(name) {
        return Some(Skip::Hidden);
    }
    if config.excluded_paths.contains(path) {
        return Some(Skip::ExcludedPath);
    }
    if config.exclude_patterns.iter().any(|re| re.is_match(name)) {
        return Some(Skip::PatternExcluded);
    }
    // Include patterns and include extensions combine as AND: when both are
    // configured a file must satisfy both.
    if !config.include_patterns.is_empty()
        && !config.include_patterns.iter().any(|re| re.is_match(name))
    {
        return Some(Skip::PatternNotIncluded);
    }

    let ext = extension_of(name);
    if !config.include_extensions.is_empty() && !config.include_extensions.contains(&ext) {
        return Some(Skip::ExtensionNotIncluded);
    }
    if !ext.is_empty() && config.exclude_extensions.contains(&ext) {
        return Some(Skip::ExtensionExcluded);
    }

    if !is_text_file(path) {
        return Some(Skip::NotText);
    }
    None
}

/// Lower-cased extension including the dot (`.go`), or empty when the name
/// has none. The last dot wins, so `archive.tar.gz` yields `.gz`.
fn extension_of(name: &str) -> String {
    name.rfind('.')
        .map(|i| name[i..].to_lowercase())
        .unwrap_or_default()
}
