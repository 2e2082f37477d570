//! Exclusion filter: drops junk files and caller-excluded paths before processing.

use regex::RegexSet;
use std::path::Path;

use crate::contract::JunkFilter;

/// Basenames produced by operating systems and editors rather than users.
const JUNK_PATTERNS: &[&str] = &[
    r"^npm-debug\.log$",
    r"^\..*\.swp$",
    r"^\.DS_Store$",
    r"^\.AppleDatabase$",
    r"^\.AppleDouble$",
    r"^\.LSOverride$",
    r"^Icon\r$",
    r"^\._.*",
    r"^\.Spotlight-V100(?:$|\n)",
    r"\.Trashes",
    r"^__MACOSX$",
    r"~$",
    r"^Thumbs\.db$",
    r"^ehthumbs\.db$",
    r"^[Dd]esktop\.ini$",
    r"@eaDir$",
];

/// Default [`JunkFilter`] backed by a fixed set of well-known metadata names.
pub struct DefaultJunkFilter {
    patterns: RegexSet,
}

impl DefaultJunkFilter {
    pub fn new() -> Self {
        Self {
            // The pattern list is static and known to compile.
            patterns: RegexSet::new(JUNK_PATTERNS).expect("junk patterns are valid regexes"),
        }
    }
}

impl Default for DefaultJunkFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl JunkFilter for DefaultJunkFilter {
    fn is_junk(&self, basename: &str) -> bool {
        self.patterns.is_match(basename)
    }
}

/// Returns whether `path` should go through the pipeline.
///
/// Exclusion entries are plain substrings of the full path, not patterns.
pub fn should_process(path: &Path, exclude_files: Option<&[String]>, junk: &dyn JunkFilter) -> bool {
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if junk.is_junk(&basename) {
        return false;
    }

    let full = path.to_string_lossy();
    match exclude_files {
        Some(excluded) => !excluded.iter().any(|entry| full.contains(entry.as_str())),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junk_names_are_recognised() {
        let junk = DefaultJunkFilter::new();
        for name in [".DS_Store", "Thumbs.db", "._photo.png", ".photo.png.swp", "notes.txt~", "desktop.ini"] {
            assert!(junk.is_junk(name), "{name} should be junk");
        }
        for name in ["photo.png", "Thumbs.db.png", "icon.svg"] {
            assert!(!junk.is_junk(name), "{name} should not be junk");
        }
    }

    #[test]
    fn excludes_by_substring_of_full_path() {
        let junk = DefaultJunkFilter::new();
        let excluded = vec!["drafts/".to_string()];
        assert!(!should_process(Path::new("img/drafts/a.png"), Some(excluded.as_slice()), &junk));
        assert!(should_process(Path::new("img/final/a.png"), Some(excluded.as_slice()), &junk));
        assert!(should_process(Path::new("img/final/a.png"), None, &junk));
        assert!(should_process(Path::new("img/final/a.png"), Some(&[][..]), &junk));
    }

    #[test]
    fn junk_is_checked_on_basename_only() {
        let junk = DefaultJunkFilter::new();
        assert!(!should_process(Path::new("img/.DS_Store"), None, &junk));
        assert!(should_process(Path::new("Thumbs.db/a.png"), None, &junk));
    }
}
