//! Style reference loader
//!
//! Reads the author's style document ("style DNA") from the first candidate
//! path that yields non-blank text. Loading never fails: when no candidate is
//! usable the built-in default reference is returned and a warning is logged.

use council_domain::StyleReference;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads a [`StyleReference`] from the local file system
#[derive(Debug, Clone, Default)]
pub struct StyleReferenceLoader;

impl StyleReferenceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Try each candidate in order and return the first usable document.
    pub fn load<P: AsRef<Path>>(&self, candidates: &[P]) -> StyleReference {
        for candidate in candidates {
            let path = candidate.as_ref();
            match fs::read_to_string(path) {
                Ok(content) if !content.trim().is_empty() => {
                    debug!(path = %path.display(), chars = content.len(), "Loaded style reference");
                    return StyleReference::new(content);
                }
                Ok(_) => debug!(path = %path.display(), "Style reference is blank, skipping"),
                Err(e) => debug!(path = %path.display(), error = %e, "Style reference unreadable"),
            }
        }

        warn!(
            candidates = ?candidates.iter().map(|p| p.as_ref().to_path_buf()).collect::<Vec<PathBuf>>(),
            "No style reference found; using the built-in default"
        );
        StyleReference::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_first_readable_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let first = write(&dir, "voice.md", "Write like Annie Ernaux.");
        let second = write(&dir, "style_dna.md", "Write like Sebald.");

        let reference = StyleReferenceLoader::new().load(&[first, second]);
        assert_eq!(reference.content(), "Write like Annie Ernaux.");
        assert!(!reference.is_default());
    }

    #[test]
    fn test_missing_and_blank_candidates_are_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.md");
        let blank = write(&dir, "blank.md", "   \n\t");
        let good = write(&dir, "style_dna.md", "Short sentences.\n");

        let reference = StyleReferenceLoader::new().load(&[missing, blank, good]);
        assert_eq!(reference.content(), "Short sentences.\n");
    }

    #[test]
    fn test_no_usable_candidate_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let reference = StyleReferenceLoader::new().load(&[dir.path().join("nope.md")]);
        assert!(reference.is_default());

        let empty: [PathBuf; 0] = [];
        assert!(StyleReferenceLoader::new().load(&empty).is_default());
    }

    #[test]
    fn test_directory_candidate_is_skipped() {
        let dir = TempDir::new().unwrap();
        let reference = StyleReferenceLoader::new().load(&[dir.path()]);
        assert!(reference.is_default());
    }
}
