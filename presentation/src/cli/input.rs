//! Resolve CLI input arguments into request text

use super::commands::InputArgs;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Text under review plus its manuscript context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub text: String,
    pub context: String,
}

impl InputArgs {
    /// Read the text and context from their flags, files, or stdin.
    ///
    /// The text falls back to standard input when neither `--text` nor
    /// `--text-file` is given. A missing context is empty.
    pub fn resolve(&self) -> io::Result<ResolvedInput> {
        self.resolve_with(|| {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        })
    }

    fn resolve_with(&self, stdin: impl FnOnce() -> io::Result<String>) -> io::Result<ResolvedInput> {
        let text = match (&self.text, &self.text_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) if path == Path::new("-") => stdin()?,
            (None, Some(path)) => read_file(path)?,
            (None, None) => stdin()?,
        };

        let context = match (&self.context, &self.context_file) {
            (Some(context), _) => context.clone(),
            (None, Some(path)) => read_file(path)?,
            (None, None) => String::new(),
        };

        Ok(ResolvedInput { text, context })
    }
}

fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn no_stdin() -> io::Result<String> {
        panic!("stdin should not be read")
    }

    #[test]
    fn test_inline_text_and_context() {
        let args = InputArgs {
            text: Some("draft".to_string()),
            context: Some("chapter one".to_string()),
            ..Default::default()
        };
        let input = args.resolve_with(no_stdin).unwrap();
        assert_eq!(input.text, "draft");
        assert_eq!(input.context, "chapter one");
    }

    #[test]
    fn test_files_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("scene.md");
        let context_path = dir.path().join("ch1.md");
        fs::write(&text_path, "She closed the door.").unwrap();
        fs::write(&context_path, "The key was lost.").unwrap();

        let args = InputArgs {
            text_file: Some(text_path),
            context_file: Some(context_path),
            ..Default::default()
        };
        let input = args.resolve_with(no_stdin).unwrap();
        assert_eq!(input.text, "She closed the door.");
        assert_eq!(input.context, "The key was lost.");
    }

    #[test]
    fn test_stdin_fallback_and_empty_context() {
        let input = InputArgs::default()
            .resolve_with(|| Ok("from stdin".to_string()))
            .unwrap();
        assert_eq!(input.text, "from stdin");
        assert_eq!(input.context, "");

        let dash = InputArgs {
            text_file: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert_eq!(
            dash.resolve_with(|| Ok("piped".to_string())).unwrap().text,
            "piped"
        );
    }

    #[test]
    fn test_missing_file_names_path() {
        let args = InputArgs {
            text: Some("t".to_string()),
            context_file: Some(PathBuf::from("/nonexistent/context.md")),
            ..Default::default()
        };
        let error = args.resolve_with(no_stdin).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/context.md"));
    }
}
