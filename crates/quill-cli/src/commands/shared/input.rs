use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::cli::root_commands::TextSourceArgs;

/// Read the text named by `--text`, a file path, or `-` for stdin.
pub fn read_text(source: &TextSourceArgs) -> anyhow::Result<String> {
    if let Some(text) = &source.text {
        return Ok(text.clone());
    }

    match source.path.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read text from stdin")?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => anyhow::bail!("provide a file path, '-' for stdin, or --text"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn inline_text_wins() {
        let source = TextSourceArgs {
            path: None,
            text: Some("Hello.".to_string()),
        };
        assert_eq!(read_text(&source).expect("text"), "Hello.");
    }

    #[test]
    fn reads_file_contents() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let path = temp.path().join("lesson.txt");
        std::fs::write(&path, "Keys stay offline.").expect("write");
        let source = TextSourceArgs {
            path: Some(path),
            text: None,
        };
        assert_eq!(read_text(&source).expect("text"), "Keys stay offline.");
    }

    #[test]
    fn missing_file_names_the_path() {
        let source = TextSourceArgs {
            path: Some(PathBuf::from("/definitely/not/here.txt")),
            text: None,
        };
        let err = read_text(&source).expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn no_source_is_an_error() {
        let source = TextSourceArgs {
            path: None,
            text: None,
        };
        assert!(read_text(&source).is_err());
    }
}
