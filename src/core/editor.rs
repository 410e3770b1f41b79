//! Editor launcher - runs the configured text editor on a memo file
//!
//! The editor inherits the terminal and the command blocks until it
//! exits. A non-zero exit or a missing editor binary is an
//! `ExternalTool` error; any file already written stays on disk.

use std::path::Path;
use std::process::Command;

use super::error::{Error, Result};

/// Open `path` in `editor` and wait for it to exit.
pub fn open(editor: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor)
        .arg(path)
        .status()
        .map_err(|err| Error::external_tool(editor, format!("could not launch: {}", err)))?;

    if !status.success() {
        return Err(Error::external_tool(
            editor,
            format!("exited with {} while editing {}", status, path.display()),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_editor() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("1-2024-01-01-x.md");
        std::fs::write(&file, "# x\n").unwrap();

        // `true` ignores its arguments and exits 0
        assert!(open("true", &file).is_ok());
    }

    #[test]
    fn test_failing_editor() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("1-2024-01-01-x.md");
        std::fs::write(&file, "# x\n").unwrap();

        let err = open("false", &file).unwrap_err();
        assert!(matches!(err, Error::ExternalTool { .. }));

        // Partial side effects are kept
        assert!(file.is_file());
    }

    #[test]
    fn test_missing_editor() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("1-2024-01-01-x.md");
        std::fs::write(&file, "# x\n").unwrap();

        let err = open("definitely-not-an-editor-binary", &file).unwrap_err();
        assert!(matches!(err, Error::ExternalTool { .. }));
    }
}
