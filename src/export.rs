// Export of the active buffer to a file.
// Derives `code.<ext>` from the active language and writes the buffer bytes unchanged.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{CodeNestError, Result};
use crate::language::LanguageId;
use crate::state::SessionState;

/// Extension used when the language is not known.
const FALLBACK_EXTENSION: &str = "txt";

/// A file ready to be written: name plus exact contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub contents: String,
}

/// Extension for an export, falling back to `txt` when no language is given.
pub fn extension_for(language: Option<LanguageId>) -> &'static str {
    language.map_or(FALLBACK_EXTENSION, |lang| lang.extension())
}

/// Build the artifact for the active buffer. Does not touch the session.
pub fn derive_export(session: &SessionState) -> ExportArtifact {
    let language = session.active_language();
    ExportArtifact {
        filename: format!("code.{}", extension_for(Some(language))),
        contents: session.active_code().to_string(),
    }
}

/// Export the active buffer into `dir` and return the written path.
///
/// Empty buffers are not exported.
pub fn save_export(session: &SessionState, dir: &Path) -> Result<PathBuf> {
    let artifact = derive_export(session);
    if artifact.contents.is_empty() {
        return Err(CodeNestError::EmptyBuffer {
            language: session.active_language().as_str(),
        });
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.filename);
    write_atomic(dir, &path, artifact.contents.as_bytes())?;

    info!(path = %path.display(), bytes = artifact.contents.len(), "exported buffer");
    Ok(path)
}

/// Write bytes to a uniquely named temp file in `dir`, then move it onto `path`.
/// The temp file is removed if any step before the move fails.
fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_derive_java_export() {
        let mut session = SessionState::new();
        session.set_active_language(LanguageId::Java);
        session.update_buffer(LanguageId::Java, "class X{}");

        let artifact = derive_export(&session);
        assert_eq!(artifact.filename, "code.java");
        assert_eq!(artifact.contents, "class X{}");
    }

    #[test]
    fn test_filenames_per_language() {
        let mut session = SessionState::new();
        let expected = [
            (LanguageId::Cpp, "code.cpp"),
            (LanguageId::Javascript, "code.js"),
            (LanguageId::Java, "code.java"),
            (LanguageId::Python, "code.py"),
        ];
        for (lang, filename) in expected {
            session.set_active_language(lang);
            assert_eq!(derive_export(&session).filename, filename);
        }
    }

    #[test]
    fn test_fallback_extension() {
        assert_eq!(extension_for(None), "txt");
        assert_eq!(extension_for(Some(LanguageId::Python)), "py");
    }

    #[test]
    fn test_derive_does_not_mutate_session() {
        let mut session = SessionState::new();
        session.set_stdin("abc");
        let before = session.clone();

        derive_export(&session);
        assert_eq!(session, before);
    }

    #[test]
    fn test_save_writes_exact_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SessionState::new();
        session.set_active_language(LanguageId::Python);
        session.update_buffer(LanguageId::Python, "print(1)\n\n");

        let path = save_export(&session, &temp_dir.path().join("out")).unwrap();

        assert_eq!(path.file_name().unwrap(), "code.py");
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)\n\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_leaves_neighbouring_files_alone() {
        let temp_dir = TempDir::new().unwrap();
        let notes = temp_dir.path().join("code.tmp");
        fs::write(&notes, "my notes").unwrap();

        let path = save_export(&SessionState::new(), temp_dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&notes).unwrap(), "my notes");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            LanguageId::Cpp.starter_template()
        );
    }

    #[test]
    fn test_save_overwrites_previous_export() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SessionState::new();
        session.update_buffer(LanguageId::Cpp, "first");
        save_export(&session, temp_dir.path()).unwrap();

        session.update_buffer(LanguageId::Cpp, "second");
        let path = save_export(&session, temp_dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_save_skips_empty_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SessionState::new();
        session.update_buffer(LanguageId::Cpp, "");

        let err = save_export(&session, temp_dir.path()).unwrap_err();
        assert!(matches!(err, CodeNestError::EmptyBuffer { language: "cpp" }));
        assert!(!temp_dir.path().join("code.cpp").exists());
    }
}
