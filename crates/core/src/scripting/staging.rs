//! Scoped script files.
//!
//! Every submission is written into its own freshly created temporary
//! directory. The returned [`StagedScript`] owns that directory and removes
//! it when dropped, so cleanup happens on every exit path of the caller:
//! normal return, `?` propagation, panic unwind or a cancelled future.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::CoreError;

/// Required suffix of uploaded script filenames (case-sensitive).
pub const SCRIPT_EXTENSION: &str = ".py";

/// Filename used for inline source submissions.
pub const INLINE_SCRIPT_NAME: &str = "script.py";

/// Prefix of every per-request staging directory.
pub const STAGING_DIR_PREFIX: &str = "execbridge-";

/// Creates per-request staging directories under an optional root.
#[derive(Debug, Clone, Default)]
pub struct ScriptStager {
    /// Parent of the staging directories; the OS temp dir when `None`.
    root: Option<PathBuf>,
}

impl ScriptStager {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Stage inline source text as [`INLINE_SCRIPT_NAME`].
    pub async fn stage_source(&self, code: &str) -> Result<StagedScript, CoreError> {
        let dir = self.create_dir().await?;
        let path = dir.path().join(INLINE_SCRIPT_NAME);
        tokio::fs::write(&path, code.as_bytes())
            .await
            .map_err(CoreError::staging("Failed to write script source"))?;
        Ok(StagedScript { dir, path })
    }

    /// Stage uploaded bytes verbatim under the upload's own filename.
    ///
    /// The filename is validated before anything touches the filesystem.
    pub async fn stage_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<StagedScript, CoreError> {
        let name = upload_file_name(filename)?;
        let dir = self.create_dir().await?;
        let path = dir.path().join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(CoreError::staging("Failed to write uploaded script"))?;
        Ok(StagedScript { dir, path })
    }

    /// Create a fresh staging directory on the blocking pool.
    async fn create_dir(&self) -> Result<TempDir, CoreError> {
        let root = self.root.clone();
        let created = tokio::task::spawn_blocking(move || {
            let mut builder = tempfile::Builder::new();
            builder.prefix(STAGING_DIR_PREFIX);
            match root {
                Some(root) => builder.tempdir_in(root),
                None => builder.tempdir(),
            }
        })
        .await
        .unwrap_or_else(|join_err| Err(std::io::Error::other(join_err)));

        created.map_err(CoreError::staging("Failed to create staging directory"))
    }
}

/// Validate an uploaded filename and return the name to write it under.
///
/// The full client-supplied name must end with [`SCRIPT_EXTENSION`]. Only
/// its final path component is kept so the file always lands directly
/// inside the staging directory.
pub fn upload_file_name(filename: &str) -> Result<&str, CoreError> {
    if !filename.ends_with(SCRIPT_EXTENSION) {
        return Err(CoreError::Validation(format!(
            "Only Python files ({SCRIPT_EXTENSION}) are allowed"
        )));
    }
    // Split on both separators; clients on Windows send backslashes.
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);
    Ok(name)
}

/// A script file living in its own temporary directory.
///
/// Dropping the value deletes the directory and everything in it.
#[derive(Debug)]
pub struct StagedScript {
    dir: TempDir,
    path: PathBuf,
}

impl StagedScript {
    /// Path of the script file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The staging directory holding the script.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the staging directory now, reporting any removal error.
    pub fn close(self) -> std::io::Result<()> {
        self.dir.close()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
