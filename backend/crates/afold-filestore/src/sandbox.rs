//! Containment check for caller-supplied paths.
//!
//! Every read of job-directory content on behalf of a request goes through
//! [`PathSandbox::resolve`]. The check runs in two stages:
//!
//! 1. Lexical: reject NUL bytes, absolute paths and any `..` that would climb
//!    above the root, before touching the filesystem.
//! 2. Canonical: resolve symlinks with `canonicalize` and require the result to
//!    be the root or nested under it, compared component-wise.
//!
//! A plain string-prefix test on non-canonical paths is not sufficient
//! (`/jobs/abc/../abcd` starts with `/jobs/abc`), so it is never used.

use crate::error::{FilestoreError, Result};
use std::io;
use std::path::{Component, Path, PathBuf};

/// A path that passed the sandbox check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxedPath {
    /// Canonical absolute target (symlinks resolved)
    pub canonical: PathBuf,
    /// Lexically normalized path relative to the root, as the caller named it.
    /// Empty for the root itself.
    pub relative: PathBuf,
}

impl SandboxedPath {
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }
}

/// Canonical root directory that caller paths must stay inside.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
}

impl PathSandbox {
    /// Canonicalizes `root`. Fails with `NotFound` if the root does not exist.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let canonical = std::fs::canonicalize(root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                FilestoreError::not_found(format!("sandbox root {}", root.display()))
            },
            _ => FilestoreError::Io(e),
        })?;
        Ok(Self { root: canonical })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `rel_path` against the root.
    ///
    /// Returns `AccessDenied` for anything that would leave the root, lexically
    /// or through a symlink, and `NotFound` for targets that do not exist.
    pub fn resolve(&self, rel_path: &str) -> Result<SandboxedPath> {
        let relative = normalize_relative(rel_path)?;
        let joined = self.root.join(&relative);

        let canonical = std::fs::canonicalize(&joined).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                FilestoreError::not_found(relative.display().to_string())
            },
            _ => FilestoreError::Io(e),
        })?;

        if !canonical.starts_with(&self.root) {
            log::warn!(
                "Sandbox escape through symlink: root={} requested={} resolved={}",
                self.root.display(),
                rel_path,
                canonical.display()
            );
            return Err(FilestoreError::access_denied(rel_path.to_string()));
        }

        Ok(SandboxedPath {
            canonical,
            relative,
        })
    }
}

/// Lexically normalizes a caller path relative to an implicit root.
///
/// `.` segments are dropped and `..` pops the previous segment; popping past
/// the root is a violation even if the target would not exist.
fn normalize_relative(rel_path: &str) -> Result<PathBuf> {
    if rel_path.contains('\0') {
        return Err(FilestoreError::access_denied("path contains a NUL byte"));
    }

    let mut normalized = PathBuf::new();
    for component in Path::new(rel_path).components() {
        match component {
            Component::Normal(segment) => normalized.push(segment),
            Component::CurDir => {},
            Component::ParentDir => {
                if !normalized.pop() {
                    log::warn!("Sandbox traversal rejected: {}", rel_path);
                    return Err(FilestoreError::access_denied(rel_path.to_string()));
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                log::warn!("Absolute path rejected: {}", rel_path);
                return Err(FilestoreError::access_denied(rel_path.to_string()));
            },
        }
    }
    Ok(normalized)
}
