//! Directory listing and file resolution for job result trees.

use crate::error::{FilestoreError, Result};
use crate::layout::JobLayout;
use crate::sandbox::{PathSandbox, SandboxedPath};
use afold_commons::JobId;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntryInfo {
    pub name: String,
    /// Path relative to the job root, `/`-separated
    pub rel_path: String,
    pub kind: EntryKind,
    /// Size in bytes; `None` for directories
    pub size: Option<u64>,
}

impl DirEntryInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// PNG files get an image view, everything else a text view.
    pub fn is_png(&self) -> bool {
        self.kind == EntryKind::File && self.name.to_ascii_lowercase().ends_with(".png")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub job_id: JobId,
    /// Listed directory relative to the job root; empty at the root
    pub rel_path: String,
    /// Relative path of the parent directory; `None` at the job root
    pub parent: Option<String>,
    /// Sorted lexicographically by name
    pub entries: Vec<DirEntryInfo>,
}

/// A regular file inside a job directory, ready to be streamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseTarget {
    Directory(DirectoryListing),
    File(ResolvedFile),
}

/// Read-only view over job directories. Every call builds a fresh
/// [`PathSandbox`] rooted at the job directory, so nothing is cached between
/// requests.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    layout: JobLayout,
}

impl FileBrowser {
    pub fn new(layout: JobLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &JobLayout {
        &self.layout
    }

    fn sandbox(&self, job_id: &JobId) -> Result<PathSandbox> {
        let job_dir = self.layout.job_dir(job_id);
        if !job_dir.is_dir() {
            return Err(FilestoreError::JobNotFound(job_id.clone()));
        }
        PathSandbox::new(&job_dir).map_err(|e| match e {
            FilestoreError::NotFound(_) => FilestoreError::JobNotFound(job_id.clone()),
            other => other,
        })
    }

    /// Lists a directory, or resolves a file so the caller can serve it.
    pub fn browse(&self, job_id: &JobId, rel_path: &str) -> Result<BrowseTarget> {
        let sandbox = self.sandbox(job_id)?;
        let target = sandbox.resolve(rel_path)?;
        let metadata = fs::metadata(&target.canonical)?;

        if metadata.is_dir() {
            Ok(BrowseTarget::Directory(read_listing(job_id, &sandbox, &target)?))
        } else if metadata.is_file() {
            Ok(BrowseTarget::File(to_resolved_file(&target, metadata.len())))
        } else {
            Err(FilestoreError::not_found(rel_path.to_string()))
        }
    }

    /// Lists the immediate entries of a directory inside the job.
    pub fn list(&self, job_id: &JobId, rel_path: &str) -> Result<DirectoryListing> {
        let sandbox = self.sandbox(job_id)?;
        let target = sandbox.resolve(rel_path)?;
        if !target.canonical.is_dir() {
            return Err(FilestoreError::not_found(rel_path.to_string()));
        }
        read_listing(job_id, &sandbox, &target)
    }

    /// Resolves a regular file inside the job. Directories are `NotFound`.
    pub fn resolve_file(&self, job_id: &JobId, rel_path: &str) -> Result<ResolvedFile> {
        let sandbox = self.sandbox(job_id)?;
        let target = sandbox.resolve(rel_path)?;
        let metadata = fs::metadata(&target.canonical)?;
        if !metadata.is_file() {
            return Err(FilestoreError::not_found(rel_path.to_string()));
        }
        Ok(to_resolved_file(&target, metadata.len()))
    }
}

fn to_resolved_file(target: &SandboxedPath, size: u64) -> ResolvedFile {
    // Name the download after what the caller asked for, not the symlink target.
    let file_name = target
        .relative
        .file_name()
        .or_else(|| target.canonical.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ResolvedFile {
        path: target.canonical.clone(),
        file_name,
        size,
    }
}

fn read_listing(
    job_id: &JobId,
    sandbox: &PathSandbox,
    target: &SandboxedPath,
) -> Result<DirectoryListing> {
    let rel_path = to_url_path(&target.relative);
    let parent = if target.is_root() {
        None
    } else {
        Some(
            target
                .relative
                .parent()
                .map(to_url_path)
                .unwrap_or_default(),
        )
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(&target.canonical)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_path = entry.path();

        // Links are only followed when their target stays inside the job.
        let metadata = if entry.file_type()?.is_symlink() {
            match fs::canonicalize(&entry_path) {
                Ok(resolved) if resolved.starts_with(sandbox.root()) => fs::metadata(&resolved)?,
                Ok(resolved) => {
                    log::warn!(
                        "Hiding symlink {} pointing outside job {} ({})",
                        entry_path.display(),
                        job_id,
                        resolved.display()
                    );
                    continue;
                },
                Err(_) => {
                    log::debug!("Hiding dangling symlink {}", entry_path.display());
                    continue;
                },
            }
        } else {
            entry.metadata()?
        };
        let (kind, size) = if metadata.is_dir() {
            (EntryKind::Directory, None)
        } else {
            (EntryKind::File, Some(metadata.len()))
        };

        let entry_rel = if rel_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", rel_path, name)
        };
        entries.push(DirEntryInfo {
            name,
            rel_path: entry_rel,
            kind,
            size,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirectoryListing {
        job_id: job_id.clone(),
        rel_path,
        parent,
        entries,
    })
}

fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
