//! # afold-filestore
//!
//! Filesystem access for afold job directories.
//!
//! This crate is the only code that turns a job id or a caller-supplied path
//! into a filesystem location:
//! - **JobLayout**: naming of the job directory, input file, working
//!   directory, sentinels and worker log
//! - **PathSandbox**: canonicalizing containment check for caller paths
//! - **FileBrowser**: directory listing and file resolution, always through
//!   the sandbox
//!
//! Everything here is synchronous `std::fs`; HTTP handlers run it on the
//! blocking pool.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use afold_filestore::{FileBrowser, JobLayout};
//!
//! let browser = FileBrowser::new(JobLayout::new("/storage/jobs"));
//! let listing = browser.list(&job_id, "input_abc_full_dbs")?;
//! for entry in &listing.entries {
//!     println!("{} {:?}", entry.name, entry.size);
//! }
//! ```

pub mod browser;
pub mod error;
pub mod layout;
pub mod sandbox;

pub use browser::{BrowseTarget, DirEntryInfo, DirectoryListing, EntryKind, FileBrowser, ResolvedFile};
pub use error::{FilestoreError, Result};
pub use layout::JobLayout;
pub use sandbox::{PathSandbox, SandboxedPath};
