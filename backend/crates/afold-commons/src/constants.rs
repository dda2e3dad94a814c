//! On-disk naming shared by the launcher, the state resolver and the browser.
//!
//! The external worker writes its sentinels using exactly these names, so they
//! are part of the worker contract and must not change independently.

/// Sentinel written by the worker once it has picked the job up.
pub const RUNNING_SENTINEL: &str = "running.txt";

/// Sentinel written by the worker after a successful run.
pub const FINISHED_SENTINEL: &str = "finished.txt";

/// Sentinel written by the worker when the run aborted.
pub const FAILED_SENTINEL: &str = "failed.txt";

/// Prefix of the submitted FASTA file: `input_{job_id}.fasta`.
pub const INPUT_FILE_PREFIX: &str = "input_";

/// Extension of the submitted FASTA file.
pub const INPUT_FILE_EXTENSION: &str = "fasta";

/// Suffix the worker appends to the input stem for its working directory
/// (`input_{job_id}_full_dbs`) and its log file (`input_{job_id}_full_dbs.log`).
pub const WORK_DIR_SUFFIX: &str = "_full_dbs";

/// Extension of the worker log that sits next to the working directory.
pub const WORKER_LOG_EXTENSION: &str = "log";

/// Number of hex characters in a job id (128-bit digest).
pub const JOB_ID_HEX_LEN: usize = 32;
