use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::JobId;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const FIELD_SEPARATOR: char = '\t';

/// One submission event as written to the shared audit log.
///
/// Serialized as a single tab-separated line:
/// `timestamp \t requester \t origin \t job_id \t tokens \n`.
/// Free-text fields are flattened so that a record can never span lines or
/// shift columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Local wall-clock time of the submission
    pub timestamp: NaiveDateTime,
    /// Local part of the requester e-mail (text before `@`)
    pub requester: String,
    /// Client address, forwarded-header aware
    pub origin: String,
    pub job_id: JobId,
    /// Residue (token) count of the submitted sequences
    pub tokens: u64,
}

impl AuditRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        requester: impl Into<String>,
        origin: impl Into<String>,
        job_id: JobId,
        tokens: u64,
    ) -> Self {
        Self {
            timestamp,
            requester: requester.into(),
            origin: origin.into(),
            job_id,
            tokens,
        }
    }

    /// Formats the record as one complete log line, including the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{ts}{sep}{requester}{sep}{origin}{sep}{job}{sep}{tokens}\n",
            ts = self.timestamp.format(TIMESTAMP_FORMAT),
            requester = flatten(&self.requester),
            origin = flatten(&self.origin),
            job = self.job_id,
            tokens = self.tokens,
            sep = FIELD_SEPARATOR,
        )
    }

    /// Parses one line produced by [`AuditRecord::to_line`].
    ///
    /// Returns `None` for lines that do not have the expected shape, so that a
    /// hand-edited or truncated log still renders.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.split(FIELD_SEPARATOR);
        let timestamp = NaiveDateTime::parse_from_str(fields.next()?, TIMESTAMP_FORMAT).ok()?;
        let requester = fields.next()?.to_string();
        let origin = fields.next()?.to_string();
        let job_id = JobId::parse(fields.next()?).ok()?;
        let tokens = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            timestamp,
            requester,
            origin,
            job_id,
            tokens,
        })
    }
}

fn flatten(field: &str) -> String {
    field
        .chars()
        .map(|c| if c == FIELD_SEPARATOR || c.is_control() { ' ' } else { c })
        .collect()
}
