//! Type-safe wrapper for job identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::JOB_ID_HEX_LEN;
use crate::errors::CommonError;

/// Content-derived job identifier: 32 lower-case hex characters.
///
/// A `JobId` is safe to join onto the base output directory because it can
/// only hold hex digits. Strings coming from URLs must go through
/// [`JobId::parse`]; digests produced by the server use [`JobId::from_digest`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl JobId {
    /// Builds a job id from the first 128 bits of a content digest.
    pub fn from_digest(digest: &[u8; 16]) -> Self {
        Self(hex::encode(digest))
    }

    /// Validates a caller-supplied job id.
    pub fn parse(raw: &str) -> Result<Self, CommonError> {
        if raw.len() != JOB_ID_HEX_LEN {
            return Err(CommonError::invalid_input(format!(
                "job id must be {} hex characters, got {}",
                JOB_ID_HEX_LEN,
                raw.len()
            )));
        }
        if !raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(CommonError::invalid_input(
                "job id must contain only lower-case hex characters",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the job id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = CommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
