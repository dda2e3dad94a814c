use crate::audit_log::AuditLog;
use crate::error::{JobsError, Result};
use crate::identity::job_id_for;
use crate::launcher::{LaunchedJob, ProcessLauncher};
use crate::sequence::SequenceSubmission;
use afold_commons::{AuditRecord, JobId};

/// Server-side acceptance rules for a submission.
#[derive(Debug, Clone)]
pub struct SubmissionPolicy {
    pub min_residues: u64,
    pub max_residues: u64,
    /// When set, requester addresses must end with `@{domain}`
    pub allowed_email_domain: Option<String>,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            min_residues: 1,
            max_residues: 4000,
            allowed_email_domain: None,
        }
    }
}

/// Inbound submission as received from the form.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub sequences: String,
    pub email: String,
    /// Client-computed residue count; untrusted
    pub tokens: Option<String>,
    /// Client address used in the audit record
    pub origin: String,
}

#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub job_id: JobId,
    /// `/jobs/{job_id}`, the re-visitable status URL
    pub status_path: String,
    pub launched: LaunchedJob,
}

/// Validate → identify → launch → audit.
#[derive(Debug, Clone)]
pub struct JobSubmissionService {
    policy: SubmissionPolicy,
    launcher: ProcessLauncher,
    audit_log: AuditLog,
}

impl JobSubmissionService {
    pub fn new(policy: SubmissionPolicy, launcher: ProcessLauncher, audit_log: AuditLog) -> Self {
        Self {
            policy,
            launcher,
            audit_log,
        }
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    pub async fn submit(&self, request: SubmissionRequest) -> Result<SubmittedJob> {
        let sequence = SequenceSubmission::parse(
            &request.sequences,
            self.policy.min_residues,
            self.policy.max_residues,
        )?;
        let requester = self.requester_of(&request.email)?;

        let job_id = job_id_for(sequence.normalized());
        let launched = self.launcher.launch(&job_id, sequence.normalized()).await?;

        // The server count is authoritative; the form's value is only compared.
        let tokens = sequence.residue_count();
        if let Some(claimed) = request.tokens.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            if claimed.parse::<u64>().ok() != Some(tokens) {
                log::warn!(
                    "Client token count {:?} for job {} disagrees with {} residues; recording {}",
                    claimed,
                    job_id,
                    tokens,
                    tokens
                );
            }
        }
        let record = AuditRecord::new(
            chrono::Local::now().naive_local(),
            requester,
            request.origin.as_str(),
            job_id.clone(),
            tokens,
        );
        if let Err(e) = self.audit_log.append(&record).await {
            log::error!("Job {} launched but not recorded in the audit log: {}", job_id, e);
        }

        log::info!(
            "Accepted job {} from {} ({} residues)",
            job_id,
            request.origin,
            sequence.residue_count()
        );

        Ok(SubmittedJob {
            status_path: format!("/jobs/{}", job_id),
            job_id,
            launched,
        })
    }

    /// Local part of a valid requester address.
    fn requester_of<'a>(&self, email: &'a str) -> Result<&'a str> {
        let email = email.trim();
        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| JobsError::invalid_input("A valid e-mail address is required"))?;
        if local.is_empty() || domain.is_empty() || local.chars().any(char::is_whitespace) {
            return Err(JobsError::invalid_input("A valid e-mail address is required"));
        }
        if let Some(allowed) = &self.policy.allowed_email_domain {
            if !domain.eq_ignore_ascii_case(allowed) {
                return Err(JobsError::invalid_input(format!(
                    "Only @{} addresses may submit jobs",
                    allowed
                )));
            }
        }
        Ok(local)
    }
}
