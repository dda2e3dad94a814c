use serde::Deserialize;

/// Fields posted by the submission form.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitForm {
    pub sequences: String,
    pub email: String,
    /// Residue count computed by the browser; re-derived server-side if unusable
    #[serde(default)]
    pub tokens_var: Option<String>,
}
