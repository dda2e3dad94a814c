//! Server-side validation of submitted FASTA protein text.
//!
//! Accepted shape:
//!
//! ```text
//! >descriptor1            header, free text
//! MKVLAAGIVGLLLA...       one or more residue lines
//! >descriptor2
//! ...
//! ```
//!
//! Residue lines may contain ASCII letters except `J` and `O`, plus `|` as a
//! chain separator. Blank lines are tolerated.

use crate::error::{JobsError, Result};
use crate::identity::normalize_submission;

/// A normalized, validated submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSubmission {
    normalized: String,
    residue_count: u64,
}

impl SequenceSubmission {
    /// Normalizes `raw` and checks it, counting residues on non-header lines.
    pub fn parse(raw: &str, min_residues: u64, max_residues: u64) -> Result<Self> {
        let normalized = normalize_submission(raw);
        if normalized.trim().is_empty() {
            return Err(JobsError::invalid_input("Sequence text is empty"));
        }
        if !normalized.starts_with('>') {
            return Err(JobsError::invalid_input(
                "The first letter of the first line has to be the symbol >",
            ));
        }

        let mut residue_count: u64 = 0;
        let mut residue_lines = 0usize;
        for (idx, line) in normalized.lines().enumerate() {
            let line_no = idx + 1;
            if line.starts_with('>') || line.is_empty() {
                continue;
            }
            residue_lines += 1;
            for (col, ch) in line.chars().enumerate() {
                let col_no = col + 1;
                match ch {
                    'J' | 'j' | 'O' | 'o' => {
                        return Err(JobsError::invalid_input(format!(
                            "Invalid letter {} at line {}, column {}",
                            ch.to_ascii_uppercase(),
                            line_no,
                            col_no
                        )));
                    },
                    c if c.is_ascii_alphabetic() => residue_count += 1,
                    '|' => {},
                    c if c.is_ascii_digit() => {
                        return Err(JobsError::invalid_input(format!(
                            "Invalid numeric value ({}) at line {}, column {}",
                            c, line_no, col_no
                        )));
                    },
                    c => {
                        return Err(JobsError::invalid_input(format!(
                            "Invalid symbol ({}) at line {}, column {}",
                            c.escape_default(),
                            line_no,
                            col_no
                        )));
                    },
                }
            }
        }

        if residue_lines == 0 {
            return Err(JobsError::invalid_input(
                "At least two lines. One for the sequence name, other for the sequence itself.",
            ));
        }
        if residue_count < min_residues {
            return Err(JobsError::invalid_input(format!(
                "Minimum number of residues allowed: {}. You have {}",
                min_residues, residue_count
            )));
        }
        if residue_count > max_residues {
            return Err(JobsError::invalid_input(format!(
                "Maximum number of residues allowed: {}. You have {}",
                max_residues, residue_count
            )));
        }

        Ok(Self {
            normalized,
            residue_count,
        })
    }

    /// Text the job id is derived from and the worker receives
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn residue_count(&self) -> u64 {
        self.residue_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<SequenceSubmission> {
        SequenceSubmission::parse(raw, 1, 4000)
    }

    fn message(err: JobsError) -> String {
        match err {
            JobsError::InvalidInput(msg) => msg,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_submission() {
        let seq = parse(">seq1\r\nMKV\r\n").unwrap();
        assert_eq!(seq.normalized(), ">seq1\nMKV\n");
        assert_eq!(seq.residue_count(), 3);
    }

    #[test]
    fn test_multimer_counts_every_chain() {
        let raw = ">WP_267731513.1 AAA family ATPase\nMICHAELRSNAKFCDECGG\nPVAMSS\n\n>1LYZ_1|Chain A|HEN EGG WHITE LYSOZYME\nKVFGRC\n";
        let seq = parse(raw).unwrap();
        assert_eq!(seq.residue_count(), 19 + 6 + 6);
    }

    #[test]
    fn test_rejections_report_position() {
        assert_eq!(
            message(parse("MKV\n").unwrap_err()),
            "The first letter of the first line has to be the symbol >"
        );
        assert!(message(parse(">only a header").unwrap_err()).starts_with("At least two lines"));
        assert_eq!(
            message(parse(">s\nMKV\nAAJA\n").unwrap_err()),
            "Invalid letter J at line 3, column 3"
        );
        assert_eq!(
            message(parse(">s\nMoK\n").unwrap_err()),
            "Invalid letter O at line 2, column 2"
        );
        assert_eq!(
            message(parse(">s\nMK5V\n").unwrap_err()),
            "Invalid numeric value (5) at line 2, column 3"
        );
        assert_eq!(
            message(parse(">s\nMK V\n").unwrap_err()),
            "Invalid symbol ( ) at line 2, column 3"
        );
        assert!(message(parse("   \r\n").unwrap_err()).contains("empty"));
    }

    #[test]
    fn test_residue_bounds() {
        let err = SequenceSubmission::parse(">s\nMKV\n", 16, 4000).unwrap_err();
        assert_eq!(message(err), "Minimum number of residues allowed: 16. You have 3");

        let err = SequenceSubmission::parse(">s\nMKVMKV\n", 1, 5).unwrap_err();
        assert_eq!(message(err), "Maximum number of residues allowed: 5. You have 6");

        assert!(SequenceSubmission::parse(">s\nMKVMK\n", 5, 5).is_ok());
    }
}
