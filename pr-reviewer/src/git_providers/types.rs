//! Provider-agnostic data model for pull requests and their diffs.
//!
//! These types are the normalized output of the fetch stage and are consumed
//! by the later stages (prompt building, position mapping, publishing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A unique reference to a pull request inside a code host.
///
/// Derived from the submitted PR URL, never persisted on its own; snapshots
/// embed a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrReference {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// PR number.
    pub number: u64,
}

impl fmt::Display for PrReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Change status of a file within a PR, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    /// Catch-all for statuses the host may add in the future.
    #[serde(other)]
    Other,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeStatus::Added => "added",
            ChangeStatus::Modified => "modified",
            ChangeStatus::Removed => "removed",
            ChangeStatus::Renamed => "renamed",
            ChangeStatus::Copied => "copied",
            ChangeStatus::Changed => "changed",
            ChangeStatus::Unchanged => "unchanged",
            ChangeStatus::Other => "other",
        };
        f.write_str(s)
    }
}

/// One changed file in a PR: name, change status, and unified-diff patch.
///
/// `patch` is empty when the host omits it (binary or oversized files);
/// an absent patch is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    pub filename: String,
    pub status: ChangeStatus,
    #[serde(default)]
    pub patch: String,
}

/// Immutable snapshot of a PR's changed files at fetch time.
///
/// Written once per fetch; multiple snapshots may exist for the same PR
/// across resubmissions (no deduplication). Read later by the prompt builder
/// and by the publisher, which needs the original patches to recompute diff
/// positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSnapshot {
    pub id: Uuid,
    pub pr: PrReference,
    pub files: Vec<FileDiff>,
    pub fetched_at: DateTime<Utc>,
}

impl DiffSnapshot {
    /// Builds a fresh snapshot for a fetch result.
    pub fn new(pr: PrReference, files: Vec<FileDiff>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pr,
            files,
            fetched_at: Utc::now(),
        }
    }

    /// Looks up a file's patch by path; `None` when the file is not part of
    /// the snapshot.
    pub fn patch_for(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.filename == path)
            .map(|f| f.patch.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_status_deserializes_known_and_unknown() {
        let s: ChangeStatus = serde_json::from_str("\"modified\"").unwrap();
        assert_eq!(s, ChangeStatus::Modified);
        let s: ChangeStatus = serde_json::from_str("\"some-new-status\"").unwrap();
        assert_eq!(s, ChangeStatus::Other);
    }

    #[test]
    fn file_diff_defaults_missing_patch() {
        let f: FileDiff =
            serde_json::from_str(r#"{"filename": "a.rs", "status": "added"}"#).unwrap();
        assert!(f.patch.is_empty());
    }

    #[test]
    fn snapshot_patch_lookup() {
        let pr = PrReference {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: 42,
        };
        let snap = DiffSnapshot::new(
            pr,
            vec![FileDiff {
                filename: "src/lib.rs".into(),
                status: ChangeStatus::Modified,
                patch: "@@ -1 +1 @@\n-a\n+b".into(),
            }],
        );
        assert!(snap.patch_for("src/lib.rs").unwrap().contains("+b"));
        assert!(snap.patch_for("missing.rs").is_none());
    }
}
