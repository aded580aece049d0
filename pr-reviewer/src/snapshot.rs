//! File-based store for diff snapshots (JSON on disk).
//!
//! Every fetch writes one new immutable snapshot; resubmissions of the same
//! PR produce additional files rather than overwriting (no deduplication —
//! "always refetch, always re-evaluate" is the pipeline policy, and cost
//! control belongs to the caller).
//!
//! Layout: $PR_REVIEWER_SNAPSHOT_DIR/<owner>_<repo>/<number>-<id12>.json
//! Default root: "code_data/pr_snapshots".

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{PrResult, SnapshotError};
use crate::git_providers::types::{DiffSnapshot, PrReference};

/// Returns the root directory for snapshots (env-overridable).
fn snapshot_root() -> PathBuf {
    std::env::var("PR_REVIEWER_SNAPSHOT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("code_data/pr_snapshots"))
}

/// Filesystem-safe directory name for a repository.
fn repo_dir(pr: &PrReference) -> String {
    format!("{}_{}", pr.owner, pr.repo).replace('/', "_")
}

/// Computes the on-disk path for a snapshot.
fn snapshot_path(root: &Path, pr: &PrReference, id: Uuid) -> PathBuf {
    let short = id.simple().to_string();
    root.join(repo_dir(pr))
        .join(format!("{}-{}.json", pr.number, &short[..12]))
}

/// Persists a freshly fetched snapshot under the configured root.
///
/// Returns the path written. Existing snapshots for the same PR are left
/// untouched.
pub async fn store_snapshot(snapshot: &DiffSnapshot) -> PrResult<PathBuf> {
    let path = store_in(&snapshot_root(), snapshot).await?;
    debug!(
        "snapshot stored: pr={} id={} files={} path={}",
        snapshot.pr,
        snapshot.id,
        snapshot.files.len(),
        path.display()
    );
    Ok(path)
}

/// Loads a snapshot by PR and id; `Ok(None)` when absent.
pub async fn load_snapshot(pr: &PrReference, id: Uuid) -> PrResult<Option<DiffSnapshot>> {
    load_from(&snapshot_root(), pr, id).await
}

async fn store_in(root: &Path, snapshot: &DiffSnapshot) -> PrResult<PathBuf> {
    let path = snapshot_path(root, &snapshot.pr, snapshot.id);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).await?;
    }
    let json = serde_json::to_vec(snapshot).map_err(SnapshotError::Serde)?;
    fs::write(&path, json).await?;
    Ok(path)
}

async fn load_from(root: &Path, pr: &PrReference, id: Uuid) -> PrResult<Option<DiffSnapshot>> {
    let path = snapshot_path(root, pr, id);
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(&path).await?;
    let snapshot: DiffSnapshot = serde_json::from_slice(&data).map_err(SnapshotError::Serde)?;
    Ok(Some(snapshot))
}
