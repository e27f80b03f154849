//! Persisted sign-in state.
//!
//! The token and the signed-in user live in `session.json` under the state
//! directory. A saved session older than seven days is discarded on load,
//! the same horizon the web client gave its auth cookie.

use crate::model::User;
use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const SESSION_FILE: &str = "session.json";
const SESSION_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: User,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Session {
            token,
            user,
            saved_at: Utc::now(),
        }
    }

    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.saved_at >= Duration::days(SESSION_DAYS)
    }

    /// Short digest of the token, safe to put in logs.
    pub fn token_fingerprint(&self) -> String {
        fingerprint(&self.token)
    }
}

pub fn fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..8].to_string()
}

fn session_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SESSION_FILE)
}

/// Missing, unreadable, corrupt and expired files all read as "not signed
/// in"; the stale file is removed on the way out so the next load is clean.
pub fn load(state_dir: &Path) -> anyhow::Result<Option<Session>> {
    let path = session_path(state_dir);
    if !path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read session file {}", path.to_string_lossy()))?;
    let session: Session = match serde_json::from_str(&text) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable session file");
            let _ = std::fs::remove_file(&path);
            return Ok(None);
        }
    };
    if session.expired_at(Utc::now()) {
        tracing::debug!(
            token = %session.token_fingerprint(),
            "discarding expired session"
        );
        let _ = std::fs::remove_file(&path);
        return Ok(None);
    }
    Ok(Some(session))
}

pub fn save(state_dir: &Path, session: &Session) -> anyhow::Result<()> {
    std::fs::create_dir_all(state_dir).with_context(|| {
        format!(
            "failed to create state directory {}",
            state_dir.to_string_lossy()
        )
    })?;
    let path = session_path(state_dir);
    let tmp = state_dir.join("session.json.saving");
    let text = serde_json::to_string_pretty(session).context("failed to serialize session")?;
    std::fs::write(&tmp, text)
        .with_context(|| format!("failed to write session file {}", tmp.to_string_lossy()))?;
    std::fs::rename(&tmp, &path).with_context(|| {
        format!(
            "failed to move session file into place at {}",
            path.to_string_lossy()
        )
    })?;
    tracing::debug!(token = %session.token_fingerprint(), "session saved");
    Ok(())
}

pub fn clear(state_dir: &Path) -> anyhow::Result<()> {
    let path = session_path(state_dir);
    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove session file {}", path.to_string_lossy()))?;
    }
    Ok(())
}
