//! Advisory check for a newer release.
//!
//! The probe fetches a small JSON manifest and compares its version with
//! the local one. Every failure is swallowed: the probe either has an answer
//! or it has nothing to say.

use std::cmp::Ordering;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::oneshot;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A dotted version such as `3.0.10`, compared component by component.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(Vec<u64>);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid version '{0}'")]
pub struct VersionError(String);

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError(s.to_string()));
        }
        trimmed
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| VersionError(s.to_string()))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Remote manifest layout.
#[derive(Debug, Deserialize)]
struct Manifest {
    version: String,
    #[serde(default)]
    changelog: String,
}

/// What the probe learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    pub has_update: bool,
    pub remote_version: String,
    pub changelog: String,
}

/// Compare a local version with a remote manifest body.
///
/// Returns `None` when either side cannot be understood.
#[must_use]
pub fn evaluate(local: &str, manifest_body: &str) -> Option<UpdateInfo> {
    let manifest: Manifest = serde_json::from_str(manifest_body).ok()?;
    let local: Version = local.parse().ok()?;
    let remote: Version = manifest.version.parse().ok()?;

    Some(UpdateInfo {
        has_update: remote.cmp(&local) == Ordering::Greater,
        remote_version: manifest.version,
        changelog: manifest.changelog,
    })
}

pub struct UpdateProbe {
    client: reqwest::Client,
    manifest_url: Option<String>,
    local_version: String,
}

impl UpdateProbe {
    #[must_use]
    pub fn new(local_version: impl Into<String>, manifest_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            manifest_url,
            local_version: local_version.into(),
        }
    }

    /// Fetch and compare. `None` on any failure or when no manifest URL is
    /// configured.
    pub async fn probe(&self) -> Option<UpdateInfo> {
        let url = self.manifest_url.as_deref()?;
        tracing::debug!("Checking {url} for updates");

        let body = match self.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Update probe failed: {e}");
                return None;
            }
        };

        let info = evaluate(&self.local_version, &body);
        if info.is_none() {
            tracing::debug!("Update manifest at {url} was not understood");
        }
        info
    }

    async fn fetch(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    /// Run the probe as a background task.
    ///
    /// Dropping the receiver discards a result that arrives too late.
    #[must_use]
    pub fn spawn(self) -> oneshot::Receiver<Option<UpdateInfo>> {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(self.probe().await);
        });
        rx
    }
}
