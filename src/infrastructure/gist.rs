//! GitHub Gist client used as a single-file backup store
//!
//! All backups live in one private gist identified by its description,
//! holding a single JSON file. Sync is last-write-wins.

use crate::domain::BackupDocument;
use crate::error::{EmbedLinkError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

pub const GIST_DESCRIPTION: &str = "EmbedLink Data Backup";
pub const GIST_FILENAME: &str = "embedlink_backup.json";

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("embedlink/", env!("CARGO_PKG_VERSION"));

/// Subset of the gist listing we rely on
#[derive(Debug, Clone, Deserialize)]
pub struct GistSummary {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub files: HashMap<String, GistFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GistFile {
    #[serde(default)]
    pub raw_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Created(String),
    Updated(String),
}

/// The backup gist, if one exists
pub fn find_backup(gists: &[GistSummary]) -> Option<&GistSummary> {
    gists
        .iter()
        .find(|g| g.description.as_deref() == Some(GIST_DESCRIPTION))
}

/// Request body for creating (private) or updating the backup gist
pub fn gist_body(content: &str, create: bool) -> Value {
    let mut body = json!({
        "description": GIST_DESCRIPTION,
        "files": { GIST_FILENAME: { "content": content } },
    });
    if create {
        body["public"] = Value::Bool(false);
    }
    body
}

pub struct GistClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GistClient {
    /// Fails before any request is made when the token is blank.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(EmbedLinkError::Sync(
                "GitHub token must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(GistClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT)
    }

    fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        self.deliver(self.authorized(builder), what)
    }

    fn deliver(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        request.send().map_err(|e| {
            tracing::warn!(error = %e, "GitHub request failed: {}", what);
            EmbedLinkError::Sync(format!("Failed to connect to GitHub: {}", e))
        })
    }

    fn list_gists(&self, unavailable: &str) -> Result<Vec<GistSummary>> {
        let url = format!("{}/gists", self.base_url);
        tracing::debug!(%url, "listing gists");
        let response = self.send(self.client.get(&url), "list gists")?;

        match response.status() {
            s if s.is_success() => Ok(response.json()?),
            StatusCode::UNAUTHORIZED => Err(EmbedLinkError::Sync(
                "GitHub token is invalid or expired".to_string(),
            )),
            s => {
                tracing::debug!(status = %s, "gist listing rejected");
                Err(EmbedLinkError::Sync(unavailable.to_string()))
            }
        }
    }

    /// Upload the document, updating the existing backup gist or
    /// creating a private one.
    pub fn push(&self, document: &BackupDocument) -> Result<PushOutcome> {
        let url = format!("{}/user", self.base_url);
        let response = self.send(self.client.get(&url), "verify token")?;
        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                return Err(EmbedLinkError::Sync(
                    "GitHub token is invalid or expired".to_string(),
                ))
            }
            s => {
                return Err(EmbedLinkError::Sync(format!(
                    "Failed to connect to GitHub (status {})",
                    s
                )))
            }
        }

        let gists = self.list_gists(
            "Could not list gists; check that the token has the 'gist' scope",
        )?;
        let content = serde_json::to_string_pretty(document)?;

        if let Some(existing) = find_backup(&gists) {
            let url = format!("{}/gists/{}", self.base_url, existing.id);
            let response = self.send(
                self.client.patch(&url).json(&gist_body(&content, false)),
                "update gist",
            )?;
            if !response.status().is_success() {
                return Err(EmbedLinkError::Sync(format!(
                    "Failed to update backup gist (status {})",
                    response.status()
                )));
            }
            tracing::info!(gist = %existing.id, "backup gist updated");
            Ok(PushOutcome::Updated(existing.id.clone()))
        } else {
            let url = format!("{}/gists", self.base_url);
            let response = self.send(
                self.client.post(&url).json(&gist_body(&content, true)),
                "create gist",
            )?;
            if !response.status().is_success() {
                return Err(EmbedLinkError::Sync(format!(
                    "Failed to create backup gist (status {}); check the token permissions",
                    response.status()
                )));
            }
            let created: GistSummary = response.json()?;
            tracing::info!(gist = %created.id, "backup gist created");
            Ok(PushOutcome::Created(created.id))
        }
    }

    /// Raw file URLs may live on another host, so no token goes with them.
    fn download_request(&self, raw_url: &str) -> RequestBuilder {
        self.client.get(raw_url)
    }

    /// Download the stored backup as raw JSON.
    pub fn pull(&self) -> Result<Value> {
        let gists = self.list_gists("Could not list gists")?;

        let raw_url = find_backup(&gists)
            .and_then(|g| g.files.get(GIST_FILENAME))
            .and_then(|f| f.raw_url.clone())
            .ok_or_else(|| {
                EmbedLinkError::Sync(
                    "No embedlink backup found; run 'embedlink sync push' first".to_string(),
                )
            })?;

        tracing::debug!(%raw_url, "downloading backup");
        let response = self.deliver(self.download_request(&raw_url), "download backup")?;
        if !response.status().is_success() {
            return Err(EmbedLinkError::Sync(format!(
                "Failed to download backup (status {})",
                response.status()
            )));
        }
        let text = response.text()?;
        serde_json::from_str(&text)
            .map_err(|e| EmbedLinkError::Sync(format!("Backup in gist is not valid JSON: {}", e)))
    }
}
