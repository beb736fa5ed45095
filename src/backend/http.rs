// HTTP implementation of AnalyzerBackend (blocking reqwest).
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::model::{AnalysisResult, DirectoryEntry, StoredItem};

use super::{AnalyzerBackend, BackendError, BackendResult};

#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    base_url: String,
    directory_url: String,
    api_token: Option<String>,
}

impl HttpBackend {
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.api_base_url.clone(),
            directory_url: cfg.directory_api_url.clone(),
            api_token: cfg.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        }
    }

    fn send(&self, rb: RequestBuilder, what: &str) -> BackendResult<Response> {
        let resp = self
            .auth(rb)
            .send()
            .map_err(|e| BackendError::Transport(format!("{what}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().unwrap_or_default();
            tracing::warn!(%what, status, "backend request failed");
            return Err(BackendError::Status { status, body });
        }
        Ok(resp)
    }

    fn zip_form(zip: &Path) -> BackendResult<multipart::Form> {
        multipart::Form::new()
            .file("file", zip)
            .map_err(|e| BackendError::Io(format!("Could not read {}: {}", zip.display(), e)))
    }
}

fn body_text(resp: Response, what: &str) -> BackendResult<String> {
    resp.text()
        .map_err(|e| BackendError::Transport(format!("{what}: {e}")))
}

fn decode<T: DeserializeOwned>(text: &str, what: &str) -> BackendResult<T> {
    serde_json::from_str(text).map_err(|e| BackendError::Decode(format!("{what}: {e}")))
}

/// Joins `segments` onto `base` as individually percent-encoded path segments.
pub(crate) fn segment_url(base: &str, segments: &[&str]) -> BackendResult<Url> {
    let mut url = Url::parse(base).map_err(|e| BackendError::Transport(format!("bad base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| BackendError::Transport(format!("base URL cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredListing {
    Bare(Vec<StoredItem>),
    Wrapped {
        #[serde(alias = "stored", alias = "datasets")]
        items: Vec<StoredItem>,
    },
}

pub(crate) fn parse_stored_list(text: &str) -> BackendResult<Vec<StoredItem>> {
    let listing: StoredListing = decode(text, "/store/list")?;
    Ok(match listing {
        StoredListing::Bare(items) => items,
        StoredListing::Wrapped { items } => items,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DirectoryListing {
    Bare(Vec<DirectoryEntry>),
    Wrapped {
        #[serde(alias = "entries", alias = "items")]
        structure: Vec<DirectoryEntry>,
    },
}

pub(crate) fn parse_directory_listing(text: &str) -> BackendResult<Vec<DirectoryEntry>> {
    let listing: DirectoryListing = decode(text, "/api/directory-structure")?;
    Ok(match listing {
        DirectoryListing::Bare(v) => v,
        DirectoryListing::Wrapped { structure } => structure,
    })
}

/// Store endpoints answer with a small JSON object; surface its message.
pub(crate) fn store_message(text: &str) -> String {
    let v: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return text.trim().to_string(),
    };
    for key in ["message", "detail", "name"] {
        if let Some(s) = v.get(key).and_then(|m| m.as_str()) {
            return s.to_string();
        }
    }
    "Stored.".to_string()
}

impl AnalyzerBackend for HttpBackend {
    fn health(&self) -> BackendResult<()> {
        self.send(self.http.get(self.url("/health")), "/health")?;
        Ok(())
    }

    fn analyze_path(&self, path: &str) -> BackendResult<AnalysisResult> {
        let body = serde_json::json!({ "path": path });
        let resp = self.send(self.http.post(self.url("/analyze")).json(&body), "/analyze")?;
        decode(&body_text(resp, "/analyze")?, "/analyze")
    }

    fn analyze_git(&self, git_url: &str) -> BackendResult<AnalysisResult> {
        let body = serde_json::json!({ "git_url": git_url });
        let resp = self.send(self.http.post(self.url("/git-clone")).json(&body), "/git-clone")?;
        decode(&body_text(resp, "/git-clone")?, "/git-clone")
    }

    fn analyze_zip(&self, zip: &Path) -> BackendResult<AnalysisResult> {
        let form = Self::zip_form(zip)?;
        let resp = self.send(self.http.post(self.url("/upload-zip")).multipart(form), "/upload-zip")?;
        decode(&body_text(resp, "/upload-zip")?, "/upload-zip")
    }

    fn store_zip(&self, zip: &Path) -> BackendResult<String> {
        let form = Self::zip_form(zip)?;
        let resp = self.send(
            self.http.post(self.url("/store/upload-zip")).multipart(form),
            "/store/upload-zip",
        )?;
        Ok(store_message(&body_text(resp, "/store/upload-zip")?))
    }

    fn store_git(&self, git_url: &str) -> BackendResult<String> {
        let body = serde_json::json!({ "git_url": git_url });
        let resp = self.send(
            self.http.post(self.url("/store/git-clone")).json(&body),
            "/store/git-clone",
        )?;
        Ok(store_message(&body_text(resp, "/store/git-clone")?))
    }

    fn list_stored(&self) -> BackendResult<Vec<StoredItem>> {
        let resp = self.send(self.http.get(self.url("/store/list")), "/store/list")?;
        parse_stored_list(&body_text(resp, "/store/list")?)
    }

    fn analyze_stored(&self, name: &str) -> BackendResult<AnalysisResult> {
        let url = segment_url(&self.base_url, &["store", "analyze", name])?;
        let resp = self.send(self.http.get(url), "/store/analyze")?;
        decode(&body_text(resp, "/store/analyze")?, "/store/analyze")
    }

    fn delete_stored(&self, name: &str) -> BackendResult<()> {
        let url = segment_url(&self.base_url, &["store", name])?;
        self.send(self.http.delete(url), "DELETE /store")?;
        Ok(())
    }

    fn directory_structure(&self, path: &str) -> BackendResult<Vec<DirectoryEntry>> {
        let url = format!("{}/api/directory-structure", self.directory_url.trim_end_matches('/'));
        let resp = self.send(self.http.get(url).query(&[("path", path)]), "/api/directory-structure")?;
        parse_directory_listing(&body_text(resp, "/api/directory-structure")?)
    }
}
