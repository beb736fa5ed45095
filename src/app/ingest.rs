// Ingestion modes and the tagged path-or-URL input.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestMode {
    Local,
    Upload,
    Git,
    Stored,
}

impl IngestMode {
    pub const ALL: [IngestMode; 4] = [
        IngestMode::Local,
        IngestMode::Upload,
        IngestMode::Git,
        IngestMode::Stored,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IngestMode::Local => "Local path",
            IngestMode::Upload => "Upload ZIP",
            IngestMode::Git => "Git URL",
            IngestMode::Stored => "Stored",
        }
    }
}

/// What the local field holds, decided once at submit time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceInput {
    Path(String),
    GitUrl(String),
}

pub fn looks_like_git_url(s: &str) -> bool {
    let s = s.trim();
    s.starts_with("http://")
        || s.starts_with("https://")
        || s.starts_with("git@")
        || s.starts_with("ssh://")
        || s.ends_with(".git")
}

impl SourceInput {
    /// `None` for blank input.
    pub fn classify(raw: &str) -> Option<SourceInput> {
        let v = raw.trim();
        if v.is_empty() {
            return None;
        }
        if looks_like_git_url(v) {
            Some(SourceInput::GitUrl(v.to_string()))
        } else {
            Some(SourceInput::Path(v.to_string()))
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SourceInput::Path(v) | SourceInput::GitUrl(v) => v,
        }
    }
}
