use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One row of the directory-structure listing, delivered in pre-order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub supported: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    pub level: usize,
    pub supported: Option<bool>,
    // Some(..) for folders, None for files.
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn folder(name: &str, path: &str, level: usize, supported: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Folder,
            level,
            supported,
            children: Some(Vec::new()),
        }
    }

    pub fn file(name: &str, path: &str, level: usize, supported: Option<bool>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::File,
            level,
            supported,
            children: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// An import or function hit inside a file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line_start: Option<u64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeSnippet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line_start: Option<u64>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicCryptoAnalysis {
    pub file_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_extension: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_crypto: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_imports: Vec<CryptoItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_functions: Vec<CryptoItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_patterns_found: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_algorithms_detected: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_snippets: Vec<CodeSnippet>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub security_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub algorithms_used: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_functions_identified: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_being_hashed: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vulnerabilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiReview {
    pub original_analysis: BasicCryptoAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gemini_analysis: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_summary: CryptoSummary,
}

/// Top-level payload of every analyze-style endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_files: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crypto_files_found: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_analysis: Vec<BasicCryptoAnalysis>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detailed_reviews: Vec<GeminiReview>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size_bytes: u64,
}
