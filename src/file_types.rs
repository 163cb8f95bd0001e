//! Source file classification by extension

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceCodeFileType {
    Binary,
    Java,
    Go,
    Text,
    Xml,
    Json,
    Other,
}

impl SourceCodeFileType {
    /// Classify a file by its lower-cased extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "binary" => SourceCodeFileType::Binary,
            "java" => SourceCodeFileType::Java,
            "go" => SourceCodeFileType::Go,
            "text" => SourceCodeFileType::Text,
            "xml" => SourceCodeFileType::Xml,
            "json" => SourceCodeFileType::Json,
            _ => SourceCodeFileType::Other,
        }
    }

    /// Whether the file's extension names one of the known types.
    pub fn is_known(path: impl AsRef<Path>) -> bool {
        Self::from_path(path) != SourceCodeFileType::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCodeFileType::Binary => "BINARY",
            SourceCodeFileType::Java => "JAVA",
            SourceCodeFileType::Go => "GO",
            SourceCodeFileType::Text => "TEXT",
            SourceCodeFileType::Xml => "XML",
            SourceCodeFileType::Json => "JSON",
            SourceCodeFileType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for SourceCodeFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
