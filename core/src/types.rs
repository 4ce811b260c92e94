//! Data model shared by the format detector, the parsers and their callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One discovered link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBookmark {
    /// Always an `http://` or `https://` URL
    pub url: String,
    /// Display title, falls back to the URL when the source title is blank
    pub title: String,
    pub add_date: Option<DateTime<Utc>>,
    /// Root-to-leaf folder names; empty means root level
    pub folder_path: Vec<String>,
    /// Inline icon reference, usually a base64 data URI
    pub icon: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl ParsedBookmark {
    /// Create a bookmark at root level with no optional metadata.
    ///
    /// A blank title is replaced by the URL.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let url = url.into();
        let title = title.into();
        let title = if title.trim().is_empty() { url.clone() } else { title };

        Self {
            url,
            title,
            add_date: None,
            folder_path: Vec::new(),
            icon: None,
            description: None,
            tags: Vec::new(),
        }
    }
}

/// One folder node. Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFolder {
    /// Leaf segment name
    pub name: String,
    /// Root-to-leaf path including this folder's own name
    pub path: Vec<String>,
    pub children: Vec<ParsedFolder>,
}

impl ParsedFolder {
    pub fn new(path: Vec<String>) -> Self {
        let name = path.last().cloned().unwrap_or_default();
        Self {
            name,
            path,
            children: Vec::new(),
        }
    }
}

/// Count every folder node at all depths.
pub fn count_folders(folders: &[ParsedFolder]) -> usize {
    folders
        .iter()
        .map(|folder| 1 + count_folders(&folder.children))
        .sum()
}

/// Flat parent-path representation of a folder node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFolder {
    pub name: String,
    pub path: Vec<String>,
    /// `None` for root folders
    pub parent_path: Option<Vec<String>>,
    /// Zero for root folders
    pub depth: usize,
}

/// Counters surfaced to the user after an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_bookmarks: usize,
    pub total_folders: usize,
    /// Entries dropped because their URL was not http(s)
    pub skipped_urls: usize,
}

/// Parser output handed to persistence collaborators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub bookmarks: Vec<ParsedBookmark>,
    /// Root folders; the full tree is reachable through `children`
    pub folders: Vec<ParsedFolder>,
    pub stats: ParseStats,
}

impl ParseResult {
    /// Assemble a result, deriving the bookmark and folder totals.
    pub fn new(
        bookmarks: Vec<ParsedBookmark>,
        folders: Vec<ParsedFolder>,
        skipped_urls: usize,
    ) -> Self {
        let stats = ParseStats {
            total_bookmarks: bookmarks.len(),
            total_folders: count_folders(&folders),
            skipped_urls,
        };

        Self {
            bookmarks,
            folders,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty() && self.folders.is_empty()
    }
}

/// Export dialects the detector can recognize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportFormat {
    Chrome,
    Firefox,
    Safari,
    Edge,
    RaindropHtml,
    RaindropCsv,
    Csv,
}

impl ImportFormat {
    pub const ALL: [ImportFormat; 7] = [
        ImportFormat::Chrome,
        ImportFormat::Firefox,
        ImportFormat::Safari,
        ImportFormat::Edge,
        ImportFormat::RaindropHtml,
        ImportFormat::RaindropCsv,
        ImportFormat::Csv,
    ];

    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFormat::Chrome => "chrome",
            ImportFormat::Firefox => "firefox",
            ImportFormat::Safari => "safari",
            ImportFormat::Edge => "edge",
            ImportFormat::RaindropHtml => "raindrop_html",
            ImportFormat::RaindropCsv => "raindrop_csv",
            ImportFormat::Csv => "csv",
        }
    }

    /// Name shown to the end user
    pub fn display_name(&self) -> &'static str {
        match self {
            ImportFormat::Chrome => "Chrome",
            ImportFormat::Firefox => "Firefox",
            ImportFormat::Safari => "Safari",
            ImportFormat::Edge => "Microsoft Edge",
            ImportFormat::RaindropHtml => "Raindrop (HTML)",
            ImportFormat::RaindropCsv => "Raindrop (CSV)",
            ImportFormat::Csv => "CSV",
        }
    }

    pub fn is_html(&self) -> bool {
        !self.is_csv()
    }

    pub fn is_csv(&self) -> bool {
        matches!(self, ImportFormat::RaindropCsv | ImportFormat::Csv)
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ImportFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| format!("unknown import format: {}", s))
    }
}

/// Detector's self-reported certainty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub format: ImportFormat,
    pub confidence: Confidence,
}

impl DetectionResult {
    pub fn new(format: ImportFormat, confidence: Confidence) -> Self {
        Self { format, confidence }
    }
}
