//! Format detection from file extension and content signatures

use bookmark_import_core::{Confidence, DetectionResult, ImportFormat};
use std::path::Path;

const NETSCAPE_DOCTYPE: &str = "<!doctype netscape-bookmark-file-1>";

/// Vendor tokens are only looked for near the top of the document
const VENDOR_SCAN_CHARS: usize = 2000;

const RAINDROP_MARKERS: &[&str] = &["raindrop"];
/// A bare "favorites" would also match Edge's "Favorites bar", so only the
/// complete folder heading counts.
const SAFARI_MARKERS: &[&str] = &[
    "safari",
    "reading list",
    ">favorites</h3>",
    ">favourites</h3>",
    "个人收藏",
    "阅读列表",
    "leseliste",
];
const EDGE_MARKERS: &[&str] = &["edge", "favorites bar", "other favorites", "收藏夹栏", "其他收藏夹"];
const FIREFOX_MARKERS: &[&str] = &[
    "firefox",
    "mozilla",
    "bookmarks menu",
    "bookmarks toolbar",
    "unfiled bookmarks",
    "书签菜单",
    "书签工具栏",
    "lesezeichen-symbolleiste",
];
const CHROME_MARKERS: &[&str] = &[
    "chrome",
    "bookmarks bar",
    "other bookmarks",
    "mobile bookmarks",
    "书签栏",
    "其他书签",
    "lesezeichenleiste",
];

/// Checked in order; the first vendor with a matching token wins
const VENDOR_MARKERS: [(ImportFormat, &[&str]); 4] = [
    (ImportFormat::Safari, SAFARI_MARKERS),
    (ImportFormat::Edge, EDGE_MARKERS),
    (ImportFormat::Firefox, FIREFOX_MARKERS),
    (ImportFormat::Chrome, CHROME_MARKERS),
];

/// Classify an export file into one of the supported formats.
///
/// `filename` is only used for its extension.
pub fn detect(content: &str, filename: &str) -> DetectionResult {
    let detection = classify(content, filename);
    if detection.confidence == Confidence::Low {
        tracing::warn!(
            "Low confidence format detection for {}: guessing {}",
            filename,
            detection.format
        );
    } else {
        tracing::debug!(
            "Detected {} ({} confidence) for {}",
            detection.format,
            detection.confidence,
            filename
        );
    }
    detection
}

fn classify(content: &str, filename: &str) -> DetectionResult {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => detect_csv(content),
        Some("html") | Some("htm") => detect_html(content),
        _ => {
            let lower = content.to_lowercase();
            if lower.contains(NETSCAPE_DOCTYPE) || lower.contains("<dl>") || lower.contains("<dt>") {
                return detect_html(content);
            }

            let first_line = strip_bom(content).lines().next().unwrap_or("").to_lowercase();
            if first_line.contains(',') && (first_line.contains("url") || first_line.contains("title")) {
                return detect_csv(content);
            }

            DetectionResult::new(ImportFormat::Chrome, Confidence::Low)
        }
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

fn detect_csv(content: &str) -> DetectionResult {
    let header = strip_bom(content)
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .to_lowercase();

    let is_raindrop = header.contains("folder")
        && (header.contains("note") || header.contains("excerpt"))
        && header.contains("created");

    if is_raindrop {
        DetectionResult::new(ImportFormat::RaindropCsv, Confidence::High)
    } else {
        DetectionResult::new(ImportFormat::Csv, Confidence::High)
    }
}

fn detect_html(content: &str) -> DetectionResult {
    let lower = content.to_lowercase();
    if !lower.contains(NETSCAPE_DOCTYPE) && !lower.contains("<dl>") {
        return DetectionResult::new(ImportFormat::Chrome, Confidence::Low);
    }

    if contains_any(&lower, RAINDROP_MARKERS) {
        return DetectionResult::new(ImportFormat::RaindropHtml, Confidence::High);
    }

    let head = match lower.char_indices().nth(VENDOR_SCAN_CHARS) {
        Some((end, _)) => &lower[..end],
        None => lower.as_str(),
    };

    VENDOR_MARKERS
        .iter()
        .find(|(_, markers)| contains_any(head, markers))
        .map(|(format, _)| DetectionResult::new(*format, Confidence::High))
        .unwrap_or_else(|| DetectionResult::new(ImportFormat::Chrome, Confidence::Medium))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
