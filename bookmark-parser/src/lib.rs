//! Bookmark export detection and parsing
//!
//! This crate turns a user-supplied bookmark export of unknown provenance
//! into a normalized [`ParseResult`]: a flat list of bookmarks plus the
//! folder tree they live in.
//!
//! # Features
//! - Format detection for Chrome, Firefox, Safari, Edge and Raindrop HTML
//!   exports, Raindrop CSV exports and generic CSV files
//! - A single line-oriented Netscape bookmark-file parser, parameterized by
//!   per-vendor skip-folder sets
//! - Generic and Raindrop CSV parsers with path-string folder hierarchies
//! - Conversion between nested and flat folder representations
//!
//! Every call is a pure function of its input; nothing is cached or shared
//! between parses.

pub mod traits;
pub mod entities;
pub mod csv_line;
pub mod timestamp;
pub mod folder_tree;
pub mod netscape;
pub mod csv;
pub mod detector;

pub use traits::*;
pub use csv::{GenericCsvParser, RaindropCsvParser};
pub use detector::detect;
pub use folder_tree::{build_tree, count_folders, flatten, FolderPathRegistry};
pub use netscape::{NetscapeParser, VendorProfile};

use bookmark_import_core::*;

/// Whether a URL may be imported: `http://` or `https://`, any case.
pub fn is_importable_url(url: &str) -> bool {
    let url = url.trim();
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Get the parser for a detected format
pub fn parser_for(format: ImportFormat) -> Box<dyn BookmarkParser> {
    match VendorProfile::for_format(format) {
        Some(profile) => Box::new(NetscapeParser::new(profile)),
        None if format == ImportFormat::RaindropCsv => Box::new(RaindropCsvParser::new()),
        None => Box::new(GenericCsvParser::new()),
    }
}

/// Parse content with the parser for `format`
pub fn parse(content: &str, format: ImportFormat) -> Result<ParseResult> {
    let parser = parser_for(format);
    tracing::debug!("Parsing {} export with {} parser", format, parser.name());
    parser.parse(content)
}

/// Detected format together with the parse output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub detection: DetectionResult,
    pub result: ParseResult,
}

/// Detect the format of `content` and parse it accordingly
pub fn import(content: &str, filename: &str) -> Result<ImportOutcome> {
    let detection = detect(content, filename);
    let result = parse(content, detection.format)?;
    Ok(ImportOutcome { detection, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importable_urls() {
        assert!(is_importable_url("https://example.com"));
        assert!(is_importable_url("HTTP://example.com"));
        assert!(is_importable_url("  https://example.com  "));
        assert!(!is_importable_url("https:/example.com"));
        assert!(!is_importable_url("ftp://example.com"));
        assert!(!is_importable_url("javascript:alert(1)"));
        assert!(!is_importable_url(""));
        assert!(!is_importable_url("日本語https://"));
    }

    #[test]
    fn test_parser_dispatch() {
        assert_eq!(parser_for(ImportFormat::Firefox).name(), "chromium");
        assert_eq!(parser_for(ImportFormat::Edge).name(), "chromium");
        assert_eq!(parser_for(ImportFormat::Safari).name(), "safari");
        assert_eq!(parser_for(ImportFormat::RaindropHtml).name(), "raindrop");
        assert_eq!(parser_for(ImportFormat::RaindropCsv).name(), "raindrop_csv");
        assert_eq!(parser_for(ImportFormat::Csv).name(), "csv");
    }

    #[test]
    fn test_parser_dispatch_follows_vendor_profiles() {
        for format in ImportFormat::ALL {
            let expected = match VendorProfile::for_format(format) {
                Some(profile) => profile.name,
                None if format == ImportFormat::RaindropCsv => "raindrop_csv",
                None => "csv",
            };
            assert_eq!(parser_for(format).name(), expected, "{}", format);
            assert_eq!(VendorProfile::for_format(format).is_some(), format.is_html(), "{}", format);
        }
    }

    #[test]
    fn test_import_detects_and_parses() {
        let content = "url,title,folder\nhttps://example.com,Example,Work/Projects\n";
        let outcome = import(content, "bookmarks.csv").unwrap();

        assert_eq!(outcome.detection.format, ImportFormat::Csv);
        assert_eq!(outcome.result.stats.total_bookmarks, 1);
        assert_eq!(outcome.result.stats.total_folders, 2);
    }

    #[test]
    fn test_import_propagates_missing_url_column() {
        assert!(import("title,folder\nx,y\n", "bookmarks.csv").is_err());
    }
}
