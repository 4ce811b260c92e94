//! CSV bookmark parsers
//!
//! Two schemas are supported: a generic `url,title,description,folder,tags`
//! layout with synonym column names, and Raindrop's fixed export layout. CSV
//! rows carry folders as path strings, so folders are collected in a
//! [`FolderPathRegistry`] and turned into a tree once all rows are read.

use crate::csv_line::split_line;
use crate::folder_tree::FolderPathRegistry;
use crate::is_importable_url;
use crate::netscape::split_tags;
use crate::timestamp;
use crate::traits::BookmarkParser;
use bookmark_import_core::{ParseError, ParseResult, ParsedBookmark, Result};

const URL_COLUMNS: &[&str] = &["url", "link"];
const TITLE_COLUMNS: &[&str] = &["title", "name"];
const DESCRIPTION_COLUMNS: &[&str] = &["description", "desc", "note"];
const FOLDER_COLUMNS: &[&str] = &["folder", "category", "path"];
const TAG_COLUMNS: &[&str] = &["tags", "labels"];

/// Raindrop separates nested collections with a spaced slash
const RAINDROP_FOLDER_SEPARATOR: &str = " / ";

/// Split CSV content into its header line and the remaining lines.
///
/// A leading BOM and blank lines before the header are skipped. Returns
/// `None` when there is no header at all.
fn split_header(content: &str) -> Option<(&str, impl Iterator<Item = &str>)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.lines().skip_while(|line| line.trim().is_empty());
    let header = lines.next()?;
    Some((header, lines))
}

fn column_index(header: &[String], names: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|column| names.iter().any(|name| column.eq_ignore_ascii_case(name)))
}

fn field(fields: &[String], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| fields.get(i))
        .map(|value| value.as_str())
        .filter(|value| !value.is_empty())
}

fn folder_segments(raw: &str, separator: &str) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accumulates rows into a [`ParseResult`]
#[derive(Debug, Default)]
struct CsvCollector {
    bookmarks: Vec<ParsedBookmark>,
    registry: FolderPathRegistry,
    skipped_urls: usize,
}

impl CsvCollector {
    fn push(&mut self, bookmark: ParsedBookmark) {
        self.registry.register(&bookmark.folder_path);
        self.bookmarks.push(bookmark);
    }

    fn skip(&mut self) {
        self.skipped_urls += 1;
    }

    fn finish(self) -> ParseResult {
        ParseResult::new(self.bookmarks, self.registry.into_tree(), self.skipped_urls)
    }
}

/// Column positions for the generic schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub url: usize,
    pub title: Option<usize>,
    pub description: Option<usize>,
    pub folder: Option<usize>,
    pub tags: Option<usize>,
}

impl ColumnMap {
    /// Match header names case-insensitively against the column synonyms.
    pub fn from_header(header: &[String]) -> Option<Self> {
        Some(Self {
            url: column_index(header, URL_COLUMNS)?,
            title: column_index(header, TITLE_COLUMNS),
            description: column_index(header, DESCRIPTION_COLUMNS),
            folder: column_index(header, FOLDER_COLUMNS),
            tags: column_index(header, TAG_COLUMNS),
        })
    }
}

/// Parser for generic bookmark CSV files
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericCsvParser;

impl GenericCsvParser {
    pub fn new() -> Self {
        Self
    }
}

impl BookmarkParser for GenericCsvParser {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, content: &str) -> Result<ParseResult> {
        let Some((header_line, rows)) = split_header(content) else {
            return Ok(ParseResult::default());
        };

        let header = split_line(header_line);
        let columns = ColumnMap::from_header(&header).ok_or_else(|| {
            tracing::warn!("CSV header has no URL column: {}", header_line);
            ParseError::MissingUrlColumn {
                header: header_line.trim().to_string(),
            }
        })?;

        let mut collector = CsvCollector::default();
        for line in rows.filter(|line| !line.trim().is_empty()) {
            let fields = split_line(line);
            let url = match field(&fields, Some(columns.url)) {
                Some(url) if is_importable_url(url) => url,
                _ => {
                    collector.skip();
                    continue;
                }
            };

            let mut bookmark = ParsedBookmark::new(url, field(&fields, columns.title).unwrap_or(url));
            bookmark.description = field(&fields, columns.description).map(str::to_string);
            bookmark.folder_path = field(&fields, columns.folder)
                .map(|raw| folder_segments(raw, "/"))
                .unwrap_or_default();
            bookmark.tags = field(&fields, columns.tags)
                .map(split_tags)
                .unwrap_or_default();
            collector.push(bookmark);
        }

        let result = collector.finish();
        tracing::debug!(
            "Parsed {} CSV bookmarks in {} folders ({} skipped)",
            result.stats.total_bookmarks,
            result.stats.total_folders,
            result.stats.skipped_urls
        );
        Ok(result)
    }
}

/// Column positions for Raindrop's export layout, matched by exact name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaindropColumns {
    pub url: usize,
    pub title: Option<usize>,
    pub note: Option<usize>,
    pub excerpt: Option<usize>,
    pub folder: Option<usize>,
    pub tags: Option<usize>,
    pub created: Option<usize>,
}

impl RaindropColumns {
    /// Known columns: `id,title,note,excerpt,url,folder,tags,created,cover,highlights,favorite`
    pub fn from_header(header: &[String]) -> Option<Self> {
        let lowered: Vec<String> = header.iter().map(|column| column.to_lowercase()).collect();
        let find = |name: &str| lowered.iter().position(|column| column == name);

        Some(Self {
            url: find("url")?,
            title: find("title"),
            note: find("note"),
            excerpt: find("excerpt"),
            folder: find("folder"),
            tags: find("tags"),
            created: find("created"),
        })
    }
}

/// Parser for Raindrop.io CSV exports
#[derive(Debug, Clone, Copy, Default)]
pub struct RaindropCsvParser;

impl RaindropCsvParser {
    pub fn new() -> Self {
        Self
    }
}

impl BookmarkParser for RaindropCsvParser {
    fn name(&self) -> &'static str {
        "raindrop_csv"
    }

    fn parse(&self, content: &str) -> Result<ParseResult> {
        let Some((header_line, rows)) = split_header(content) else {
            return Ok(ParseResult::default());
        };

        let header = split_line(header_line);
        let columns = RaindropColumns::from_header(&header).ok_or_else(|| {
            tracing::warn!("Raindrop CSV header has no url column: {}", header_line);
            ParseError::MissingUrlColumn {
                header: header_line.trim().to_string(),
            }
        })?;

        let mut collector = CsvCollector::default();
        for line in rows.filter(|line| !line.trim().is_empty()) {
            let fields = split_line(line);
            let url = match field(&fields, Some(columns.url)) {
                Some(url) if is_importable_url(url) => url,
                _ => {
                    collector.skip();
                    continue;
                }
            };

            let mut bookmark = ParsedBookmark::new(url, field(&fields, columns.title).unwrap_or(url));
            bookmark.description = field(&fields, columns.note)
                .or_else(|| field(&fields, columns.excerpt))
                .map(str::to_string);
            bookmark.folder_path = field(&fields, columns.folder)
                .map(|raw| folder_segments(raw, RAINDROP_FOLDER_SEPARATOR))
                .unwrap_or_default();
            bookmark.tags = field(&fields, columns.tags)
                .map(split_tags)
                .unwrap_or_default();
            bookmark.add_date = field(&fields, columns.created).and_then(timestamp::parse_date_string);
            collector.push(bookmark);
        }

        let result = collector.finish();
        tracing::debug!(
            "Parsed {} Raindrop bookmarks in {} collections ({} skipped)",
            result.stats.total_bookmarks,
            result.stats.total_folders,
            result.stats.skipped_urls
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookmark_import_core::BookmarkImportError;

    #[test]
    fn test_generic_csv_basic() {
        let csv = "url,title,description,folder,tags\n\
                   https://example.com,Example,An example,Work/Projects,\"a, b\"\n";
        let result = GenericCsvParser::new().parse(csv).unwrap();

        assert_eq!(result.bookmarks.len(), 1);
        let bookmark = &result.bookmarks[0];
        assert_eq!(bookmark.title, "Example");
        assert_eq!(bookmark.description.as_deref(), Some("An example"));
        assert_eq!(bookmark.folder_path, vec!["Work", "Projects"]);
        assert_eq!(bookmark.tags, vec!["a", "b"]);
        assert!(bookmark.add_date.is_none());
    }

    #[test]
    fn test_generic_csv_folder_hierarchy_is_shared() {
        let csv = "url,folder\n\
                   https://a.example.com,Work/Projects\n\
                   https://b.example.com,Work/Archive\n\
                   https://c.example.com,\n";
        let result = GenericCsvParser::new().parse(csv).unwrap();

        assert_eq!(result.folders.len(), 1);
        assert_eq!(result.folders[0].name, "Work");
        let children: Vec<&str> = result.folders[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(children, vec!["Projects", "Archive"]);
        assert_eq!(result.stats.total_folders, 3);
        assert!(result.bookmarks[2].folder_path.is_empty());
    }

    #[test]
    fn test_generic_csv_synonyms_and_order() {
        let csv = "Name,Labels,Category,Link,Note\n\
                   Docs,rust,Dev / Reference/ ,https://docs.rs,crate docs\n";
        let result = GenericCsvParser::new().parse(csv).unwrap();
        let bookmark = &result.bookmarks[0];

        assert_eq!(bookmark.url, "https://docs.rs");
        assert_eq!(bookmark.title, "Docs");
        assert_eq!(bookmark.tags, vec!["rust"]);
        assert_eq!(bookmark.folder_path, vec!["Dev", "Reference"]);
        assert_eq!(bookmark.description.as_deref(), Some("crate docs"));
    }

    #[test]
    fn test_generic_csv_skips_invalid_urls() {
        let csv = "url,title\n\
                   ftp://files.example.com,FTP\n\
                   ,Missing\n\
                   \n\
                   https://ok.example.com,\n";
        let result = GenericCsvParser::new().parse(csv).unwrap();

        assert_eq!(result.stats.skipped_urls, 2);
        assert_eq!(result.bookmarks.len(), 1);
        assert_eq!(result.bookmarks[0].title, "https://ok.example.com");
    }

    #[test]
    fn test_generic_csv_missing_url_column_is_fatal() {
        let err = GenericCsvParser::new()
            .parse("title,folder\nExample,Work\n")
            .unwrap_err();
        assert!(matches!(
            err,
            BookmarkImportError::Parse {
                source: ParseError::MissingUrlColumn { .. }
            }
        ));
    }

    #[test]
    fn test_generic_csv_empty_input() {
        let result = GenericCsvParser::new().parse("").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats.skipped_urls, 0);
    }

    #[test]
    fn test_generic_csv_strips_bom() {
        let csv = "\u{feff}url,title\nhttps://example.com,Example\n";
        let result = GenericCsvParser::new().parse(csv).unwrap();
        assert_eq!(result.bookmarks.len(), 1);
    }

    #[test]
    fn test_raindrop_csv() {
        let csv = "id,title,note,excerpt,url,folder,tags,created,cover,highlights,favorite\n\
                   1,Rust,,The language,https://rust-lang.org,Dev / Languages,\"rust, lang\",2024-03-15T10:30:00.000Z,,,false\n\
                   2,Broken date,my note,ignored,https://example.com,Dev/Misc,,sometime,,,true\n\
                   3,Bad,,,mailto:me@example.com,Dev,,,,,\n";
        let result = RaindropCsvParser::new().parse(csv).unwrap();

        assert_eq!(result.bookmarks.len(), 2);
        assert_eq!(result.stats.skipped_urls, 1);

        let rust = &result.bookmarks[0];
        assert_eq!(rust.folder_path, vec!["Dev", "Languages"]);
        assert_eq!(rust.description.as_deref(), Some("The language"));
        assert_eq!(rust.tags, vec!["rust", "lang"]);
        assert_eq!(rust.add_date.map(|d| d.timestamp()), Some(1_710_498_600));

        let broken = &result.bookmarks[1];
        // a plain slash is part of the collection name
        assert_eq!(broken.folder_path, vec!["Dev/Misc"]);
        assert_eq!(broken.description.as_deref(), Some("my note"));
        assert!(broken.add_date.is_none());

        let names: Vec<&str> = result.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Dev", "Dev/Misc"]);
        assert_eq!(result.stats.total_folders, 3);
    }

    #[test]
    fn test_raindrop_csv_missing_url_column() {
        let err = RaindropCsvParser::new()
            .parse("id,title,link\n1,x,https://example.com\n")
            .unwrap_err();
        assert!(err.to_string().contains("no URL column"));
    }
}
