//! Netscape bookmark-file parser
//!
//! Browser HTML exports are line-delimited by convention, so the document is
//! walked line by line instead of being parsed as markup. Each line is tested
//! against, in priority order, a folder-open, a bookmark and a folder-close
//! pattern; a `<DD>` line right after a bookmark carries its description.
//! Anything else is ignored, which keeps unbalanced or junk markup harmless.
//!
//! Chrome, Firefox, Edge, Safari and Raindrop exports share this parser and
//! differ only in their [`VendorProfile`]: the set of synthetic root folders
//! (e.g. "Bookmarks Bar") that are dropped from the hierarchy while their
//! contents are kept one level up.

use crate::entities::decode;
use crate::is_importable_url;
use crate::timestamp;
use crate::traits::BookmarkParser;
use bookmark_import_core::{ImportFormat, ParseResult, ParsedBookmark, ParsedFolder, Result};
use regex::Regex;
use std::sync::LazyLock;

static FOLDER_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<DT>\s*<H3\b[^>]*>(.*?)</H3>").expect("folder pattern"));
static BOOKMARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<DT>\s*<A\s([^>]*)>(.*?)</A>").expect("bookmark pattern"));
static FOLDER_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</DL>").expect("folder close pattern"));
static DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<DD>(.*)$").expect("description pattern"));

static HREF_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bHREF\s*=\s*"([^"]*)""#).expect("href pattern"));
static ADD_DATE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bADD_DATE\s*=\s*"(\d+)""#).expect("add_date pattern"));
static ICON_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bICON\s*=\s*"([^"]+)""#).expect("icon pattern"));
static TAGS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bTAGS\s*=\s*"([^"]*)""#).expect("tags pattern"));

/// Vendor specific parsing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorProfile {
    pub name: &'static str,
    /// Synthetic root folders elided from the hierarchy, matched case-insensitively
    pub skip_folders: &'static [&'static str],
}

impl VendorProfile {
    /// Chrome, Firefox and Edge exports
    pub const CHROMIUM: VendorProfile = VendorProfile {
        name: "chromium",
        skip_folders: &[
            "Bookmarks Bar",
            "Other Bookmarks",
            "Mobile Bookmarks",
            "Bookmarks Toolbar",
            "Bookmarks Menu",
            "Favorites Bar",
            "Other Favorites",
            "书签栏",
            "其他书签",
            "移动设备书签",
            "Lesezeichenleiste",
            "Weitere Lesezeichen",
            "Barre de favoris",
            "Autres favoris",
        ],
    };

    pub const SAFARI: VendorProfile = VendorProfile {
        name: "safari",
        skip_folders: &[
            "Favorites",
            "Favourites",
            "Reading List",
            "BookmarksBar",
            "BookmarksMenu",
            "com.apple.ReadingList",
            "个人收藏",
            "阅读列表",
            "Favoriten",
            "Leseliste",
        ],
    };

    /// Raindrop collections are all real folders
    pub const RAINDROP: VendorProfile = VendorProfile {
        name: "raindrop",
        skip_folders: &[],
    };

    /// Profile for an HTML-family format, `None` for CSV formats.
    pub fn for_format(format: ImportFormat) -> Option<VendorProfile> {
        match format {
            ImportFormat::Chrome | ImportFormat::Firefox | ImportFormat::Edge => {
                Some(Self::CHROMIUM)
            }
            ImportFormat::Safari => Some(Self::SAFARI),
            ImportFormat::RaindropHtml => Some(Self::RAINDROP),
            ImportFormat::RaindropCsv | ImportFormat::Csv => None,
        }
    }

    pub fn is_skip_folder(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.skip_folders
            .iter()
            .any(|skip| skip.to_lowercase() == name)
    }
}

/// Entry on the open-folder stack
#[derive(Debug)]
enum Frame {
    /// A skip-folder; its children attach to the enclosing real folder
    Skipped,
    Folder(ParsedFolder),
}

#[derive(Debug, Default)]
struct ParseState {
    frames: Vec<Frame>,
    roots: Vec<ParsedFolder>,
    bookmarks: Vec<ParsedBookmark>,
    skipped_urls: usize,
    /// Whether the previous line emitted a bookmark a `<DD>` may describe
    describable: bool,
}

impl ParseState {
    fn current_path(&self) -> Vec<String> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| match frame {
                Frame::Folder(folder) => Some(folder.path.clone()),
                Frame::Skipped => None,
            })
            .unwrap_or_default()
    }

    fn open_folder(&mut self, name: String) {
        let mut path = self.current_path();
        path.push(name);
        self.frames.push(Frame::Folder(ParsedFolder::new(path)));
    }

    fn open_skipped(&mut self) {
        self.frames.push(Frame::Skipped);
    }

    /// Close the innermost folder. Closing with nothing open is a no-op.
    fn close(&mut self) {
        if let Some(Frame::Folder(folder)) = self.frames.pop() {
            self.attach(folder);
        }
    }

    fn attach(&mut self, folder: ParsedFolder) {
        let parent = self.frames.iter_mut().rev().find_map(|frame| match frame {
            Frame::Folder(parent) => Some(parent),
            Frame::Skipped => None,
        });

        match parent {
            Some(parent) => parent.children.push(folder),
            None => self.roots.push(folder),
        }
    }

    fn finish(mut self) -> ParseResult {
        // unterminated folders are kept
        while !self.frames.is_empty() {
            self.close();
        }
        ParseResult::new(self.bookmarks, self.roots, self.skipped_urls)
    }
}

/// Line-oriented Netscape bookmark-file parser
#[derive(Debug, Clone, Copy)]
pub struct NetscapeParser {
    profile: VendorProfile,
}

impl NetscapeParser {
    pub fn new(profile: VendorProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &VendorProfile {
        &self.profile
    }

    /// Parse a whole document. Never fails; malformed input degrades.
    pub fn parse_document(&self, content: &str) -> ParseResult {
        let mut state = ParseState::default();

        for line in content.lines() {
            if let Some(caps) = FOLDER_OPEN.captures(line) {
                let name = decode(&caps[1]).trim().to_string();
                if name.is_empty() || self.profile.is_skip_folder(&name) {
                    state.open_skipped();
                } else {
                    state.open_folder(name);
                }
                state.describable = false;
            } else if let Some(caps) = BOOKMARK.captures(line) {
                let folder_path = state.current_path();
                match parse_anchor(&caps[1], &caps[2], folder_path) {
                    Some(bookmark) => {
                        state.bookmarks.push(bookmark);
                        state.describable = true;
                    }
                    None => {
                        state.skipped_urls += 1;
                        state.describable = false;
                    }
                }
            } else if FOLDER_CLOSE.is_match(line) {
                state.close();
                state.describable = false;
            } else if let Some(caps) = DESCRIPTION.captures(line) {
                if state.describable {
                    let text = decode(&caps[1]).trim().to_string();
                    if let Some(last) = state.bookmarks.last_mut() {
                        if !text.is_empty() {
                            last.description = Some(text);
                        }
                    }
                }
                state.describable = false;
            } else {
                state.describable = false;
            }
        }

        let result = state.finish();
        tracing::debug!(
            "Parsed {} bookmarks in {} folders with {} profile ({} skipped)",
            result.stats.total_bookmarks,
            result.stats.total_folders,
            self.profile.name,
            result.stats.skipped_urls
        );
        result
    }
}

impl BookmarkParser for NetscapeParser {
    fn name(&self) -> &'static str {
        self.profile.name
    }

    fn parse(&self, content: &str) -> Result<ParseResult> {
        Ok(self.parse_document(content))
    }
}

/// Build a bookmark from an anchor's attribute text and inner text.
///
/// Returns `None` when the HREF is missing or not http(s).
fn parse_anchor(attrs: &str, inner: &str, folder_path: Vec<String>) -> Option<ParsedBookmark> {
    let href = HREF_ATTR.captures(attrs)?.get(1)?.as_str().trim();
    if !is_importable_url(href) {
        return None;
    }

    let url = decode(href);
    let mut bookmark = ParsedBookmark::new(url, decode(inner).trim());
    bookmark.folder_path = folder_path;
    bookmark.add_date = ADD_DATE_ATTR
        .captures(attrs)
        .and_then(|caps| timestamp::normalize(&caps[1]));
    bookmark.icon = ICON_ATTR
        .captures(attrs)
        .map(|caps| caps[1].to_string());
    bookmark.tags = TAGS_ATTR
        .captures(attrs)
        .map(|caps| split_tags(&decode(&caps[1])))
        .unwrap_or_default();

    Some(bookmark)
}

pub(crate) fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
