//! Bookmark parser traits

use bookmark_import_core::*;

/// Trait for export-file parsers
pub trait BookmarkParser: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Parse a whole export file held in memory
    fn parse(&self, content: &str) -> Result<ParseResult>;
}
