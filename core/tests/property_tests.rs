// Property tests for the shared bookmark model
//
// Property: For any folder forest and bookmark list, `ParseResult::new`
// reports totals that match the data it holds, and bookmark titles are
// never blank.
//
// This property test validates:
// 1. Folder totals count every nested folder exactly once
// 2. Blank titles fall back to the URL
// 3. Format names parse back case-insensitively

use bookmark_import_core::{ImportFormat, ParseResult, ParsedBookmark, ParsedFolder};
use proptest::prelude::*;

// Strategy for generating a folder forest of bounded depth
fn arb_forest() -> impl Strategy<Value = Vec<ParsedFolder>> {
    let leaf = "[A-Za-z]{1,8}".prop_map(|name| ParsedFolder::new(vec![name]));
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        ("[A-Za-z]{1,8}", prop::collection::vec(inner, 0..4)).prop_map(|(name, children)| {
            let mut folder = ParsedFolder::new(vec![name]);
            folder.children = children;
            folder
        })
    });
    prop::collection::vec(tree, 0..4)
}

fn nodes(folders: &[ParsedFolder]) -> usize {
    let mut stack: Vec<&ParsedFolder> = folders.iter().collect();
    let mut seen = 0;
    while let Some(folder) = stack.pop() {
        seen += 1;
        stack.extend(folder.children.iter());
    }
    seen
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Derived totals match the bookmarks and folders held by the result
    #[test]
    fn prop_parse_result_totals(
        forest in arb_forest(),
        urls in prop::collection::vec("https://[a-z]{3,10}\\.com/", 0..10),
        skipped in 0usize..50,
    ) {
        let bookmarks: Vec<ParsedBookmark> = urls.iter().map(|url| ParsedBookmark::new(url.as_str(), "")).collect();
        let result = ParseResult::new(bookmarks, forest.clone(), skipped);

        prop_assert_eq!(result.stats.total_bookmarks, urls.len());
        prop_assert_eq!(result.stats.total_folders, nodes(&forest));
        prop_assert_eq!(result.stats.skipped_urls, skipped);
        prop_assert_eq!(result.is_empty(), urls.is_empty() && forest.is_empty());
    }

    /// Whitespace-only titles are replaced by the URL
    #[test]
    fn prop_blank_title_falls_back_to_url(url in "https://[a-z]{3,10}\\.org/[a-z]{0,8}", blank in "[ \t]{0,4}") {
        let bookmark = ParsedBookmark::new(url.as_str(), blank);
        prop_assert_eq!(bookmark.title, url);
    }

    /// Every format name parses regardless of case and padding
    #[test]
    fn prop_format_names_parse(index in 0usize..ImportFormat::ALL.len(), upper in any::<bool>()) {
        let format = ImportFormat::ALL[index];
        let name = if upper { format.as_str().to_uppercase() } else { format.as_str().to_string() };
        prop_assert_eq!(format!(" {} ", name).parse::<ImportFormat>(), Ok(format));
    }
}
