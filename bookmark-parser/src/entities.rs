//! HTML entity decoding for bookmark titles and URLs

use regex::{Captures, Regex};
use std::sync::LazyLock;

static DECIMAL_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);").expect("decimal entity pattern"));
static HEX_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#[xX]([0-9a-fA-F]+);").expect("hex entity pattern"));

/// Named entities, replaced in this order before numeric ones
const NAMED_ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Decode the entity subset that appears in bookmark exports.
///
/// Unknown or malformed entities are left verbatim. Replacement is
/// sequential, so `&amp;lt;` ends up as `<`.
pub fn decode(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut decoded = text.to_string();
    for (entity, replacement) in NAMED_ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    let decoded = DECIMAL_ENTITY.replace_all(&decoded, |caps: &Captures| {
        code_point(&caps[1], 10).unwrap_or_else(|| caps[0].to_string())
    });
    let decoded = HEX_ENTITY.replace_all(&decoded, |caps: &Captures| {
        code_point(&caps[1], 16).unwrap_or_else(|| caps[0].to_string())
    });

    decoded.into_owned()
}

fn code_point(digits: &str, radix: u32) -> Option<String> {
    let value = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(value).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(
            decode("Tom &amp; Jerry&#39;s &quot;Show&quot;"),
            "Tom & Jerry's \"Show\""
        );
        assert_eq!(decode("&lt;b&gt; &apos;x&apos;"), "<b> 'x'");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode("caf&#233;"), "café");
        assert_eq!(decode("&#x4E2D;&#X6587;"), "中文");
        assert_eq!(decode("&#x1F600;"), "😀");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(decode("&nbsp;&copy;"), "&nbsp;&copy;");
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_invalid_code_point_left_verbatim() {
        assert_eq!(decode("&#55296;"), "&#55296;");
        assert_eq!(decode("&#99999999999;"), "&#99999999999;");
    }

    #[test]
    fn test_amp_is_decoded_first() {
        assert_eq!(decode("&amp;lt;"), "<");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(decode("Rust Programming Language"), "Rust Programming Language");
        assert_eq!(decode(""), "");
    }
}
