use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Remove every tag from a fragment and collapse whitespace runs.
///
/// Entities such as `&amp;` are left as-is.
pub fn strip_tags(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, "");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Plain-text variant of already chosen fragments, one output per input
pub fn to_plain_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    fragments.iter().map(|f| strip_tags(f.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_markup;

    #[test]
    fn test_strip_tags_basic() {
        let html = "<p class=\"normal\"><span style=\"font-weight: bold;\">Hello</span> world</p>";
        assert_eq!(strip_tags(html), "Hello world");
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<p>a</p>\n<p>b \t c</p>\n"), "a b c");
        assert_eq!(strip_tags("  <td>x</td>  <td>y</td> "), "x y");
    }

    #[test]
    fn test_strip_tags_keeps_entities() {
        assert_eq!(strip_tags("<p>fish &amp; chips</p>"), "fish &amp; chips");
    }

    #[test]
    fn test_strip_tags_empty_and_tag_only() {
        assert_eq!(strip_tags(""), "");
        assert_eq!(strip_tags("<table><tr></tr></table>"), "");
    }

    #[test]
    fn test_plain_fragments_keep_count_and_order() {
        let content = "<p>one</p><p>two</p><p>three</p>".repeat(10);
        let fragments = split_markup(&content, 60);
        let plain = to_plain_fragments(&fragments);

        assert_eq!(plain.len(), fragments.len());
        assert!(plain[0].starts_with("one"));
    }
}
