use super::*;
use crate::markup::MarkupDocument;

fn paragraph(len: usize) -> String {
    // "<p>" + text + "</p>" == len characters
    format!("<p>{}</p>", "a".repeat(len - 7))
}

fn heading(level: u8, title: &str) -> String {
    format!("<p class=\"heading-{level}\">{title}</p>")
}

/// Deterministic renderer-shaped document: styled paragraphs, headings, tables
fn render_document(seed: u64, blocks: usize) -> String {
    let mut state = seed;
    let mut next = move |bound: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % bound
    };

    let words = ["alpha", "beta", "中文", "gamma", "&amp;", "delta", "épée", "omega"];
    let mut html = Vec::new();

    for i in 0..blocks {
        match next(8) {
            0..=4 => {
                let mut p = String::from("<p class=\"normal\" align=\"justify\">");
                for _ in 0..=next(6) {
                    let run: Vec<&str> = (0..=next(12))
                        .map(|_| words[next(words.len() as u64) as usize])
                        .collect();
                    if next(2) == 0 {
                        p.push_str(&format!(
                            "<span style=\"font-weight: bold; font-size: {}.0pt;\">{}</span>",
                            10 + next(8),
                            run.join(" ")
                        ));
                    } else {
                        p.push_str(&run.join(" "));
                    }
                }
                p.push_str("</p>");
                html.push(p);
            }
            5 | 6 => html.push(heading(1 + next(6) as u8, &format!("Section {i}"))),
            _ => {
                let mut t = String::from("<table border=\"1\" style=\"border-collapse: collapse;\">");
                for _ in 0..=next(3) {
                    t.push_str("<tr>");
                    for _ in 0..=next(3) {
                        t.push_str("<td style=\"border: 1px solid #ddd; padding: 8px;\">");
                        t.push_str(words[next(words.len() as u64) as usize]);
                        t.push_str("</td>");
                    }
                    t.push_str("</tr>");
                }
                t.push_str("</table>");
                html.push(t);
            }
        }
    }

    html.join("\n")
}

/// Checks round-trip, non-emptiness, boundedness, tag integrity and heading wholeness
fn assert_split_properties(content: &str, max_length: usize) {
    let splitter = FragmentSplitter::with_max_length(max_length);
    let fragments: Vec<Fragment> = splitter.fragments(content).collect();
    let doc = MarkupDocument::parse(content);

    let joined: String = fragments.iter().map(|f| f.text).collect();
    assert_eq!(joined, content, "round-trip failed for max_length={max_length}");

    for (i, fragment) in fragments.iter().enumerate() {
        let meta = fragment.metadata;
        assert!(!fragment.text.is_empty(), "empty fragment {i}");
        assert_eq!(meta.index, i);
        assert_eq!(meta.char_count, fragment.text.chars().count());

        let is_last = i + 1 == fragments.len();
        if is_last {
            continue;
        }

        assert!(
            meta.char_count <= max_length + splitter.config().tag_guard_window,
            "fragment {i} has {} chars (max {max_length})",
            meta.char_count
        );

        if meta.cut == CutReason::Forced {
            assert_eq!(meta.char_count, max_length);
            continue;
        }

        assert!(
            doc.token_containing(meta.end_offset)
                .map_or(true, |t| !t.is_tag()),
            "fragment {i} ends inside a tag (max {max_length})"
        );

        for h in doc.headings() {
            if doc.chars_between(h.start, h.end) <= max_length {
                assert!(
                    !h.guards(meta.end_offset),
                    "fragment {i} splits or strands heading at {} (max {max_length})",
                    h.start
                );
            }
        }
    }
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_empty_content() {
    assert!(split_markup("", 100).is_empty());
}

#[test]
fn test_short_content_single_fragment() {
    assert_eq!(split_markup("<p>short</p>", 100), vec!["<p>short</p>"]);
}

#[test]
fn test_content_exactly_max_length() {
    let content = paragraph(100);
    assert_eq!(split_markup(&content, 100), vec![content.as_str()]);
}

#[test]
fn test_splits_after_paragraph_end() {
    let content = format!("{}{}{}", paragraph(4000), paragraph(4000), paragraph(4000));
    assert_eq!(content.len(), 12000);

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(10_000)
        .fragments(&content)
        .collect();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text.len(), 8000);
    assert!(fragments[0].text.ends_with("</p>"));
    assert_eq!(fragments[0].metadata.cut, CutReason::ParagraphEnd);
    assert_eq!(fragments[1].text.len(), 4000);
}

#[test]
fn test_heading_straddling_limit_moves_to_next_fragment() {
    let title = heading(1, "Title");
    let mut content = String::new();
    for _ in 0..9 {
        content.push_str(&paragraph(100));
    }
    content.push_str(&paragraph(80));
    let heading_start = content.len();
    assert_eq!(heading_start, 980);
    content.push_str(&title);
    content.push_str(&paragraph(300));

    let fragments = split_markup(&content, 1000);

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].len(), heading_start);
    assert!(fragments[1].starts_with(&title));
}

#[test]
fn test_heading_not_stranded_at_fragment_tail() {
    let title = heading(2, "Chapter");
    let mut content = String::new();
    for _ in 0..8 {
        content.push_str(&paragraph(100));
    }
    content.push_str(&title);
    content.push_str(&paragraph(300));

    let fragments = split_markup(&content, 1000);

    assert_eq!(fragments[0].len(), 800);
    assert!(fragments[1].starts_with(&title));
}

#[test]
fn test_oversized_paragraph_forces_single_cut() {
    let content = format!("<p>{}</p>", "x".repeat(150));

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .collect();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].metadata.cut, CutReason::Forced);
    assert_eq!(fragments[0].text.len(), 100);
    assert_eq!(fragments[1].text.len(), 57);
}

#[test]
fn test_oversized_paragraph_repeated_cuts() {
    let content = format!("<p>{}</p>", "x".repeat(450));
    let fragments = split_markup(&content, 100);

    // The last cut inside the text snaps forward onto the closing tag
    assert_eq!(fragments.len(), 5);
    assert!(fragments[..3].iter().all(|f| f.len() == 100));
    assert_eq!(fragments[3].len(), 153);
    assert_eq!(fragments[4], "</p>");
    assert_eq!(fragments.concat(), content);
}

// ========================================================================
// Individual rules
// ========================================================================

#[test]
fn test_tag_end_fallback_inside_table() {
    let row = format!("<tr><td>{}</td></tr>", "c".repeat(40));
    let content = format!("<table>{}</table>", row.repeat(30));

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(500)
        .fragments(&content)
        .collect();

    assert!(fragments.len() > 1);
    for fragment in &fragments[..fragments.len() - 1] {
        assert!(fragment.text.ends_with('>'));
        assert_eq!(fragment.metadata.cut, CutReason::TagEnd);
        assert!(fragment.text.len() <= 500);
    }
}

#[test]
fn test_limit_inside_text_cuts_at_limit() {
    let content = "y".repeat(250);
    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .collect();

    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].metadata.cut, CutReason::Limit);
    assert_eq!(fragments[0].text.len(), 100);
}

#[test]
fn test_limit_inside_text_advances_to_nearby_tag() {
    let content = format!("<p>{}</p><p>{}</p>", "a".repeat(1017), "b".repeat(500));

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(1000)
        .fragments(&content)
        .collect();

    assert_eq!(fragments[0].metadata.cut, CutReason::TagGuard);
    assert_eq!(fragments[0].text.len(), 1020);
    assert!(fragments[0].text.ends_with('a'));
    assert!(fragments[1].text.starts_with("</p><p>"));
}

#[test]
fn test_limit_inside_text_retreats_to_nearby_tag() {
    let content = format!("{}<b>{}", "x".repeat(60), "y".repeat(200));
    let splitter = FragmentSplitter::new(SplitConfig::new(100).tag_lookback(10));

    let first = splitter.fragments(&content).next().unwrap();

    assert_eq!(first.metadata.cut, CutReason::TagGuard);
    assert_eq!(first.text, format!("{}<b>", "x".repeat(60)));
}

#[test]
fn test_limit_inside_text_keeps_minimum_fill() {
    // The preceding tag is within the window but below the minimum fill
    let content = format!("{}<b>{}", "x".repeat(20), "y".repeat(300));
    let splitter = FragmentSplitter::new(SplitConfig::new(100).tag_lookback(10));

    let first = splitter.fragments(&content).next().unwrap();

    assert_eq!(first.metadata.cut, CutReason::Limit);
    assert_eq!(first.text.len(), 100);
}

#[test]
fn test_limit_inside_short_tag_advances_past_it() {
    let content = format!(
        "{}<span style=\"color: red;\">{}</span>",
        "t".repeat(98),
        "u".repeat(200)
    );

    let first = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .next()
        .unwrap();

    assert_eq!(first.metadata.cut, CutReason::TagGuard);
    assert!(first.text.ends_with("<span style=\"color: red;\">"));
    assert_eq!(first.text.len(), 98 + 26);
}

#[test]
fn test_limit_inside_long_tag_retreats_before_it() {
    let style = "x".repeat(300);
    let content = format!("{}<span style=\"{style}\">body</span>", "t".repeat(98));

    let first = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .next()
        .unwrap();

    assert_eq!(first.metadata.cut, CutReason::TagGuard);
    assert_eq!(first.text, "t".repeat(98));
}

#[test]
fn test_single_tag_longer_than_max_is_forced() {
    let content = format!("<span style=\"{}\">x</span>", "a".repeat(300));

    let first = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .next()
        .unwrap();

    assert_eq!(first.metadata.cut, CutReason::Forced);
    assert_eq!(first.text.len(), 100);
}

#[test]
fn test_heading_guard_defers_heading_after_bare_text() {
    let title = heading(2, &"T".repeat(40));
    let content = format!("{}{}", "x".repeat(70), title);

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .collect();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].metadata.cut, CutReason::HeadingDeferred);
    assert_eq!(fragments[0].text, "x".repeat(70));
    assert_eq!(fragments[1].text, title);
}

#[test]
fn test_heading_too_early_in_fragment_is_forced() {
    // Deferring the heading would leave a fragment below the minimum fill
    let title = heading(1, &"T".repeat(150));
    let content = format!("{}{}", "x".repeat(10), title);

    let first = FragmentSplitter::with_max_length(100)
        .fragments(&content)
        .next()
        .unwrap();

    assert_eq!(first.metadata.cut, CutReason::Forced);
    assert_eq!(first.text.len(), 100);
}

#[test]
fn test_non_heading_class_is_not_protected() {
    let mut content = String::new();
    for _ in 0..9 {
        content.push_str(&paragraph(100));
    }
    content.push_str("<p class=\"normal\">Not a title</p>");
    content.push_str(&paragraph(300));

    let fragments = split_markup(&content, 1000);
    assert!(fragments[0].ends_with("<p class=\"normal\">Not a title</p>"));
}

#[test]
fn test_zero_max_length_treated_as_one() {
    assert_eq!(split_markup("abc", 0), vec!["a", "b", "c"]);
}

#[test]
fn test_lengths_count_characters_not_bytes() {
    let para = format!("<p>{}</p>", "字".repeat(93));
    assert_eq!(para.chars().count(), 100);
    let content = para.repeat(3);

    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(250)
        .fragments(&content)
        .collect();

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].metadata.char_count, 200);
    assert_eq!(fragments[0].text, para.repeat(2));
}

#[test]
fn test_metadata_offsets_are_contiguous() {
    let content = render_document(7, 60);
    let fragments: Vec<Fragment> = FragmentSplitter::with_max_length(400)
        .fragments(&content)
        .collect();

    let mut expected = 0;
    for fragment in &fragments {
        assert_eq!(fragment.metadata.start_offset, expected);
        assert_eq!(
            &content[fragment.metadata.start_offset..fragment.metadata.end_offset],
            fragment.text
        );
        expected = fragment.metadata.end_offset;
    }
    assert_eq!(expected, content.len());
}

// ========================================================================
// Properties over rendered documents
// ========================================================================

#[test]
fn test_properties_on_rendered_documents() {
    for seed in [1, 2, 3, 42, 1234] {
        let content = render_document(seed, 120);
        for max_length in [50, 100, 333, 1000, 4096] {
            assert_split_properties(&content, max_length);
        }
    }
}

#[test]
fn test_properties_on_malformed_markup() {
    let content = "<p class=\"heading-1\">unclosed <span style=\"a\" <td>> stray < and > \
                   <p>text</p></p></p><<<>>>"
        .repeat(20);
    for max_length in [1, 7, 30, 100] {
        let fragments = split_markup(&content, max_length);
        assert_eq!(fragments.concat(), content);
        assert!(fragments.iter().all(|f| !f.is_empty()));
    }
}

#[test]
fn test_no_op_when_within_limit() {
    let content = render_document(9, 5);
    let max_length = content.chars().count();
    assert_eq!(split_markup(&content, max_length), vec![content.as_str()]);
}

// ========================================================================
// Config
// ========================================================================

#[test]
fn test_config_defaults() {
    let config = SplitConfig::default();
    assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);
    assert_eq!(config.paragraph_lookback, 500);
    assert_eq!(config.tag_lookback, 500);
    assert_eq!(config.tag_guard_window, 100);
    assert_eq!(config.heading_lookback, 200);
    assert_eq!(config.min_fill(), 5000);
}

#[test]
fn test_config_builder_and_min_fill() {
    let config = SplitConfig::new(0).heading_lookback(50).tag_guard_window(10);
    assert_eq!(config.max_length, 1);
    assert_eq!(config.min_fill(), 1);
    assert_eq!(config.heading_lookback, 50);
    assert_eq!(config.tag_guard_window, 10);
    assert_eq!(SplitConfig::new(101).min_fill(), 51);
}

#[test]
fn test_config_deserialize_partial() {
    let config: SplitConfig = serde_json::from_str(r#"{"max_length": 2000}"#).unwrap();
    assert_eq!(config.max_length, 2000);
    assert_eq!(config.tag_lookback, DEFAULT_TAG_LOOKBACK);
}
