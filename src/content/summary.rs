use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use crate::util::truncate_chars;

/// Characters of paragraph text kept before the ellipsis.
pub const SUMMARY_CHARS: usize = 267;

const ELLIPSIS: &str = "...";

/// Substrings marking a paragraph as an author byline.
const BYLINE_MARKERS: [&str; 2] = ["Authors", "By:"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ParagraphState {
    #[default]
    Outside,
    Inside,
}

/// Accumulates the text of `<p>` elements from a stream of HTML tokens.
///
/// Paragraphs are not nested: a second `<p>` while inside one is a no-op,
/// and every `</p>` closes whatever has been accumulated (possibly nothing)
/// and returns to the outside state.
#[derive(Debug, Default)]
pub struct ParagraphCollector {
    state: ParagraphState,
    current: String,
    paragraphs: Vec<String>,
}

impl ParagraphCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_tag(&mut self, name: &str) {
        if name.eq_ignore_ascii_case("p") {
            self.state = ParagraphState::Inside;
        }
    }

    pub fn end_tag(&mut self, name: &str) {
        if name.eq_ignore_ascii_case("p") {
            self.state = ParagraphState::Outside;
            self.paragraphs.push(std::mem::take(&mut self.current));
        }
    }

    pub fn data(&mut self, text: &str) {
        if self.state == ParagraphState::Inside {
            self.current.push_str(text);
        }
    }

    /// Closed paragraphs in document order. Text of an unclosed trailing
    /// paragraph is dropped.
    pub fn finish(self) -> Vec<String> {
        self.paragraphs
    }
}

impl TokenSink for ParagraphCollector {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    self.start_tag(&tag.name);
                    // `<p/>` opens and closes in one token
                    if tag.self_closing {
                        self.end_tag(&tag.name);
                    }
                }
                TagKind::EndTag => self.end_tag(&tag.name),
            },
            Token::CharacterTokens(text) => self.data(&text),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizes `html` and returns the text of every closed paragraph.
///
/// Uses the HTML5 tokenizer without a tree builder, so tags are reported
/// exactly as written: nothing is re-nested or implicitly closed. Character
/// references are resolved the way browsers do (including legacy ones
/// without `;`), and a `<` or `&` that starts no markup stays literal text.
/// Comments, doctypes and `<![CDATA[...]]>` sections contribute no text.
pub fn collect_paragraphs(html: &str) -> Vec<String> {
    let mut tokenizer = Tokenizer::new(ParagraphCollector::new(), TokenizerOpts::default());

    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.finish()
}

/// Returns true if the paragraph looks like an author attribution.
pub fn is_byline(paragraph: &str) -> bool {
    BYLINE_MARKERS
        .iter()
        .any(|marker| paragraph.contains(marker))
}

/// Builds the plain-text summary of an article body.
///
/// Non-byline paragraphs are joined with single spaces. A non-empty result
/// is cut to [`SUMMARY_CHARS`] characters and always gets `"..."` appended,
/// so summaries are at most 270 characters. No paragraphs yields `""`.
pub fn summarize(html: &str) -> String {
    let paragraphs = collect_paragraphs(html);
    let article_text = paragraphs
        .iter()
        .filter(|p| !is_byline(p))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    if article_text.is_empty() {
        return String::new();
    }

    format!("{}{}", truncate_chars(&article_text, SUMMARY_CHARS), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_paragraphs_is_empty() {
        assert_eq!(summarize(""), "");
        assert_eq!(summarize("<h3>Heading</h3><figure><img src=\"x.png\"></figure>"), "");
        assert_eq!(summarize("plain text outside any tag"), "");
    }

    #[test]
    fn test_only_bylines_is_empty() {
        let html = "<p>By: Jane Doe</p><p>Authors: A, B</p><p>Co-Authors listed below</p>";
        assert_eq!(summarize(html), "");
    }

    #[test]
    fn test_byline_filter_is_case_sensitive() {
        assert!(is_byline("By: Jane"));
        assert!(is_byline("Written by the Authors"));
        assert!(!is_byline("by: jane"));
        assert!(!is_byline("authors"));
        assert!(!is_byline("By Jane"));
    }

    #[test]
    fn test_short_text_gets_ellipsis() {
        let html = "<p>By: Jane Doe</p><p>RAPIDS accelerates data science.</p>";
        assert_eq!(summarize(html), "RAPIDS accelerates data science....");
    }

    #[test]
    fn test_paragraphs_joined_with_single_space() {
        let html = "<h1>Title</h1><p>First.</p>\n<p>Second.</p>";
        assert_eq!(summarize(html), "First. Second....");
    }

    #[test]
    fn test_long_text_cut_at_267_chars() {
        let body = "x".repeat(400);
        let summary = summarize(&format!("<p>{}</p>", body));
        assert_eq!(summary.chars().count(), 270);
        assert_eq!(summary, format!("{}...", "x".repeat(267)));
    }

    #[test]
    fn test_exactly_267_chars_not_cut() {
        let body = "y".repeat(267);
        let summary = summarize(&format!("<p>{}</p>", body));
        assert_eq!(summary, format!("{}...", body));
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        let body = "é".repeat(300);
        let summary = summarize(&format!("<p>{}</p>", body));
        assert_eq!(summary.chars().count(), 270);
        assert!(summary.starts_with("éé"));
    }

    #[test]
    fn test_inline_markup_kept_as_text() {
        let html = r#"<p>Use <strong>cuDF</strong> with <a href="https://rapids.ai?x=1&amp;y=2">pandas</a>!</p>"#;
        assert_eq!(summarize(html), "Use cuDF with pandas!...");
    }

    #[test]
    fn test_html_entities_resolved() {
        let html = "<p>Caf&eacute; &amp; GPUs&#8217; speed&nbsp;up</p>";
        assert_eq!(summarize(html), "Café & GPUs\u{2019} speed\u{a0}up...");
    }

    #[test]
    fn test_unknown_entity_kept_verbatim() {
        let html = "<p>R&D at &zzunknown; scale</p>";
        assert_eq!(summarize(html), "R&D at &zzunknown; scale...");
    }

    #[test]
    fn test_bare_less_than_is_text() {
        let html = "<p>first</p><p>1 < 2 is true</p><p>third</p>";
        assert_eq!(collect_paragraphs(html), vec!["first", "1 < 2 is true", "third"]);
    }

    #[test]
    fn test_heart_emoticon_is_text() {
        let html = "<p>first</p><p>I <3 GPUs</p><p>third</p>";
        assert_eq!(collect_paragraphs(html), vec!["first", "I <3 GPUs", "third"]);
        assert_eq!(summarize(html), "first I <3 GPUs third...");
    }

    #[test]
    fn test_bare_ampersand_does_not_block_other_entities() {
        assert_eq!(collect_paragraphs("<p>R&D &amp; co</p>"), vec!["R&D & co"]);
    }

    #[test]
    fn test_legacy_entity_without_semicolon() {
        assert_eq!(collect_paragraphs("<p>two &copy 2024</p>"), vec!["two \u{a9} 2024"]);
    }

    #[test]
    fn test_cdata_section_is_not_text() {
        assert_eq!(collect_paragraphs("<p>a<![CDATA[hidden]]>b</p>"), vec!["ab"]);
    }

    #[test]
    fn test_comments_are_not_text() {
        assert_eq!(collect_paragraphs("<p>keep<!-- drop -->this</p>"), vec!["keepthis"]);
    }

    #[test]
    fn test_uppercase_and_attributed_paragraphs() {
        let html = r#"<P class="graf">Upper</P><p name="a1b2">Lower</p>"#;
        assert_eq!(collect_paragraphs(html), vec!["Upper", "Lower"]);
    }

    #[test]
    fn test_void_elements_inside_paragraph() {
        let html = "<p>line one<br>line two</p>";
        assert_eq!(collect_paragraphs(html), vec!["line oneline two"]);
    }

    #[test]
    fn test_stray_close_appends_empty_paragraph() {
        assert_eq!(collect_paragraphs("</p><p>a</p>"), vec!["", "a"]);
    }

    #[test]
    fn test_nested_open_does_not_reset() {
        assert_eq!(collect_paragraphs("<p>a<p>b</p>c</p>"), vec!["ab", ""]);
    }

    #[test]
    fn test_self_closing_paragraph_is_empty() {
        assert_eq!(collect_paragraphs("<p/><p>x</p>"), vec!["", "x"]);
    }

    #[test]
    fn test_unclosed_paragraph_dropped() {
        assert_eq!(collect_paragraphs("<p>done</p><p>never closed"), vec!["done"]);
    }

    #[test]
    fn test_collector_state_transitions() {
        let mut collector = ParagraphCollector::new();
        collector.data("ignored");
        collector.start_tag("p");
        collector.data("kept");
        collector.start_tag("em");
        collector.data(" too");
        collector.end_tag("em");
        collector.end_tag("p");
        collector.data("ignored again");
        assert_eq!(collector.finish(), vec!["kept too"]);
    }

    proptest! {
        #[test]
        fn prop_summary_bounded_and_prefixed(body in "[a-z ]{0,600}") {
            let summary = summarize(&format!("<p>{}</p>", body));
            if body.is_empty() {
                prop_assert_eq!(summary, "");
            } else {
                prop_assert!(summary.chars().count() <= SUMMARY_CHARS + ELLIPSIS.len());
                prop_assert!(summary.ends_with(ELLIPSIS));
                let kept = &summary[..summary.len() - ELLIPSIS.len()];
                prop_assert!(body.starts_with(kept));
                prop_assert_eq!(kept.chars().count(), body.chars().count().min(SUMMARY_CHARS));
            }
        }

        #[test]
        fn prop_markup_without_paragraphs_is_empty(body in "[a-z ]{0,200}") {
            let html = format!("<div><h2>{}</h2><span>{}</span></div>", body, body);
            prop_assert_eq!(summarize(&html), "");
        }
    }
}
