use std::sync::LazyLock;

use regex::Regex;

/// ASCII punctuation stripped from every document.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

static DEFAULT_CLEANER: LazyLock<TextCleaner> = LazyLock::new(TextCleaner::new);

/// Clean `text` with the shared cleaner.
#[must_use]
pub fn clean_text(text: &str) -> String {
    DEFAULT_CLEANER.clean(text)
}

/// Fixed sequence of regex substitutions applied to raw article text.
///
/// Order matters: bracketed asides and URLs must go before punctuation is
/// stripped, otherwise their delimiters disappear and the remains leak into the
/// vocabulary.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    bracketed: Regex,
    url: Regex,
    html_tag: Regex,
    punctuation: Regex,
    word_with_digit: Regex,
    repeated_space: Regex,
}

impl TextCleaner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bracketed: Regex::new(r"\[.*?\]").expect("compile bracket pattern"),
            url: Regex::new(r"https?://\S+|www\.\S+").expect("compile url pattern"),
            html_tag: Regex::new(r"<.*?>+").expect("compile html tag pattern"),
            punctuation: Regex::new(&format!("[{}]", regex::escape(PUNCTUATION)))
                .expect("compile punctuation pattern"),
            word_with_digit: Regex::new(r"\w*\d\w*").expect("compile digit word pattern"),
            repeated_space: Regex::new(r"\s{2,}").expect("compile whitespace pattern"),
        }
    }

    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        let text = self.bracketed.replace_all(text, "");
        let text = self.url.replace_all(&text, "");
        let text = self.html_tag.replace_all(&text, "");
        let text = self.punctuation.replace_all(&text, "");
        let text = text.replace('\n', " ");
        let text = self.word_with_digit.replace_all(&text, "");
        let text = self.repeated_space.replace_all(&text, " ");
        text.to_lowercase().trim().to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn removes_bracketed_asides() {
        assert_eq!(clean_text("Breaking [Reuters] news"), "breaking news");
        assert_eq!(clean_text("[a] one [b] two"), "one two");
    }

    #[test]
    fn removes_urls() {
        assert_eq!(
            clean_text("read https://example.com/a?b=1 and www.site.org now"),
            "read and now"
        );
        assert_eq!(clean_text("see http://x"), "see");
    }

    #[test]
    fn removes_html_tags() {
        assert_eq!(clean_text("<b>Bold</b> claim<br/>"), "bold claim");
    }

    #[test]
    fn removes_punctuation_and_flattens_newlines() {
        assert_eq!(clean_text("Wait... what?!\nReally,\n\nyes."), "wait what really yes");
    }

    #[test]
    fn removes_words_containing_digits() {
        assert_eq!(clean_text("In 2016 the covid19 x86 report"), "in the report");
    }

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(clean_text("   SHOUTING   Headline  "), "shouting headline");
    }

    #[test]
    fn blank_input_cleans_to_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("[only an aside] 123 ..."), "");
    }

    #[test]
    fn punctuation_class_covers_all_ascii_punctuation() {
        let cleaned = clean_text(PUNCTUATION);
        assert!(cleaned.is_empty(), "left over: {cleaned:?}");
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(input in "\\PC{0,200}") {
            let once = clean_text(&input);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn cleaning_is_idempotent_on_markup(input in "[a-zA-Z0-9 \\[\\]<>/:.\\n]{0,120}") {
            let once = clean_text(&input);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn urls_tags_and_asides_never_survive(
            prefix in "[c-g ]{0,20}",
            suffix in "[c-g ]{0,20}",
        ) {
            let input = format!("{prefix} http://x <b> [note] {suffix}");
            let cleaned = clean_text(&input);
            prop_assert!(!cleaned.contains("http"));
            prop_assert!(!cleaned.contains("<b>"));
            prop_assert!(!cleaned.contains("[note]"));
            prop_assert!(!cleaned.contains("note"));
            prop_assert!(!cleaned.contains('x'));
        }
    }
}
