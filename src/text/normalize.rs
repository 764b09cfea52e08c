// src/text/normalize.rs
use once_cell::sync::OnceCell;
use regex::Regex;

/// Normalize text pulled out of markup: decode entities, strip stray tags,
/// fold typographic quotes to ASCII and collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip tags that survived (escaped markup inside text nodes)
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[a-z][^>]*>").expect("tag regex"));
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize “ ” „ « » to " and ‘ ’ to '
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{201E}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Zero-width characters disappear, nbsp becomes a space
    out = out
        .replace(['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'], "")
        .replace('\u{00A0}', " ");

    collapse_whitespace(&out)
}

/// [`normalize_text`] applied per `\n`-separated block. Empty blocks are
/// dropped and the rest are joined by a blank line.
pub fn normalize_blocks(s: &str) -> String {
    s.split('\n')
        .map(normalize_text)
        .filter(|b| !b.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collapse every whitespace run into a single space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re_ws.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_html_and_unescapes() {
        let s = "<p>Hello&nbsp;<b>world</b> &ldquo;ok&rdquo;</p>";
        assert_eq!(normalize_text(s), r#"Hello world "ok""#);
    }

    #[test]
    fn folds_whitespace_and_nbsp() {
        let s = "A\u{00A0}\n\tB   C";
        assert_eq!(normalize_text(s), "A B C");
    }

    #[test]
    fn keeps_comparisons_that_look_like_tags() {
        // `<` followed by a digit or space is prose, not markup
        assert_eq!(normalize_text("x < 3 and y > 2"), "x < 3 and y > 2");
    }

    #[test]
    fn blocks_keep_paragraph_breaks() {
        let s = "\n Intro\u{00A0}line \n\n\n  Second&nbsp;block \n \n";
        assert_eq!(normalize_blocks(s), "Intro line\n\nSecond block");
        assert_eq!(normalize_blocks("\n \n"), "");
    }

    #[test]
    fn empty_is_ok() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(collapse_whitespace("  \n "), "");
    }
}
