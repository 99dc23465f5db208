//! Wikitext cleanup applied to converted post content

use regex::Regex;
use std::sync::OnceLock;

/// HTML-style comments, including one left open at the end of the text
fn comment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap())
}

/// Remove all comments from wikitext
pub fn strip_comments(wikitext: &str) -> String {
    comment_regex().replace_all(wikitext, "").into_owned()
}

/// Collapse every run of three or more newlines to exactly two
pub fn collapse_blank_lines(text: &str) -> String {
    let mut result = text.to_string();
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }
    result
}

/// Normalize converted wikitext: drop comments, trim, collapse blank lines
pub fn normalize(wikitext: &str) -> String {
    let without_comments = strip_comments(wikitext);
    collapse_blank_lines(without_comments.trim())
}
