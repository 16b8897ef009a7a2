//! Wikilink extraction from note content.

use regex::Regex;
use std::sync::OnceLock;

/// `[[Title]]` — the span between the brackets is taken literally, never
/// markdown-processed. `[^\]]+` makes each `[[` close at the nearest `]]`;
/// nested brackets are not supported.
fn wikilink_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wikilink pattern is valid"))
}

/// Extracts wikilink titles from markdown content, in order of appearance.
///
/// Returns a sequence, not a set: a title referenced twice appears twice, so
/// each occurrence can render independently. The returned slices borrow from
/// `content`.
///
/// # Examples
///
/// ```
/// use garden::model::extract_links;
///
/// let links = extract_links("See [[Alpha]] and [[Alpha]] again, plus [[Beta]].");
/// assert_eq!(links, vec!["Alpha", "Alpha", "Beta"]);
///
/// assert!(extract_links("no brackets here").is_empty());
/// ```
pub fn extract_links(content: &str) -> Vec<&str> {
    wikilink_re()
        .captures_iter(content)
        .map(|caps| caps.get(1).expect("capture group 1 always present").as_str())
        .collect()
}
