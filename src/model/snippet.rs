//! Splicing opaque markdown snippets into note content.

/// Splices `snippet` into `content` at a byte cursor, padded with newlines
/// the way the editor inserts upload results.
///
/// The snippet is opaque text (typically the `![name](url)` markdown an
/// upload returns). A cursor past the end of the content appends; a cursor
/// inside a multi-byte character snaps back to the previous boundary.
///
/// # Examples
///
/// ```
/// use garden::model::splice;
///
/// let content = "beforeafter";
/// let spliced = splice(content, 6, "![photo](uploads/photo.png)");
/// assert_eq!(spliced, "before\n![photo](uploads/photo.png)\nafter");
/// ```
pub fn splice(content: &str, cursor: usize, snippet: &str) -> String {
    let mut at = cursor.min(content.len());
    while at > 0 && !content.is_char_boundary(at) {
        at -= 1;
    }

    let mut result = String::with_capacity(content.len() + snippet.len() + 2);
    result.push_str(&content[..at]);
    result.push('\n');
    result.push_str(snippet);
    result.push('\n');
    result.push_str(&content[at..]);
    result
}
