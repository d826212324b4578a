// SPDX-License-Identifier: MIT
//
// Grapheme-unit string helpers.
//
// A grapheme unit is one UTF-8 lead byte plus its continuation bytes
// (`10xxxxxx`). These helpers size and slice text on those boundaries so a
// clipped label never ends halfway through a multi-byte character. They are
// pure and allocation-free except for `split_into_chars`.

/// Number of grapheme units in `text`: bytes whose top two bits are not `10`.
///
/// This is the width the screen buffer uses: one column slot per unit.
///
/// # Examples
///
/// ```
/// use glyph_term::text::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("╔═╗"), 3);   // 9 bytes, 3 units
/// assert_eq!(display_width(""), 0);
/// ```
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.bytes().filter(|&b| b & 0xC0 != 0x80).count()
}

/// Split `text` into grapheme-unit slices.
///
/// ```
/// use glyph_term::text::split_into_chars;
///
/// assert_eq!(split_into_chars("a█b"), vec!["a", "█", "b"]);
/// ```
#[must_use]
pub fn split_into_chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, ch)| &text[i..i + ch.len_utf8()])
        .collect()
}

/// Units `[start, start + len)` of `text`, clamped to its end.
///
/// Returns `""` when `start` is at or past the last unit.
///
/// ```
/// use glyph_term::text::substring;
///
/// assert_eq!(substring("═title═", 1, 5), "title");
/// assert_eq!(substring("abc", 1, 99), "bc");
/// assert_eq!(substring("abc", 3, 1), "");
/// ```
#[must_use]
pub fn substring(text: &str, start: usize, len: usize) -> &str {
    let mut bounds = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
    let Some(from) = bounds.nth(start) else {
        return "";
    };
    if len == 0 {
        return "";
    }
    let to = bounds.nth(len - 1).unwrap_or(text.len());
    &text[from..to]
}
