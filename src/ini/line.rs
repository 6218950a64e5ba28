// --- Line cleaning and pattern search ---

/// Longest line kept from the source, in bytes. Anything past it is dropped.
pub const MAX_LINE_LEN: usize = 1023;

#[inline(always)]
const fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Clean one line of the INI file into the canonical `KEY=value` form.
///
/// - blanks before the first `=` are removed and the key is uppercased;
/// - blanks right after the first `=` are removed;
/// - the line stops at the first `;` or `#`, unless `keep_comments` is set;
/// - the line stops at the first CR or LF;
/// - trailing blanks are removed.
///
/// Blanks inside the value are left alone.
pub fn clear_line(line: &mut String, keep_comments: bool) {
    let mut out = String::with_capacity(line.len());
    let mut equal_found = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => break,
            ';' | '#' if !keep_comments => break,
            '=' if !equal_found => {
                equal_found = true;
                out.push('=');
                while chars.next_if(|&n| is_blank(n)).is_some() {}
            }
            c if is_blank(c) && !equal_found => {}
            c if !equal_found => out.push(c.to_ascii_uppercase()),
            c => out.push(c),
        }
    }

    let trimmed = out.trim_end_matches(is_blank).len();
    out.truncate(trimmed);
    *line = out;
}

/// Find `needle` in `haystack`.
///
/// Returns 0 when absent, otherwise the 1-based byte offset of the first
/// occurrence. An empty haystack never matches.
pub fn seek_pattern(haystack: &str, needle: &str) -> usize {
    if haystack.is_empty() {
        return 0;
    }
    haystack.find(needle).map_or(0, |ix| ix + 1)
}

/// Cut `line` down to `MAX_LINE_LEN` bytes without splitting a character.
pub(crate) fn truncate_to_capacity(line: &mut String) {
    if line.len() <= MAX_LINE_LEN {
        return;
    }
    let mut end = MAX_LINE_LEN;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line.truncate(end);
}
