/// One logical line of a document, measured in char offsets.
///
/// `end` is the end of the line content: the `\n` terminator (and a `\r` before it) is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Lazy iterator over the lines of a text, tracking char offsets.
///
/// Follows editor semantics for `N` newlines (`N + 1` lines), except that the empty line after a
/// final `\n` is not produced: a buffer ending in a line break ends at that line's content.
#[derive(Debug, Clone)]
pub(crate) struct LineSpans<'a> {
    rest: Option<&'a str>,
    offset: usize,
}

impl<'a> Iterator for LineSpans<'a> {
    type Item = LineSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        let (raw, tail) = match rest.find('\n') {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };

        // A trailing empty segment after the last '\n' is not a line of its own.
        if tail.is_none() && raw.is_empty() && self.offset > 0 {
            self.rest = None;
            return None;
        }

        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let start = self.offset;
        let end = start + text.chars().count();

        self.offset = start + raw.chars().count() + usize::from(tail.is_some());
        self.rest = tail;

        Some(LineSpan { start, end, text })
    }
}

pub(crate) fn line_spans(text: &str) -> LineSpans<'_> {
    LineSpans {
        rest: Some(text),
        offset: 0,
    }
}

/// Convert a byte index within `line` to a char count.
pub(crate) fn char_offset(line: &str, byte_idx: usize) -> usize {
    line[..byte_idx].chars().count()
}

/// End of the buffer content, excluding one trailing line break.
pub(crate) fn content_end(text: &str) -> usize {
    let trimmed = text
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(text);
    trimmed.chars().count()
}
