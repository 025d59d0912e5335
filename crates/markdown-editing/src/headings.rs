//! Heading index: ATX and Setext heading detection.
//!
//! The index is never cached. Every call to [`all_headings`] rescans the text from the top, so
//! results always reflect the current buffer content.
//!
//! Recognized forms:
//! - ATX: one to six `#` followed by whitespace or end of line (`## Title`).
//! - Setext: a non-blank text line directly followed by an underline made only of `=` (level 1)
//!   or `-` (level 2). The underline length does not matter.
//!
//! Both forms are recognized behind blockquote markers (`> ## Title`). Lines inside fenced code
//! blocks are skipped.

use crate::region::Region;
use crate::text::{LineSpan, LineSpans, line_spans};
use regex::Regex;
use std::iter::Peekable;
use std::sync::LazyLock;

static ATX_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<quote>(?:[ \t]*>)*[ \t]*)(?P<marks>#{1,6})(?:[ \t]|$)")
        .expect("valid ATX heading pattern")
});

static SETEXT_UNDERLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[ \t]*>)*[ \t]*(?P<rule>=+|-+)[ \t]*$").expect("valid setext underline pattern")
});

static BLOCKQUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[ \t]*>)*[ \t]*").expect("valid blockquote pattern"));

/// A heading found in the document.
///
/// `start..end` delimits the heading's own text: the single ATX line, or the text line plus its
/// underline for Setext headings. The line terminator is not part of the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    /// Char offset of the first char of the heading line.
    pub start: usize,
    /// Char offset of the end of the heading's last line content.
    pub end: usize,
    /// Heading level (1-6).
    pub level: u8,
}

impl Heading {
    /// Create a heading descriptor.
    pub fn new(start: usize, end: usize, level: u8) -> Self {
        Self { start, end, level }
    }

    /// The heading's own span as a region.
    pub fn region(&self) -> Region {
        Region::new(self.start, self.end)
    }

    /// Check if a caret at `offset` sits on the heading (begin, middle or end of its lines).
    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

impl From<Heading> for (usize, usize, u8) {
    fn from(heading: Heading) -> Self {
        (heading.start, heading.end, heading.level)
    }
}

/// Return all headings of `text` in document order.
///
/// The iterator is lazy and holds no state beyond the scan position; call again to restart.
pub fn all_headings(text: &str) -> Headings<'_> {
    Headings {
        lines: line_spans(text).peekable(),
        fence: FenceTracker::default(),
    }
}

/// Lazy heading scanner returned by [`all_headings`].
#[derive(Debug, Clone)]
pub struct Headings<'a> {
    lines: Peekable<LineSpans<'a>>,
    fence: FenceTracker,
}

impl Iterator for Headings<'_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Heading> {
        while let Some(line) = self.lines.next() {
            if self.fence.observe(line.text) || self.fence.in_fence() {
                continue;
            }

            if let Some(level) = atx_level(line.text) {
                return Some(Heading::new(line.start, line.end, level));
            }

            // A bare rule line can never be the text of a setext heading.
            if is_blank(line.text) || setext_level(&line).is_some() {
                continue;
            }

            let Some(level) = self.lines.peek().and_then(setext_level) else {
                continue;
            };

            let underline = self.lines.next()?;
            return Some(Heading::new(line.start, underline.end, level));
        }

        None
    }
}

fn atx_level(line: &str) -> Option<u8> {
    let caps = ATX_HEADING.captures(line)?;
    let marks = caps.name("marks")?;
    u8::try_from(marks.len()).ok()
}

fn setext_level(line: &LineSpan<'_>) -> Option<u8> {
    let caps = SETEXT_UNDERLINE.captures(line.text)?;
    match caps.name("rule")?.as_str().chars().next()? {
        '=' => Some(1),
        _ => Some(2),
    }
}

fn is_blank(line: &str) -> bool {
    let body_start = BLOCKQUOTE_PREFIX.find(line).map_or(0, |m| m.end());
    line[body_start..].trim().is_empty()
}

/// Tracks fenced code blocks (```` ``` ```` / `~~~`) while scanning lines top to bottom.
#[derive(Debug, Clone, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    /// Feed the next line. Returns `true` if the line is a fence delimiter.
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        let body_start = BLOCKQUOTE_PREFIX.find(line).map_or(0, |m| m.end());
        let body = &line[body_start..];

        let Some(marker) = body.chars().next().filter(|c| *c == '`' || *c == '~') else {
            return false;
        };
        let run = body.chars().take_while(|c| *c == marker).count();
        if run < 3 {
            return false;
        }

        match self.open {
            None => {
                self.open = Some((marker, run));
                true
            }
            Some((open_marker, open_run)) => {
                let closes = marker == open_marker
                    && run >= open_run
                    && body[run * marker.len_utf8()..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
        }
    }

    /// Whether the scan position is inside a fenced block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headings(text: &str) -> Vec<(usize, usize, u8)> {
        all_headings(text).map(Into::into).collect()
    }

    #[test]
    fn test_atx_levels() {
        let text = "# One\n## Two\n###### Six\n####### Seven\n#NoSpace\n#";
        assert_eq!(
            headings(text),
            vec![(0, 5, 1), (6, 12, 2), (13, 23, 6), (47, 48, 1)]
        );
    }

    #[test]
    fn test_setext_level_depends_on_underline_char_only() {
        let text = "Title\n=\n\nSub\n--------------";
        assert_eq!(headings(text), vec![(0, 7, 1), (9, 27, 2)]);
    }

    #[test]
    fn test_underline_without_text_is_not_heading() {
        assert_eq!(headings("===\n"), vec![]);
        assert_eq!(headings("text\n\n---\n"), vec![]);
    }

    #[test]
    fn test_rule_line_is_not_setext_text() {
        assert_eq!(headings("---\n==="), vec![]);
        assert_eq!(headings("===\n---\n"), vec![]);
        assert_eq!(headings("> ---\n> ==="), vec![]);
        assert_eq!(headings("---\nTitle\n==="), vec![(4, 13, 1)]);
    }

    #[test]
    fn test_blockquote_headings() {
        let text = "> # Quoted\n> Text\n> ----";
        assert_eq!(headings(text), vec![(0, 10, 1), (11, 24, 2)]);
    }

    #[test]
    fn test_fenced_code_is_skipped() {
        let text = "```\n# not a heading\n```\n# Real\n~~~~\nx\n===\n~~~~";
        assert_eq!(headings(text), vec![(24, 30, 1)]);
    }

    #[test]
    fn test_unclosed_fence_hides_rest() {
        assert_eq!(headings("# A\n```rust\n# B"), vec![(0, 3, 1)]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let text = "# A\nbody\n## B\n";
        let first: Vec<Heading> = all_headings(text).collect();
        let second: Vec<Heading> = all_headings(text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_heading_covers_line_bounds() {
        let heading = Heading::new(10, 20, 2);
        assert!(heading.covers(10));
        assert!(heading.covers(20));
        assert!(!heading.covers(21));
        assert!(!heading.covers(9));
    }
}
