//! Section resolver.
//!
//! A section is the text governed by a heading: it begins right after the heading's own line and
//! ends at the end of the line preceding the terminating heading (or at the end of the buffer
//! content). Which heading terminates a section depends on the [`SectionBoundary`]:
//!
//! - [`SectionBoundary::SameOrShallower`]: the next heading whose level is `<=` the section's
//!   level. Deeper headings are nested members of the section.
//! - [`SectionBoundary::NextHeading`]: the very next heading, whatever its level ("outline mode").
//!
//! Sections are computed values. [`Outline`] holds the heading list of one buffer snapshot so that
//! many sections can be resolved without rescanning the text.

use crate::headings::{Heading, all_headings};
use crate::region::Region;
use crate::text::{content_end, line_spans};

/// Which way to look for a heading when a position lies in body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Resolve to the nearest heading before the position (the enclosing section).
    #[default]
    Backward,
    /// Resolve to the nearest heading after the position.
    Forward,
}

impl From<i32> for Direction {
    /// `-1` (or any non-positive value) searches backward, `+1` forward.
    fn from(sign: i32) -> Self {
        if sign > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Rule deciding which heading ends a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionBoundary {
    /// End at the next heading of the same or a shallower level.
    #[default]
    SameOrShallower,
    /// End at the very next heading of any level.
    NextHeading,
}

/// A resolved section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Text governed by the heading, excluding the heading line itself.
    pub region: Region,
    /// Level of the owning heading.
    pub level: u8,
    /// The owning heading.
    pub heading: Heading,
}

/// Headings of one buffer snapshot, ready for section queries.
#[derive(Debug, Clone)]
pub struct Outline {
    headings: Vec<Heading>,
    /// For each heading, the content end of the line right before it.
    line_end_before: Vec<usize>,
    content_end: usize,
}

impl Outline {
    /// Scan `text` and build its outline.
    pub fn new(text: &str) -> Self {
        let headings: Vec<Heading> = all_headings(text).collect();

        let mut line_end_before = Vec::with_capacity(headings.len());
        let mut pending = headings.iter().map(|h| h.start).peekable();
        let mut previous_end = 0;
        for line in line_spans(text) {
            if pending.peek() == Some(&line.start) {
                line_end_before.push(previous_end);
                pending.next();
            }
            if pending.peek().is_none() {
                break;
            }
            previous_end = line.end;
        }

        tracing::trace!(headings = headings.len(), "outline scanned");

        Self {
            headings,
            line_end_before,
            content_end: content_end(text),
        }
    }

    /// All headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// Index of the heading a position resolves to.
    ///
    /// A position on a heading's own lines (begin, middle or end) always resolves to that heading.
    /// A position in body text resolves according to `direction`. Positions before the first
    /// heading resolve to nothing.
    pub fn heading_index_at(&self, position: usize, direction: Direction) -> Option<usize> {
        let preceding = self
            .headings
            .partition_point(|h| h.start <= position)
            .checked_sub(1)?;

        if self.headings[preceding].covers(position) {
            return Some(preceding);
        }

        match direction {
            Direction::Backward => Some(preceding),
            Direction::Forward if preceding + 1 < self.headings.len() => Some(preceding + 1),
            Direction::Forward => Some(preceding),
        }
    }

    /// Section owned by the heading at `index`.
    pub fn section(&self, index: usize, boundary: SectionBoundary) -> Option<Section> {
        let heading = *self.headings.get(index)?;

        let terminator = self.headings[index + 1..]
            .iter()
            .position(|next| match boundary {
                SectionBoundary::SameOrShallower => next.level <= heading.level,
                SectionBoundary::NextHeading => true,
            })
            .map(|offset| index + 1 + offset);

        let end = match terminator {
            Some(next) => self.line_end_before[next],
            None => self.content_end,
        };

        Some(Section {
            region: Region::new(heading.end, end.max(heading.end)),
            level: heading.level,
            heading,
        })
    }

    /// Section enclosing a position, see [`Outline::heading_index_at`].
    pub fn section_at(
        &self,
        position: usize,
        direction: Direction,
        boundary: SectionBoundary,
    ) -> Option<Section> {
        let index = self.heading_index_at(position, direction)?;
        self.section(index, boundary)
    }

    /// Sections of every heading, in document order.
    pub fn sections(&self, boundary: SectionBoundary) -> impl Iterator<Item = Section> + '_ {
        (0..self.headings.len()).filter_map(move |index| self.section(index, boundary))
    }

    /// Direct children of a section: the sections of the shallowest headings nested inside it.
    pub fn child_sections(&self, section: &Section) -> Vec<Section> {
        let first = self
            .headings
            .partition_point(|h| h.start < section.region.start);
        let last = self
            .headings
            .partition_point(|h| h.start < section.region.end);
        let nested = first..last;

        let Some(level) = self.headings[nested.clone()].iter().map(|h| h.level).min() else {
            return Vec::new();
        };

        nested
            .filter(|&index| self.headings[index].level == level)
            .filter_map(|index| self.section(index, SectionBoundary::SameOrShallower))
            .collect()
    }
}

/// Resolve the section enclosing `position` and return its region and level.
///
/// Returns `None` when the position precedes the first heading of the buffer.
pub fn section_region_and_level(
    text: &str,
    position: usize,
    direction: Direction,
) -> Option<(Region, u8)> {
    Outline::new(text)
        .section_at(position, direction, SectionBoundary::SameOrShallower)
        .map(|section| (section.region, section.level))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "intro\n# A\na body\n## A.1\nx\n### A.1.1\ny\n## A.2\nz\n# B\nlast\n";

    #[test]
    fn test_position_before_first_heading() {
        assert_eq!(section_region_and_level(DOC, 2, Direction::Backward), None);
        assert_eq!(section_region_and_level(DOC, 2, Direction::Forward), None);
    }

    #[test]
    fn test_same_or_shallower_termination() {
        // "# A" spans 6..9; "# B" starts at 47, so the section ends at 46.
        assert_eq!(
            section_region_and_level(DOC, 6, Direction::Backward),
            Some((Region::new(9, 46), 1))
        );
        // "## A.1" (17..23) swallows "### A.1.1" and stops before "## A.2".
        assert_eq!(
            section_region_and_level(DOC, 20, Direction::Backward),
            Some((Region::new(23, 37), 2))
        );
    }

    #[test]
    fn test_last_section_excludes_trailing_newline() {
        assert_eq!(
            section_region_and_level(DOC, 50, Direction::Backward),
            Some((Region::new(50, 55), 1))
        );
    }

    #[test]
    fn test_direction_only_matters_in_body_text() {
        let outline = Outline::new(DOC);
        // On the heading line both directions agree.
        assert_eq!(outline.heading_index_at(7, Direction::Backward), Some(0));
        assert_eq!(outline.heading_index_at(7, Direction::Forward), Some(0));
        // "a body" (10..16) sits between "# A" and "## A.1".
        assert_eq!(outline.heading_index_at(12, Direction::Backward), Some(0));
        assert_eq!(outline.heading_index_at(12, Direction::Forward), Some(1));
        // Past the last heading, forward falls back to the enclosing one.
        assert_eq!(outline.heading_index_at(53, Direction::Forward), Some(4));
    }

    #[test]
    fn test_outline_mode_stops_at_next_heading() {
        let outline = Outline::new(DOC);
        let section = outline
            .section_at(6, Direction::Backward, SectionBoundary::NextHeading)
            .unwrap();
        assert_eq!(section.region, Region::new(9, 16));
    }

    #[test]
    fn test_child_sections() {
        let outline = Outline::new(DOC);
        let a = outline.section(0, SectionBoundary::SameOrShallower).unwrap();
        let children: Vec<Region> = outline
            .child_sections(&a)
            .into_iter()
            .map(|s| s.region)
            .collect();
        assert_eq!(children, vec![Region::new(23, 37), Region::new(44, 46)]);
    }

    #[test]
    fn test_empty_section_between_adjacent_headings() {
        let outline = Outline::new("# A\n# B");
        let section = outline.section(0, SectionBoundary::SameOrShallower).unwrap();
        assert!(section.region.is_empty());
        assert_eq!(section.region.start, 3);
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from(-1), Direction::Backward);
        assert_eq!(Direction::from(1), Direction::Forward);
    }
}
