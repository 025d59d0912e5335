//! Half-open char-offset ranges shared by headings, sections, links and folds.

use std::fmt;

/// A half-open character-offset range (`start..end`) in the document.
///
/// Offsets are counted in Unicode scalar values (`char`) from the start of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Region {
    /// Range start offset (inclusive).
    pub start: usize,
    /// Range end offset (exclusive).
    pub end: usize,
}

impl Region {
    /// Create a region, normalizing reversed bounds.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the region covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an offset lies inside the region (`start <= offset < end`).
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check if `other` lies entirely within this region.
    pub fn contains_region(&self, other: &Region) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if two regions share at least one char.
    pub fn intersects(&self, other: &Region) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if two regions intersect or are directly adjacent.
    pub fn touches(&self, other: &Region) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest region covering both.
    pub fn cover(&self, other: &Region) -> Region {
        Region {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<(usize, usize)> for Region {
    fn from((start, end): (usize, usize)) -> Self {
        Region::new(start, end)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_contains() {
        let region = Region::new(10, 20);
        assert!(region.contains(10));
        assert!(region.contains(19));
        assert!(!region.contains(20));
        assert!(!region.contains(9));
    }

    #[test]
    fn test_region_intersects_and_touches() {
        let a = Region::new(10, 20);
        let b = Region::new(15, 25);
        let c = Region::new(20, 30);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.touches(&c));
        assert!(!a.touches(&Region::new(21, 30)));
    }

    #[test]
    fn test_region_new_normalizes() {
        assert_eq!(Region::new(7, 3), Region::new(3, 7));
        assert_eq!(Region::from((3, 7)).len(), 4);
    }
}
