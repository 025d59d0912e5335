//! Fold state controller.
//!
//! Folds are kept in two tiers: *section* folds driven by the heading hierarchy, and *link* folds
//! created by the auto-fold-link policy. Both tiers are tracked separately and exposed through a
//! merged, offset-sorted view. The merged view never holds overlapping or adjacent regions.

use crate::links::link_regions;
use crate::region::Region;
use crate::sections::{Direction, Outline, Section, SectionBoundary};

/// Per-document fold state.
///
/// Created when a document is opened and dropped with it. Only fold and unfold operations change
/// which regions are folded; text edits shift them and join folds they bring into contact (see
/// [`FoldState::update_for_deletion`]).
#[derive(Debug, Clone, Default)]
pub struct FoldState {
    /// Heading-driven folds.
    section_folds: Vec<Region>,
    /// Folds created by the auto-fold-link policy.
    link_folds: Vec<Region>,
    /// Cached merged view (sorted) used for queries.
    merged: Vec<Region>,
    /// Target level of the last `fold_all_sections`, if any.
    target_level: Option<u8>,
}

impl FoldState {
    /// Create an empty fold state.
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_merged(&mut self) {
        self.section_folds.retain(|r| !r.is_empty());
        self.link_folds.retain(|r| !r.is_empty());
        self.section_folds.sort();
        self.link_folds.sort();

        self.merged.clear();
        self.merged.extend_from_slice(&self.section_folds);
        self.merged.extend_from_slice(&self.link_folds);
        self.merged.sort();
        self.merged.dedup();
    }

    /// Merge folds brought into contact by an edit. Merged folds join the section tier.
    fn coalesce(&mut self) {
        let mut all: Vec<(Region, bool)> = self
            .section_folds
            .iter()
            .map(|r| (*r, true))
            .chain(self.link_folds.iter().map(|r| (*r, false)))
            .filter(|(r, _)| !r.is_empty())
            .collect();
        all.sort_by_key(|(r, _)| *r);

        let mut joined: Vec<(Region, bool)> = Vec::with_capacity(all.len());
        for (region, is_section) in all {
            if let Some((last, last_is_section)) = joined.last_mut()
                && last.touches(&region)
            {
                *last = last.cover(&region);
                *last_is_section = true;
                continue;
            }
            joined.push((region, is_section));
        }

        self.section_folds = joined.iter().filter(|(_, s)| *s).map(|(r, _)| *r).collect();
        self.link_folds = joined.iter().filter(|(_, s)| !*s).map(|(r, _)| *r).collect();
        self.rebuild_merged();
    }

    /// All folded regions, sorted by offset.
    pub fn folded_regions(&self) -> &[Region] {
        &self.merged
    }

    /// Folded regions created from sections.
    pub fn section_folds(&self) -> &[Region] {
        &self.section_folds
    }

    /// Folded regions created by the auto-fold-link policy.
    pub fn link_folds(&self) -> &[Region] {
        &self.link_folds
    }

    /// Target level remembered from the last [`FoldState::fold_all_sections`].
    pub fn target_level(&self) -> Option<u8> {
        self.target_level
    }

    /// Check if exactly `region` is currently folded.
    pub fn is_folded(&self, region: Region) -> bool {
        self.merged.binary_search(&region).is_ok()
    }

    /// Get the folded region hiding `offset`, if any.
    pub fn fold_at(&self, offset: usize) -> Option<Region> {
        self.merged.iter().copied().find(|r| r.contains(offset))
    }

    /// Fold a section region.
    ///
    /// Section folds overlapping or touching `region` are merged into one section fold. Link folds
    /// overlapping or touching it are dropped, so a link never widens a section fold. Returns
    /// `false` if the region is empty or already hidden by an existing fold.
    pub fn fold_section(&mut self, region: Region) -> bool {
        if region.is_empty() || self.merged.iter().any(|f| f.contains_region(&region)) {
            return false;
        }

        let mut merged = region;
        self.section_folds.retain(|f| {
            if f.touches(&region) {
                merged = merged.cover(f);
                false
            } else {
                true
            }
        });
        self.link_folds.retain(|f| !f.touches(&merged));

        self.section_folds.push(merged);
        self.rebuild_merged();
        true
    }

    /// Fold an auxiliary link region, unless it intersects or touches an existing fold.
    pub fn fold_link(&mut self, region: Region) -> bool {
        if region.is_empty() || self.merged.iter().any(|f| f.touches(&region)) {
            return false;
        }

        self.link_folds.push(region);
        self.rebuild_merged();
        true
    }

    /// Unfold `region`, splitting any fold that straddles its boundaries.
    ///
    /// Returns `true` if any folded text was revealed.
    pub fn unfold(&mut self, region: Region) -> bool {
        let mut changed = false;
        for tier in [&mut self.section_folds, &mut self.link_folds] {
            let mut kept = Vec::with_capacity(tier.len());
            for fold in tier.drain(..) {
                if !fold.intersects(&region) {
                    kept.push(fold);
                    continue;
                }
                changed = true;
                kept.push(Region::new(fold.start, fold.start.max(region.start).min(fold.end)));
                kept.push(Region::new(fold.end.min(region.end).max(fold.start), fold.end));
            }
            *tier = kept;
        }

        self.rebuild_merged();
        changed
    }

    /// Remove every fold (both tiers). The remembered target level is kept.
    pub fn clear(&mut self) {
        self.section_folds.clear();
        self.link_folds.clear();
        self.merged.clear();
    }

    /// Toggle the sections enclosing the given caret offsets.
    ///
    /// Each offset resolves backward to its enclosing section; offsets resolving to the same
    /// section toggle it once. A folded section is unfolded, which re-folds its direct children
    /// while a target level is remembered, and re-folds the links inside it when `auto_fold_link`
    /// is set. Any other section is folded. Returns the sections that were toggled.
    pub fn toggle_section(
        &mut self,
        text: &str,
        offsets: &[usize],
        auto_fold_link: bool,
    ) -> Vec<Section> {
        let outline = Outline::new(text);
        let boundary = match self.target_level {
            Some(0) => SectionBoundary::NextHeading,
            _ => SectionBoundary::SameOrShallower,
        };

        let mut sections: Vec<Section> = offsets
            .iter()
            .filter_map(|&offset| outline.section_at(offset, Direction::Backward, boundary))
            .collect();
        sections.sort_by_key(|s| s.region);
        sections.dedup_by_key(|s| s.region);

        let links = if auto_fold_link {
            link_regions(text)
        } else {
            Vec::new()
        };

        for section in &sections {
            if !self.is_folded(section.region) {
                tracing::debug!(region = %section.region, level = section.level, "fold section");
                self.fold_section(section.region);
                continue;
            }

            tracing::debug!(region = %section.region, level = section.level, "unfold section");
            self.unfold(section.region);

            if self.target_level.is_some() {
                for child in outline.child_sections(section) {
                    self.fold_section(child.region);
                }
            }

            for link in links.iter().filter(|l| section.region.contains_region(l)) {
                self.fold_link(*link);
            }
        }

        sections
    }

    /// Replace all folds with the sections of `target_level`.
    ///
    /// `target_level == 0` folds every heading's own content up to the very next heading of any
    /// level. Any other value folds the sections of headings at exactly that level. With
    /// `auto_fold_link` set, every link not hidden by a section fold is folded as well.
    pub fn fold_all_sections(&mut self, text: &str, target_level: u8, auto_fold_link: bool) {
        self.clear();
        self.target_level = Some(target_level);

        let outline = Outline::new(text);
        let boundary = if target_level == 0 {
            SectionBoundary::NextHeading
        } else {
            SectionBoundary::SameOrShallower
        };

        for section in outline.sections(boundary) {
            if target_level == 0 || section.level == target_level {
                self.fold_section(section.region);
            }
        }

        if auto_fold_link {
            for link in link_regions(text) {
                self.fold_link(link);
            }
        }

        tracing::debug!(
            target_level,
            folds = self.merged.len(),
            "fold all sections"
        );
    }

    /// Unfold everything and forget the target level.
    pub fn unfold_all(&mut self) {
        tracing::debug!(folds = self.merged.len(), "unfold all");
        self.clear();
        self.target_level = None;
    }

    /// Shift folds after `len` chars were inserted at `offset`.
    ///
    /// Folds starting at or after the insertion point move; a fold spanning it grows.
    pub fn update_for_insertion(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }

        for fold in self.section_folds.iter_mut().chain(self.link_folds.iter_mut()) {
            if fold.start >= offset {
                fold.start += len;
                fold.end += len;
            } else if fold.end > offset {
                fold.end += len;
            }
        }
        self.coalesce();
    }

    /// Shift folds after the chars in `removed` were deleted.
    ///
    /// Folds entirely inside the deleted range are dropped; partially covered folds shrink.
    pub fn update_for_deletion(&mut self, removed: Region) {
        if removed.is_empty() {
            return;
        }

        let shift = |offset: usize| {
            if offset <= removed.start {
                offset
            } else if offset >= removed.end {
                offset - removed.len()
            } else {
                removed.start
            }
        };

        for fold in self.section_folds.iter_mut().chain(self.link_folds.iter_mut()) {
            *fold = Region::new(shift(fold.start), shift(fold.end));
        }
        self.coalesce();
    }
}
