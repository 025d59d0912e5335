//! Randomized checks of the heading, section and fold invariants.
//!
//! Documents are assembled from a small pool of Markdown lines so that headings, setext
//! underlines, blockquotes, fences and links interact in many combinations.

use markdown_editing::{
    Direction, FoldState, Outline, Region, SectionBoundary, all_headings, link_regions,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LINES: &[&str] = &[
    "# Top",
    "## Second",
    "### Third",
    "#### Fourth [ref](https://example.org/4)",
    "> ## Quoted",
    "Setext title",
    "============",
    "------",
    "",
    "plain paragraph text",
    "see [docs](https://docs.rs) and [more](<https://a.b/c d>)",
    "[label]: https://example.com/ref",
    "- [ ] task item",
    "1. ordered",
    "```",
    "#NoSpace",
    "naïve ünïcödé 文字",
];

fn random_document(rng: &mut StdRng) -> String {
    let count = rng.gen_range(0..40);
    let mut text = String::new();
    for _ in 0..count {
        text.push_str(LINES[rng.gen_range(0..LINES.len())]);
        text.push('\n');
    }
    if rng.gen_bool(0.5) {
        text.pop();
    }
    text
}

fn documents() -> impl Iterator<Item = String> {
    let mut rng = StdRng::seed_from_u64(0x6d64_6531);
    (0..300).map(move |_| random_document(&mut rng))
}

#[test]
fn test_headings_strictly_ordered() {
    for text in documents() {
        let headings: Vec<_> = all_headings(&text).collect();
        for pair in headings.windows(2) {
            assert!(pair[0].end < pair[1].start, "{pair:?} in {text:?}");
        }
        for heading in &headings {
            assert!((1..=6).contains(&heading.level));
            assert!(heading.start < heading.end);
        }
    }
}

#[test]
fn test_setext_level_ignores_underline_length() {
    for len in 1..20 {
        let equals = format!("Title\n{}\n", "=".repeat(len));
        let dashes = format!("Title\n{}\n", "-".repeat(len));
        assert_eq!(all_headings(&equals).map(|h| h.level).collect::<Vec<_>>(), [1]);
        assert_eq!(all_headings(&dashes).map(|h| h.level).collect::<Vec<_>>(), [2]);
    }
}

#[test]
fn test_section_independent_of_position_on_heading() {
    for text in documents() {
        let outline = Outline::new(&text);
        for (index, heading) in outline.headings().iter().enumerate() {
            let expected = outline.section(index, SectionBoundary::SameOrShallower);
            for position in heading.start..=heading.end {
                for direction in [Direction::Backward, Direction::Forward] {
                    assert_eq!(
                        outline.section_at(position, direction, SectionBoundary::SameOrShallower),
                        expected,
                        "position {position} in {text:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_sections_end_before_next_same_or_shallower_heading() {
    for text in documents() {
        let outline = Outline::new(&text);
        let headings = outline.headings();
        for (index, section) in outline.sections(SectionBoundary::SameOrShallower).enumerate() {
            assert_eq!(section.heading, headings[index]);
            for nested in &headings[index + 1..] {
                if nested.start >= section.region.end {
                    break;
                }
                assert!(nested.level > section.level, "{nested:?} inside {section:?}");
            }
        }
    }
}

#[test]
fn test_fold_all_sections_disjoint_and_sorted() {
    for text in documents() {
        for auto_fold_link in [false, true] {
            let mut state = FoldState::new();
            for level in 0..=6 {
                state.fold_all_sections(&text, level, auto_fold_link);
                for pair in state.folded_regions().windows(2) {
                    assert!(pair[0].end < pair[1].start, "{pair:?} level {level} in {text:?}");
                }
            }
        }
    }
}

#[test]
fn test_toggle_twice_restores_outline_folds() {
    let mut rng = StdRng::seed_from_u64(7);
    for text in documents() {
        let mut state = FoldState::new();
        state.fold_all_sections(&text, 0, true);
        let before = state.folded_regions().to_vec();

        let len = text.chars().count();
        for _ in 0..5 {
            let position = rng.gen_range(0..=len);
            state.toggle_section(&text, &[position], true);
            state.toggle_section(&text, &[position], true);
            assert_eq!(state.folded_regions(), before.as_slice(), "position {position} in {text:?}");
        }
    }
}

#[test]
fn test_toggle_twice_without_links_from_empty_state() {
    let mut rng = StdRng::seed_from_u64(11);
    for text in documents() {
        let mut state = FoldState::new();
        let len = text.chars().count();
        let position = rng.gen_range(0..=len);
        state.toggle_section(&text, &[position], false);
        state.toggle_section(&text, &[position], false);
        assert!(state.folded_regions().is_empty(), "position {position} in {text:?}");
    }
}

#[test]
fn test_link_regions_sorted_and_disjoint() {
    for text in documents() {
        let links = link_regions(&text);
        for pair in links.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert!(links.iter().all(|r| !r.is_empty()));
    }
}

#[test]
fn test_folds_stay_apart_after_random_edits() {
    let mut rng = StdRng::seed_from_u64(23);
    for text in documents() {
        let mut state = FoldState::new();
        state.fold_all_sections(&text, 0, true);

        let mut len = text.chars().count();
        for _ in 0..8 {
            if len > 0 && rng.gen_bool(0.6) {
                let start = rng.gen_range(0..len);
                let end = rng.gen_range(start..=len);
                state.update_for_deletion(Region::new(start, end));
                len -= end - start;
            } else {
                let inserted = rng.gen_range(1..5);
                state.update_for_insertion(rng.gen_range(0..=len), inserted);
                len += inserted;
            }

            for pair in state.folded_regions().windows(2) {
                assert!(pair[0].end < pair[1].start, "{pair:?} in {text:?}");
            }
            assert!(state.folded_regions().iter().all(|r| r.end <= len));
        }
    }
}
