//! Auxiliary link regions.
//!
//! Link destinations are the auxiliary regions folded by the auto-fold-link policy: the url of
//! inline links and images (`[text](url "title")`) and of link reference definitions
//! (`[label]: url`). Angle-bracketed destinations fold the text between the brackets.

use crate::headings::FenceTracker;
use crate::region::Region;
use crate::text::{char_offset, line_spans};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\[(?:[^\[\]\\]|\\.)*\]\([ \t]*(?:<(?P<angle>[^<>\n]*)>|(?P<bare>[^\s()<>]+))",
        r#"(?:[ \t]+(?:"[^"\n]*"|'[^'\n]*'|\([^()\n]*\)))?[ \t]*\)"#,
    ))
    .expect("valid inline link pattern")
});

static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[ \t]*>)*[ \t]{0,3}\[(?:[^\[\]\\]|\\.)+\]:[ \t]*(?:<(?P<angle>[^<>\n]*)>|(?P<bare>\S+))",
    )
    .expect("valid reference definition pattern")
});

/// Return the destination regions of all links in `text`, in document order.
pub fn link_regions(text: &str) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut fence = FenceTracker::default();

    for line in line_spans(text) {
        if fence.observe(line.text) || fence.in_fence() {
            continue;
        }

        let to_region = |caps: Captures<'_>| {
            let url = caps.name("angle").or_else(|| caps.name("bare"))?;
            let region = Region::new(
                line.start + char_offset(line.text, url.start()),
                line.start + char_offset(line.text, url.end()),
            );
            (!region.is_empty()).then_some(region)
        };

        if let Some(region) = REFERENCE_DEFINITION.captures(line.text).and_then(to_region) {
            regions.push(region);
            continue;
        }

        regions.extend(INLINE_LINK.captures_iter(line.text).filter_map(to_region));
    }

    regions
}

/// Link regions lying entirely within `scope`.
pub fn link_regions_in(text: &str, scope: Region) -> Vec<Region> {
    link_regions(text)
        .into_iter()
        .filter(|region| scope.contains_region(region))
        .collect()
}
