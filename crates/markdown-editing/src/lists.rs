//! List and task-list editing.
//!
//! Every command here is a single pass over the lines touched by the selections. A line that does
//! not look like the expected kind of list item is skipped. The functions only compute
//! [`TextEdit`]s against the current text; [`crate::EditorCore::apply_edits`] applies them.

use crate::line_index::LineIndex;
use crate::region::Region;
use crate::text::char_offset;
use markdown_editing_settings::Settings;
use regex::{Captures, Regex};

/// Only this many leading chars of a line are inspected for a task check box.
const TASK_SCAN_LIMIT: usize = 50;

/// A pending replacement of `region` (in the pre-edit text) with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Replaced char range.
    pub region: Region,
    /// Replacement text.
    pub text: String,
}

impl TextEdit {
    /// Create an edit.
    pub fn new(region: Region, text: impl Into<String>) -> Self {
        Self {
            region,
            text: text.into(),
        }
    }
}

/// Indentation and bullet of a line, as seen by the (un)indent commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentMatch<'a> {
    /// Chars from line start to the start of the indentation (blockquote prefix).
    pub indent_start: usize,
    /// The indentation itself.
    pub indent: &'a str,
    /// The bullet glyph, if the line is a bullet item.
    pub bullet: Option<&'a str>,
}

impl IndentMatch<'_> {
    /// Chars replaced by a rewrite: the indentation plus the bullet glyph.
    pub fn replaced_len(&self) -> usize {
        self.indent.chars().count() + self.bullet.map_or(0, |b| b.chars().count())
    }
}

/// The list marker of a bullet or ordered list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker<'a> {
    /// `*`, `-`, `+` (or any configured bullet glyph).
    Bullet(&'a str),
    /// A number followed by a dot, e.g. `12.`.
    Ordered(&'a str),
}

/// Marker of a list item line and the whitespace that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch<'a> {
    /// Char offset of the marker within the line.
    pub marker_start: usize,
    /// The marker.
    pub marker: ListMarker<'a>,
    /// Whitespace between the marker and the item text.
    pub space: &'a str,
}

/// Number of an ordered list item with what surrounds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMatch<'a> {
    /// Everything before the number (indentation, blockquote markers).
    pub prefix: &'a str,
    /// Value of the number.
    pub number: u64,
    /// Whitespace following the dot.
    pub space: &'a str,
}

/// State of a task list check box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMatch {
    /// Char offset of the mark inside `[ ]` within the line.
    pub mark_offset: usize,
    /// Whether the box is checked (`x` or `X`).
    pub checked: bool,
}

/// Compiled list item patterns for one bullet set.
#[derive(Debug, Clone)]
pub struct ListItemMatcher {
    bullets: Vec<String>,
    indent: Regex,
    marker: Regex,
    ordered: Regex,
    task: Regex,
}

impl ListItemMatcher {
    /// Compile the patterns for the given bullet glyphs.
    pub fn new(bullets: &[String]) -> Result<Self, regex::Error> {
        let class: String = bullets.iter().map(|b| regex::escape(b)).collect();
        let bullet = if class.is_empty() {
            // Never matches: no bullets configured.
            r"\b\B".to_string()
        } else {
            format!("[{class}]")
        };

        Ok(Self {
            bullets: bullets.to_vec(),
            indent: Regex::new(&format!(
                r"^(?:[\s>]*>\s)?(?P<indent>\s*)(?:(?P<bullet>{bullet})\s)?"
            ))?,
            marker: Regex::new(&format!(
                r"^\s*(?:>\s*)*(?:(?P<bullet>{bullet})|(?P<number>[0-9]+\.))(?P<space>\s+)"
            ))?,
            ordered: Regex::new(r"^(?P<prefix>[^0-9\n]*?)(?P<number>[0-9]+)\.(?P<space>[ \t]*)")?,
            task: Regex::new(&format!(
                r"^(?P<head>\s*(?:>\s*)*(?:{bullet}|[0-9]+\.)\s+\[)(?P<check>[ xX])\]\s"
            ))?,
        })
    }

    /// Compile the patterns for the bullets configured in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, regex::Error> {
        Self::new(&settings.list_indent_bullets)
    }

    /// Configured bullet glyphs.
    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }

    /// Match a line's indentation and optional bullet. Any line matches.
    pub fn match_indent<'a>(&self, line: &'a str) -> Option<IndentMatch<'a>> {
        let caps = self.indent.captures(line)?;
        let indent = caps.name("indent")?;
        Some(IndentMatch {
            indent_start: char_offset(line, indent.start()),
            indent: indent.as_str(),
            bullet: caps.name("bullet").map(|m| m.as_str()),
        })
    }

    /// Match the marker of a bullet or ordered list item.
    pub fn match_marker<'a>(&self, line: &'a str) -> Option<MarkerMatch<'a>> {
        let caps = self.marker.captures(line)?;
        let (marker, start) = match (caps.name("bullet"), caps.name("number")) {
            (Some(m), _) => (ListMarker::Bullet(m.as_str()), m.start()),
            (None, Some(m)) => (ListMarker::Ordered(m.as_str()), m.start()),
            (None, None) => return None,
        };
        Some(MarkerMatch {
            marker_start: char_offset(line, start),
            marker,
            space: caps.name("space")?.as_str(),
        })
    }

    /// Match the first number of a line followed by a dot.
    pub fn match_ordered<'a>(&self, line: &'a str) -> Option<OrderedMatch<'a>> {
        let caps = self.ordered.captures(line)?;
        Some(OrderedMatch {
            prefix: caps.name("prefix")?.as_str(),
            number: caps.name("number")?.as_str().parse().ok()?,
            space: caps.name("space")?.as_str(),
        })
    }

    /// Match a task list item check box within the first chars of a line.
    pub fn match_task(&self, line: &str) -> Option<TaskMatch> {
        let head_end = line
            .char_indices()
            .nth(TASK_SCAN_LIMIT)
            .map_or(line.len(), |(idx, _)| idx);
        let caps: Captures<'_> = self.task.captures(&line[..head_end])?;
        let check = caps.name("check")?;
        Some(TaskMatch {
            mark_offset: char_offset(line, check.start()),
            checked: check.as_str() != " ",
        })
    }

    fn cycle_bullet(&self, bullet: &str, step: isize) -> Option<&str> {
        let len = self.bullets.len() as isize;
        let idx = self.bullets.iter().position(|b| b == bullet)? as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        self.bullets.get(next).map(String::as_str)
    }
}

/// Lines touched by any selection, each line once, in document order.
fn touched_lines(lines: &LineIndex, selections: &[Region]) -> Vec<Region> {
    let mut touched: Vec<Region> = selections
        .iter()
        .flat_map(|sel| lines.lines_in(*sel))
        .collect();
    touched.sort();
    touched.dedup();
    touched
}

/// Indent every line touched by the selections by one level.
///
/// The indent unit is inserted after any blockquote prefix and existing indentation. With
/// `list_indent_auto_switch_bullet` the bullet moves to the next configured glyph.
pub fn indent_list_items(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
    settings: &Settings,
) -> Vec<TextEdit> {
    let unit = settings.indent_unit();
    rewrite_indentation(lines, selections, matcher, |item| {
        let mut text = format!("{}{}", item.indent, unit);
        if let Some(bullet) = item.bullet {
            let bullet = if settings.list_indent_auto_switch_bullet {
                matcher.cycle_bullet(bullet, 1).unwrap_or(bullet)
            } else {
                bullet
            };
            text.push_str(bullet);
        }
        Some(text)
    })
}

/// Remove one indent level from every line touched by the selections.
///
/// Lines without indentation are left alone. With `list_indent_auto_switch_bullet` the bullet
/// moves to the previous configured glyph.
pub fn unindent_list_items(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
    settings: &Settings,
) -> Vec<TextEdit> {
    let unit = settings.indent_unit();
    rewrite_indentation(lines, selections, matcher, |item| {
        if item.indent.is_empty() {
            return None;
        }
        let mut text = item.indent.replacen(unit.as_str(), "", 1);
        if let Some(bullet) = item.bullet {
            let bullet = if settings.list_indent_auto_switch_bullet {
                matcher.cycle_bullet(bullet, -1).unwrap_or(bullet)
            } else {
                bullet
            };
            text.push_str(bullet);
        }
        Some(text)
    })
}

fn rewrite_indentation(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
    rewrite: impl Fn(&IndentMatch<'_>) -> Option<String>,
) -> Vec<TextEdit> {
    let mut edits = Vec::new();
    for line in touched_lines(lines, selections) {
        let text = lines.slice(line);
        let Some(item) = matcher.match_indent(&text) else {
            continue;
        };
        let Some(replacement) = rewrite(&item) else {
            tracing::trace!(line = %line, "nothing to unindent");
            continue;
        };

        let start = line.start + item.indent_start;
        edits.push(TextEdit::new(
            Region::new(start, start + item.replaced_len()),
            replacement,
        ));
    }
    edits
}

/// Convert bullet items to ordered items and ordered items to bullet items.
///
/// Each selection numbers its bullet items from 1. Lines touched by more than one selection are
/// converted by the first.
pub fn switch_list_bullet_type(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
    settings: &Settings,
) -> Vec<TextEdit> {
    let Some(first_bullet) = matcher.bullets().first() else {
        return Vec::new();
    };

    let mut seen: Vec<Region> = Vec::new();
    let mut edits = Vec::new();

    for selection in selections {
        let mut number = 1u64;
        for line in lines.lines_in(*selection) {
            if seen.contains(&line) {
                continue;
            }
            seen.push(line);

            let text = lines.slice(line);
            let Some(item) = matcher.match_marker(&text) else {
                tracing::trace!(line = %line, "not a list item");
                continue;
            };

            let start = line.start + item.marker_start;
            match item.marker {
                ListMarker::Bullet(_) => {
                    let marker = format!("{number}.");
                    if settings.auto_increment_ordered_list_number {
                        number += 1;
                    }
                    let replaced = marker.chars().count().min(item.space.chars().count().max(1));
                    edits.push(TextEdit::new(Region::new(start, start + replaced), marker));
                }
                ListMarker::Ordered(ordered) => {
                    let width = ordered.chars().count();
                    let (marker, replaced) = if settings.list_align_text {
                        (format!("{first_bullet}{}", " ".repeat(width)), width + 1)
                    } else {
                        (first_bullet.clone(), width)
                    };
                    edits.push(TextEdit::new(Region::new(start, start + replaced), marker));
                }
            }
        }
    }

    edits.sort_by_key(|e| e.region);
    edits
}

/// Replace each selection with a line break and the next ordered list marker.
///
/// The marker repeats the current line's prefix and the spacing after its dot. Selections on
/// lines without a number are skipped.
pub fn number_list(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
    settings: &Settings,
) -> Vec<TextEdit> {
    let increment = u64::from(settings.auto_increment_ordered_list_number);

    let mut edits: Vec<TextEdit> = selections
        .iter()
        .filter_map(|selection| {
            let line = *lines.lines_in(Region::new(selection.start, selection.start)).first()?;
            let text = lines.slice(line);
            let Some(item) = matcher.match_ordered(&text) else {
                tracing::trace!(line = %line, "no list number");
                return None;
            };
            let next = item.number.saturating_add(increment);
            Some(TextEdit::new(
                *selection,
                format!("\n{}{next}.{}", item.prefix, item.space),
            ))
        })
        .collect();

    edits.sort_by_key(|e| e.region);
    edits
}

/// Flip the check box of every task item touched by the selections.
pub fn toggle_task_list_items(
    lines: &LineIndex,
    selections: &[Region],
    matcher: &ListItemMatcher,
) -> Vec<TextEdit> {
    touched_lines(lines, selections)
        .into_iter()
        .filter_map(|line| {
            let task = matcher.match_task(&lines.slice(line))?;
            let mark = if task.checked { " " } else { "X" };
            let at = line.start + task.mark_offset;
            Some(TextEdit::new(Region::new(at, at + 1), mark))
        })
        .collect()
}
