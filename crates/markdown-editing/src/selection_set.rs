use crate::commands::{Position, Selection, SelectionDirection};

pub fn selection_direction(start: Position, end: Position) -> SelectionDirection {
    if start <= end {
        SelectionDirection::Forward
    } else {
        SelectionDirection::Backward
    }
}

pub fn selection_min_max(selection: &Selection) -> (Position, Position) {
    if selection.start <= selection.end {
        (selection.start, selection.end)
    } else {
        (selection.end, selection.start)
    }
}

fn selection_contains_position_inclusive(selection: &Selection, pos: Position) -> bool {
    let (min_pos, max_pos) = selection_min_max(selection);
    min_pos <= pos && pos <= max_pos
}

/// Sort selections and merge overlapping ones, tracking where the primary selection ends up.
pub fn normalize_selections(
    mut selections: Vec<Selection>,
    primary_index: usize,
) -> (Vec<Selection>, usize) {
    let Some(primary_active) = selections
        .get(primary_index)
        .or_else(|| selections.first())
        .map(|s| s.end)
    else {
        return (selections, 0);
    };

    for sel in &mut selections {
        sel.direction = selection_direction(sel.start, sel.end);
    }

    selections.sort_by(|a, b| {
        let (a_min, a_max) = selection_min_max(a);
        let (b_min, b_max) = selection_min_max(b);
        a_min.cmp(&b_min).then_with(|| a_max.cmp(&b_max))
    });

    // Carets touching a range stay separate; only real overlaps merge.
    let mut merged: Vec<Selection> = Vec::with_capacity(selections.len());
    for sel in selections {
        let (sel_min, sel_max) = selection_min_max(&sel);
        let Some(last) = merged.last_mut() else {
            merged.push(sel);
            continue;
        };
        let (last_min, last_max) = selection_min_max(last);

        if sel_min == last_min && sel_max == last_max {
            continue;
        } else if sel_min < last_max {
            *last = Selection {
                start: last_min.min(sel_min),
                end: last_max.max(sel_max),
                direction: SelectionDirection::Forward,
            };
        } else {
            merged.push(sel);
        }
    }

    let new_primary_index = merged
        .iter()
        .position(|s| selection_contains_position_inclusive(s, primary_active))
        .unwrap_or_else(|| merged.len().saturating_sub(1));

    (merged, new_primary_index)
}
