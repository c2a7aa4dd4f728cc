use super::Gap;
use crate::model::{ShiftInterval, WorkWindow};
use chrono::NaiveTime;

/// Union des créneaux : tri par début, fusion si `next.start <= current.end`.
pub(super) fn merge_union(shifts: &[ShiftInterval]) -> Vec<(NaiveTime, NaiveTime)> {
    let mut sorted: Vec<(NaiveTime, NaiveTime)> =
        shifts.iter().map(|s| (s.start(), s.end())).collect();
    sorted.sort_by_key(|&(start, _)| start);

    let mut merged: Vec<(NaiveTime, NaiveTime)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

pub(super) fn detect_gaps(window: WorkWindow, shifts: &[ShiftInterval]) -> Vec<Gap> {
    if shifts.is_empty() {
        return vec![Gap::new(window.start(), window.end())];
    }

    let mut out = Vec::new();
    let mut cursor = window.start();

    for (start, end) in merge_union(shifts) {
        if cursor >= window.end() {
            break;
        }
        if start > cursor {
            out.push(Gap::new(cursor, start.min(window.end())));
        }
        cursor = cursor.max(end);
    }

    if cursor < window.end() {
        out.push(Gap::new(cursor, window.end()));
    }

    out
}
