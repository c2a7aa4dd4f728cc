use super::{util, Overlap};
use crate::model::ShiftInterval;

/// Toutes les paires `i < j` dans l'ordre d'entrée (O(n²), n < 20 en pratique).
pub(super) fn detect_overlaps(shifts: &[ShiftInterval]) -> Vec<Overlap> {
    let mut out = Vec::new();

    for (i, a) in shifts.iter().enumerate() {
        for (j, b) in shifts.iter().enumerate().skip(i + 1) {
            if util::overlaps(a.start(), a.end(), b.start(), b.end()) {
                out.push(Overlap {
                    first: *a,
                    second: *b,
                    indices: (i, j),
                    start: a.start().max(b.start()),
                    end: a.end().min(b.end()),
                });
            }
        }
    }

    out
}
