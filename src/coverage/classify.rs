use super::{AnalyzeOptions, CoverageStatus, Gap, Overlap};

/// Première règle satisfaite : conflits et trous avant le ratio.
pub(super) fn classify(
    shift_count: usize,
    gaps: &[Gap],
    overlaps: &[Overlap],
    ratio: f64,
    opts: AnalyzeOptions,
) -> CoverageStatus {
    if shift_count == 0 {
        return CoverageStatus::Incomplete;
    }
    if !overlaps.is_empty() {
        return CoverageStatus::Partial;
    }
    if opts.gaps_block_complete && !gaps.is_empty() {
        return CoverageStatus::Partial;
    }
    if ratio >= opts.complete_threshold {
        CoverageStatus::Complete
    } else if ratio >= opts.partial_threshold {
        CoverageStatus::Partial
    } else {
        CoverageStatus::Incomplete
    }
}
