#![forbid(unsafe_code)]
use bizsync_coverage::{
    analyze, AnalyzeOptions, CoverageAnalyzer, CoverageError, CoverageStatus, ShiftInterval,
    WorkWindow,
};
use chrono::NaiveTime;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn window(a: (u32, u32), b: (u32, u32)) -> WorkWindow {
    WorkWindow::new(t(a.0, a.1), t(b.0, b.1)).unwrap()
}

fn shift(a: (u32, u32), b: (u32, u32)) -> ShiftInterval {
    ShiftInterval::new(t(a.0, a.1), t(b.0, b.1)).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn empty_shifts_report_whole_window_as_gap() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[]);

    assert_eq!(r.status, CoverageStatus::Incomplete);
    assert_eq!(r.shift_count, 0);
    assert_eq!(r.gaps.len(), 1);
    assert_eq!(r.gaps[0].start, t(8, 0));
    assert_eq!(r.gaps[0].end, t(17, 0));
    assert_eq!(r.gaps[0].minutes, 540);
    assert!(r.overlaps.is_empty());
    assert_eq!(r.coverage_ratio, 0.0);
}

#[test]
fn single_shift_matching_window_is_complete() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((8, 0), (17, 0))]);

    assert_eq!(r.status, CoverageStatus::Complete);
    assert!(r.gaps.is_empty());
    assert!(r.overlaps.is_empty());
    assert_eq!(r.coverage_ratio, 1.0);
    assert_eq!(r.required_hours, 9.0);
    assert_eq!(r.covered_hours, 9.0);
}

#[test]
fn lunch_break_leaves_one_hour_gap() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((8, 0), (12, 0)), shift((13, 0), (17, 0))]);

    assert_eq!(r.gaps.len(), 1);
    assert_eq!(r.gaps[0].start, t(12, 0));
    assert_eq!(r.gaps[0].end, t(13, 0));
    assert_eq!(r.gaps[0].minutes, 60);
    assert!(r.overlaps.is_empty());
    assert_eq!(r.covered_hours, 8.0);
    assert!(approx(r.coverage_ratio, 0.889));
    assert_eq!(r.status, CoverageStatus::Partial);
}

#[test]
fn overlapping_shifts_are_double_counted_and_partial() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((8, 0), (13, 0)), shift((12, 0), (17, 0))]);

    assert!(r.gaps.is_empty());
    assert_eq!(r.overlaps.len(), 1);
    let o = r.overlaps[0];
    assert_eq!((o.start, o.end), (t(12, 0), t(13, 0)));
    assert_eq!(o.indices, (0, 1));
    assert_eq!(o.minutes(), 60);
    assert_eq!(r.covered_hours, 10.0);
    assert!(approx(r.raw_coverage_ratio(), 1.111));
    assert_eq!(r.coverage_ratio, 1.0);
    assert_eq!(r.status, CoverageStatus::Partial);
}

#[test]
fn overlap_is_independent_of_input_order() {
    let a = shift((9, 0), (14, 0));
    let b = shift((11, 30), (18, 0));
    let w = window((8, 0), (18, 0));

    let ab = analyze(w, &[a, b]);
    let ba = analyze(w, &[b, a]);

    assert_eq!(ab.overlaps.len(), 1);
    assert_eq!(ba.overlaps.len(), 1);
    assert_eq!(ab.overlaps[0].start, t(11, 30));
    assert_eq!(ab.overlaps[0].end, t(14, 0));
    assert_eq!(
        (ab.overlaps[0].start, ab.overlaps[0].end),
        (ba.overlaps[0].start, ba.overlaps[0].end)
    );
}

#[test]
fn overlap_never_complete_even_with_full_ratio() {
    let w = window((8, 0), (17, 0));
    let lenient = CoverageAnalyzer::new(AnalyzeOptions {
        gaps_block_complete: false,
        ..AnalyzeOptions::default()
    });
    let shifts = [
        shift((8, 0), (17, 0)),
        shift((8, 0), (17, 0)),
        shift((16, 0), (17, 0)),
    ];

    for r in [analyze(w, &shifts), lenient.analyze(w, &shifts)] {
        assert_eq!(r.overlaps.len(), 3);
        assert_ne!(r.status, CoverageStatus::Complete);
    }
}

#[test]
fn contained_disjoint_shifts_fill_window_with_gaps() {
    let w = window((7, 0), (19, 30));
    let shifts = [
        shift((7, 45), (9, 15)),
        shift((10, 0), (13, 0)),
        shift((14, 10), (18, 0)),
    ];
    let r = analyze(w, &shifts);

    let shift_minutes: i64 = shifts.iter().map(|s| s.duration_minutes()).sum();
    assert!(r.overlaps.is_empty());
    assert_eq!(r.gaps.len(), 4);
    assert_eq!(r.gap_minutes() + shift_minutes, w.duration_minutes());
}

#[test]
fn residual_gap_keeps_partial_by_default() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((8, 0), (16, 55))]);

    assert!(approx(r.covered_hours, 8.917));
    assert!(approx(r.coverage_ratio, 0.9907));
    assert_eq!(r.gaps.len(), 1);
    assert_eq!(r.gaps[0].minutes, 5);
    assert_eq!(r.status, CoverageStatus::Partial);
}

#[test]
fn residual_gap_within_tolerance_is_complete_when_lenient() {
    let analyzer = CoverageAnalyzer::new(AnalyzeOptions {
        gaps_block_complete: false,
        ..AnalyzeOptions::default()
    });
    let w = window((8, 0), (17, 0));
    let r = analyzer.analyze(w, &[shift((8, 0), (16, 55))]);

    assert_eq!(r.gaps.len(), 1);
    assert_eq!(r.status, CoverageStatus::Complete);
}

#[test]
fn lenient_ratio_bands() {
    let analyzer = CoverageAnalyzer::new(AnalyzeOptions {
        gaps_block_complete: false,
        ..AnalyzeOptions::default()
    });
    let w = window((8, 0), (18, 0));

    let r = analyzer.analyze(w, &[shift((8, 0), (14, 0))]);
    assert_eq!(r.status, CoverageStatus::Partial);

    let r = analyzer.analyze(w, &[shift((8, 0), (12, 0))]);
    assert_eq!(r.status, CoverageStatus::Incomplete);

    // défaut : le trou suffit pour PARTIAL
    let r = analyze(w, &[shift((8, 0), (12, 0))]);
    assert_eq!(r.status, CoverageStatus::Partial);
}

#[test]
fn nested_shift_does_not_create_spurious_gap() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((8, 0), (17, 0)), shift((10, 0), (11, 0))]);

    assert!(r.gaps.is_empty());
    assert_eq!(r.overlaps.len(), 1);
    assert_eq!((r.overlaps[0].start, r.overlaps[0].end), (t(10, 0), t(11, 0)));
    assert_eq!(r.status, CoverageStatus::Partial);
}

#[test]
fn nested_shift_followed_by_gap() {
    let w = window((8, 0), (18, 0));
    let r = analyze(
        w,
        &[
            shift((8, 0), (15, 0)),
            shift((9, 0), (10, 0)),
            shift((16, 0), (18, 0)),
        ],
    );

    assert_eq!(r.gaps.len(), 1);
    assert_eq!((r.gaps[0].start, r.gaps[0].end), (t(15, 0), t(16, 0)));
}

#[test]
fn touching_shifts_cover_without_overlap() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((12, 0), (17, 0)), shift((8, 0), (12, 0))]);

    assert!(r.gaps.is_empty());
    assert!(r.overlaps.is_empty());
    assert_eq!(r.status, CoverageStatus::Complete);
}

#[test]
fn unordered_input_is_sorted_for_gaps() {
    let w = window((8, 0), (17, 0));
    let r = analyze(w, &[shift((13, 0), (16, 0)), shift((9, 0), (12, 0))]);

    let spans: Vec<_> = r.gaps.iter().map(|g| (g.start, g.end)).collect();
    assert_eq!(
        spans,
        vec![
            (t(8, 0), t(9, 0)),
            (t(12, 0), t(13, 0)),
            (t(16, 0), t(17, 0)),
        ]
    );
}

#[test]
fn shifts_outside_window_are_clipped_for_gaps() {
    let w = window((8, 0), (17, 0));
    let r = analyze(
        w,
        &[
            shift((6, 0), (9, 0)),
            shift((16, 0), (19, 0)),
            shift((20, 0), (21, 0)),
        ],
    );

    assert_eq!(r.gaps.len(), 1);
    assert_eq!((r.gaps[0].start, r.gaps[0].end), (t(9, 0), t(16, 0)));
    assert!(r.gaps.iter().all(|g| g.minutes > 0));
}

#[test]
fn analyzer_is_shareable_across_threads() {
    let analyzer = CoverageAnalyzer::default();
    let w = window((8, 0), (17, 0));
    let shifts = vec![shift((8, 0), (12, 0)), shift((13, 0), (17, 0))];
    let expected = analyzer.analyze(w, &shifts);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shifts = shifts.clone();
            std::thread::spawn(move || analyzer.analyze(w, &shifts))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

#[test]
fn options_reject_inverted_or_nan_thresholds() {
    assert!(matches!(
        AnalyzeOptions::new(0.3, 0.6, false),
        Err(CoverageError::InvalidThresholds { .. })
    ));
    assert!(AnalyzeOptions::new(f64::NAN, 0.5, true).is_err());
    assert!(AnalyzeOptions::new(0.95, f64::NAN, true).is_err());
    assert!(AnalyzeOptions::new(1.2, 0.5, true).is_err());
    assert!(AnalyzeOptions::new(0.95, -0.1, true).is_err());
    assert!(AnalyzeOptions::new(f64::INFINITY, 0.5, true).is_err());

    assert_eq!(
        AnalyzeOptions::new(0.95, 0.5, true).unwrap(),
        AnalyzeOptions::default()
    );
    // bornes égales acceptées
    let opts = AnalyzeOptions::new(0.8, 0.8, false).unwrap();
    let w = window((8, 0), (18, 0));
    let r = CoverageAnalyzer::new(opts).analyze(w, &[shift((8, 0), (12, 0))]);
    assert_eq!(r.status, CoverageStatus::Incomplete);
}
