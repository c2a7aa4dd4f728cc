#![forbid(unsafe_code)]
use bizsync_coverage::{analyze, ItalianSummary, ShiftInterval, SummaryRenderer, WorkWindow};
use chrono::NaiveTime;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn summary_for_lunch_gap() {
    let w = WorkWindow::new(t(8, 0), t(17, 0)).unwrap();
    let result = analyze(
        w,
        &[
            ShiftInterval::new(t(8, 0), t(12, 0)).unwrap(),
            ShiftInterval::new(t(13, 0), t(17, 0)).unwrap(),
        ],
    );
    let text = ItalianSummary.render("Cucina 2025-10-06", &result);
    insta::assert_snapshot!(text, @"Cucina 2025-10-06: parziale, copertura 89% (8.0/9.0 h), 1 buco orario, 0 sovrapposizioni");
}

#[test]
fn summary_for_overlap_uses_clamped_ratio() {
    let w = WorkWindow::new(t(8, 0), t(17, 0)).unwrap();
    let result = analyze(
        w,
        &[
            ShiftInterval::new(t(8, 0), t(13, 0)).unwrap(),
            ShiftInterval::new(t(12, 0), t(17, 0)).unwrap(),
        ],
    );
    assert_eq!(
        ItalianSummary.render("Cucina", &result),
        "Cucina: parziale, copertura 100% (10.0/9.0 h), 0 buchi orari, 1 sovrapposizione"
    );
}

#[test]
fn plural_labels() {
    assert_eq!(ItalianSummary::gaps_label(0), "0 buchi orari");
    assert_eq!(ItalianSummary::gaps_label(3), "3 buchi orari");
    assert_eq!(ItalianSummary::overlaps_label(2), "2 sovrapposizioni");
}
