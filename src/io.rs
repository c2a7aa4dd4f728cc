use crate::coverage::{AnalysisResult, CoverageError};
use crate::model::{check_weekday, AssignedShift, ShiftInterval, WorkWindow};
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Heure murale `HH:MM` (ou `HH:MM:SS`).
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, CoverageError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| CoverageError::InvalidTime(raw.to_string()))
}

/// Plage `HH:MM-HH:MM`.
pub fn parse_span(raw: &str) -> Result<(NaiveTime, NaiveTime), CoverageError> {
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| CoverageError::InvalidTime(raw.to_string()))?;
    Ok((parse_hhmm(start)?, parse_hhmm(end)?))
}

pub fn parse_window(raw: &str) -> Result<WorkWindow, CoverageError> {
    let (start, end) = parse_span(raw)?;
    WorkWindow::new(start, end)
}

pub fn parse_shift(raw: &str) -> Result<ShiftInterval, CoverageError> {
    let (start, end) = parse_span(raw)?;
    ShiftInterval::new(start, end)
}

/// Import de shifts: header `department,date,start,end[,employee]`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<AssignedShift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let department = rec.get(0).context("missing department")?.trim();
        if department.is_empty() {
            bail!("invalid shift row {} (empty department)", line + 1);
        }
        let date = rec.get(1).context("missing date")?.trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {date}"))?;
        let start = parse_hhmm(rec.get(2).context("missing start")?)?;
        let end = parse_hhmm(rec.get(3).context("missing end")?)?;
        let interval = ShiftInterval::new(start, end)
            .with_context(|| format!("invalid shift row {}", line + 1))?;
        let mut shift = AssignedShift::new(department, date, interval);
        if let Some(employee) = rec.get(4).map(str::trim).filter(|e| !e.is_empty()) {
            shift = shift.with_employee(employee);
        }
        out.push(shift);
    }
    Ok(out)
}

/// Import d'horaires: header `department,day,start,end` (jour ISO 1..=7)
pub fn import_hours_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<(String, u8, WorkWindow)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let department = rec.get(0).context("missing department")?.trim();
        if department.is_empty() {
            bail!("invalid hours row (empty department)");
        }
        let day = rec.get(1).context("missing day")?.trim();
        let day: u8 = day
            .parse()
            .with_context(|| format!("invalid day for {department}: {day}"))?;
        let day = check_weekday(day)?;
        let start = parse_hhmm(rec.get(2).context("missing start")?)?;
        let end = parse_hhmm(rec.get(3).context("missing end")?)?;
        let window = WorkWindow::new(start, end)
            .with_context(|| format!("invalid hours for {department} day {day}"))?;
        out.push((department.to_string(), day, window));
    }
    Ok(out)
}

/// Export CSV des trous et chevauchements: header `kind,start,end,minutes`
pub fn export_report_csv<P: AsRef<Path>>(path: P, result: &AnalysisResult) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["kind", "start", "end", "minutes"])?;
    let mut buf = itoa::Buffer::new();
    let rows = result
        .gaps
        .iter()
        .map(|g| ("gap", g.start, g.end, g.minutes))
        .chain(
            result
                .overlaps
                .iter()
                .map(|o| ("overlap", o.start, o.end, o.minutes())),
        );
    for (kind, start, end, minutes) in rows {
        let start = start.format("%H:%M").to_string();
        let end = end.format("%H:%M").to_string();
        w.write_record([kind, start.as_str(), end.as_str(), buf.format(minutes)])?;
    }
    w.flush()?;
    Ok(())
}

/// Export JSON du résultat (jolie mise en forme)
pub fn export_result_json<P: AsRef<Path>>(path: P, result: &AnalysisResult) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(result)?;
    fs::write(path, s)?;
    Ok(())
}
