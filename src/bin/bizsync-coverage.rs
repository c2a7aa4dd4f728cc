#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use bizsync_coverage::{
    io,
    model::{AssignedShift, Plan, ShiftInterval, WorkWindow},
    storage::{JsonStorage, Storage},
    summary::{ItalianSummary, SummaryRenderer},
    AnalysisResult, AnalyzeOptions, CoverageAnalyzer, CoverageError, CoverageStatus,
    PublicationStatus,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI d'analyse de couverture des plannings (trous, chevauchements)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du planning
    #[arg(long, global = true, default_value = "plan.json")]
    plan: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct Thresholds {
    #[arg(long, default_value_t = 0.95)]
    complete_threshold: f64,
    #[arg(long, default_value_t = 0.5)]
    partial_threshold: f64,
    /// Les trous n'empêchent pas COMPLETE (seul le ratio décide)
    #[arg(long)]
    lenient_gaps: bool,
}

impl TryFrom<Thresholds> for AnalyzeOptions {
    type Error = CoverageError;

    fn try_from(t: Thresholds) -> Result<Self, Self::Error> {
        AnalyzeOptions::new(t.complete_threshold, t.partial_threshold, !t.lenient_gaps)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyser une fenêtre et des créneaux donnés en ligne de commande
    Analyze {
        /// HH:MM-HH:MM
        #[arg(long)]
        window: String,
        /// HH:MM-HH:MM (répétable)
        #[arg(long = "shift")]
        shifts: Vec<String>,
        /// Sortie JSON au lieu du résumé texte
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Définir les horaires d'un service pour un jour (1 = lundi … 7 = dimanche)
    SetHours {
        #[arg(long)]
        department: String,
        #[arg(long)]
        day: u8,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
    },

    /// Fermer un service un jour de la semaine
    CloseDay {
        #[arg(long)]
        department: String,
        #[arg(long)]
        day: u8,
    },

    /// Importer des horaires depuis un CSV
    ImportHours {
        #[arg(long)]
        csv: String,
    },

    /// Importer des shifts depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un shift
    AddShift {
        #[arg(long)]
        department: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        employee: Option<String>,
    },

    /// Lister services et shifts
    List,

    /// Vérifier la couverture d'un service pour une date
    Check {
        #[arg(long)]
        department: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[command(flatten)]
        thresholds: Thresholds,
        /// Export CSV des trous/chevauchements (optionnel)
        #[arg(long)]
        report: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Vérifier la couverture d'une semaine
    Week {
        #[arg(long)]
        department: String,
        /// N'importe quel jour de la semaine (YYYY-MM-DD)
        #[arg(long)]
        week_start: String,
        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Faire avancer l'état de publication d'une semaine
    Publish {
        #[arg(long)]
        department: String,
        #[arg(long)]
        week_start: String,
        /// draft | published
        #[arg(long)]
        status: String,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn print_details(result: &AnalysisResult) {
    for gap in &result.gaps {
        println!(
            "  buco {} → {} ({} min)",
            gap.start.format("%H:%M"),
            gap.end.format("%H:%M"),
            gap.minutes
        );
    }
    for overlap in &result.overlaps {
        println!(
            "  sovrapposizione {} → {} (turni #{} e #{})",
            overlap.start.format("%H:%M"),
            overlap.end.format("%H:%M"),
            overlap.indices.0 + 1,
            overlap.indices.1 + 1
        );
    }
}

// Code 2 = WARNING/INCOMPLETE
fn exit_code(result: &AnalysisResult) -> i32 {
    if result.is_complete() {
        0
    } else {
        2
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let renderer = ItalianSummary;

    let storage = JsonStorage::open(&cli.plan)?;
    // `analyze` travaille sans fichier de planning.
    let mut plan = match cli.cmd {
        Commands::Analyze { .. } => Plan::default(),
        _ => storage.load_or_default()?,
    };

    let code = match cli.cmd {
        Commands::Analyze {
            window,
            shifts,
            json,
            thresholds,
        } => {
            let window = io::parse_window(&window)?;
            let shifts = shifts
                .iter()
                .map(|raw| io::parse_shift(raw))
                .collect::<Result<Vec<ShiftInterval>, CoverageError>>()?;
            let result = CoverageAnalyzer::new(thresholds.try_into()?).analyze(window, &shifts);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let label = format!(
                    "{}-{}",
                    window.start().format("%H:%M"),
                    window.end().format("%H:%M")
                );
                println!("{}", renderer.render(&label, &result));
                print_details(&result);
            }
            exit_code(&result)
        }
        Commands::SetHours {
            department,
            day,
            start,
            end,
        } => {
            let window = WorkWindow::new(io::parse_hhmm(&start)?, io::parse_hhmm(&end)?)?;
            plan.department_entry(&department).set_hours(day, window)?;
            storage.save(&plan)?;
            0
        }
        Commands::CloseDay { department, day } => {
            plan.find_department_mut(&department)
                .ok_or_else(|| CoverageError::UnknownDepartment(department.clone()))?
                .close_day(day)?;
            storage.save(&plan)?;
            0
        }
        Commands::ImportHours { csv } => {
            for (department, day, window) in io::import_hours_csv(csv)? {
                plan.department_entry(&department).set_hours(day, window)?;
            }
            storage.save(&plan)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            plan.shifts.extend(shifts);
            storage.save(&plan)?;
            0
        }
        Commands::AddShift {
            department,
            date,
            start,
            end,
            employee,
        } => {
            let interval = ShiftInterval::new(io::parse_hhmm(&start)?, io::parse_hhmm(&end)?)?;
            let mut shift = AssignedShift::new(department, parse_date(&date)?, interval);
            if let Some(employee) = employee {
                shift = shift.with_employee(employee);
            }
            println!("{}", shift.id.as_str());
            plan.shifts.push(shift);
            storage.save(&plan)?;
            0
        }
        Commands::List => {
            for d in &plan.departments {
                let days: Vec<String> = d
                    .hours
                    .iter()
                    .map(|(day, w)| {
                        format!("{day}:{}-{}", w.start().format("%H:%M"), w.end().format("%H:%M"))
                    })
                    .collect();
                println!("{} | {}", d.name, days.join(" "));
            }
            let mut shifts: Vec<&AssignedShift> = plan.shifts.iter().collect();
            shifts.sort_by_key(|s| (s.date, s.interval.start()));
            // impression compacte
            for s in shifts {
                println!(
                    "{} | {} | {} {} → {} | {}",
                    s.id.as_str(),
                    s.department,
                    s.date,
                    s.interval.start().format("%H:%M"),
                    s.interval.end().format("%H:%M"),
                    s.employee.as_deref().unwrap_or("-")
                );
            }
            0
        }
        Commands::Check {
            department,
            date,
            thresholds,
            report,
            out_json,
        } => {
            let date = parse_date(&date)?;
            let result =
                CoverageAnalyzer::new(thresholds.try_into()?).analyze_day(&plan, &department, date)?;
            println!("{}", renderer.render(&format!("{department} {date}"), &result));
            print_details(&result);
            if let Some(path) = report {
                io::export_report_csv(path, &result)?;
            }
            if let Some(path) = out_json {
                io::export_result_json(path, &result)?;
            }
            exit_code(&result)
        }
        Commands::Week {
            department,
            week_start,
            thresholds,
        } => {
            let week = CoverageAnalyzer::new(thresholds.try_into()?).analyze_week(
                &plan,
                &department,
                parse_date(&week_start)?,
            )?;
            for day in &week.days {
                match &day.result {
                    Some(result) => {
                        println!("{}", renderer.render(&day.date.to_string(), result))
                    }
                    None => println!("{}: chiuso", day.date),
                }
            }
            let publication = plan
                .find_department(&department)
                .map(|d| d.publication(week.week_start))
                .unwrap_or_default();
            println!("pubblicazione: {publication}");
            match week.status() {
                Some(status) if status != CoverageStatus::Complete => 2,
                _ => 0,
            }
        }
        Commands::Publish {
            department,
            week_start,
            status,
        } => {
            let to: PublicationStatus = status.parse()?;
            let week_start = parse_date(&week_start)?;
            let dept = plan
                .find_department_mut(&department)
                .ok_or_else(|| CoverageError::UnknownDepartment(department.clone()))?;
            let next = dept.publish(week_start, to)?;
            storage.save(&plan)?;
            println!("{department}: {next}");
            0
        }
    };

    std::process::exit(code);
}
