use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Confirm, Input};
use dotenvy::dotenv;
use roster::modules::students::model::{Student, StudentFilter, StudentStatus};
use roster::modules::transfer::model::{ALL_STUDENTS_FILE, AT_RISK_FILE, TOP_PERFORMERS_FILE};
use roster::state::{AppState, init_app_state};
use roster_cli::seeder::{self, SeedConfig};
use roster_config::{AppConfig, ReportConfig};
use roster_core::RosterError;
use roster_observability::{init_logging, init_metrics};
use serde::Serialize;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - manage student records, reports and CSV transfers", long_about = None)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Print the session's event counters to stderr when done
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new student (missing fields are prompted for)
    Add {
        #[arg(long)]
        id: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'p', long)]
        programme: Option<String>,

        /// One of 100, 200, ..., 700
        #[arg(short = 'l', long)]
        level: Option<i32>,

        #[arg(short = 'g', long)]
        gpa: Option<f64>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Digits only, 10 to 15 long
        #[arg(long)]
        phone: Option<String>,

        /// Active or Inactive
        #[arg(long, default_value = "Active")]
        status: StudentStatus,
    },
    /// Change fields of an existing student; the ID never changes
    Update {
        id: String,

        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'p', long)]
        programme: Option<String>,

        #[arg(short = 'l', long)]
        level: Option<i32>,

        #[arg(short = 'g', long)]
        gpa: Option<f64>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        status: Option<StudentStatus>,
    },
    /// Delete a student
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show one student
    Show { id: String },
    /// List every student, ordered by name
    List,
    /// Search by ID or name (case-insensitive substring)
    Search { query: String },
    /// Filter by programme, level and status
    Filter {
        #[arg(short = 'p', long)]
        programme: Option<String>,

        #[arg(short = 'l', long)]
        level: Option<i32>,

        #[arg(short = 's', long)]
        status: Option<StudentStatus>,
    },
    /// List distinct programmes
    Programmes,
    /// Total, active and inactive counts and average GPA
    Stats,
    /// Active students with the highest GPA
    Top {
        #[arg(short = 'c', long, default_value = "10")]
        count: usize,

        #[arg(short = 'p', long)]
        programme: Option<String>,

        #[arg(short = 'l', long)]
        level: Option<i32>,
    },
    /// Students below the at-risk GPA threshold
    AtRisk {
        /// Overrides AT_RISK_THRESHOLD (0.0 to 4.0)
        #[arg(short = 't', long)]
        threshold: Option<f64>,
    },
    /// Student counts per GPA band
    Distribution,
    /// Count and average GPA per programme
    Summary,
    /// Import students from a CSV file
    Import {
        file: PathBuf,

        /// Write skipped-row diagnostics to the data directory
        #[arg(long)]
        save_report: bool,
    },
    /// Export students to a CSV file in the data directory
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        /// Number of records for `top`
        #[arg(short = 'c', long, default_value = "10")]
        count: usize,

        /// Threshold for `at-risk`
        #[arg(short = 't', long)]
        threshold: Option<f64>,
    },
    /// Add fake students for testing
    Seed {
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    All,
    Top,
    AtRisk,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("❌ Could not open log file: {e}");
            std::process::exit(1);
        }
    };

    let metrics = init_metrics();

    let state = match init_app_state(config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Start-up failed");
            eprintln!("❌ {e:#}");
            std::process::exit(1);
        }
    };

    let result = run(&state, cli.command, cli.json).await;

    if let Some(handle) = &metrics {
        let rendered = handle.render();
        debug!(counters = %rendered, "Session metrics");
        if cli.metrics {
            eprintln!("{rendered}");
        }
    }

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<RosterError>() {
        Some(RosterError::Validation(outcome)) => {
            eprintln!("❌ Please fix the following:");
            for message in outcome.errors() {
                eprintln!("   • {message}");
            }
        }
        Some(err) if err.is_fault() => {
            error!(error = %err, "Operation failed");
            eprintln!("❌ {err}");
        }
        _ => eprintln!("❌ {e:#}"),
    }
}

async fn run(state: &AppState, command: Commands, json: bool) -> anyhow::Result<()> {
    let students = &state.students;

    match command {
        Commands::Add {
            id,
            name,
            programme,
            level,
            gpa,
            email,
            phone,
            status,
        } => {
            let student = Student::new(
                prompt_or(id, "Student ID")?,
                prompt_or(name, "Full name")?,
                prompt_or(programme, "Programme")?,
                prompt_or(level, "Level")?,
                prompt_or(gpa, "GPA")?,
                prompt_or(email, "Email")?,
                prompt_or(phone, "Phone number")?,
            )
            .with_status(status);

            students.add_record(&student).await?;
            println!("✅ Student '{}' added.", student.student_id);
        }
        Commands::Update {
            id,
            name,
            programme,
            level,
            gpa,
            email,
            phone,
            status,
        } => {
            let mut student = students
                .get_by_id(&id)
                .await?
                .ok_or_else(|| RosterError::not_found(&id))?;

            if let Some(name) = name {
                student.full_name = name;
            }
            if let Some(programme) = programme {
                student.programme = programme;
            }
            if let Some(level) = level {
                student.level = level;
            }
            if let Some(gpa) = gpa {
                student.gpa = gpa;
            }
            if let Some(email) = email {
                student.email = email;
            }
            if let Some(phone) = phone {
                student.phone_number = phone;
            }
            if let Some(status) = status {
                student.status = status;
            }

            students.update_record(&student).await?;
            println!("✅ Student '{id}' updated.");
        }
        Commands::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Delete student '{id}'?"))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }

            students.delete_record(&id).await?;
            println!("✅ Student '{id}' deleted.");
        }
        Commands::Show { id } => {
            let student = students
                .get_by_id(&id)
                .await?
                .ok_or_else(|| RosterError::not_found(&id))?;
            print_students(std::slice::from_ref(&student), json)?;
        }
        Commands::List => print_students(&students.get_all().await?, json)?,
        Commands::Search { query } => print_students(&students.search(&query).await?, json)?,
        Commands::Filter {
            programme,
            level,
            status,
        } => {
            let filter = StudentFilter {
                programme,
                level,
                status,
            };
            print_students(&students.filter(&filter).await?, json)?;
        }
        Commands::Programmes => {
            let programmes = students.list_programmes().await?;
            if json {
                print_json(&programmes)?;
            } else {
                for programme in programmes {
                    println!("{programme}");
                }
            }
        }
        Commands::Stats => {
            let stats = students.dashboard_stats().await?;
            if json {
                print_json(&stats)?;
            } else {
                println!("Total students:   {}", stats.total);
                println!("Active:           {}", stats.active);
                println!("Inactive:         {}", stats.inactive);
                println!("Average GPA:      {:.2}", stats.average_gpa);
            }
        }
        Commands::Top {
            count,
            programme,
            level,
        } => {
            let top = students
                .top_performers(count, programme.as_deref(), level)
                .await?;
            print_students(&top, json)?;
        }
        Commands::AtRisk { threshold } => {
            let threshold = resolve_threshold(state, threshold)?;
            print_students(&students.at_risk(threshold).await?, json)?;
        }
        Commands::Distribution => {
            let distribution = students.gpa_distribution().await?;
            if json {
                print_json(&distribution)?;
            } else {
                for band in distribution.bands() {
                    println!("{:<10} {}", band.label, band.count);
                }
            }
        }
        Commands::Summary => {
            let summary = students.programme_summary().await?;
            if json {
                print_json(&summary)?;
            } else {
                println!("{:<30} {:>6} {:>8}", "Programme", "Total", "Avg GPA");
                for row in &summary {
                    println!(
                        "{:<30} {:>6} {:>8}",
                        row.programme,
                        row.total,
                        row.formatted_average_gpa()
                    );
                }
            }
        }
        Commands::Import { file, save_report } => import(state, file, save_report, json).await?,
        Commands::Export {
            target,
            count,
            threshold,
        } => {
            let (records, file_name) = match target {
                ExportTarget::All => (students.get_all().await?, ALL_STUDENTS_FILE),
                ExportTarget::Top => (
                    students.top_performers(count, None, None).await?,
                    TOP_PERFORMERS_FILE,
                ),
                ExportTarget::AtRisk => {
                    let threshold = resolve_threshold(state, threshold)?;
                    (students.at_risk(threshold).await?, AT_RISK_FILE)
                }
            };

            let path = state.transfer.export_to_file(&records, file_name)?;
            println!("✅ Exported {} records to {}", records.len(), path.display());
        }
        Commands::Seed { count } => {
            let summary = seeder::seed_students(students, SeedConfig::new(count)).await?;
            if !summary.is_complete() {
                println!("⚠️ {} generated records were skipped:", summary.failures.len());
                for message in summary.failure_messages() {
                    println!("   {message}");
                }
            }
        }
    }

    Ok(())
}

/// Scans the file on a blocking thread, then commits the accepted records.
async fn import(state: &AppState, file: PathBuf, save_report: bool, json: bool) -> anyhow::Result<()> {
    let mut known_ids = state.students.existing_ids().await?;
    let transfer = state.transfer.clone();
    let source = file.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        transfer.import_from_file(&source, &mut known_ids)
    })
    .await
    .context("Import worker panicked")?
    .with_context(|| format!("Failed to read {}", file.display()))?;

    let summary = state.students.add_records(&outcome.accepted).await;
    let mut messages = outcome.messages();
    messages.extend(summary.failure_messages());
    info!(
        file = %file.display(),
        saved = summary.saved,
        skipped = messages.len(),
        "Import committed"
    );

    if json {
        print_json(&ImportReport {
            imported: summary.saved,
            errors: &messages,
        })?;
    } else {
        println!("✅ {} student(s) imported successfully.", summary.saved);
        if messages.is_empty() {
            println!("No errors.");
        } else {
            println!("⚠️ {} row(s) skipped with errors:", messages.len());
            for message in &messages {
                println!("   {message}");
            }
        }
    }

    if save_report {
        if messages.is_empty() {
            println!("There are no import errors to save.");
        } else {
            let path = state.transfer.save_error_report(&messages)?;
            println!("Error report saved to {}", path.display());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ImportReport<'a> {
    imported: usize,
    errors: &'a [String],
}

/// The CLI flag wins over the configured value; either must be in range.
fn resolve_threshold(state: &AppState, flag: Option<f64>) -> anyhow::Result<f64> {
    match flag {
        Some(value) => Ok(ReportConfig::with_threshold(value)?.at_risk_threshold()),
        None => Ok(state.config.reports.at_risk_threshold()),
    }
}

fn prompt_or<T>(value: Option<T>, prompt: &str) -> anyhow::Result<T>
where
    T: Clone + ToString + std::str::FromStr,
    <T as std::str::FromStr>::Err: ToString,
{
    match value {
        Some(value) => Ok(value),
        None => Input::<T>::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {prompt}")),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_students(students: &[Student], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(students);
    }
    if students.is_empty() {
        println!("No students found.");
        return Ok(());
    }

    println!(
        "{:<12} {:<28} {:<22} {:>5} {:>5} {:<10} {}",
        "ID", "Name", "Programme", "Level", "GPA", "Added", "Status"
    );
    for s in students {
        println!(
            "{:<12} {:<28} {:<22} {:>5} {:>5.2} {:<10} {}",
            s.student_id,
            s.full_name,
            s.programme,
            s.level,
            s.gpa,
            s.date_added.to_string(),
            s.status
        );
    }
    Ok(())
}
