use bump_core::*;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bump")]
#[command(about = "Pregnancy journey tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Reference date for calculations (defaults to today, UTC)
    #[arg(long, global = true)]
    today: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the pregnancy anchor date
    Setup(SetupArgs),

    /// Show the dashboard summary (default)
    Status,

    /// List content unlocked for the current week
    Content {
        /// Also list locked content and why it is hidden
        #[arg(long)]
        all: bool,
    },

    /// Log and review symptoms
    Symptom {
        #[command(subcommand)]
        command: SymptomCommands,
    },

    /// Export the symptom log to CSV
    Export {
        /// Destination CSV file
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct SetupArgs {
    /// First day of the last menstrual period (YYYY-MM-DD)
    #[arg(long, conflicts_with = "due_date", required_unless_present = "due_date")]
    lmp: Option<String>,

    /// Estimated due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: Option<String>,

    /// Journey stage (pre_conception, pregnant, postpartum, ...)
    #[arg(long)]
    stage: Option<String>,
}

#[derive(Subcommand)]
enum SymptomCommands {
    /// Log a symptom
    Log {
        /// Symptom name, e.g. "nausea"
        name: String,

        /// Severity from 1 (mild) to 5 (severe)
        #[arg(long)]
        severity: u8,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,

        /// Day the symptom occurred (defaults to the reference date)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recently logged symptoms
    List {
        /// Window in days
        #[arg(long)]
        days: Option<i64>,
    },
}

fn main() -> Result<()> {
    bump_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }

    // The only place the wall clock is read
    let now = match cli.today.as_deref() {
        Some(raw) => dates::start_of_day(parse_date(raw)?),
        None => Utc::now(),
    };
    tracing::debug!("Reference time {}", now);

    match cli.command {
        Some(Commands::Setup(args)) => cmd_setup(&config, args, now),
        Some(Commands::Status) | None => cmd_status(&config, now),
        Some(Commands::Content { all }) => cmd_content(&config, all, now),
        Some(Commands::Symptom { command }) => match command {
            SymptomCommands::Log {
                name,
                severity,
                notes,
                date,
            } => cmd_symptom_log(&config, &name, severity, notes, date, now),
            SymptomCommands::List { days } => {
                cmd_symptom_list(&config, days.unwrap_or(config.journey.recent_days), now)
            }
        },
        Some(Commands::Export { out }) => cmd_export(&config, &out),
    }
}

fn cmd_setup(config: &Config, args: SetupArgs, now: DateTime<Utc>) -> Result<()> {
    let stage = args
        .stage
        .as_deref()
        .map(JourneyStage::from)
        .unwrap_or_else(|| config.journey.default_stage.clone());

    let profile = match (args.lmp, args.due_date) {
        (Some(lmp), None) => GestationalProfile::from_lmp(lmp.as_str(), stage, now)?,
        (None, Some(due)) => GestationalProfile::from_due_date(due.as_str(), stage, now)?,
        _ => {
            return Err(Error::Validation(
                "pass exactly one of --lmp or --due-date".into(),
            ))
        }
    };

    profile.save(&config.data.profile_path())?;

    println!("✓ Profile saved");
    println!("  Last period: {}", format_date_for_database(profile.last_period_date)?);
    println!("  Due date:    {}", format_date_for_database(profile.due_date()?)?);
    println!("  Stage:       {}", profile.stage);
    Ok(())
}

fn cmd_status(config: &Config, now: DateTime<Utc>) -> Result<()> {
    let profile = GestationalProfile::require(&config.data.profile_path())?;
    let summary = JourneySummary::compute(&profile, now)?;
    display_summary(&summary);
    Ok(())
}

fn cmd_content(config: &Config, all: bool, now: DateTime<Utc>) -> Result<()> {
    let profile = GestationalProfile::require(&config.data.profile_path())?;
    let week = calculate_current_week(profile.last_period_date, now)?;
    let library = get_default_library();

    println!("Content for week {} ({})", week, profile.stage);
    println!();

    if all {
        for evaluated in library.evaluate_all(week, &profile.stage) {
            match evaluated.hidden {
                None => println!("  ✓ {}", evaluated.item.title),
                Some(reason) => println!("  🔒 {} ({})", evaluated.item.title, reason),
            }
        }
        return Ok(());
    }

    for item in library.visible_for(week, &profile.stage) {
        println!("  {} [{:?}]", item.title, item.kind);
        println!("    {}", item.body);
    }
    Ok(())
}

fn cmd_symptom_log(
    config: &Config,
    name: &str,
    severity: u8,
    notes: Option<String>,
    date: Option<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    let profile = GestationalProfile::require(&config.data.profile_path())?;

    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => now.date_naive(),
    };

    let mut entry = SymptomEntry::new(name, severity, date, profile.last_period_date, now)?;
    if let Some(notes) = notes {
        entry = entry.with_notes(notes);
    }

    let mut log = JsonlSymptomLog::new(config.data.symptom_log_path());
    log.append(&entry)?;

    println!(
        "✓ Logged {} (severity {}) on {}, week {}",
        entry.symptom,
        entry.severity,
        format_date_for_database(entry.date)?,
        entry.week
    );
    Ok(())
}

fn cmd_symptom_list(config: &Config, days: i64, now: DateTime<Utc>) -> Result<()> {
    if days <= 0 {
        return Err(Error::Validation(format!(
            "--days must be positive, got {}",
            days
        )));
    }

    let entries = recent_symptoms(&config.data.symptom_log_path(), days, now)?;
    if entries.is_empty() {
        println!("No symptoms logged in the last {} days.", days);
        return Ok(());
    }

    println!("Symptoms in the last {} days:", days);
    for entry in &entries {
        let notes = entry
            .notes
            .as_deref()
            .map(|n| format!(" - {}", n))
            .unwrap_or_default();
        println!(
            "  {}  week {:>2}  {} ({}/5){}",
            format_date_for_database(entry.date)?,
            entry.week,
            entry.symptom,
            entry.severity,
            notes
        );
    }
    Ok(())
}

fn cmd_export(config: &Config, out: &Path) -> Result<()> {
    let count = export_symptoms_csv(&config.data.symptom_log_path(), out)?;
    println!("✓ Exported {} symptoms", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_summary(summary: &JourneySummary) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEK {} · {}", summary.current_week, summary.trimester);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Due date:       {}", summary.due_date.format("%Y-%m-%d"));
    println!("  Days passed:    {}", summary.days_passed);

    if summary.is_overdue() {
        println!("  Overdue by:     {} days", -summary.days_remaining);
    } else {
        println!(
            "  Days remaining: {} (~{} weeks)",
            summary.days_remaining,
            summary.weeks_remaining()
        );
    }

    let filled = (summary.progress_percent as usize) / 5;
    println!(
        "  Progress:       [{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(20 - filled),
        summary.progress_percent
    );
    println!("  Stage:          {}", summary.stage);
    println!();
}
