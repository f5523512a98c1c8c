use clap::{Parser, Subcommand};
use medtrack_core::dates::{date_key, format_display_time, today_key};
use medtrack_core::*;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medtrack")]
#[command(about = "Medicine intake and adherence streak tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a medicine with a daily reminder time
    Add {
        /// Display name
        name: String,

        /// Reminder time as HH:MM (24-hour)
        #[arg(long)]
        at: String,
    },

    /// List medicines with intake status and the global streak
    List,

    /// Delete a medicine permanently
    Remove {
        /// Medicine id or name
        medicine: String,
    },

    /// Enable or disable a medicine's reminder
    Toggle {
        /// Medicine id or name
        medicine: String,
    },

    /// Mark a medicine as taken
    Take {
        /// Medicine id or name
        medicine: String,

        /// Date to record as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the global adherence streak
    Streak,
}

fn main() -> Result<()> {
    // Initialize logging
    medtrack_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!("Using data directory {:?}", data_dir);

    let store_path = data_dir.join("medicines.json");
    let registry = JsonRegistry::new(data_dir.join("reminders.json"));
    let mut tracker = Tracker::open(&store_path, registry, config.reminders.permission)?;

    match cli.command {
        Commands::Add { name, at } => cmd_add(&mut tracker, &name, &at),
        Commands::List => cmd_list(&tracker),
        Commands::Remove { medicine } => cmd_remove(&mut tracker, &medicine),
        Commands::Toggle { medicine } => cmd_toggle(&mut tracker, &medicine),
        Commands::Take { medicine, date } => cmd_take(&mut tracker, &medicine, date.as_deref()),
        Commands::Streak => cmd_streak(&tracker),
    }
}

fn cmd_add(tracker: &mut Tracker<JsonRegistry>, name: &str, at: &str) -> Result<()> {
    let (hour, minute) = parse_time(at)?;
    let medicine = tracker.add_medicine(name, hour, minute)?;

    println!(
        "✓ Added {} (reminder at {})",
        medicine.name,
        format_display_time(medicine.hour, medicine.minute)
    );
    if medicine.notification_id.is_none() {
        println!("  No reminder registered - notifications unavailable");
    }
    println!("  Id: {}", medicine.id);
    Ok(())
}

fn cmd_list(tracker: &Tracker<JsonRegistry>) -> Result<()> {
    let streak = tracker.global_streak();
    println!(
        "All-meds streak: {} day{}",
        streak,
        if streak == 1 { "" } else { "s" }
    );
    println!();

    if tracker.store().is_empty() {
        println!("No medicines yet. Use `medtrack add`.");
        return Ok(());
    }

    let today = today_key();
    for medicine in tracker.store().iter() {
        let taken = if medicine.taken_on(&today) { "✓" } else { " " };
        let status = if medicine.enabled { "on " } else { "off" };
        println!(
            "[{}] {} {:<20} {:>9}  {} days taken  ({})",
            taken,
            status,
            medicine.name,
            format_display_time(medicine.hour, medicine.minute),
            medicine.days_taken(),
            medicine.id
        );
    }
    Ok(())
}

fn cmd_remove(tracker: &mut Tracker<JsonRegistry>, medicine: &str) -> Result<()> {
    let (id, name) = resolve(tracker, medicine)?;
    tracker.delete_medicine(id)?;
    println!("✓ Removed {}", name);
    Ok(())
}

fn cmd_toggle(tracker: &mut Tracker<JsonRegistry>, medicine: &str) -> Result<()> {
    let (id, name) = resolve(tracker, medicine)?;
    let enabled = tracker.toggle_enabled(id)?;
    println!("✓ {} is now {}", name, if enabled { "on" } else { "off" });
    Ok(())
}

fn cmd_take(
    tracker: &mut Tracker<JsonRegistry>,
    medicine: &str,
    date: Option<&str>,
) -> Result<()> {
    let (id, name) = resolve(tracker, medicine)?;

    // Normalize through chrono so keys are always zero-padded.
    let key = match date {
        Some(raw) => {
            let parsed = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| Error::InvalidInput(format!("invalid date {:?}: {}", raw, e)))?;
            date_key(parsed)
        }
        None => today_key(),
    };

    tracker.mark_taken(id, &key)?;
    println!("✓ Marked {} as taken for {}", name, key);
    Ok(())
}

fn cmd_streak(tracker: &Tracker<JsonRegistry>) -> Result<()> {
    let streak = tracker.global_streak();
    println!("{} day{}", streak, if streak == 1 { "" } else { "s" });
    Ok(())
}

/// Parse an HH:MM 24-hour time string
fn parse_time(at: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidInput(format!("invalid time {:?}, expected HH:MM", at));

    let (h, m) = at.split_once(':').ok_or_else(invalid)?;
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

/// Resolve a CLI argument to a medicine id: exact uuid first, then a
/// unique case-insensitive name match.
fn resolve(tracker: &Tracker<JsonRegistry>, arg: &str) -> Result<(Uuid, String)> {
    if let Ok(id) = Uuid::parse_str(arg) {
        if let Some(medicine) = tracker.store().get(id) {
            return Ok((id, medicine.name.clone()));
        }
    }

    let matches: Vec<_> = tracker
        .store()
        .iter()
        .filter(|m| m.name.eq_ignore_ascii_case(arg))
        .collect();

    match matches.as_slice() {
        [medicine] => Ok((medicine.id, medicine.name.clone())),
        [] => Err(Error::InvalidInput(format!(
            "no medicine matching {:?}",
            arg
        ))),
        _ => Err(Error::InvalidInput(format!(
            "{:?} matches more than one medicine, use the id",
            arg
        ))),
    }
}
