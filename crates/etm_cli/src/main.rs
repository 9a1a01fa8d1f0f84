//! Command-line front-end for the employee task tracker.
//!
//! # Responsibility
//! - Act as the form boundary: collect raw fields, validate, and route
//!   submissions to the tracker.
//! - Ask for confirmation before deleting.
//! - Print the refreshed list and charts after each action.

mod render;

use clap::{Args, Parser, Subcommand};
use etm_core::db::open_db;
use etm_core::{
    default_log_level, init_logging, CandidateInput, DeleteConfirmation, EditCursor,
    SnapshotBackend, SqliteRecordStore, Tracker,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "etm_employees.sqlite3";

#[derive(Parser)]
#[command(name = "etm")]
#[command(about = "Employee task tracker")]
#[command(version)]
struct Cli {
    /// SQLite file holding the record set.
    #[arg(long, global = true, default_value = DEFAULT_DB_FILE)]
    db: PathBuf,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Print views as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the list and both charts.
    List,
    /// Add an employee.
    Add(FieldArgs),
    /// Replace the employee at INDEX. Omitted fields keep their stored value.
    Edit {
        index: usize,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Show the stored fields of the employee at INDEX.
    Show { index: usize },
    /// Delete the employee at INDEX.
    Delete {
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Default)]
struct FieldArgs {
    #[arg(long)]
    emp_id: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    contribution: Option<String>,
    #[arg(long)]
    activities: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    task_completed: Option<String>,
}

impl FieldArgs {
    /// Overlays the given fields on top of `base`.
    fn apply_to(self, base: CandidateInput) -> CandidateInput {
        CandidateInput {
            emp_id: self.emp_id.unwrap_or(base.emp_id),
            position: self.position.unwrap_or(base.position),
            name: self.name.unwrap_or(base.name),
            contribution: self.contribution.unwrap_or(base.contribution),
            activities: self.activities.unwrap_or(base.activities),
            task_completed: self.task_completed.unwrap_or(base.task_completed),
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)
        .map_err(|err| format!("failed to open `{}`: {err}", cli.db.display()))?;
    let store = SqliteRecordStore::try_new(&conn).map_err(|err| err.to_string())?;
    let mut tracker =
        Tracker::open(store, SnapshotBackend::new()).map_err(|err| err.to_string())?;

    match cli.command {
        Commands::List => {}
        Commands::Add(fields) => {
            let mut cursor = EditCursor::Idle;
            submit(&mut tracker, &mut cursor, fields.apply_to(CandidateInput::default()))?;
            println!("Employee added.");
        }
        Commands::Edit { index, fields } => {
            let mut cursor = EditCursor::Idle;
            let snapshot = tracker
                .edit_request(index, &mut cursor)
                .map_err(|err| err.to_string())?;
            submit(&mut tracker, &mut cursor, fields.apply_to(snapshot.input))?;
            println!("Changes saved.");
        }
        Commands::Show { index } => {
            let mut cursor = EditCursor::Idle;
            let snapshot = tracker
                .edit_request(index, &mut cursor)
                .map_err(|err| err.to_string())?;
            render::print_form(&snapshot);
            return Ok(());
        }
        Commands::Delete { index, yes } => {
            let confirmation = if yes || confirm("Delete this employee?")? {
                DeleteConfirmation::Confirmed
            } else {
                DeleteConfirmation::Declined
            };
            match tracker
                .remove_at(index, confirmation)
                .map_err(|err| err.to_string())?
            {
                Some(_) => println!("Employee deleted."),
                None => println!("Delete cancelled."),
            }
        }
    }

    if cli.json {
        render::print_json(tracker.views())
    } else {
        render::print_views(tracker.views());
        Ok(())
    }
}

fn submit(
    tracker: &mut Tracker<SqliteRecordStore<'_>, SnapshotBackend>,
    cursor: &mut EditCursor,
    input: CandidateInput,
) -> Result<(), String> {
    let candidate = input
        .parse()
        .map_err(|err| format!("{} ({err})", err.user_message()))?;
    let record = tracker
        .submit(cursor, candidate)
        .map_err(|err| err.to_string())?;
    info!("event=cli_submit module=cli status=ok count={}", tracker.records().len());
    println!("Remark: {}", record.remarks);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N] ");
    io::stdout().flush().map_err(|err| err.to_string())?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| err.to_string())?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
