use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::Subcommand;
use focusdesk_core::metrics::format_hms;
use focusdesk_core::storage::data_dir;
use focusdesk_core::{Category, Config, ReportStore, StoreError};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Show today's accumulated times
    Today {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the raw report file
    All,
    /// Write the display-only CSV mirror
    Export {
        /// Destination path (defaults to the configured export path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReportAction::Today { json } => {
            let store = ReportStore::open_default()?;
            let metrics = store.load(chrono::Local::now().date_naive());
            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("{}", metrics.date.format("%A %Y/%m/%d"));
                for category in Category::ALL {
                    println!(
                        "  {:<12} {}",
                        category.label(),
                        format_hms(metrics.seconds_for(category))
                    );
                }
                println!("  {:<12} {}", "Work", format_hms(metrics.work_secs()));
                println!("  {:<12} {}", "Rest", format_hms(metrics.rest_secs()));
                println!("  {:<12} {}", "Breaks", metrics.rest_cycles);
            }
        }
        ReportAction::All => {
            let store = ReportStore::open_default()?;
            match std::fs::read_to_string(store.path()) {
                Ok(content) => print!("{content}"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    println!("no report recorded yet");
                }
                Err(e) => return Err(e.into()),
            }
        }
        ReportAction::Export { out } => {
            let store = ReportStore::open_default()?;
            let dest = match out.or_else(|| Config::load_or_default().export_path) {
                Some(path) => path,
                None => data_dir()?.join("focusdesk_export.csv"),
            };
            export_with_retry(&store, &dest)?;
        }
    }
    Ok(())
}

/// Export, prompting to retry while the destination is locked by another
/// program (a spreadsheet holding the file open, typically).
fn export_with_retry(
    store: &ReportStore,
    dest: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match store.export(dest) {
            Ok(()) => {
                println!("exported to {}", dest.display());
                return Ok(());
            }
            Err(StoreError::ExportLocked { path }) => {
                eprint!("{} is locked by another program; retry? [y/N] ", path.display());
                std::io::stderr().flush()?;
                let mut answer = String::new();
                std::io::stdin().lock().read_line(&mut answer)?;
                if !answer.trim().eq_ignore_ascii_case("y") {
                    println!("export cancelled");
                    return Ok(());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}
