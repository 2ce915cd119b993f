//! Sessions command handler: list, show, rename, delete and export saved sessions

use super::render::{write_session, write_session_list};
use super::{open_store, to_index};
use crate::args::SessionsSubcommand;
use gradex::config::Config;
use gradex::core::report::{write_report, ReportContext};
use gradex::core::SessionStore;
use gradex::verbose;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Run a sessions subcommand against the configured store
pub fn run(subcommand: Option<SessionsSubcommand>, config: &Config) -> Result<(), String> {
    let mut store = open_store(&config.sessions_file())?;
    verbose!("Using session store {}", store.path().display());
    let mut out = io::stdout().lock();
    dispatch(
        subcommand.unwrap_or(SessionsSubcommand::List),
        &mut store,
        &config.reports_dir(),
        &mut out,
    )
}

/// Execute `subcommand` on an already opened store, writing to `out`
pub fn dispatch<W: Write>(
    subcommand: SessionsSubcommand,
    store: &mut SessionStore,
    reports_dir: &Path,
    out: &mut W,
) -> Result<(), String> {
    let io_err = |e: io::Error| format!("✗ {e}");
    match subcommand {
        SessionsSubcommand::List => write_session_list(out, store.sessions()).map_err(io_err),
        SessionsSubcommand::Show { number } => {
            let session = store
                .get(to_index(number)?)
                .ok_or_else(|| format!("✗ No session number {number}"))?;
            write_session(out, session).map_err(io_err)
        }
        SessionsSubcommand::Rename { number, name } => {
            let name = name.join(" ");
            store
                .rename(to_index(number)?, &name)
                .map_err(|e| format!("✗ {e}"))?;
            writeln!(out, "✓ Renamed to: {}", name.trim()).map_err(io_err)
        }
        SessionsSubcommand::Delete { number } => {
            let removed = store
                .delete(to_index(number)?)
                .map_err(|e| format!("✗ {e}"))?;
            writeln!(out, "✓ Deleted session: {}", removed.name).map_err(io_err)
        }
        SessionsSubcommand::Export {
            number,
            format,
            output,
        } => {
            let session = store
                .get(to_index(number)?)
                .ok_or_else(|| format!("✗ No session number {number}"))?;
            let dir: PathBuf = output.unwrap_or_else(|| reports_dir.to_path_buf());
            let ctx = ReportContext::from_session(session);
            let path = write_report(&ctx, format, &dir).map_err(|e| format!("✗ {e}"))?;
            writeln!(out, "✓ Report generated: {}", path.display()).map_err(io_err)
        }
    }
}
