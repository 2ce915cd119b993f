//! CLI argument definitions for `gradex`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gradex::config::ConfigOverrides;
use gradex::core::grades::Grade;
use gradex::core::report::ReportFormat;
use gradex::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `sessions_file`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SessionsSubcommand {
    /// List saved sessions with their SGPA.
    List,
    /// Show every subject of a saved session with its end-sem target.
    Show {
        /// Session number as shown by `sessions list`
        #[arg(value_name = "N")]
        number: usize,
    },
    /// Rename a saved session.
    Rename {
        /// Session number as shown by `sessions list`
        #[arg(value_name = "N")]
        number: usize,
        /// New session name
        #[arg(value_name = "NAME", num_args = 1.., required = true)]
        name: Vec<String>,
    },
    /// Delete a saved session.
    Delete {
        /// Session number as shown by `sessions list`
        #[arg(value_name = "N")]
        number: usize,
    },
    /// Export a saved session as a Markdown or HTML report.
    Export {
        /// Session number as shown by `sessions list`
        #[arg(value_name = "N")]
        number: usize,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: ReportFormat,

        /// Output directory (defaults to config `reports_dir`)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute the end-sem score needed for a grade.
    ///
    /// Without --grade, prints the requirement for every grade.
    Target {
        /// Internal marks out of 60 (clamped to 0-60)
        #[arg(short, long, value_name = "MARKS", allow_negative_numbers = true)]
        internal: f64,

        /// Desired grade (O, A+, A, B+, B, RA)
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<Grade>,

        /// Subject credits (clamped to 1-5)
        #[arg(short, long, value_name = "CREDITS", default_value_t = 3)]
        credits: u8,
    },
    /// Manage saved sessions.
    ///
    /// If no subcommand is provided, lists saved sessions.
    Sessions {
        #[command(subcommand)]
        subcommand: Option<SessionsSubcommand>,
    },
    /// Interactive session editor.
    ///
    /// Name a session, add and edit subjects, watch the targets and SGPA update,
    /// then save it to the session store.
    Shell,
}

#[derive(Parser, Debug)]
#[command(
    name = "gradex",
    about = "GradeX SGPA target calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config session store file
    #[arg(long = "config-store", value_name = "PATH")]
    pub config_store: Option<PathBuf>,

    /// Override config session store file (short form)
    #[arg(long = "store", value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--store`) take precedence over long-form flags
    /// (e.g., `--config-store`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            sessions_file: self
                .store
                .as_ref()
                .or(self.config_store.as_ref())
                .map(path_string),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gradex").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["shell"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.sessions_file.is_none());
        assert!(overrides.reports_dir.is_none());
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = parse(&[
            "--config-store",
            "/long/sessions.json",
            "--store",
            "/short/sessions.json",
            "--config-reports-dir",
            "/long/reports",
            "--config-level",
            "debug",
            "sessions",
        ]);
        let overrides = cli.to_config_overrides();
        assert_eq!(
            overrides.sessions_file.as_deref(),
            Some("/short/sessions.json")
        );
        assert_eq!(overrides.reports_dir.as_deref(), Some("/long/reports"));
        assert_eq!(overrides.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_target_parses_grade_code() {
        let cli = parse(&["target", "--internal", "45", "--grade", "a+"]);
        match cli.command {
            Command::Target {
                internal,
                grade,
                credits,
            } => {
                assert!((internal - 45.0).abs() < f64::EPSILON);
                assert_eq!(grade, Some(Grade::APlus));
                assert_eq!(credits, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rename_joins_words() {
        let cli = parse(&["sessions", "rename", "2", "Fall", "2024"]);
        match cli.command {
            Command::Sessions {
                subcommand: Some(SessionsSubcommand::Rename { number, name }),
            } => {
                assert_eq!(number, 2);
                assert_eq!(name.join(" "), "Fall 2024");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_export_format_parses() {
        let cli = parse(&["sessions", "export", "1", "--format", "md"]);
        assert!(matches!(
            cli.command,
            Command::Sessions {
                subcommand: Some(SessionsSubcommand::Export {
                    format: ReportFormat::Markdown,
                    ..
                }),
            }
        ));
    }
}
