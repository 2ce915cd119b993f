//! Interactive session editor
//!
//! Reads one command per line, applies it to the working session and redraws
//! every subject's end-sem target after each change. The shell owns the
//! [`Workflow`] and the [`SessionStore`] for as long as it runs.

use super::render::{write_evaluation, write_grade_table, write_session, write_session_list};
use super::{open_store, to_index};
use gradex::core::grades::Grade;
use gradex::core::models::subject::clamp_internal;
use gradex::core::report::{write_report, ReportContext, ReportFormat};
use gradex::core::{SessionStore, SubjectEdit, SubjectRecord, Workflow, WorkflowStatus};
use gradex::{debug, verbose};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const HELP: &str = "\
Commands:
  new <name>                                  Start a new session
  add <internal> <grade> <credits> <name>     Add a subject (grade: O, A+, A, B+, B, RA)
  edit <n> internal|grade|credits <value>     Change one field of subject n
  show                                        Show targets and SGPA
  save                                        Save the session (all targets must be reachable)
  reset                                       Start over without saving
  load <n>                                    Continue editing saved session n
  sessions                                    List saved sessions
  view <n>                                    Show saved session n
  rename <n> <name>                           Rename saved session n
  delete <n>                                  Delete saved session n
  export [md|html]                            Write a report for the working session
  grades [internal]                           Show the grade table
  help                                        Show this help
  quit                                        Leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq)]
enum ShellCommand {
    Help,
    New(String),
    Add(SubjectRecord),
    Edit(usize, SubjectEdit),
    Show,
    Save,
    Reset,
    Load(usize),
    Sessions,
    View(usize),
    Rename(usize, String),
    Delete(usize),
    Export(ReportFormat),
    Grades(Option<f64>),
    Quit,
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T, String> {
    let token = token.ok_or_else(|| format!("✗ Missing {what}"))?;
    token
        .parse()
        .map_err(|_| format!("✗ Invalid {what}: '{token}'"))
}

fn parse_position(token: Option<&str>) -> Result<usize, String> {
    to_index(parse_number(token, "number")?)
}

fn rest(words: &[&str]) -> String {
    words.join(" ")
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Ok(None);
        };
        let mut it = args.iter().copied();

        let cmd = match head.to_ascii_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "new" => Self::New(rest(args)),
            "add" => {
                let internal: f64 = parse_number(it.next(), "internal marks")?;
                let grade: Grade = it
                    .next()
                    .ok_or_else(|| "✗ Missing grade".to_string())?
                    .parse()
                    .map_err(fail)?;
                let credits: u8 = parse_number(it.next(), "credits")?;
                let name = rest(&args[3.min(args.len())..]);
                Self::Add(SubjectRecord::new(name, internal, grade, credits))
            }
            "edit" => {
                let index = parse_position(it.next())?;
                let field = it.next().ok_or_else(|| "✗ Missing field".to_string())?;
                let value = it.next();
                let edit = match field.to_ascii_lowercase().as_str() {
                    "internal" => SubjectEdit {
                        internal: Some(parse_number(value, "internal marks")?),
                        ..SubjectEdit::default()
                    },
                    "grade" => SubjectEdit {
                        grade: Some(
                            value
                                .ok_or_else(|| "✗ Missing grade".to_string())?
                                .parse()
                                .map_err(fail)?,
                        ),
                        ..SubjectEdit::default()
                    },
                    "credits" => SubjectEdit {
                        credits: Some(parse_number(value, "credits")?),
                        ..SubjectEdit::default()
                    },
                    other => {
                        return Err(format!(
                            "✗ Unknown field '{other}' (expected internal, grade or credits)"
                        ))
                    }
                };
                Self::Edit(index, edit)
            }
            "show" => Self::Show,
            "save" => Self::Save,
            "reset" => Self::Reset,
            "load" => Self::Load(parse_position(it.next())?),
            "sessions" | "list" => Self::Sessions,
            "view" => Self::View(parse_position(it.next())?),
            "rename" => {
                let index = parse_position(it.next())?;
                Self::Rename(index, rest(&args[1..]))
            }
            "delete" => Self::Delete(parse_position(it.next())?),
            "export" => Self::Export(match it.next() {
                Some(format) => format.parse().map_err(fail)?,
                None => ReportFormat::Html,
            }),
            "grades" => Self::Grades(
                it.next()
                    .map(|token| parse_number(Some(token), "internal marks"))
                    .transpose()?,
            ),
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("✗ Unknown command '{other}'; type 'help'")),
        };
        Ok(Some(cmd))
    }
}

fn fail(e: impl std::fmt::Display) -> String {
    format!("✗ {e}")
}

/// Whether the loop keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Everything the shell works on between lines
#[derive(Debug)]
pub struct ShellState {
    workflow: Workflow,
    store: SessionStore,
    reports_dir: PathBuf,
}

impl ShellState {
    /// Start with no active session over an opened store
    #[must_use]
    pub fn new(store: SessionStore, reports_dir: impl Into<PathBuf>) -> Self {
        Self {
            workflow: Workflow::new(),
            store,
            reports_dir: reports_dir.into(),
        }
    }

    fn prompt(&self) -> String {
        self.workflow
            .name()
            .map_or_else(|| "gradex> ".to_string(), |name| format!("gradex [{name}]> "))
    }

    fn write_working<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(name) = self.workflow.name() else {
            return writeln!(out, "No active session. Use 'new <name>' or 'load <n>'.");
        };
        writeln!(out, "=== {name} ===")?;
        if self.workflow.status() == WorkflowStatus::EditingSubjects {
            return writeln!(out, "No subjects yet. Use 'add' to add one.");
        }
        let evaluation = self.workflow.evaluation();
        write_evaluation(out, &evaluation, evaluation.sgpa())
    }

    fn execute<W: Write>(&mut self, cmd: ShellCommand, out: &mut W) -> Result<Flow, String> {
        match cmd {
            ShellCommand::Help => writeln!(out, "{HELP}").map_err(fail)?,
            ShellCommand::New(name) => {
                self.workflow.start(&name).map_err(fail)?;
                writeln!(out, "✓ Started session: {}", name.trim()).map_err(fail)?;
            }
            ShellCommand::Add(record) => {
                self.workflow.add_subject(record).map_err(fail)?;
                self.write_working(out).map_err(fail)?;
            }
            ShellCommand::Edit(index, edit) => {
                self.workflow
                    .edit_subject(index, &edit)
                    .map_err(fail)?;
                self.write_working(out).map_err(fail)?;
            }
            ShellCommand::Show => self.write_working(out).map_err(fail)?,
            ShellCommand::Save => {
                let session = self
                    .workflow
                    .save(&mut self.store)
                    .map_err(fail)?;
                writeln!(
                    out,
                    "✓ Saved session: {} (SGPA {:.2})",
                    session.name, session.sgpa
                )
                .map_err(fail)?;
            }
            ShellCommand::Reset => {
                self.workflow.reset();
                writeln!(out, "✓ Started over; unsaved changes discarded").map_err(fail)?;
            }
            ShellCommand::Load(index) => {
                let session = self
                    .workflow
                    .load_previous(&self.store, index)
                    .map_err(fail)?;
                writeln!(out, "✓ Loaded session: {}", session.name).map_err(fail)?;
                self.write_working(out).map_err(fail)?;
            }
            ShellCommand::Sessions => {
                write_session_list(out, self.store.sessions()).map_err(fail)?;
            }
            ShellCommand::View(index) => {
                let session = self
                    .store
                    .get(index)
                    .ok_or_else(|| format!("✗ No session number {}", index + 1))?;
                write_session(out, session).map_err(fail)?;
            }
            ShellCommand::Rename(index, name) => {
                self.store.rename(index, &name).map_err(fail)?;
                writeln!(out, "✓ Renamed to: {}", name.trim()).map_err(fail)?;
            }
            ShellCommand::Delete(index) => {
                let removed = self.store.delete(index).map_err(fail)?;
                writeln!(out, "✓ Deleted session: {}", removed.name).map_err(fail)?;
            }
            ShellCommand::Export(format) => {
                let ctx = ReportContext::from_workflow(&self.workflow)
                    .ok_or_else(|| "✗ No active session to export".to_string())?;
                let path = write_report(&ctx, format, &self.reports_dir).map_err(fail)?;
                writeln!(out, "✓ Report generated: {}", path.display()).map_err(fail)?;
            }
            ShellCommand::Grades(Some(internal)) => {
                write_grade_table(out, clamp_internal(internal)).map_err(fail)?;
            }
            ShellCommand::Grades(None) => {
                for grade in Grade::ALL {
                    writeln!(
                        out,
                        "  {:<3} {:<7} min total {:>3}",
                        grade.code(),
                        grade.label(),
                        grade.min_total()
                    )
                    .map_err(fail)?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Read commands from `input` until `quit` or end of input
///
/// Command errors are written to `out` and the loop carries on; only I/O
/// failures on `input` or `out` end it early.
///
/// # Errors
/// Returns the first I/O error from reading or writing.
pub fn run_loop<R: BufRead, W: Write>(
    state: &mut ShellState,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{}", state.prompt())?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        debug!("shell> {line}");

        let cmd = match ShellCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        match state.execute(cmd, out) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(msg) => writeln!(out, "{msg}")?,
        }
    }

    if let Some(name) = state.workflow.name() {
        writeln!(out, "Unsaved session '{name}' discarded.")?;
    }
    Ok(())
}

/// Run the shell on stdin and stdout
pub fn run(store_path: &Path, reports_dir: &Path) -> Result<(), String> {
    let store = open_store(store_path)?;
    verbose!("Using session store {}", store.path().display());
    let mut state = ShellState::new(store, reports_dir);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "GradeX SGPA shell. Type 'help' for commands.").map_err(fail)?;
    run_loop(&mut state, stdin.lock(), &mut out).map_err(fail)
}
