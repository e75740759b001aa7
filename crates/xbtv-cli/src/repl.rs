//! Line-oriented command loop driving one [`Application`].
//!
//! Each input line is one command. Words are separated by whitespace; a word
//! containing spaces can be double-quoted, with `\` escaping the next
//! character inside quotes. Buffer and program numbers are 1-based.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use thiserror::Error;
use tracing::debug;
use xbtv_core::{Application, BufferSummary, EngineError, SaveAllReport, SaveOutcome};
use xbtv_persistence::FILE_EXTENSION;

pub const HELP: &str = "\
Buffers:
  new                         open an empty buffer after the current one
  open <path>                 load a schedule into a new buffer
  close                       close the current buffer (close! discards changes)
  next, prev                  move to the next or previous buffer
  select <n>                  move to buffer n
  buffers                     list open buffers
Files:
  save                        save the current buffer to its file
  saveas <path>               save the current buffer to a new file
                              (.xbtv is added when the path has no extension)
  saveall                     save every modified buffer that has a file
Editing:
  name [<new name>]           show or change the schedule name
  add <source> <location>     append a program
  insert <n> <source> <loc>   insert a program at position n
  remove <n>                  remove program n
  undo, redo                  step through the edit history
  show                        print the current schedule
Session:
  help                        show this text
  quit                        leave (asks again if there are unsaved changes)
  quit!                       leave without saving
";

/// One parsed editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    SaveAll,
    Close { force: bool },
    Next,
    Prev,
    /// 0-based buffer index.
    Select(usize),
    Buffers,
    Name(Option<String>),
    Add { source: String, location: String },
    /// 0-based program index.
    Insert { index: usize, source: String, location: String },
    /// 0-based program index.
    Remove(usize),
    Undo,
    Redo,
    Show,
    Help,
    Quit { force: bool },
}

/// A line that could not be turned into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    #[error("{command}: too many arguments")]
    TooManyArguments { command: String },

    #[error("'{0}' is not a position (use 1 for the first)")]
    InvalidPosition(String),

    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Parse one input line. Blank lines and lines starting with `#` yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words = split_words(line)?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };
    if name.starts_with('#') {
        return Ok(None);
    }

    let command = match name.as_str() {
        "new" => no_args(name, args, Command::New)?,
        "save" => no_args(name, args, Command::Save)?,
        "saveall" => no_args(name, args, Command::SaveAll)?,
        "close" => no_args(name, args, Command::Close { force: false })?,
        "close!" => no_args(name, args, Command::Close { force: true })?,
        "next" => no_args(name, args, Command::Next)?,
        "prev" => no_args(name, args, Command::Prev)?,
        "buffers" | "ls" => no_args(name, args, Command::Buffers)?,
        "undo" => no_args(name, args, Command::Undo)?,
        "redo" => no_args(name, args, Command::Redo)?,
        "show" => no_args(name, args, Command::Show)?,
        "help" | "?" => no_args(name, args, Command::Help)?,
        "quit" | "exit" => no_args(name, args, Command::Quit { force: false })?,
        "quit!" => no_args(name, args, Command::Quit { force: true })?,
        "open" => {
            let [path] = expect_args(name, args, ["path"])?;
            Command::Open(PathBuf::from(path))
        }
        "saveas" => {
            let [path] = expect_args(name, args, ["path"])?;
            Command::SaveAs(with_default_extension(Path::new(path)))
        }
        "select" => {
            let [position] = expect_args(name, args, ["buffer number"])?;
            Command::Select(parse_position(position)?)
        }
        "name" => {
            if args.is_empty() {
                Command::Name(None)
            } else {
                Command::Name(Some(args.join(" ")))
            }
        }
        "add" => {
            let [source, location] = expect_args(name, args, ["source", "location"])?;
            Command::Add {
                source: source.to_string(),
                location: location.to_string(),
            }
        }
        "insert" => {
            let [position, source, location] =
                expect_args(name, args, ["position", "source", "location"])?;
            Command::Insert {
                index: parse_position(position)?,
                source: source.to_string(),
                location: location.to_string(),
            }
        }
        "remove" | "rm" => {
            let [position] = expect_args(name, args, ["program number"])?;
            Command::Remove(parse_position(position)?)
        }
        _ => return Err(CommandError::Unknown(name.clone())),
    };
    Ok(Some(command))
}

fn no_args(name: &str, args: &[String], command: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CommandError::TooManyArguments {
            command: name.to_string(),
        })
    }
}

fn expect_args<'a, const N: usize>(
    name: &str,
    args: &'a [String],
    arguments: [&'static str; N],
) -> Result<[&'a str; N], CommandError> {
    if args.len() > N {
        return Err(CommandError::TooManyArguments {
            command: name.to_string(),
        });
    }
    if let Some(argument) = arguments.get(args.len()) {
        return Err(CommandError::MissingArgument {
            command: name.to_string(),
            argument,
        });
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}

fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(FILE_EXTENSION)
    }
}

/// 1-based position typed by the user to 0-based index.
fn parse_position(word: &str) -> Result<usize, CommandError> {
    match word.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position - 1),
        _ => Err(CommandError::InvalidPosition(word.to_string())),
    }
}

fn split_words(line: &str) -> Result<Vec<String>, CommandError> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut word = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some(c) => word.push(c),
                        None => return Err(CommandError::UnterminatedQuote),
                    },
                    Some(c) => word.push(c),
                    None => return Err(CommandError::UnterminatedQuote),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                word.push(c);
            }
        }
        words.push(word);
    }

    Ok(words)
}

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The interactive editor: an [`Application`] plus the output it reports to.
pub struct Repl<W: Write> {
    app: Application,
    out: W,
    prompt: bool,
    /// Set after `quit` was refused once because of unsaved changes.
    quit_warned: bool,
}

impl<W: Write> Repl<W> {
    pub fn new(app: Application, out: W) -> Self {
        Self {
            app,
            out,
            prompt: false,
            quit_warned: false,
        }
    }

    /// Print a prompt before each command (for terminals).
    #[must_use]
    pub fn with_prompt(mut self, enable: bool) -> Self {
        self.prompt = enable;
        self
    }

    pub fn into_parts(self) -> (Application, W) {
        (self.app, self.out)
    }

    /// Read and execute commands until `quit` or end of input.
    ///
    /// Engine and parse errors are reported and the loop goes on; only
    /// failures of the input or output streams end it early.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.write_prompt()?;
        for line in input.lines() {
            let line = line?;
            let flow = match parse_command(&line) {
                Ok(Some(command)) => self.execute(command)?,
                Ok(None) => Flow::Continue,
                Err(error) => {
                    writeln!(self.out, "error: {error}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
            self.write_prompt()?;
        }
        if self.prompt {
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        if let Command::Quit { force } = command {
            return self.quit(force);
        }
        self.quit_warned = false;

        match self.apply(command) {
            Ok(message) => {
                self.out.write_all(message.as_bytes())?;
                if !message.is_empty() && !message.ends_with('\n') {
                    writeln!(self.out)?;
                }
            }
            Err(error) => {
                debug!(%error, "Command failed");
                writeln!(self.out, "error: {}", error.user_message())?;
                if let Some(hint) = error.suggestion() {
                    writeln!(self.out, "hint: {hint}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn quit(&mut self, force: bool) -> io::Result<Flow> {
        if force || self.quit_warned || !self.app.any_modified() {
            return Ok(Flow::Quit);
        }
        let unsaved = self.app.buffers().iter().filter(|b| b.is_dirty()).count();
        writeln!(
            self.out,
            "{unsaved} buffer(s) have unsaved changes; quit again or use quit! to discard them"
        )?;
        self.quit_warned = true;
        Ok(Flow::Continue)
    }

    /// Run a command against the engine and return the text to print.
    fn apply(&mut self, command: Command) -> Result<String, EngineError> {
        let message = match command {
            Command::New => {
                self.app.new_buffer();
                self.position()
            }
            Command::Open(path) => {
                self.app.open(&path)?;
                self.position()
            }
            Command::Save => {
                self.app.save()?;
                self.saved()
            }
            Command::SaveAs(path) => {
                self.app.save_as(&path)?;
                self.saved()
            }
            Command::SaveAll => render_save_all(&self.app.save_all()),
            Command::Close { force } => {
                if self.app.current_modified() && !force {
                    format!(
                        "'{}' has unsaved changes; save it or use close! to discard them",
                        self.app.current_buffer_name()
                    )
                } else {
                    let closed = self.app.close_buffer();
                    format!("closed '{}'\n{}", closed.name(), self.position())
                }
            }
            Command::Next => {
                self.app.next_buffer();
                self.position()
            }
            Command::Prev => {
                self.app.prev_buffer();
                self.position()
            }
            Command::Select(index) => {
                self.app.select_buffer(index)?;
                self.position()
            }
            Command::Buffers => render_buffers(&self.app.summaries()),
            Command::Name(None) => self.app.current_buffer_name().to_string(),
            Command::Name(Some(name)) => {
                self.app.set_current_buffer_name(name)?;
                format!("renamed to '{}'", self.app.current_buffer_name())
            }
            Command::Add { source, location } => {
                self.app.add_program(source, location);
                format!(
                    "added program {}",
                    self.app.current_buffer().programs().len()
                )
            }
            Command::Insert {
                index,
                source,
                location,
            } => {
                self.app.insert_program(index, source, location)?;
                format!("inserted program {}", index + 1)
            }
            Command::Remove(index) => {
                let removed = self.app.remove_program(index)?;
                format!("removed program {}: {}", index + 1, removed)
            }
            Command::Undo => {
                self.app.undo()?;
                format!("undone ({} more)", self.app.undo_depth())
            }
            Command::Redo => {
                self.app.redo()?;
                format!("redone ({} more)", self.app.redo_depth())
            }
            Command::Show => {
                let display = self.app.schedule_display();
                if display.is_empty() {
                    "(no programs)".to_string()
                } else {
                    display
                }
            }
            Command::Help => HELP.to_string(),
            Command::Quit { .. } => String::new(),
        };
        Ok(message)
    }

    fn position(&self) -> String {
        format!(
            "buffer {}/{}: {}{}",
            self.app.current_index() + 1,
            self.app.buffer_count(),
            self.app.current_buffer_name(),
            if self.app.current_modified() {
                " [modified]"
            } else {
                ""
            }
        )
    }

    fn saved(&self) -> String {
        match self.app.current_path() {
            Some(path) => format!(
                "saved '{}' to {}",
                self.app.current_buffer_name(),
                path.display()
            ),
            None => format!("saved '{}'", self.app.current_buffer_name()),
        }
    }

    fn write_prompt(&mut self) -> io::Result<()> {
        if !self.prompt {
            return Ok(());
        }
        let marker = if self.app.current_modified() { "*" } else { "" };
        write!(self.out, "{}{}> ", self.app.current_buffer_name(), marker)?;
        self.out.flush()
    }
}

fn render_save_all(report: &SaveAllReport) -> String {
    if report.results.is_empty() {
        return "nothing to save".to_string();
    }
    let lines: Vec<String> = report
        .results
        .iter()
        .map(|result| match &result.outcome {
            SaveOutcome::Saved => format!("saved '{}'", result.name),
            SaveOutcome::SkippedNoPath => {
                format!("skipped '{}': no file yet, use saveas", result.name)
            }
            SaveOutcome::Failed(error) => {
                format!("failed '{}': {}", result.name, error.user_message())
            }
        })
        .collect();
    lines.join("\n")
}

fn render_buffers(summaries: &[BufferSummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.set_header(vec!["#", "Name", "Programs", "Modified", "File"]);

    for summary in summaries {
        let number = if summary.current {
            format!("*{}", summary.index + 1)
        } else {
            (summary.index + 1).to_string()
        };
        let file = summary
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            number,
            summary.name.clone(),
            summary.programs.to_string(),
            if summary.dirty { "yes" } else { "no" }.to_string(),
            file,
        ]);
    }
    table.to_string()
}
