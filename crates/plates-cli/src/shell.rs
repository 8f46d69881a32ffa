//! Interactive session.
//!
//! Each input line is split with shlex and parsed by clap into a
//! [`ShellCommand`]. The session keeps the last selected plate so `tag`,
//! `untag`, `toggle`, `delete` and `edit` can act on it without naming it.
//! The registry starts empty; on exit it is written to the next free day file
//! when `auto_save` is on and there is something to save.
//!
//! All input, including answers to reset confirmations, is read through one
//! [`ShellIo`], so stdin is only ever read from a single place.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plates_core::error::SearchError;
use plates_core::{
    Command, CommandEffect, CommandEvent, OutputSink, Partition, PlateRef, Registry,
    ResolvedConfig, SearchStrategy, Selection, Snapshot, execute_command, store,
};

const SHELL_HELP: &str = "\
Commands (PLATE defaults to the current selection):
  insert PLATE             add to the untagged list
  select PLATE             make PLATE the current selection
  edit NEW [--plate OLD]   change a plate's value
  tag [PLATE]              move to the tagged list
  untag [PLATE]            move back to the untagged list
  toggle [PLATE]           tag or untag, whichever applies
  delete [PLATE]           remove a plate
  search TERM [--binary|--sequential]
  reset-all | reset-tagged
  list
  import PATH | export [PATH]
  help | quit";

#[derive(Parser, Debug)]
#[command(
    name = "plates",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Insert {
        plate: String,
    },
    Select {
        plate: String,
    },
    Edit {
        new_value: String,
        #[arg(long)]
        plate: Option<String>,
    },
    Tag {
        plate: Option<String>,
    },
    Untag {
        plate: Option<String>,
    },
    Toggle {
        plate: Option<String>,
    },
    Delete {
        plate: Option<String>,
    },
    Search {
        term: String,
        #[arg(long, conflicts_with = "sequential")]
        binary: bool,
        #[arg(long)]
        sequential: bool,
    },
    ResetAll,
    ResetTagged,
    List,
    Import {
        path: PathBuf,
    },
    Export {
        path: Option<PathBuf>,
    },
    Help,
    #[command(alias = "exit")]
    Quit,
}

/// Session input and output.
///
/// Rendering goes to `inner`. Confirmations are answered by the next line of
/// the same input the commands come from; end of input declines.
pub struct ShellIo<'a, R> {
    inner: &'a dyn OutputSink,
    input: RefCell<R>,
    interactive: bool,
}

impl<'a, R: BufRead> ShellIo<'a, R> {
    pub fn new(inner: &'a dyn OutputSink, input: R, interactive: bool) -> Self {
        Self {
            inner,
            input: RefCell::new(input),
            interactive,
        }
    }

    fn read_line(&self, buf: &mut String) -> io::Result<usize> {
        self.input.borrow_mut().read_line(buf)
    }
}

impl<R: BufRead> OutputSink for ShellIo<'_, R> {
    fn emit_event(&self, event: CommandEvent) {
        self.inner.emit_event(event);
    }

    fn emit_snapshot(&self, snapshot: &Snapshot) {
        self.inner.emit_snapshot(snapshot);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.interactive {
            eprint!("{} [y/N] ", prompt);
            io::stderr().flush().ok();
        }
        let mut answer = String::new();
        match self.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a> {
    registry: Registry,
    selection: Option<Selection>,
    config: &'a ResolvedConfig,
    output: &'a dyn OutputSink,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a ResolvedConfig, output: &'a dyn OutputSink) -> Self {
        Self {
            registry: Registry::new(),
            selection: None,
            config,
            output,
        }
    }

    /// The last selection, dropped first if it has gone stale.
    pub fn selection(&mut self) -> Option<&Selection> {
        if let Some(selection) = &self.selection
            && !self.registry.is_current(selection)
        {
            log::debug!("dropping stale selection {}", selection.plate);
            self.selection = None;
        }
        self.selection.as_ref()
    }

    fn target(&mut self, plate: Option<String>) -> PlateRef {
        match plate {
            Some(plate) => PlateRef::new(plate),
            // an empty plate is never current, so core reports no_selection
            None => self
                .selection()
                .cloned()
                .map(PlateRef::from)
                .unwrap_or_else(|| PlateRef::new("")),
        }
    }

    /// Runs a core command and tracks the selection it leaves behind.
    pub fn execute(&mut self, command: &Command) -> plates_core::Result<()> {
        let effect = execute_command(&mut self.registry, command, self.config, self.output)?;
        match effect {
            CommandEffect::Selected(selection) | CommandEffect::Changed(selection) => {
                self.selection = Some(selection)
            }
            CommandEffect::Cleared => self.selection = None,
            CommandEffect::Reset | CommandEffect::None => {}
        }
        Ok(())
    }

    /// Parses and runs one input line. Errors are reported, not returned.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let Some(words) = shlex::split(line) else {
            eprintln!("Error: unbalanced quotes");
            return Flow::Continue;
        };
        if words.is_empty() {
            return Flow::Continue;
        }
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{}", e.render());
                return Flow::Continue;
            }
        };
        match self.dispatch(parsed.command) {
            Ok(flow) => flow,
            Err(e) => {
                eprintln!("Error: {e}");
                Flow::Continue
            }
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> plates_core::Result<Flow> {
        let command = match command {
            ShellCommand::Help => {
                println!("{SHELL_HELP}");
                return Ok(Flow::Continue);
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
            ShellCommand::Select { plate } => {
                let selection = self
                    .registry
                    .select(&plate)
                    .ok_or(SearchError::NotFound(plate))?;
                println!("Selected {} ({})", selection.plate, selection.partition);
                self.selection = Some(selection);
                return Ok(Flow::Continue);
            }
            ShellCommand::Insert { plate } => Command::Insert { plate },
            ShellCommand::Edit { new_value, plate } => Command::Edit {
                target: self.target(plate),
                new_value,
            },
            ShellCommand::Tag { plate } => Command::Tag(self.target(plate)),
            ShellCommand::Untag { plate } => Command::Untag(self.target(plate)),
            ShellCommand::Toggle { plate } => {
                let target = self.target(plate);
                match target.resolve(&self.registry).partition {
                    Partition::Tagged => Command::Untag(target),
                    Partition::Untagged => Command::Tag(target),
                }
            }
            ShellCommand::Delete { plate } => Command::Delete(self.target(plate)),
            ShellCommand::Search {
                term,
                binary,
                sequential,
            } => Command::Search {
                term,
                strategy: if binary {
                    Some(SearchStrategy::Binary)
                } else if sequential {
                    Some(SearchStrategy::Sequential)
                } else {
                    None
                },
            },
            ShellCommand::ResetAll => Command::ResetAll,
            ShellCommand::ResetTagged => Command::ResetTagged,
            ShellCommand::List => Command::List,
            ShellCommand::Import { path } => Command::Import { path },
            ShellCommand::Export { path } => Command::Export { path },
        };
        self.execute(&command)?;
        Ok(Flow::Continue)
    }

    /// Ends the session, auto-saving when configured. Returns the file
    /// written, if any.
    pub fn finish(self) -> plates_core::Result<Option<PathBuf>> {
        if !self.config.auto_save {
            return Ok(None);
        }
        let saved = store::auto_save(&self.registry, &self.config.save_dir)?;
        if let Some(path) = &saved {
            self.output.emit_event(CommandEvent::Exported {
                path: path.clone(),
                count: self.registry.len(),
            });
        }
        Ok(saved)
    }
}

/// Reads lines from `shell_io` until `quit` or end of input, then finishes
/// the session. `session` should render through the same `shell_io`.
pub fn run<R: BufRead>(
    mut session: Session<'_>,
    shell_io: &ShellIo<'_, R>,
) -> plates_core::Result<Option<PathBuf>> {
    loop {
        if shell_io.interactive {
            eprint!("plates> ");
            io::stderr().flush().ok();
        }
        let mut line = String::new();
        if shell_io.read_line(&mut line)? == 0 {
            break;
        }
        if session.handle_line(&line) == Flow::Quit {
            break;
        }
    }
    session.finish()
}
