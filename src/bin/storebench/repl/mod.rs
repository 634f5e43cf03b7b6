mod history;

use anyhow::{Result, anyhow};
use log::warn;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use storebench::core::workload::parse_count;
use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::utils::error::CliError;
use self::history::History;

const HISTORY_SIZE: usize = 1000;

/// What the loop does after a line
enum Flow {
    Continue,
    Exit,
}

/// Interactive shell
pub struct Repl {
    context: Context,
    editor: DefaultEditor,
    history: History,
}

impl Repl {
    pub fn new(context: Context) -> Result<Self> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| anyhow!("Failed to create line editor: {}", e))?;

        let mut history = History::new(context.history_path(), HISTORY_SIZE);
        if let Err(e) = history.load() {
            warn!("Could not load history: {}", e);
        }

        for cmd in history.get_all() {
            let _ = editor.add_history_entry(cmd.as_str());
        }

        Ok(Repl {
            context,
            editor,
            history,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.context.formatter().format_info("storebench interactive mode"));
        println!("{}", self.context.formatter().format_info("Type .help for help or .exit to quit"));

        loop {
            let prompt = format!("storebench [{}]> ", self.context.selected_count());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.history.add(&line);

                    match self.process_line(line.trim()) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => println!("{}", self.context.formatter().format_error(&e.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted (Ctrl-C)");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("{}", self.context.formatter().format_error(&format!("Error: {}", err)));
                    break;
                }
            }
        }

        self.history.save()?;

        Ok(())
    }

    fn process_line(&mut self, line: &str) -> Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        if let Some(special) = line.strip_prefix('.') {
            return self.process_special_command(special);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "write" => {
                let count = match parts.get(1) {
                    Some(arg) => parse_count(arg)?,
                    None => self.context.selected_count(),
                };
                commands::write::execute(&mut self.context, count)?;
            }
            "read" => commands::read::execute(&mut self.context)?,
            "clear" => {
                let yes = parts.get(1).map_or(false, |arg| *arg == "--yes" || *arg == "-y");
                commands::clear::execute(&mut self.context, yes)?;
            }
            "status" => commands::status::execute(&mut self.context)?,
            other => return Err(CliError::UnknownCommand(other.to_string()).into()),
        }

        Ok(Flow::Continue)
    }

    fn process_special_command(&mut self, cmd: &str) -> Result<Flow> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        match parts.first().copied().unwrap_or("") {
            "help" => self.print_help(),
            "exit" | "quit" => {
                println!("Bye!");
                return Ok(Flow::Exit);
            }
            "count" => {
                let Some(arg) = parts.get(1) else {
                    println!("{}", self.context.formatter().format_info(&format!("Item count: {}", self.context.selected_count())));
                    return Ok(Flow::Continue);
                };

                let count = parse_count(arg)?;
                self.context.set_selected_count(count);
                println!("{}", self.context.formatter().format_success(&format!("Item count set to {}", count)));
            }
            "format" => {
                let format = match parts.get(1).copied() {
                    Some("text") => OutputFormat::Text,
                    Some("json") => OutputFormat::Json,
                    Some("table") => OutputFormat::Table,
                    Some(other) => return Err(anyhow!("Unknown format: {}", other)),
                    None => return Err(CliError::Usage(".format <text|json|table>".to_string()).into()),
                };

                self.context.set_format(format);
                println!("{}", self.context.formatter().format_success(&format!("Format set to {}", parts[1])));
            }
            "history" => {
                let commands = match parts.get(1) {
                    Some(pattern) => self.history.search(pattern),
                    None => self.history.get_all().to_vec(),
                };

                if commands.is_empty() {
                    println!("No commands in history.");
                } else {
                    for (i, cmd) in commands.iter().enumerate() {
                        println!("{}: {}", i + 1, cmd);
                    }
                }
            }
            _ => return Err(CliError::UnknownCommand(format!(".{}", cmd)).into()),
        }

        Ok(Flow::Continue)
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  write [count]             Write test: time writing items to both stores");
        println!("  read                      Read test: time reading back the last write run");
        println!("  clear [--yes]             Delete all test data from both stores");
        println!("  status                    Show whether test data is present");
        println!();
        println!("  .count [count]            Show or set the default item count (100, 500, 1K, 5K)");
        println!("  .format <text|json|table> Set the output format");
        println!("  .history [pattern]        Show command history");
        println!("  .help                     Show this help");
        println!("  .exit, .quit              Leave the shell");
        if self.context.verbosity() > 0 {
            println!();
            println!("Logging at verbosity {}; RUST_LOG overrides it.", self.context.verbosity());
        }
    }
}
