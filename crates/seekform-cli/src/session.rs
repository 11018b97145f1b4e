//! Line-oriented form session.
//!
//! A session is a thin adapter over [`QueryState`]: each input line is parsed
//! into a [`Command`], edits become [`Event`]s, and after every change the
//! compiled query is written back out.
//!
//! ```text
//! add include|exclude
//! remove include|exclude INDEX
//! field include|exclude INDEX FIELD
//! keyword include|exclude INDEX [TEXT...]
//! combinator and|or
//! reset | show | query | fields | help | quit
//! ```

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::{debug, warn};

use seekform::{ClauseKind, Combinator, Event, FieldSet, Outcome, QueryState};

use crate::config::Config;
use crate::error::CliError;
use crate::output::{render_form, render_query, OutputMode};

const PROMPT: &str = "seekform> ";

const HELP: &str = "\
commands:
  add include|exclude                     append a blank row
  remove include|exclude INDEX            remove a row
  field include|exclude INDEX FIELD       choose a row's field
  keyword include|exclude INDEX [TEXT]    set (or clear) a row's keyword
  combinator and|or                       choose how include rows combine
  reset                                   start over with a blank form
  show                                    list every row
  query                                   print the compiled query
  fields                                  list searchable fields
  quit                                    leave the session";

/// Abstraction over terminal I/O for testability.
pub trait TerminalIO {
    /// Check if stdin is a terminal.
    fn is_terminal(&self) -> bool;

    /// Write a prompt without a trailing newline.
    fn write_prompt(&self, prompt: &str) -> io::Result<()>;

    /// Write one line of output.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Read a line from stdin. An empty string means end of input.
    fn read_line(&self) -> io::Result<String>;
}

/// Real terminal I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealTerminal;

impl TerminalIO for RealTerminal {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn write_prompt(&self, prompt: &str) -> io::Result<()> {
        print!("{}", prompt);
        io::stdout().flush()
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)
    }

    fn read_line(&self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// A parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change the form.
    Edit(Event),
    Show,
    Query,
    Fields,
    Help,
    Quit,
}

/// Splits off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

fn parse_kind(word: &str) -> Result<ClauseKind, CliError> {
    if word.is_empty() {
        return Err(CliError::command("expected include or exclude"));
    }
    Ok(word.parse()?)
}

fn parse_index(word: &str) -> Result<usize, CliError> {
    word.parse()
        .map_err(|_| CliError::command(format!("expected a row index, got '{}'", word)))
}

fn expect_end(rest: &str, usage: &str) -> Result<(), CliError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(CliError::command(format!("usage: {}", usage)))
    }
}

/// Parses one input line. Blank lines yield `None`.
///
/// Field names are checked against `fields`; everything else about the
/// form is left to the model.
pub fn parse_command(line: &str, fields: &FieldSet) -> Result<Option<Command>, CliError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = next_word(line);
    let command = match verb.to_ascii_lowercase().as_str() {
        "add" | "append" => {
            let (kind, rest) = next_word(rest);
            expect_end(rest, "add include|exclude")?;
            Command::Edit(Event::Append(parse_kind(kind)?))
        }
        "remove" | "rm" => {
            let (kind, rest) = next_word(rest);
            let (index, rest) = next_word(rest);
            expect_end(rest, "remove include|exclude INDEX")?;
            Command::Edit(Event::Remove {
                kind: parse_kind(kind)?,
                index: parse_index(index)?,
            })
        }
        "field" => {
            let (kind, rest) = next_word(rest);
            let (index, rest) = next_word(rest);
            let (field, rest) = next_word(rest);
            let usage = "field include|exclude INDEX FIELD";
            expect_end(rest, usage)?;
            let kind = parse_kind(kind)?;
            let index = parse_index(index)?;
            if field.is_empty() {
                return Err(CliError::command(format!("usage: {}", usage)));
            }
            fields.validate(field)?;
            Command::Edit(Event::SetField {
                kind,
                index,
                field: field.to_string(),
            })
        }
        "keyword" | "kw" => {
            let (kind, rest) = next_word(rest);
            let (index, keyword) = next_word(rest);
            Command::Edit(Event::SetKeyword {
                kind: parse_kind(kind)?,
                index: parse_index(index)?,
                keyword: keyword.to_string(),
            })
        }
        "combinator" | "op" => {
            let (token, rest) = next_word(rest);
            expect_end(rest, "combinator and|or")?;
            Command::Edit(Event::SetCombinator(token.parse::<Combinator>()?))
        }
        "reset" => Command::Edit(Event::Reset),
        "show" => Command::Show,
        "query" => Command::Query,
        "fields" => Command::Fields,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CliError::command(format!("unknown command '{}'", other))),
    };
    Ok(Some(command))
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Keep reading; print this output, if any.
    Continue(Option<String>),
    Quit,
}

/// A running form session.
pub struct Session {
    form: QueryState,
    config: Config,
    mode: OutputMode,
}

impl Session {
    pub fn new(config: Config, mode: OutputMode) -> Self {
        Session {
            form: config.new_form(),
            config,
            mode,
        }
    }

    pub fn form(&self) -> &QueryState {
        &self.form
    }

    /// Runs one command against the form.
    pub fn execute(&mut self, command: Command) -> Result<Step, CliError> {
        let output = match command {
            Command::Edit(event) => {
                debug!(?event, "session event");
                match self.form.apply(event) {
                    Outcome::Changed => render_query(&self.form.view(), self.mode)?,
                    Outcome::Unchanged => "(no change)".to_string(),
                }
            }
            Command::Show => render_form(&self.form.view(), self.mode)?,
            Command::Query => render_query(&self.form.view(), self.mode)?,
            Command::Fields => self.config.fields.fields().join(" "),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Step::Quit),
        };
        Ok(Step::Continue(Some(output)))
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Bad lines are reported and skipped; only terminal failures end the
    /// session early.
    pub fn run<T: TerminalIO>(&mut self, terminal: &T) -> Result<(), CliError> {
        let interactive = terminal.is_terminal();
        loop {
            if interactive {
                terminal.write_prompt(PROMPT)?;
            }
            let line = terminal.read_line()?;
            if line.is_empty() {
                break;
            }

            let step = match parse_command(&line, &self.config.fields) {
                Ok(Some(command)) => self.execute(command),
                Ok(None) => Ok(Step::Continue(None)),
                Err(e) => Err(e),
            };

            match step {
                Ok(Step::Continue(Some(output))) => terminal.write_line(&output)?,
                Ok(Step::Continue(None)) => {}
                Ok(Step::Quit) => break,
                Err(e @ CliError::Io(_)) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "session command rejected");
                    terminal.write_line(&format!("error: {}", e))?;
                }
            }
        }
        debug!(query = self.form.compiled_query(), "session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted terminal for tests.
    struct MockTerminal {
        input: RefCell<VecDeque<String>>,
        output: RefCell<Vec<String>>,
        tty: bool,
    }

    impl MockTerminal {
        fn new(lines: &[&str]) -> Self {
            MockTerminal {
                input: RefCell::new(lines.iter().map(|l| format!("{}\n", l)).collect()),
                output: RefCell::new(Vec::new()),
                tty: false,
            }
        }

        fn output(&self) -> Vec<String> {
            self.output.borrow().clone()
        }
    }

    impl TerminalIO for MockTerminal {
        fn is_terminal(&self) -> bool {
            self.tty
        }

        fn write_prompt(&self, prompt: &str) -> io::Result<()> {
            self.output.borrow_mut().push(prompt.to_string());
            Ok(())
        }

        fn write_line(&self, line: &str) -> io::Result<()> {
            self.output.borrow_mut().push(line.to_string());
            Ok(())
        }

        fn read_line(&self) -> io::Result<String> {
            Ok(self.input.borrow_mut().pop_front().unwrap_or_default())
        }
    }

    fn fields() -> FieldSet {
        FieldSet::new(["title", "author", "tag"]).unwrap()
    }

    fn parse(line: &str) -> Result<Option<Command>, CliError> {
        parse_command(line, &fields())
    }

    #[test]
    fn parses_structural_commands() {
        assert_eq!(
            parse("add exclude").unwrap(),
            Some(Command::Edit(Event::Append(ClauseKind::Exclude)))
        );
        assert_eq!(
            parse("rm include 2").unwrap(),
            Some(Command::Edit(Event::Remove {
                kind: ClauseKind::Include,
                index: 2
            }))
        );
    }

    #[test]
    fn keyword_keeps_inner_spacing() {
        assert_eq!(
            parse("keyword include 0 big  cats").unwrap(),
            Some(Command::Edit(Event::SetKeyword {
                kind: ClauseKind::Include,
                index: 0,
                keyword: "big  cats".into()
            }))
        );
    }

    #[test]
    fn keyword_without_text_clears() {
        assert_eq!(
            parse("kw exclude 1").unwrap(),
            Some(Command::Edit(Event::SetKeyword {
                kind: ClauseKind::Exclude,
                index: 1,
                keyword: String::new()
            }))
        );
    }

    #[test]
    fn field_must_be_known() {
        assert!(matches!(
            parse("field include 0 author").unwrap(),
            Some(Command::Edit(Event::SetField { .. }))
        ));
        assert!(matches!(parse("field include 0 body"), Err(CliError::Form(_))));
    }

    #[test]
    fn field_without_name_reports_usage() {
        let err = parse("field include 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid command: usage: field include|exclude INDEX FIELD"
        );
        assert!(matches!(
            parse("field include x author"),
            Err(CliError::InvalidCommand(_))
        ));
    }

    #[test]
    fn combinator_parsing() {
        assert_eq!(
            parse("op or").unwrap(),
            Some(Command::Edit(Event::SetCombinator(Combinator::Or)))
        );
        assert!(parse("combinator xor").is_err());
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("# note").unwrap(), None);
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(matches!(parse("frobnicate"), Err(CliError::InvalidCommand(_))));
        assert!(matches!(parse("remove include x"), Err(CliError::InvalidCommand(_))));
        assert!(matches!(parse("add"), Err(CliError::InvalidCommand(_))));
        assert!(matches!(parse("add include now"), Err(CliError::InvalidCommand(_))));
        assert!(matches!(parse("add sideways"), Err(CliError::Form(_))));
    }

    #[test]
    fn scripted_session() {
        let config = Config {
            fields: fields(),
            ..Config::default()
        };
        let mut session = Session::new(config, OutputMode::Text);
        let terminal = MockTerminal::new(&[
            "keyword include 0 x",
            "add include",
            "keyword include 1 y",
            "remove include 0",
            "remove include 0",
            "bogus",
            "quit",
            "keyword include 0 never read",
        ]);

        session.run(&terminal).unwrap();

        assert_eq!(
            terminal.output(),
            vec![
                "title:x".to_string(),
                "title:x".to_string(),
                "title:x AND title:y".to_string(),
                "title:y".to_string(),
                "(no change)".to_string(),
                "error: Invalid command: unknown command 'bogus'".to_string(),
            ]
        );
        assert_eq!(session.form().compiled_query(), "title:y");
        assert_eq!(session.form().include().rows()[0].index, 0);
    }

    #[test]
    fn interactive_session_prompts() {
        let mut session = Session::new(Config::default(), OutputMode::Text);
        let mut terminal = MockTerminal::new(&["query"]);
        terminal.tty = true;
        session.run(&terminal).unwrap();
        assert_eq!(
            terminal.output(),
            vec![PROMPT.to_string(), String::new(), PROMPT.to_string()]
        );
    }

    #[test]
    fn fields_and_help() {
        let mut session = Session::new(Config::default(), OutputMode::Text);
        assert_eq!(
            session.execute(Command::Fields).unwrap(),
            Step::Continue(Some("text subject from to msgid".into()))
        );
        assert!(matches!(
            session.execute(Command::Help).unwrap(),
            Step::Continue(Some(ref text)) if text.starts_with("commands:")
        ));
        assert_eq!(session.execute(Command::Quit).unwrap(), Step::Quit);
    }
}
