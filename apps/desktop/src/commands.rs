//! Line commands typed at the prompt. Rows are numbered from 1 on screen.

use client_core::CellEdit;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  add [name]                    append a step
  type <row> <field> <value>    type into a cell without committing
  set <row> <field> <value>     type into a cell and commit the row
  commit <row>                  commit a row's typed values
  rm <row>                      remove a step
  clear                         remove every step
  show                          redraw the table, results and chat
  analyze                       submit the process for analysis
  predict <row>                 ask for one step's predicted wait
  chat <message>                talk to the assistant
  help | quit
fields: name, cycle, cost, va (yes/no), deps (comma separated)";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Option<String>),
    Edit {
        index: usize,
        edit: CellEdit,
        commit: bool,
    },
    Commit(usize),
    Remove(usize),
    Clear,
    Show,
    Analyze,
    Predict(usize),
    Chat(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),
    #[error("'{0}' needs a row number")]
    MissingRow(&'static str),
    #[error("'{0}' is not a row number")]
    BadRow(String),
    #[error("unknown field '{0}' (name, cycle, cost, va, deps)")]
    UnknownField(String),
    #[error("missing field name")]
    MissingField,
}

pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = split_word(line);

    let command = match verb {
        "add" => Command::Add((!rest.is_empty()).then(|| rest.to_string())),
        "type" | "set" => {
            let (row, rest) = split_word(rest);
            let index = parse_row(verb_name(verb), row)?;
            let (field, value) = split_word(rest);
            Command::Edit {
                index,
                edit: parse_edit(field, value)?,
                commit: verb == "set",
            }
        }
        "commit" => Command::Commit(parse_row("commit", rest)?),
        "rm" | "remove" => Command::Remove(parse_row("rm", rest)?),
        "predict" => Command::Predict(parse_row("predict", rest)?),
        "clear" => Command::Clear,
        "show" => Command::Show,
        "analyze" => Command::Analyze,
        // Blank messages are passed through; the chat client drops them.
        "chat" => Command::Chat(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn verb_name(verb: &str) -> &'static str {
    if verb == "set" {
        "set"
    } else {
        "type"
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn parse_row(verb: &'static str, raw: &str) -> Result<usize, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingRow(verb));
    }
    match raw.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(ParseError::BadRow(raw.to_string())),
    }
}

fn parse_edit(field: &str, value: &str) -> Result<CellEdit, ParseError> {
    let value = value.to_string();
    let edit = match field {
        "" => return Err(ParseError::MissingField),
        "name" => CellEdit::Name(value),
        "cycle" | "cycle_time" => CellEdit::CycleTime(value),
        "cost" => CellEdit::Cost(value),
        "va" | "value_added" => CellEdit::ValueAdded(matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1" | "on"
        )),
        "deps" | "depends_on" => CellEdit::DependsOn(value),
        other => return Err(ParseError::UnknownField(other.to_string())),
    };
    Ok(edit)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
