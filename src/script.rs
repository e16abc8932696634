/*!
 * Scripted selection driver.
 *
 * Runs a plain-text script of selection commands against any
 * [`SelectionController`], which makes it possible to drive a session
 * without a user interface. One command per line:
 *
 * - `active <n>` / `active none`: change the active line
 * - `select <list>` / `select none`: replace the selected set, where the list
 *   is comma separated positions or ranges such as `1,4-6`
 * - `next` / `prev`: move the active line
 * - `show`: print the current state
 * - `reset`: return to the session start state
 *
 * Positions are 1-based line numbers in the document. Everything after `#`
 * is a comment.
 */

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io::Write;
use std::ops::RangeInclusive;
use std::rc::Rc;

use anyhow::Result;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::InitialActiveLine;
use crate::document::{LineId, SubtitleCollection};
use crate::errors::ScriptError;
use crate::selection::{LineSequence, SelectionController, SelectionListener, SubtitleSelection, start_session};

// @const: Command verb with optional argument
static COMMAND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<verb>[a-z]+)(?:\s+(?P<arg>\S.*))?$").expect("valid command regex")
});

// @const: Single position or inclusive range
static RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<from>\d+)(?:-(?P<to>\d+))?$").expect("valid range regex")
});

/// Output shared between the script runner and its listeners
pub type SharedSink<W> = Rc<RefCell<W>>;

/// One parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Set or clear the active line (1-based position)
    Active(Option<usize>),
    /// Replace the selected set (inclusive 1-based position ranges, empty
    /// clears it)
    Select(Vec<RangeInclusive<usize>>),
    /// Move to the next line
    Next,
    /// Move to the previous line
    Prev,
    /// Print the current state
    Show,
    /// Return to the session start state
    Reset,
}

impl ScriptCommand {
    /// Parse one script line, returning `None` for blank and comment lines
    pub fn parse(line_number: usize, text: &str) -> Result<Option<Self>, ScriptError> {
        let content = text.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            return Ok(None);
        }

        let parse_error = |message: String| ScriptError::Parse {
            line: line_number,
            message,
        };

        let caps = COMMAND_REGEX
            .captures(content)
            .ok_or_else(|| parse_error(format!("malformed command '{}'", content)))?;
        let verb = &caps["verb"];
        let arg = caps.name("arg").map(|m| m.as_str().trim());

        let command = match (verb, arg) {
            ("active", Some("none")) => Self::Active(None),
            ("active", Some(position)) => {
                let ranges = parse_positions(position).map_err(parse_error)?;
                match ranges.as_slice() {
                    [single] if single.start() == single.end() => Self::Active(Some(*single.start())),
                    _ => return Err(parse_error(format!("'active' takes one position, got '{}'", position))),
                }
            }
            ("select", Some("none")) => Self::Select(Vec::new()),
            ("select", Some(list)) => Self::Select(parse_positions(list).map_err(parse_error)?),
            ("next", None) => Self::Next,
            ("prev", None) => Self::Prev,
            ("show", None) => Self::Show,
            ("reset", None) => Self::Reset,
            ("active" | "select", None) => {
                return Err(parse_error(format!("'{}' needs an argument", verb)));
            }
            ("next" | "prev" | "show" | "reset", Some(extra)) => {
                return Err(parse_error(format!("'{}' takes no argument, got '{}'", verb, extra)));
            }
            _ => return Err(parse_error(format!("unknown command '{}'", verb))),
        };

        Ok(Some(command))
    }
}

/// Parse `1,4-6` style position lists into ranges
///
/// Ranges stay unexpanded until they have been checked against a document.
fn parse_positions(list: &str) -> Result<Vec<RangeInclusive<usize>>, String> {
    let mut ranges = Vec::new();

    for part in list.split(',').map(str::trim) {
        let caps = RANGE_REGEX
            .captures(part)
            .ok_or_else(|| format!("invalid position '{}'", part))?;
        let from: usize = caps["from"]
            .parse()
            .map_err(|_| format!("position '{}' is too large", &caps["from"]))?;
        let to: usize = match caps.name("to") {
            Some(to) => to
                .as_str()
                .parse()
                .map_err(|_| format!("position '{}' is too large", to.as_str()))?,
            None => from,
        };

        if from == 0 {
            return Err("positions start at 1".to_string());
        }
        if to < from {
            return Err(format!("range '{}' is reversed", part));
        }

        ranges.push(from..=to);
    }

    Ok(ranges)
}

/// Parse a whole script
pub fn parse_script(script: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in script.lines().enumerate() {
        if let Some(command) = ScriptCommand::parse(index + 1, line)? {
            commands.push(command);
        }
    }
    debug!("Parsed {} script commands", commands.len());
    Ok(commands)
}

/// Format a selection as sorted 1-based positions, e.g. `{1, 3}`
pub fn describe_selection(document: &SubtitleCollection, selection: &SubtitleSelection<LineId>) -> String {
    let mut known = BTreeSet::new();
    let mut unknown = BTreeSet::new();
    for id in selection {
        match document.position(*id) {
            Some(position) => {
                known.insert(position + 1);
            }
            None => {
                unknown.insert(*id);
            }
        }
    }

    let parts: Vec<String> = known
        .iter()
        .map(|position| position.to_string())
        .chain(unknown.iter().map(|id| id.to_string()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

fn describe_line(document: &SubtitleCollection, line: Option<&LineId>) -> String {
    match line {
        Some(id) => match document.position(*id) {
            Some(position) => (position + 1).to_string(),
            None => id.to_string(),
        },
        None => "none".to_string(),
    }
}

/// Listener that writes every notification to a sink
pub struct NotificationPrinter<W: Write> {
    out: SharedSink<W>,
    document: Rc<SubtitleCollection>,
}

impl<W: Write> NotificationPrinter<W> {
    pub fn new(out: SharedSink<W>, document: Rc<SubtitleCollection>) -> Self {
        Self { out, document }
    }

    fn emit(&self, message: String) {
        if let Err(e) = writeln!(self.out.borrow_mut(), "{}", message) {
            warn!("Failed to write notification: {}", e);
        }
    }
}

impl<W: Write> SelectionListener<LineId> for NotificationPrinter<W> {
    fn on_active_line_changed(&self, new_line: Option<&LineId>) {
        self.emit(format!("active line changed: {}", describe_line(&self.document, new_line)));
    }

    fn on_selected_set_changed(&self, new_selection: &SubtitleSelection<LineId>) {
        self.emit(format!(
            "selected set changed: {}",
            describe_selection(&self.document, new_selection)
        ));
    }
}

/// Applies script commands to a selection controller
pub struct ScriptRunner<'a, W: Write> {
    controller: &'a dyn SelectionController<LineId>,
    document: Rc<SubtitleCollection>,
    initial_active_line: InitialActiveLine,
    out: SharedSink<W>,
}

impl<'a, W: Write> ScriptRunner<'a, W> {
    pub fn new(
        controller: &'a dyn SelectionController<LineId>,
        document: Rc<SubtitleCollection>,
        initial_active_line: InitialActiveLine,
        out: SharedSink<W>,
    ) -> Self {
        Self {
            controller,
            document,
            initial_active_line,
            out,
        }
    }

    /// Put the controller in its session start state
    pub fn start_session(&self) {
        start_session(self.controller, self.document.first_line(), self.initial_active_line);
    }

    fn resolve(&self, position: usize) -> Result<LineId, ScriptError> {
        position
            .checked_sub(1)
            .and_then(|index| self.document.line_at(index))
            .ok_or(ScriptError::PositionOutOfRange {
                position,
                len: self.document.len(),
            })
    }

    /// Apply a single command
    pub fn apply(&self, command: &ScriptCommand) -> Result<()> {
        debug!("Applying {:?}", command);
        match command {
            ScriptCommand::Active(position) => {
                let line = position.map(|p| self.resolve(p)).transpose()?;
                self.controller.set_active_line(line);
            }
            ScriptCommand::Select(ranges) => {
                // Check every range first so a bad position leaves the set untouched
                let len = self.document.len();
                if let Some(range) = ranges.iter().find(|range| *range.end() > len) {
                    return Err(ScriptError::PositionOutOfRange {
                        position: *range.end(),
                        len,
                    }
                    .into());
                }

                let selection = ranges
                    .iter()
                    .flat_map(|range| range.clone())
                    .map(|p| self.resolve(p))
                    .collect::<Result<SubtitleSelection<LineId>, _>>()?;
                self.controller.set_selected_set(selection);
            }
            ScriptCommand::Next => self.controller.next_line(),
            ScriptCommand::Prev => self.controller.prev_line(),
            ScriptCommand::Show => {
                let active = self.controller.active_line();
                let selection = self.controller.selected_set();
                writeln!(
                    self.out.borrow_mut(),
                    "active: {}, selected: {}",
                    describe_line(&self.document, active.as_ref()),
                    describe_selection(&self.document, &selection)
                )?;
            }
            ScriptCommand::Reset => self.start_session(),
        }
        Ok(())
    }

    /// Apply commands in order, stopping at the first failure
    pub fn run(&self, commands: &[ScriptCommand]) -> Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }
}
