/*!
 * Interactive selection controller.
 *
 * Tracks the active line and selected set of one editing session on top of
 * a document-supplied [`LineSequence`]. State lives in `RefCell`s so every
 * operation takes `&self`; borrows are released before listeners are
 * notified, which lets callbacks call straight back into the controller.
 */

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace, warn};

use super::controller::{LineRef, SelectionController, SelectionListener, SubtitleSelection};
use super::notifier::SelectionNotifier;
use super::sequence::LineSequence;
use crate::app_config::{InitialActiveLine, NotifyPolicy, SelectionConfig};
use crate::errors::SelectionError;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Prev,
}

/// Selection controller backing the subtitle grid
pub struct GridSelectionController<L, S> {
    lines: S,
    active_line: RefCell<Option<L>>,
    selection: RefCell<SubtitleSelection<L>>,
    notifier: SelectionNotifier<L>,
    config: SelectionConfig,
}

impl<L: LineRef, S: LineSequence<L>> GridSelectionController<L, S> {
    /// Create a controller with default settings and an empty selection
    pub fn new(lines: S) -> Self {
        Self::with_config(lines, SelectionConfig::default())
    }

    /// Create a controller with explicit settings and an empty selection
    pub fn with_config(lines: S, config: SelectionConfig) -> Self {
        Self {
            lines,
            active_line: RefCell::new(None),
            selection: RefCell::new(SubtitleSelection::new()),
            notifier: SelectionNotifier::new(),
            config,
        }
    }

    /// The line ordering this controller navigates
    pub fn lines(&self) -> &S {
        &self.lines
    }

    /// Settings in effect
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }

    fn check_line(&self, line: &L) -> Result<(), SelectionError> {
        if self.config.validate_lines && !self.lines.contains_line(line) {
            return Err(SelectionError::UnknownLine(format!("{:?}", line)));
        }
        Ok(())
    }

    /// Change the active line, refusing lines outside the document when
    /// line validation is enabled
    ///
    /// Returns whether the active line changed.
    pub fn try_set_active_line(&self, new_line: Option<L>) -> Result<bool, SelectionError> {
        if let Some(line) = &new_line {
            self.check_line(line)?;
        }

        if !self.replace_active_line(new_line.clone()) {
            return Ok(false);
        }

        self.notifier.announce_active_line_changed(new_line.as_ref());
        Ok(true)
    }

    /// Replace the selected set, refusing the whole set if any member is
    /// outside the document when line validation is enabled
    ///
    /// Returns whether listeners were notified.
    pub fn try_set_selected_set(&self, new_selection: SubtitleSelection<L>) -> Result<bool, SelectionError> {
        if self.config.validate_lines {
            if let Some(line) = self.lines.first_unknown_line(&new_selection) {
                return Err(SelectionError::UnknownLine(format!("{:?}", line)));
            }
        }

        Ok(self.replace_selection(new_selection))
    }

    /// Put the controller in its session start state
    pub fn reset_session(&self) {
        start_session(self, self.lines.first_line(), self.config.initial_active_line);
    }

    fn replace_active_line(&self, new_line: Option<L>) -> bool {
        let mut active_line = self.active_line.borrow_mut();
        if *active_line == new_line {
            trace!("Active line unchanged: {:?}", new_line);
            return false;
        }

        debug!("Active line changed: {:?} -> {:?}", *active_line, new_line);
        *active_line = new_line;
        true
    }

    fn replace_selection(&self, new_selection: SubtitleSelection<L>) -> bool {
        {
            let mut selection = self.selection.borrow_mut();
            if *selection == new_selection && self.config.selected_set_notify == NotifyPolicy::OnChange {
                trace!("Selected set unchanged ({} lines)", new_selection.len());
                return false;
            }

            debug!("Selected set replaced: {} -> {} lines", selection.len(), new_selection.len());
            *selection = new_selection.clone();
        }

        self.notifier.announce_selected_set_changed(&new_selection);
        true
    }

    fn step(&self, direction: Direction) {
        let Some(current) = self.active_line() else {
            trace!("No active line to move from ({:?})", direction);
            return;
        };

        let target = match direction {
            Direction::Next => self.lines.line_after(&current),
            Direction::Prev => self.lines.line_before(&current),
        };
        let Some(target) = target else {
            trace!("No line {:?} of {:?}", direction, current);
            return;
        };

        if !self.replace_active_line(Some(target.clone())) {
            return;
        }
        self.notifier.announce_active_line_changed(Some(&target));

        // A listener moved the active line again; that nested change already
        // reset the selection to match.
        if self.active_line.borrow().as_ref() != Some(&target) {
            debug!("Active line moved during notification, keeping nested selection");
            return;
        }

        self.replace_selection(SubtitleSelection::from([target]));
    }
}

/// Apply the session start state to any controller
///
/// With [`InitialActiveLine::First`] the first line becomes active and the
/// only selected line; otherwise both are cleared. An empty document always
/// ends up with no active line.
pub fn start_session<L, C>(controller: &C, first_line: Option<L>, initial: InitialActiveLine)
where
    L: LineRef,
    C: SelectionController<L> + ?Sized,
{
    let active = match initial {
        InitialActiveLine::First => first_line,
        InitialActiveLine::None => None,
    };
    debug!("Starting session with active line {:?}", active);

    let selection: SubtitleSelection<L> = active.iter().cloned().collect();
    controller.set_active_line(active);
    controller.set_selected_set(selection);
}

impl<L: LineRef, S: LineSequence<L>> SelectionController<L> for GridSelectionController<L, S> {
    fn set_active_line(&self, new_line: Option<L>) {
        if let Err(e) = self.try_set_active_line(new_line) {
            warn!("Active line not changed: {}", e);
        }
    }

    fn active_line(&self) -> Option<L> {
        self.active_line.borrow().clone()
    }

    fn set_selected_set(&self, new_selection: SubtitleSelection<L>) {
        if let Err(e) = self.try_set_selected_set(new_selection) {
            warn!("Selected set not changed: {}", e);
        }
    }

    fn selected_set(&self) -> SubtitleSelection<L> {
        self.selection.borrow().clone()
    }

    fn next_line(&self) {
        self.step(Direction::Next);
    }

    fn prev_line(&self) {
        self.step(Direction::Prev);
    }

    fn add_selection_listener(&self, listener: &Rc<dyn SelectionListener<L>>) {
        self.notifier.add(listener);
    }

    fn remove_selection_listener(&self, listener: &Rc<dyn SelectionListener<L>>) {
        self.notifier.remove(listener);
    }
}
