/*!
 * Selection controller and listener interfaces.
 *
 * Two concepts are managed by a selection controller: the active line and
 * the selected set. There is one or zero active lines; the active line
 * controls which values the user is shown for editing. The selected set may
 * hold any number of lines and controls which lines an edit is applied to.
 * Usually the active line is a member of the selected set, but nothing here
 * enforces that.
 *
 * There is one controller per editing session, with several possible
 * implementations: the interactive grid, a scripted driver, a test harness,
 * or the do-nothing controller used before a document is loaded.
 */

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

/// Set of subtitle lines marked for manipulation
pub type SubtitleSelection<L> = HashSet<L>;

/// Requirements on a line handle
///
/// Handles are cheap, non-owning references to lines that live in a document
/// owned elsewhere. Equality is line identity.
pub trait LineRef: Clone + Eq + Hash + Debug + 'static {}

impl<T> LineRef for T where T: Clone + Eq + Hash + Debug + 'static {}

/// Observer of selection changes
///
/// Callbacks run synchronously on the thread that changed the selection and
/// may call back into the controller.
pub trait SelectionListener<L> {
    /// Called when the active line changes
    fn on_active_line_changed(&self, new_line: Option<&L>);

    /// Called when the selected set changes
    fn on_selected_set_changed(&self, new_selection: &SubtitleSelection<L>);
}

/// Controller of the active line and selected set of one editing session
pub trait SelectionController<L: LineRef> {
    /// Change the active line, or clear it with `None`
    ///
    /// Listeners are only notified if the active line actually changed.
    fn set_active_line(&self, new_line: Option<L>);

    /// The active line, if any
    fn active_line(&self) -> Option<L>;

    /// Replace the selected set
    ///
    /// The selected set either becomes exactly `new_selection` or is left
    /// untouched; partial changes never happen. When nothing changes no
    /// notification is sent, unless the controller is configured to announce
    /// every replacement.
    fn set_selected_set(&self, new_selection: SubtitleSelection<L>);

    /// A copy of the selected set
    fn selected_set(&self) -> SubtitleSelection<L>;

    /// Move the active line to the next line in sequence
    ///
    /// Does nothing when there is no next line. When the active line moves,
    /// the selected set is reset to contain exactly the new active line.
    fn next_line(&self);

    /// Move the active line to the previous line in sequence
    ///
    /// Mirror image of [`SelectionController::next_line`].
    fn prev_line(&self);

    /// Subscribe a listener; subscribing it again has no effect
    ///
    /// Only a weak reference is kept, so the caller decides how long the
    /// listener lives.
    fn add_selection_listener(&self, listener: &Rc<dyn SelectionListener<L>>);

    /// Unsubscribe a listener; unknown listeners are ignored
    fn remove_selection_listener(&self, listener: &Rc<dyn SelectionListener<L>>);
}
