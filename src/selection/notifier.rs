/*!
 * Listener bookkeeping shared by selection controllers.
 *
 * Listeners are held as `Weak` references: a controller never keeps a
 * listener alive, and listeners dropped without being removed are pruned
 * lazily. Announcements iterate over a snapshot and no borrow is held while
 * a callback runs, so callbacks may add or remove listeners or change the
 * selection again.
 *
 * Each kind of announcement carries a revision number. When a callback
 * causes a newer announcement of the same kind, that one reaches every
 * listener and the older one stops, so no listener is left holding a
 * superseded value.
 */

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::trace;

use super::controller::{LineRef, SelectionListener, SubtitleSelection};

/// Set of selection listeners with announce-to-all helpers
pub struct SelectionNotifier<L> {
    listeners: RefCell<Vec<Weak<dyn SelectionListener<L>>>>,
    active_line_revision: Cell<u64>,
    selection_revision: Cell<u64>,
}

impl<L: LineRef> SelectionNotifier<L> {
    /// Create an empty listener set
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            active_line_revision: Cell::new(0),
            selection_revision: Cell::new(0),
        }
    }

    /// Register a listener, returning `false` if it was already registered
    pub fn add(&self, listener: &Rc<dyn SelectionListener<L>>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        // Dead entries go first so a new listener reusing a freed address is not
        // mistaken for one that is already registered.
        listeners.retain(|existing| existing.strong_count() > 0);

        let weak = Rc::downgrade(listener);
        if listeners.iter().any(|existing| Weak::ptr_eq(existing, &weak)) {
            trace!("Listener already registered");
            return false;
        }

        listeners.push(weak);
        true
    }

    /// Unregister a listener, returning `false` if it was not registered
    pub fn remove(&self, listener: &Rc<dyn SelectionListener<L>>) -> bool {
        let weak = Rc::downgrade(listener);
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|existing| existing.strong_count() > 0 && !Weak::ptr_eq(existing, &weak));
        listeners.len() != before
    }

    /// Whether a listener is currently registered
    pub fn contains(&self, listener: &Rc<dyn SelectionListener<L>>) -> bool {
        let weak = Rc::downgrade(listener);
        self.listeners
            .borrow()
            .iter()
            .any(|existing| Weak::ptr_eq(existing, &weak))
    }

    /// Number of live listeners
    pub fn len(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|existing| existing.strong_count() > 0)
            .count()
    }

    /// Whether no live listener is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `on_active_line_changed` on all listeners
    ///
    /// Stops early if a callback announces a newer active line.
    pub fn announce_active_line_changed(&self, new_line: Option<&L>) {
        self.for_each_listener(&self.active_line_revision, |listener| {
            listener.on_active_line_changed(new_line)
        });
    }

    /// Call `on_selected_set_changed` on all listeners
    ///
    /// Stops early if a callback announces a newer selected set.
    pub fn announce_selected_set_changed(&self, new_selection: &SubtitleSelection<L>) {
        self.for_each_listener(&self.selection_revision, |listener| {
            listener.on_selected_set_changed(new_selection)
        });
    }

    fn snapshot(&self) -> Vec<Rc<dyn SelectionListener<L>>> {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|existing| existing.strong_count() > 0);
        listeners.iter().filter_map(Weak::upgrade).collect()
    }

    fn for_each_listener(&self, revision: &Cell<u64>, mut notify: impl FnMut(&dyn SelectionListener<L>)) {
        let current = revision.get().wrapping_add(1);
        revision.set(current);

        let snapshot = self.snapshot();
        trace!("Announcing revision {} to {} listener(s)", current, snapshot.len());
        for listener in &snapshot {
            if revision.get() != current {
                trace!("Revision {} superseded during announcement", current);
                break;
            }
            // Removed by an earlier callback of this same announcement
            if !self.contains(listener) {
                continue;
            }
            notify(listener.as_ref());
        }
    }
}

impl<L: LineRef> Default for SelectionNotifier<L> {
    fn default() -> Self {
        Self::new()
    }
}
