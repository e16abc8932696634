use std::rc::Rc;

use super::controller::{LineRef, SelectionController, SelectionListener, SubtitleSelection};

/// Do-nothing selection controller, behaves as if editing an empty document
///
/// Useful as a placeholder before a real document is loaded. Listener
/// registration is accepted but nothing is ever announced.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummySelectionController;

impl DummySelectionController {
    pub fn new() -> Self {
        Self
    }
}

impl<L: LineRef> SelectionController<L> for DummySelectionController {
    fn set_active_line(&self, _new_line: Option<L>) {}

    fn active_line(&self) -> Option<L> {
        None
    }

    fn set_selected_set(&self, _new_selection: SubtitleSelection<L>) {}

    fn selected_set(&self) -> SubtitleSelection<L> {
        SubtitleSelection::new()
    }

    fn next_line(&self) {}

    fn prev_line(&self) {}

    fn add_selection_listener(&self, _listener: &Rc<dyn SelectionListener<L>>) {}

    fn remove_selection_listener(&self, _listener: &Rc<dyn SelectionListener<L>>) {}
}
