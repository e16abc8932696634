/*!
 * Active line and selected set tracking.
 *
 * This module provides:
 * - The controller and listener interfaces
 * - Shared listener bookkeeping for controller implementations
 * - The interactive grid controller and a do-nothing controller
 * - The line ordering interface consumed from the document
 */

pub mod controller;
pub mod dummy;
pub mod grid;
pub mod notifier;
pub mod sequence;

// Re-export main types
pub use controller::{LineRef, SelectionController, SelectionListener, SubtitleSelection};
pub use dummy::DummySelectionController;
pub use grid::{GridSelectionController, start_session};
pub use notifier::SelectionNotifier;
pub use sequence::LineSequence;
