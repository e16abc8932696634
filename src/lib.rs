/*!
 * # subsel - Subtitle line selection tracking
 *
 * A Rust library that tracks which subtitle lines an editing session is
 * working on, and tells interested parts of an editor when that changes.
 *
 * ## Features
 *
 * - One active line (or none) for detail editing
 * - A selected set of lines for bulk manipulation
 * - Next/previous navigation over a document-defined line order
 * - Synchronous change notifications to registered listeners, safe against
 *   listeners that call back into the controller
 * - A do-nothing controller for sessions without a document
 * - A scripted driver for running sessions without a user interface
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `selection`: Controller and listener interfaces and implementations:
 *   - `selection::controller`: The controller and listener traits
 *   - `selection::notifier`: Listener bookkeeping shared by controllers
 *   - `selection::grid`: The interactive controller
 *   - `selection::dummy`: The do-nothing controller
 *   - `selection::sequence`: Line ordering supplied by the document
 * - `document`: Subtitle lines and their ordering
 * - `script`: Scripted driver for selection sessions
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod script;
pub mod selection;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{LineId, SubtitleCollection, SubtitleEntry};
pub use errors::{AppError, DocumentError, ScriptError, SelectionError};
pub use selection::{
    DummySelectionController, GridSelectionController, LineSequence, SelectionController,
    SelectionListener, SubtitleSelection,
};
