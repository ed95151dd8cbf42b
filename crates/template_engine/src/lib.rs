//! Template editing engine: copy-on-write mutations, snapshot history,
//! clipboard, and selection repair over the `template_model` tree.
//!
//! The entry point is [`TemplateEditor`], which owns one editing session:
//! the current [`template_model::Template`], the selection, a one-slot
//! clipboard, and a linear undo/redo history of whole-tree snapshots.

mod clipboard;
mod editor;
mod error;
mod history;
mod locate;
mod table_ops;

pub use clipboard::ClipboardSlot;
pub use editor::TemplateEditor;
pub use error::{EditError, Result};
pub use history::History;
