//! Template store - persistence, autosave, and file I/O
//!
//! This crate owns everything on the far side of the editing core: the
//! versioned JSON file format, template (de)serialization, file operations,
//! the async persistence-service boundary with its in-memory implementation,
//! and the background autosaver.

mod autosave;
mod error;
mod file_io;
mod format;
mod serializer;
mod service;

pub use autosave::{Autosaver, AutosaveConfig, SessionSettings};
pub use error::{Result, StoreError};
pub use file_io::{load_template, load_template_sync, save_template, save_template_sync};
pub use format::{FileHeader, TemplateFile, FILE_EXTENSION, FORMAT_VERSION};
pub use serializer::{deserialize, serialize};
pub use service::{
    ExportFormat, MemoryTemplateService, TemplateFilter, TemplateService, TemplateSummary,
};
