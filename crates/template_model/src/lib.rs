//! Template Model - Core document tree structure and types
//!
//! This crate provides the data model for the template designer: the
//! Template -> Column -> Row -> Element containment hierarchy, the table
//! sub-tree nested inside table elements, the shared property bag, and the
//! selection types. It defines shapes, defaults, and structural invariants;
//! the mutation and history engines live in `template_engine`.

mod column;
mod element;
mod props;
mod row;
mod selection;
mod table;
mod template;

pub use column::*;
pub use element::*;
pub use props::*;
pub use row::*;
pub use selection::*;
pub use table::*;
pub use template::*;
