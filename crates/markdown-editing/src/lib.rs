#![warn(missing_docs)]
//! Markdown Editing - heading-aware folding and list editing for Markdown documents
//!
//! # Overview
//!
//! `markdown-editing` implements the editing commands of a Markdown editor extension on top of a
//! headless document model. It does not render anything; a host editor forwards its commands and
//! reads back text, selections and folded regions.
//!
//! # Core Features
//!
//! - **Heading Index**: ATX and Setext headings, also behind blockquote markers
//! - **Section Resolver**: the text governed by a heading, at any nesting level
//! - **Fold State Controller**: toggle sections, fold all sections of a level, auto-fold links
//! - **List Editing**: (un)indent with bullet cycling, ordered/unordered conversion, numbering,
//!   task check boxes
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface (CommandExecutor)        │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  Fold State          │  List Editing        │  ← Commands
//! ├──────────────────────┤                      │
//! │  Section Resolver    │                      │
//! ├──────────────────────┤                      │
//! │  Heading Index/Links │                      │
//! ├──────────────────────┴──────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use markdown_editing::{Command, CommandExecutor, FoldCommand, Region};
//! use markdown_editing_settings::Settings;
//!
//! let text = "# A\nintro\n## A.1\nbody\n# B\nend\n";
//! let mut executor = CommandExecutor::new(text, Settings::default()).unwrap();
//!
//! executor
//!     .execute(Command::Fold(FoldCommand::FoldAllSections { target_level: 2 }))
//!     .unwrap();
//! assert_eq!(executor.editor().folded_regions(), [Region::new(16, 21)]);
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based text storage and line access
//! - [`headings`] - Heading index
//! - [`sections`] - Section resolver
//! - [`links`] - Link destination regions (auto-fold-link)
//! - [`folding`] - Fold state controller
//! - [`lists`] - List and task list editing
//! - [`commands`] - Unified command interface
//!
//! # Offsets
//!
//! All offsets are counted in Unicode scalar values (`char`) and all regions are half-open.

pub mod commands;
pub mod folding;
pub mod headings;
pub mod line_index;
pub mod links;
pub mod lists;
pub mod region;
pub mod sections;
mod selection_set;
mod text;

pub use commands::{
    Command, CommandError, CommandExecutor, CommandResult, CursorCommand, EditCommand, EditorCore,
    FoldCommand, ListCommand, Position, Selection, SelectionDirection,
};
pub use folding::FoldState;
pub use headings::{Heading, Headings, all_headings};
pub use line_index::LineIndex;
pub use links::{link_regions, link_regions_in};
pub use lists::{ListItemMatcher, ListMarker, TextEdit};
pub use region::Region;
pub use sections::{Direction, Outline, Section, SectionBoundary, section_region_and_level};
