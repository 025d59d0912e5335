//! Command Interface Layer
//!
//! Provides a closed set of typed commands for host integration.
//!
//! # Overview
//!
//! [`CommandExecutor`] is the entry point: it owns an [`EditorCore`] (text, selections, settings
//! and fold state of one open document) and dispatches [`Command`]s against it:
//!
//! - **Text Editing**: insert, delete and replace text
//! - **Cursor Operations**: move the caret and set (multiple) selections
//! - **List Editing**: (un)indent list items, switch bullet types, number lists, toggle tasks
//! - **Folding**: toggle the section at the caret, fold all sections of a level, unfold all
//!
//! Hosts that invoke commands by name use [`Command::from_host`].
//!
//! # Example
//!
//! ```rust
//! use markdown_editing::{Command, CommandExecutor, FoldCommand, Region};
//! use markdown_editing_settings::Settings;
//!
//! let mut executor = CommandExecutor::new("# Title\nbody\n", Settings::default()).unwrap();
//!
//! executor.execute(Command::Fold(FoldCommand::FoldSection)).unwrap();
//! assert_eq!(executor.editor().folded_regions(), [Region::new(7, 12)]);
//!
//! let unfold = Command::from_host("unfold_all", &serde_json::Value::Null).unwrap();
//! executor.execute(unfold).unwrap();
//! assert!(executor.editor().folded_regions().is_empty());
//! ```

use crate::folding::FoldState;
use crate::line_index::LineIndex;
use crate::lists::{self, ListItemMatcher, TextEdit};
use crate::region::Region;
use markdown_editing_settings::{Settings, SettingsError};
use serde::Deserialize;
use std::cmp::Ordering;
use thiserror::Error;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Selection start position (anchor)
    pub start: Position,
    /// Selection end position (caret)
    pub end: Position,
    /// Selection direction
    pub direction: SelectionDirection,
}

impl Selection {
    /// Zero-width selection at `position`.
    pub fn caret(position: Position) -> Self {
        Self {
            start: position,
            end: position,
            direction: SelectionDirection::Forward,
        }
    }

    /// Selection from `start` (anchor) to `end` (caret).
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            direction: crate::selection_set::selection_direction(start, end),
        }
    }
}

/// Selection direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirection {
    /// Forward selection (from start to end)
    Forward,
    /// Backward selection (from end to start)
    Backward,
}

/// Text editing commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert text at the specified position
    Insert {
        /// Character offset to insert at.
        offset: usize,
        /// Text to insert.
        text: String,
    },
    /// Delete text in specified range
    Delete {
        /// Character offset of the deletion start.
        start: usize,
        /// Length of the deletion in characters.
        length: usize,
    },
    /// Replace text in specified range
    Replace {
        /// Character offset of the replacement start.
        start: usize,
        /// Length of the replaced range in characters.
        length: usize,
        /// Replacement text.
        text: String,
    },
}

/// Cursor & selection commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorCommand {
    /// Move cursor to the specified position
    MoveTo {
        /// Target logical line index.
        line: usize,
        /// Target column in characters (will be clamped to line length).
        column: usize,
    },
    /// Set selection range
    SetSelection {
        /// Selection start position.
        start: Position,
        /// Selection end position.
        end: Position,
    },
    /// Set multiple selections/multi-cursor (including primary)
    SetSelections {
        /// All selections (including primary).
        selections: Vec<Selection>,
        /// Index of the primary selection in `selections`.
        primary_index: usize,
    },
}

/// List editing commands, applied to every line touched by a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    /// Indent list items one level, cycling the bullet glyph forward.
    IndentListItem,
    /// Unindent list items one level, cycling the bullet glyph backward.
    UnindentListItem,
    /// Convert bullet items to ordered items and back.
    SwitchListBulletType,
    /// Break the line at each selection and start the next ordered item.
    NumberList,
    /// Check or uncheck task list items.
    ToggleTaskListItem,
}

/// Folding commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldCommand {
    /// Toggle the section enclosing each selection.
    FoldSection,
    /// Replace all folds with the sections of one heading level (`0` = outline mode).
    FoldAllSections {
        /// Heading level to fold, or `0` to fold each heading up to the next heading.
        target_level: u8,
    },
    /// Unfold everything.
    UnfoldAll,
}

/// Unified command enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text editing commands
    Edit(EditCommand),
    /// Cursor command
    Cursor(CursorCommand),
    /// List editing command
    List(ListCommand),
    /// Folding command
    Fold(FoldCommand),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FoldAllSectionsArgs {
    target_level: u8,
}

impl Command {
    /// Map a host command name and its argument object to a command.
    ///
    /// `args` may be `null` for commands without arguments. Unknown names and malformed
    /// arguments are errors.
    pub fn from_host(name: &str, args: &serde_json::Value) -> Result<Self, CommandError> {
        let command = match name {
            "mde_indent_list_item" => Command::List(ListCommand::IndentListItem),
            "mde_unindent_list_item" => Command::List(ListCommand::UnindentListItem),
            "mde_switch_list_bullet_type" => Command::List(ListCommand::SwitchListBulletType),
            "mde_number_list" => Command::List(ListCommand::NumberList),
            "mde_toggle_task_list_item" => Command::List(ListCommand::ToggleTaskListItem),
            "mde_fold_section" => Command::Fold(FoldCommand::FoldSection),
            "mde_fold_all_sections" => {
                let args: FoldAllSectionsArgs = if args.is_null() {
                    FoldAllSectionsArgs::default()
                } else {
                    FoldAllSectionsArgs::deserialize(args).map_err(|err| {
                        CommandError::InvalidArguments {
                            command: name.to_string(),
                            message: err.to_string(),
                        }
                    })?
                };
                Command::Fold(FoldCommand::FoldAllSections {
                    target_level: args.target_level,
                })
            }
            "mde_unfold_all_sections" | "unfold_all" => Command::Fold(FoldCommand::UnfoldAll),
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        };

        Ok(command)
    }
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Success, no return value
    Success,
    /// Nothing matched (no list item, no enclosing heading); the document is unchanged.
    NoMatch,
    /// Text was changed by these edits (offsets refer to the text before the command).
    Edited {
        /// Applied edits, in document order.
        edits: Vec<TextEdit>,
    },
    /// Fold state changed; all folded regions after the command.
    Folded {
        /// Folded regions, sorted by offset.
        regions: Vec<Region>,
    },
}

/// Command error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid offset: {0}")]
    /// Invalid offset
    InvalidOffset(usize),

    #[error("Invalid position: line {line}, column {column}")]
    /// Invalid position
    InvalidPosition {
        /// Logical line index.
        line: usize,
        /// Column in characters.
        column: usize,
    },

    #[error("Invalid range: {start}..{end}")]
    /// Invalid range
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
    },

    #[error("Unknown command: {0}")]
    /// The host named a command that does not exist.
    UnknownCommand(String),

    #[error("Invalid arguments for {command}: {message}")]
    /// The host passed arguments that do not fit the command.
    InvalidArguments {
        /// Host command name.
        command: String,
        /// Decoding error.
        message: String,
    },

    #[error("Invalid settings: {0}")]
    /// Settings were rejected.
    InvalidSettings(String),
}

impl From<SettingsError> for CommandError {
    fn from(err: SettingsError) -> Self {
        CommandError::InvalidSettings(err.to_string())
    }
}

impl From<regex::Error> for CommandError {
    fn from(err: regex::Error) -> Self {
        CommandError::InvalidSettings(err.to_string())
    }
}

/// Editor Core state
///
/// `EditorCore` holds everything one open Markdown document needs:
///
/// - **LineIndex**: Rope-based text storage with line access
/// - **Selections**: carets and selection ranges (primary + secondary)
/// - **Settings**: the view's `mde.*` settings and the list matcher compiled from them
/// - **FoldState**: folded section and link regions
///
/// # Example
///
/// ```rust
/// use markdown_editing::EditorCore;
/// use markdown_editing_settings::Settings;
///
/// let core = EditorCore::new("Hello\nWorld", Settings::default()).unwrap();
/// assert_eq!(core.line_count(), 2);
/// assert_eq!(core.get_text(), "Hello\nWorld");
/// ```
pub struct EditorCore {
    line_index: LineIndex,
    selections: Vec<Selection>,
    primary_index: usize,
    settings: Settings,
    matcher: ListItemMatcher,
    folds: FoldState,
}

impl EditorCore {
    /// Open a document. The caret starts at the beginning of the text.
    pub fn new(text: &str, settings: Settings) -> Result<Self, CommandError> {
        settings.validate()?;
        let matcher = ListItemMatcher::from_settings(&settings)?;

        Ok(Self {
            line_index: LineIndex::from_text(text),
            selections: vec![Selection::caret(Position::default())],
            primary_index: 0,
            settings,
            matcher,
            folds: FoldState::new(),
        })
    }

    /// Get the complete text.
    pub fn get_text(&self) -> String {
        self.line_index.get_text()
    }

    /// Get total line count.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Get total character count.
    pub fn char_count(&self) -> usize {
        self.line_index.char_count()
    }

    /// Get the line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Invalid settings are rejected and the old ones kept.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), CommandError> {
        settings.validate()?;
        self.matcher = ListItemMatcher::from_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Fold state of the document.
    pub fn folds(&self) -> &FoldState {
        &self.folds
    }

    /// All folded regions, sorted by offset.
    pub fn folded_regions(&self) -> &[Region] {
        self.folds.folded_regions()
    }

    /// All selections, sorted, primary included.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Caret position of the primary selection.
    pub fn cursor_position(&self) -> Position {
        self.selections
            .get(self.primary_index)
            .map(|s| s.end)
            .unwrap_or_default()
    }

    /// Convert a position to a char offset (column clamped to the line).
    pub fn position_to_offset(&self, position: Position) -> usize {
        self.line_index
            .position_to_char_offset(position.line, position.column)
    }

    /// Convert a char offset to a position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let (line, column) = self.line_index.char_offset_to_position(offset);
        Position::new(line, column)
    }

    /// Char regions of all selections, in document order.
    pub fn selection_regions(&self) -> Vec<Region> {
        self.selections
            .iter()
            .map(|s| Region::new(self.position_to_offset(s.start), self.position_to_offset(s.end)))
            .collect()
    }

    fn check_position(&self, position: Position) -> Result<(), CommandError> {
        if position.line >= self.line_count() {
            return Err(CommandError::InvalidPosition {
                line: position.line,
                column: position.column,
            });
        }
        Ok(())
    }

    fn set_selections(&mut self, selections: Vec<Selection>, primary_index: usize) {
        let (selections, primary_index) =
            crate::selection_set::normalize_selections(selections, primary_index);
        if selections.is_empty() {
            self.selections = vec![Selection::caret(Position::default())];
            self.primary_index = 0;
        } else {
            self.selections = selections;
            self.primary_index = primary_index;
        }
    }

    /// Apply non-overlapping edits given against the current text.
    ///
    /// Edits are applied from the last to the first so earlier offsets stay valid. Selections
    /// and folds are shifted along.
    pub fn apply_edits(&mut self, edits: &[TextEdit]) {
        let mut ordered: Vec<&TextEdit> = edits.iter().collect();
        ordered.sort_by_key(|e| std::cmp::Reverse(e.region));

        let mut anchors: Vec<(usize, usize)> = self
            .selections
            .iter()
            .map(|s| (self.position_to_offset(s.start), self.position_to_offset(s.end)))
            .collect();

        for edit in ordered {
            let inserted = edit.text.chars().count();
            let shift = |offset: usize| {
                if offset >= edit.region.end {
                    offset - edit.region.len() + inserted
                } else if offset > edit.region.start {
                    edit.region.start + inserted
                } else {
                    offset
                }
            };
            for (start, end) in anchors.iter_mut() {
                *start = shift(*start);
                *end = shift(*end);
            }

            self.line_index.replace(edit.region, &edit.text);
            self.folds.update_for_deletion(edit.region);
            self.folds.update_for_insertion(edit.region.start, inserted);
        }

        let selections = anchors
            .into_iter()
            .map(|(start, end)| {
                Selection::new(self.offset_to_position(start), self.offset_to_position(end))
            })
            .collect();
        self.set_selections(selections, self.primary_index);
    }
}

/// Command executor
///
/// `CommandExecutor` is the main interface for the host, responsible for:
///
/// - Execute editor commands
/// - Maintain command history
/// - Report domain no-matches as [`CommandResult::NoMatch`] rather than errors
///
/// # Command Types
///
/// - [`EditCommand`] - Text insertion, deletion, replacement
/// - [`CursorCommand`] - Cursor movement, selection operations
/// - [`ListCommand`] - List and task list editing
/// - [`FoldCommand`] - Section folding
///
/// # Example
///
/// ```rust
/// use markdown_editing::{Command, CommandExecutor, CursorCommand, ListCommand};
/// use markdown_editing_settings::Settings;
///
/// let mut executor = CommandExecutor::new("- [ ] task", Settings::default()).unwrap();
///
/// executor.execute(Command::Cursor(CursorCommand::MoveTo { line: 0, column: 6 })).unwrap();
/// executor.execute(Command::List(ListCommand::ToggleTaskListItem)).unwrap();
///
/// assert_eq!(executor.editor().get_text(), "- [X] task");
/// ```
pub struct CommandExecutor {
    /// Editor Core
    editor: EditorCore,
    /// Command history
    command_history: Vec<Command>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(text: &str, settings: Settings) -> Result<Self, CommandError> {
        Ok(Self {
            editor: EditorCore::new(text, settings)?,
            command_history: Vec::new(),
        })
    }

    /// Execute command
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, CommandError> {
        tracing::debug!(?command, "execute");

        // Save command to history
        self.command_history.push(command.clone());

        match command {
            Command::Edit(edit_cmd) => self.execute_edit(edit_cmd),
            Command::Cursor(cursor_cmd) => self.execute_cursor(cursor_cmd),
            Command::List(list_cmd) => Ok(self.execute_list(list_cmd)),
            Command::Fold(fold_cmd) => Ok(self.execute_fold(fold_cmd)),
        }
    }

    /// Batch execute commands, stopping at the first error
    pub fn execute_batch(
        &mut self,
        commands: Vec<Command>,
    ) -> Result<Vec<CommandResult>, CommandError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Get command history
    pub fn get_command_history(&self) -> &[Command] {
        &self.command_history
    }

    /// Get a reference to the Editor Core
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    /// Get a mutable reference to the Editor Core
    pub fn editor_mut(&mut self) -> &mut EditorCore {
        &mut self.editor
    }

    fn execute_edit(&mut self, command: EditCommand) -> Result<CommandResult, CommandError> {
        let char_count = self.editor.char_count();
        let edit = match command {
            EditCommand::Insert { offset, text } => {
                if offset > char_count {
                    return Err(CommandError::InvalidOffset(offset));
                }
                TextEdit::new(Region::new(offset, offset), text)
            }
            EditCommand::Delete { start, length } => {
                let end = start.saturating_add(length);
                if end > char_count {
                    return Err(CommandError::InvalidRange { start, end });
                }
                TextEdit::new(Region::new(start, end), "")
            }
            EditCommand::Replace {
                start,
                length,
                text,
            } => {
                let end = start.saturating_add(length);
                if end > char_count {
                    return Err(CommandError::InvalidRange { start, end });
                }
                TextEdit::new(Region::new(start, end), text)
            }
        };

        if edit.region.is_empty() && edit.text.is_empty() {
            return Ok(CommandResult::Success);
        }

        let edits = vec![edit];
        self.editor.apply_edits(&edits);
        Ok(CommandResult::Edited { edits })
    }

    fn execute_cursor(&mut self, command: CursorCommand) -> Result<CommandResult, CommandError> {
        match command {
            CursorCommand::MoveTo { line, column } => {
                let position = Position::new(line, column);
                self.editor.check_position(position)?;
                let column = column.min(self.editor.line_index.line_region(line).len());
                let caret = Selection::caret(Position::new(line, column));
                self.editor.set_selections(vec![caret], 0);
            }
            CursorCommand::SetSelection { start, end } => {
                self.editor.check_position(start)?;
                self.editor.check_position(end)?;
                self.editor.set_selections(vec![Selection::new(start, end)], 0);
            }
            CursorCommand::SetSelections {
                selections,
                primary_index,
            } => {
                for selection in &selections {
                    self.editor.check_position(selection.start)?;
                    self.editor.check_position(selection.end)?;
                }
                self.editor.set_selections(selections, primary_index);
            }
        }

        Ok(CommandResult::Success)
    }

    fn execute_list(&mut self, command: ListCommand) -> CommandResult {
        let editor = &self.editor;
        let regions = editor.selection_regions();
        let (lines, matcher, settings) = (&editor.line_index, &editor.matcher, &editor.settings);

        let edits = match command {
            ListCommand::IndentListItem => {
                lists::indent_list_items(lines, &regions, matcher, settings)
            }
            ListCommand::UnindentListItem => {
                lists::unindent_list_items(lines, &regions, matcher, settings)
            }
            ListCommand::SwitchListBulletType => {
                lists::switch_list_bullet_type(lines, &regions, matcher, settings)
            }
            ListCommand::NumberList => lists::number_list(lines, &regions, matcher, settings),
            ListCommand::ToggleTaskListItem => {
                lists::toggle_task_list_items(lines, &regions, matcher)
            }
        };

        if edits.is_empty() {
            return CommandResult::NoMatch;
        }

        tracing::debug!(?command, edits = edits.len(), "list edit");
        self.editor.apply_edits(&edits);
        CommandResult::Edited { edits }
    }

    fn execute_fold(&mut self, command: FoldCommand) -> CommandResult {
        let editor = &mut self.editor;
        let auto_fold_link = editor.settings.auto_fold_link;

        match command {
            FoldCommand::FoldSection => {
                let text = editor.line_index.get_text();
                let carets: Vec<usize> = editor
                    .selection_regions()
                    .into_iter()
                    .map(|r| r.start)
                    .collect();
                if editor
                    .folds
                    .toggle_section(&text, &carets, auto_fold_link)
                    .is_empty()
                {
                    return CommandResult::NoMatch;
                }
            }
            FoldCommand::FoldAllSections { target_level } => {
                let text = editor.line_index.get_text();
                editor
                    .folds
                    .fold_all_sections(&text, target_level, auto_fold_link);
            }
            FoldCommand::UnfoldAll => editor.folds.unfold_all(),
        }

        CommandResult::Folded {
            regions: editor.folds.folded_regions().to_vec(),
        }
    }
}
