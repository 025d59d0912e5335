//! Command interface example
//!
//! Drives list editing and section folding through `CommandExecutor`, the way a host
//! editor plugin would.

use markdown_editing::{
    Command, CommandExecutor, CommandResult, CursorCommand, FoldCommand, ListCommand, Position,
    Selection,
};
use markdown_editing_settings::Settings;
use serde_json::json;

const DOCUMENT: &str = "\
# Groceries

- [ ] apples
- [ ] bread
- milk

## Later

See [the shop](https://example.org/shop) for opening hours.

Notes
=====

1. call home
";

fn main() {
    println!("=== Markdown command interface ===\n");

    let settings = Settings {
        auto_fold_link: true,
        ..Settings::default()
    };
    let mut executor = CommandExecutor::new(DOCUMENT, settings).unwrap();

    // 1. Task lists
    println!("1. Toggle a task:");
    executor
        .execute(Command::Cursor(CursorCommand::MoveTo { line: 2, column: 0 }))
        .unwrap();
    executor
        .execute(Command::List(ListCommand::ToggleTaskListItem))
        .unwrap();
    println!("{}\n", executor.editor().get_text());

    // 2. Indenting several items at once
    println!("2. Indent two list items:");
    executor
        .execute(Command::Cursor(CursorCommand::SetSelections {
            selections: vec![
                Selection::caret(Position::new(3, 0)),
                Selection::caret(Position::new(4, 0)),
            ],
            primary_index: 0,
        }))
        .unwrap();
    executor
        .execute(Command::List(ListCommand::IndentListItem))
        .unwrap();
    println!("{}\n", executor.editor().get_text());

    // 3. Folding by heading level, using host command names
    println!("3. Fold all level 1 sections:");
    let command = Command::from_host("mde_fold_all_sections", &json!({ "target_level": 1 }))
        .unwrap();
    if let Ok(CommandResult::Folded { regions }) = executor.execute(command) {
        for region in regions {
            println!("  folded {region:?}");
        }
    }

    println!("\n4. Toggle the first section open again:");
    executor
        .execute(Command::Cursor(CursorCommand::MoveTo { line: 0, column: 0 }))
        .unwrap();
    executor
        .execute(Command::Fold(FoldCommand::FoldSection))
        .unwrap();
    for region in executor.editor().folded_regions() {
        println!("  folded {region:?}");
    }

    // 5. Errors
    println!("\n5. Unknown commands are rejected:");
    match Command::from_host("mde_make_coffee", &serde_json::Value::Null) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  expected error: {e}"),
    }

    println!("\n6. Command history:");
    for (i, cmd) in executor.get_command_history().iter().enumerate() {
        println!("  {}: {:?}", i + 1, cmd);
    }
}
