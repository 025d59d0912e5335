use markdown_editing::{
    Command, CommandExecutor, CommandResult, CursorCommand, ListCommand, Position, Selection,
};
use markdown_editing_settings::Settings;
use pretty_assertions::assert_eq;

fn run(text: &str, settings: Settings, selections: Vec<Selection>, command: ListCommand) -> String {
    let mut ex = CommandExecutor::new(text, settings).unwrap();
    ex.execute(Command::Cursor(CursorCommand::SetSelections {
        selections,
        primary_index: 0,
    }))
    .unwrap();
    ex.execute(Command::List(command)).unwrap();
    ex.editor().get_text()
}

fn caret(line: usize, column: usize) -> Selection {
    Selection::caret(Position::new(line, column))
}

fn lines(from: usize, to: usize) -> Selection {
    Selection::new(Position::new(from, 0), Position::new(to, 0))
}

#[test]
fn test_indent_then_unindent_round_trips_bullet() {
    let mut ex = CommandExecutor::new("- item", Settings::default()).unwrap();

    ex.execute(Command::List(ListCommand::IndentListItem)).unwrap();
    assert_eq!(ex.editor().get_text(), "\t+ item");

    ex.execute(Command::List(ListCommand::UnindentListItem)).unwrap();
    assert_eq!(ex.editor().get_text(), "- item");
}

#[test]
fn test_indent_with_spaces_in_blockquote() {
    let settings = Settings {
        translate_tabs_to_spaces: true,
        tab_size: 2,
        ..Settings::default()
    };
    let text = "> * one\n> * two";
    assert_eq!(
        run(text, settings, vec![lines(0, 1)], ListCommand::IndentListItem),
        ">   - one\n>   - two"
    );
}

#[test]
fn test_indent_cycles_through_all_bullets() {
    let mut ex = CommandExecutor::new("* a", Settings::default()).unwrap();
    let mut seen = Vec::new();
    for _ in 0..3 {
        ex.execute(Command::List(ListCommand::IndentListItem)).unwrap();
        seen.push(ex.editor().get_text());
    }
    assert_eq!(seen, vec!["\t- a", "\t\t+ a", "\t\t\t* a"]);
}

#[test]
fn test_unindent_at_zero_indent_is_no_match() {
    let mut ex = CommandExecutor::new("- top", Settings::default()).unwrap();
    let result = ex.execute(Command::List(ListCommand::UnindentListItem)).unwrap();
    assert_eq!(result, CommandResult::NoMatch);
    assert_eq!(ex.editor().get_text(), "- top");
}

#[test]
fn test_indent_keeps_caret_on_item_text() {
    let mut ex = CommandExecutor::new("- item", Settings::default()).unwrap();
    ex.execute(Command::Cursor(CursorCommand::MoveTo { line: 0, column: 4 }))
        .unwrap();
    ex.execute(Command::List(ListCommand::IndentListItem)).unwrap();
    assert_eq!(ex.editor().cursor_position(), Position::new(0, 5));
}

#[test]
fn test_switch_bullet_type_round_trip() {
    let text = "* a\n* b\n* c";
    let ordered = run(
        text,
        Settings::default(),
        vec![lines(0, 2)],
        ListCommand::SwitchListBulletType,
    );
    assert_eq!(ordered, "1. a\n2. b\n3. c");

    let settings = Settings {
        list_align_text: false,
        ..Settings::default()
    };
    let bullets = run(&ordered, settings, vec![lines(0, 2)], ListCommand::SwitchListBulletType);
    assert_eq!(bullets, text);
}

#[test]
fn test_switch_bullet_type_numbers_each_selection_from_one() {
    let text = "- a\n- b\n\n- c";
    assert_eq!(
        run(
            text,
            Settings::default(),
            vec![lines(0, 1), caret(3, 0)],
            ListCommand::SwitchListBulletType,
        ),
        "1. a\n2. b\n\n1. c"
    );
}

#[test]
fn test_switch_bullet_type_without_auto_increment() {
    let settings = Settings {
        auto_increment_ordered_list_number: false,
        ..Settings::default()
    };
    assert_eq!(
        run("+ a\n+ b", settings, vec![lines(0, 1)], ListCommand::SwitchListBulletType),
        "1. a\n1. b"
    );
}

#[test]
fn test_number_list_continues_numbering() {
    let mut ex = CommandExecutor::new("9. nine", Settings::default()).unwrap();
    ex.execute(Command::Cursor(CursorCommand::MoveTo { line: 0, column: 7 }))
        .unwrap();
    ex.execute(Command::List(ListCommand::NumberList)).unwrap();

    assert_eq!(ex.editor().get_text(), "9. nine\n10. ");
    assert_eq!(ex.editor().cursor_position(), Position::new(1, 4));
}

#[test]
fn test_number_list_replaces_selection() {
    let mut ex = CommandExecutor::new("  1.\tfirst second", Settings::default()).unwrap();
    ex.execute(Command::Cursor(CursorCommand::SetSelection {
        start: Position::new(0, 10),
        end: Position::new(0, 17),
    }))
    .unwrap();
    ex.execute(Command::List(ListCommand::NumberList)).unwrap();

    assert_eq!(ex.editor().get_text(), "  1.\tfirst\n  2.\t");
}

#[test]
fn test_toggle_task_round_trip() {
    let mut ex = CommandExecutor::new("- [ ] task", Settings::default()).unwrap();

    ex.execute(Command::List(ListCommand::ToggleTaskListItem)).unwrap();
    assert_eq!(ex.editor().get_text(), "- [X] task");

    ex.execute(Command::List(ListCommand::ToggleTaskListItem)).unwrap();
    assert_eq!(ex.editor().get_text(), "- [ ] task");
}

#[test]
fn test_toggle_task_on_mixed_lines() {
    let text = "1. [ ] one\n2. [x] two\nnot a task\n> + [ ] quoted";
    assert_eq!(
        run(
            text,
            Settings::default(),
            vec![lines(0, 3)],
            ListCommand::ToggleTaskListItem,
        ),
        "1. [X] one\n2. [ ] two\nnot a task\n> + [X] quoted"
    );
}

#[test]
fn test_custom_bullets() {
    let settings = Settings {
        list_indent_bullets: vec!["-".to_string(), "*".to_string()],
        ..Settings::default()
    };
    assert_eq!(
        run("- a", settings.clone(), vec![caret(0, 0)], ListCommand::IndentListItem),
        "\t* a"
    );
    assert_eq!(
        run("1. a", settings, vec![caret(0, 0)], ListCommand::SwitchListBulletType),
        "-  a"
    );
}
