use modal_engine::{
    Engine,
    traits::Clipboard,
    types::{Command, Position},
};

mod support;
use support::mock_buffer::MockBuffer;
use support::mock_clipboard::MockClipboard;
use support::{Session, key};

#[test]
fn test_yy_yanks_line() {
    let buf = MockBuffer::new("line one\nline two\nline three\n");
    let mut eng = Engine::new();
    let mut clipboard = MockClipboard::new();
    let cur = Position::new(1, 3);

    let (_, cmds) = eng.handle_event(&buf, &mut clipboard, cur, key('y'));
    assert!(cmds.is_empty());
    let (new_cur, cmds) = eng.handle_event(&buf, &mut clipboard, cur, key('y'));
    // yanking never edits and keeps the column
    assert!(!cmds.iter().any(|c| matches!(c, Command::Delete { .. })));
    assert_eq!(new_cur, cur);

    assert_eq!(clipboard.get(), Some("line two\n".to_string()));
}

#[test]
fn test_2yy_and_y_yank_lines() {
    let mut s = Session::new("line one\nline two\nline three\n");
    s.keys("2yy");
    assert_eq!(s.clip.content(), Some("line one\nline two\n"));

    let mut s = Session::new("line one\nline two\nline three\n").at(1, 0);
    s.keys("Y");
    assert_eq!(s.clip.content(), Some("line two\n"));
}

#[test]
fn test_yw_yanks_word() {
    let buf = MockBuffer::new("hello world\nsecond line");
    let mut eng = Engine::new();
    let mut clipboard = MockClipboard::new();
    let cur = Position::ZERO;

    eng.handle_event(&buf, &mut clipboard, cur, key('y'));
    eng.handle_event(&buf, &mut clipboard, cur, key('w'));

    assert_eq!(clipboard.get(), Some("hello ".to_string()));
}

#[test]
fn test_dw_deletes_word_and_fills_clipboard() {
    let mut s = Session::new("hello world\nsecond line");
    let cmds = s.keys("dw");
    assert_eq!(
        cmds[0],
        Command::Delete {
            range: modal_engine::Range {
                start: Position::ZERO,
                end: Position::new(0, 6)
            }
        }
    );
    assert_eq!(s.clip.content(), Some("hello "));
    assert_eq!(s.text(), "world\nsecond line");
}

#[test]
fn test_dw_on_last_word_keeps_line_break() {
    let mut s = Session::new("hello world\nsecond line").at(0, 6);
    s.keys("dw");
    assert_eq!(s.text(), "hello \nsecond line");
    assert_eq!(s.clip.content(), Some("world"));
    assert_eq!(s.cursor, Position::new(0, 5));
}

#[test]
fn test_dw_before_indented_line_keeps_indent() {
    let mut s = Session::new("hello\n  world");
    s.keys("dw");
    assert_eq!(s.text(), "\n  world");
    assert_eq!(s.clip.content(), Some("hello"));
    assert_eq!(s.cursor, Position::ZERO);

    let mut s = Session::new("one two\n\tthree").at(0, 4);
    s.keys("yw");
    assert_eq!(s.clip.content(), Some("two"));
}

#[test]
fn test_y_dollar_yanks_to_line_end() {
    let mut s = Session::new("hello world\n").at(0, 6);
    s.keys("y$");
    assert_eq!(s.clip.content(), Some("world"));
    assert_eq!(s.cursor, Position::new(0, 6));
}

#[test]
fn test_visual_yank_charwise() {
    let mut s = Session::new("hello world\n");
    s.keys("v");
    s.keys("llll");
    let cmds = s.keys("y");
    assert!(cmds.iter().any(|c| matches!(c, Command::SetSelection(None))));
    assert!(!cmds.iter().any(|c| matches!(c, Command::Delete { .. })));
    assert_eq!(s.clip.content(), Some("hello"));
}

#[test]
fn test_visual_yank_linewise() {
    let mut s = Session::new("line one\nline two\nline three\n");
    s.keys("Vj");
    let cmds = s.keys("y");
    assert!(cmds.iter().any(|c| matches!(c, Command::SetSelection(None))));
    assert_eq!(s.clip.content(), Some("line one\nline two\n"));
    assert_eq!(s.cursor, Position::ZERO);
}

#[test]
fn test_p_pastes_after_cursor() {
    let buf = MockBuffer::new("hello world\n");
    let mut eng = Engine::new();
    let mut clipboard = MockClipboard::with_text("TEST");

    let cur = Position::new(0, 5);
    let (new_cur, cmds) = eng.handle_event(&buf, &mut clipboard, cur, key('p'));

    // the cursor ends on the last pasted character
    assert_eq!(new_cur, Position::new(0, 9));
    assert!(matches!(&cmds[0], Command::InsertText { at, text }
        if *at == Position::new(0, 6) && text == "TEST"));
}

#[test]
fn test_big_p_pastes_before_cursor() {
    let mut s = Session::new("world").at(0, 0);
    s.clip.set("hello ".to_string());
    s.keys("P");
    assert_eq!(s.text(), "hello world");
    assert_eq!(s.cursor, Position::new(0, 5));
}

#[test]
fn test_p_pastes_linewise_on_next_line() {
    let buf = MockBuffer::new("line one\nline two\n");
    let mut eng = Engine::new();
    let mut clipboard = MockClipboard::new();
    let cur = Position::new(0, 3);

    eng.handle_event(&buf, &mut clipboard, cur, key('y'));
    eng.handle_event(&buf, &mut clipboard, cur, key('y'));

    let (new_cur, cmds) = eng.handle_event(&buf, &mut clipboard, cur, key('p'));
    assert_eq!(new_cur, Position::new(1, 0));
    assert!(matches!(&cmds[0], Command::InsertText { at, text }
        if *at == Position::new(1, 0) && text == "line one\n"));
}

#[test]
fn test_linewise_paste_below_last_line() {
    let mut s = Session::new("first\nlast").at(1, 2);
    s.clip.set("new\n".to_string());
    s.keys("p");
    assert_eq!(s.text(), "first\nlast\nnew");
    assert_eq!(s.cursor, Position::new(2, 0));
}

#[test]
fn test_linewise_paste_above() {
    let mut s = Session::new("a\nb").at(1, 0);
    s.keys("yyk");
    s.keys("P");
    assert_eq!(s.text(), "b\na\nb");
    assert_eq!(s.cursor, Position::ZERO);
}

#[test]
fn test_count_p_pastes_multiple_times() {
    let mut s = Session::new("hello world\n").at(0, 5);
    s.clip.set("X".to_string());
    let cmds = s.keys("3p");
    assert_eq!(
        cmds[0],
        Command::InsertText {
            at: Position::new(0, 6),
            text: "XXX".to_string()
        }
    );
    assert_eq!(s.text(), "hello XXXworld\n");
    assert_eq!(s.cursor, Position::new(0, 8));
}

#[test]
fn test_p_with_empty_clipboard_does_nothing() {
    let buf = MockBuffer::new("hello world\n");
    let mut eng = Engine::new();
    let mut clipboard = MockClipboard::new();
    let cur = Position::new(0, 5);

    let (new_cur, cmds) = eng.handle_event(&buf, &mut clipboard, cur, key('p'));
    assert_eq!(new_cur, cur);
    assert!(cmds.is_empty());
}

#[test]
fn test_yank_with_find_motion() {
    let mut s = Session::new("hello world\n");
    s.keys("yfw");
    assert_eq!(s.clip.content(), Some("hello w"));
}

#[test]
fn test_yank_with_till_motion() {
    let mut s = Session::new("hello world\n");
    s.keys("ytw");
    assert_eq!(s.clip.content(), Some("hello "));
}

#[test]
fn test_yank_backward_find_excludes_cursor() {
    let mut s = Session::new("key = value").at(0, 8);
    s.keys("yF=");
    assert_eq!(s.clip.content(), Some("= va"));
    assert_eq!(s.cursor, Position::new(0, 4));
}

#[test]
fn test_yank_then_paste_round_trips() {
    // characterwise: the pasted text equals what was yanked
    let mut s = Session::new("alpha beta gamma").at(0, 6);
    s.keys("yw");
    let yanked = s.clip.content().map(str::to_string);
    s.keys("$p");
    assert_eq!(yanked.as_deref(), Some("beta "));
    assert_eq!(s.text(), "alpha beta gammabeta ");

    // linewise: whole lines land below the cursor line
    let mut s = Session::new("one\ntwo\nthree").at(0, 1);
    s.keys("2yyG");
    s.keys("p");
    assert_eq!(s.text(), "one\ntwo\nthree\none\ntwo");
}

#[test]
fn test_delete_then_paste_moves_text() {
    let mut s = Session::new("one\ntwo\nthree");
    s.keys("ddp");
    assert_eq!(s.text(), "two\none\nthree");
    assert_eq!(s.cursor, Position::new(1, 0));
}
