//! Integration tests for the editor view binding
//!
//! Every edit made through the view must land in the document immediately

use quill::document::Document;
use quill::view::{CursorMovement, EditorView, Position};

fn type_text(view: &mut EditorView, doc: &mut Document, text: &str) {
    for ch in text.chars() {
        if ch == '\n' {
            view.insert_newline(doc);
        } else {
            view.insert_char(doc, ch);
        }
    }
}

#[tokio::test]
async fn test_typing_updates_document() {
    let mut doc = Document::new();
    let mut view = EditorView::new();

    view.insert_char(&mut doc, 'a');
    assert_eq!(doc.text(), "a");
    view.insert_char(&mut doc, 'b');
    assert_eq!(doc.text(), "ab");
    view.insert_char(&mut doc, 'c');
    assert_eq!(doc.text(), "abc");

    assert_eq!(doc.save(), vec![0x61, 0x62, 0x63]);
    assert_eq!(view.cursor_position(&doc), Position::new(0, 3));
}

#[tokio::test]
async fn test_newline_and_backspace() {
    let mut doc = Document::new();
    let mut view = EditorView::new();

    type_text(&mut view, &mut doc, "Hi\nBye");
    assert_eq!(doc.text(), "Hi\nBye");
    assert_eq!(view.cursor_position(&doc), Position::new(1, 3));

    for _ in 0..4 {
        assert!(view.backspace(&mut doc));
    }
    assert_eq!(doc.text(), "Hi");
    assert_eq!(view.cursor_position(&doc), Position::new(0, 2));
}

#[tokio::test]
async fn test_backspace_and_delete_at_edges() {
    let mut doc = Document::with_text("x");
    let mut view = EditorView::new();

    assert!(!view.backspace(&mut doc));
    assert!(view.delete(&mut doc));
    assert!(!view.delete(&mut doc));
    assert_eq!(doc.text(), "");
}

#[tokio::test]
async fn test_multibyte_characters_are_edited_whole() {
    let mut doc = Document::new();
    let mut view = EditorView::new();

    type_text(&mut view, &mut doc, "a🦀é");
    assert!(view.backspace(&mut doc));
    assert_eq!(doc.text(), "a🦀");

    view.move_cursor(&doc, CursorMovement::Left);
    assert_eq!(view.cursor(), 1);
    assert!(view.delete(&mut doc));
    assert_eq!(doc.text(), "a");
}

#[tokio::test]
async fn test_paste_inserts_at_cursor() {
    let mut doc = Document::with_text("start end");
    let mut view = EditorView::new();

    view.set_cursor(&doc, 6);
    view.insert_str(&mut doc, "middle\nline ");

    assert_eq!(doc.text(), "start middle\nline end");
    assert_eq!(view.cursor_position(&doc), Position::new(1, 5));
}

#[tokio::test]
async fn test_editing_matches_plain_string() {
    let mut doc = Document::new();
    let mut view = EditorView::new();
    let mut expected = String::new();

    // Simple LCG so the sequence is the same on every run
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move |bound: usize| {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((seed >> 33) as usize) % bound.max(1)
    };
    let alphabet = ['a', 'b', ' ', '\n', 'é', '🦀'];

    for _ in 0..500 {
        let chars: Vec<(usize, char)> = expected.char_indices().collect();
        let index = next(chars.len() + 1);
        let offset = chars.get(index).map(|(i, _)| *i).unwrap_or(expected.len());
        view.set_cursor(&doc, offset);

        match next(3) {
            0 => {
                let ch = alphabet[next(alphabet.len())];
                view.insert_char(&mut doc, ch);
                expected.insert(offset, ch);
            }
            1 => {
                view.backspace(&mut doc);
                if let Some(prev) = expected[..offset].chars().next_back() {
                    expected.remove(offset - prev.len_utf8());
                }
            }
            _ => {
                view.delete(&mut doc);
                if offset < expected.len() {
                    expected.remove(offset);
                }
            }
        }

        assert_eq!(doc.text(), expected);
    }
}

#[tokio::test]
async fn test_vertical_movement_keeps_preferred_column() {
    let mut doc = Document::with_text("long line\nab\nanother long line");
    let mut view = EditorView::new();

    view.set_cursor_position(&doc, Position::new(0, 7));
    view.move_cursor(&doc, CursorMovement::Down);
    assert_eq!(view.cursor_position(&doc), Position::new(1, 2));

    view.move_cursor(&doc, CursorMovement::Down);
    assert_eq!(view.cursor_position(&doc), Position::new(2, 7));

    view.move_cursor(&doc, CursorMovement::Up);
    view.move_cursor(&doc, CursorMovement::Up);
    assert_eq!(view.cursor_position(&doc), Position::new(0, 7));

    // Typing resets the remembered column
    view.move_cursor(&doc, CursorMovement::Down);
    view.insert_char(&mut doc, 'c');
    view.move_cursor(&doc, CursorMovement::Up);
    assert_eq!(view.cursor_position(&doc), Position::new(0, 3));
}

#[tokio::test]
async fn test_movement_at_boundaries() {
    let doc = Document::with_text("one\ntwo");
    let mut view = EditorView::new();

    view.move_cursor(&doc, CursorMovement::Left);
    view.move_cursor(&doc, CursorMovement::Up);
    assert_eq!(view.cursor(), 0);

    view.move_cursor(&doc, CursorMovement::LineEnd);
    assert_eq!(view.cursor_position(&doc), Position::new(0, 3));

    // Right at end of line wraps to the next line
    view.move_cursor(&doc, CursorMovement::Right);
    assert_eq!(view.cursor_position(&doc), Position::new(1, 0));

    // Down on the last line goes to the end of the text
    view.move_cursor(&doc, CursorMovement::Down);
    assert_eq!(view.cursor(), doc.len());

    view.move_cursor(&doc, CursorMovement::DocumentStart);
    assert_eq!(view.cursor(), 0);
    view.move_cursor(&doc, CursorMovement::DocumentEnd);
    assert_eq!(view.cursor(), 7);
}

#[tokio::test]
async fn test_page_movement_uses_viewport_height() {
    let text: Vec<String> = (0..30).map(|i| format!("line {}", i)).collect();
    let doc = Document::with_text(text.join("\n"));
    let mut view = EditorView::new();
    view.viewport = (10, 40);

    view.move_cursor(&doc, CursorMovement::PageDown);
    assert_eq!(view.cursor_position(&doc).row, 10);
    view.move_cursor(&doc, CursorMovement::PageDown);
    view.move_cursor(&doc, CursorMovement::PageDown);
    assert_eq!(view.cursor_position(&doc).row, 29);
    view.move_cursor(&doc, CursorMovement::PageUp);
    assert_eq!(view.cursor_position(&doc).row, 19);
}

#[tokio::test]
async fn test_tab_inserts_spaces_to_next_stop() {
    let mut doc = Document::with_text("ab");
    let mut view = EditorView::new();
    view.set_cursor(&doc, 2);

    view.insert_tab(&mut doc, true, 4);
    assert_eq!(doc.text(), "ab  ");

    view.insert_tab(&mut doc, false, 4);
    assert_eq!(doc.text(), "ab  \t");
}

#[tokio::test]
async fn test_delete_to_line_start() {
    let mut doc = Document::with_text("first\nsecond line");
    let mut view = EditorView::new();
    view.set_cursor_position(&doc, Position::new(1, 6));

    assert!(view.delete_to_line_start(&mut doc));
    assert_eq!(doc.text(), "first\n line");
    assert!(!view.delete_to_line_start(&mut doc));
}

#[tokio::test]
async fn test_cursor_follows_external_text_change() {
    let mut doc = Document::with_text("some longer text");
    let mut view = EditorView::new();
    view.set_cursor(&doc, doc.len());

    doc.set_text("short");
    assert_eq!(view.cursor_position(&doc), Position::new(0, 5));

    view.insert_char(&mut doc, '!');
    assert_eq!(doc.text(), "short!");
}

#[tokio::test]
async fn test_scroll_and_cursor_visibility() {
    let text: Vec<String> = (0..50).map(|i| i.to_string()).collect();
    let doc = Document::with_text(text.join("\n"));
    let mut view = EditorView::new();
    view.viewport = (10, 20);

    view.scroll(&doc, 5);
    assert_eq!(view.scroll_offset.0, 5);
    assert_eq!(view.cursor(), 0);

    view.scroll(&doc, -100);
    assert_eq!(view.scroll_offset.0, 0);

    // Can scroll half a screen past the last line, no further
    view.scroll(&doc, 1000);
    assert_eq!(view.scroll_offset.0, 45);

    view.set_cursor_position(&doc, Position::new(20, 0));
    view.ensure_cursor_visible(&doc);
    assert_eq!(view.scroll_offset.0, 20);

    view.set_cursor_position(&doc, Position::new(35, 0));
    view.ensure_cursor_visible(&doc);
    assert_eq!(view.scroll_offset.0, 26);
}
