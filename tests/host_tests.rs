//! Integration tests for the document host
//!
//! Uses temporary directories for every file operation

use std::fs;
use std::time::{Duration, Instant};

use quill::document::DecodingError;
use quill::host::DocumentGroup;
use tempfile::TempDir;

#[tokio::test]
async fn test_new_window_is_empty_and_untitled() {
    let mut group = DocumentGroup::new();
    let id = group.new_window();

    let window = group.get(id).unwrap();
    assert_eq!(window.document.text(), "");
    assert_eq!(window.name, "untitled");
    assert!(window.path.is_none());
    assert!(!window.is_edited());
    assert_eq!(group.active_id(), Some(id));
}

#[tokio::test]
async fn test_open_decodes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hello.txt");
    fs::write(&path, "hello\nworld").unwrap();

    let mut group = DocumentGroup::new();
    let id = group.open(&path).await.unwrap();

    let window = group.get(id).unwrap();
    assert_eq!(window.document.text(), "hello\nworld");
    assert_eq!(window.name, "hello.txt");
    assert!(!window.is_edited());
}

#[tokio::test]
async fn test_open_invalid_utf8_creates_no_window() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("binary.bin");
    fs::write(&path, [0xFF]).unwrap();

    let mut group = DocumentGroup::new();
    group.new_window();

    let err = group.open(&path).await.unwrap_err();
    let decoding = err
        .downcast_ref::<DecodingError>()
        .expect("decoding error should be reachable");
    assert_eq!(decoding.valid_up_to(), 0);
    assert_eq!(group.len(), 1);
}

#[tokio::test]
async fn test_open_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut group = DocumentGroup::new();

    let err = group
        .open(temp_dir.path().join("missing.txt"))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to read"));
    assert!(group.is_empty());
}

#[tokio::test]
async fn test_open_same_path_focuses_existing_window() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("notes.txt");
    fs::write(&path, "notes").unwrap();

    let mut group = DocumentGroup::new();
    let first = group.open(&path).await.unwrap();
    group.new_window();

    let second = group.open(&path).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(group.len(), 2);
    assert_eq!(group.active_id(), Some(first));
}

#[tokio::test]
async fn test_edit_then_save_writes_exact_bytes() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    fs::write(&path, "abc").unwrap();

    let mut group = DocumentGroup::new();
    let id = group.open(&path).await.unwrap();

    let window = group.get_mut(id).unwrap();
    window.document.insert(3, "é\r\n");
    assert!(window.is_edited());
    assert!(group.has_unsaved_changes());

    group.save(id).await.unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"abc\xC3\xA9\r\n".to_vec());
    assert!(!group.get(id).unwrap().is_edited());
    assert!(!group.has_unsaved_changes());
}

#[tokio::test]
async fn test_save_untitled_requires_path() {
    let mut group = DocumentGroup::new();
    let id = group.new_window();

    let err = group.save(id).await.unwrap_err();

    assert!(err.to_string().contains("use save as"));
}

#[tokio::test]
async fn test_save_as_binds_window_to_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("typed.txt");

    let mut group = DocumentGroup::new();
    let id = group.new_window();
    group.get_mut(id).unwrap().document.insert(0, "abc");

    group.save_as(id, &path).await.unwrap();

    assert_eq!(fs::read(&path).unwrap(), vec![0x61, 0x62, 0x63]);
    let window = group.get(id).unwrap();
    assert_eq!(window.name, "typed.txt");
    assert!(window.path.is_some());
    assert!(!window.is_edited());

    // Saving again goes to the same file
    group.get_mut(id).unwrap().document.insert(3, "d");
    group.save(id).await.unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"abcd".to_vec());
}

#[tokio::test]
async fn test_round_trip_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mixed.txt");
    let original = "line one\r\nligne deux\n\u{FEFF}三行目\tend".as_bytes().to_vec();
    fs::write(&path, &original).unwrap();

    let mut group = DocumentGroup::new();
    let id = group.open(&path).await.unwrap();
    group.save(id).await.unwrap();

    assert_eq!(fs::read(&path).unwrap(), original);
}

#[tokio::test]
async fn test_focus_cycles_through_windows() {
    let mut group = DocumentGroup::new();
    let a = group.new_window();
    let b = group.new_window();
    let c = group.new_window();
    assert_eq!(group.active_id(), Some(c));

    group.focus_next();
    assert_eq!(group.active_id(), Some(a));
    group.focus_next();
    assert_eq!(group.active_id(), Some(b));
    group.focus_prev();
    group.focus_prev();
    assert_eq!(group.active_id(), Some(c));
    assert_eq!(group.active_index(), 2);
}

#[tokio::test]
async fn test_closing_drops_window() {
    let mut group = DocumentGroup::new();
    let a = group.new_window();
    let b = group.new_window();

    assert!(group.close(b));
    assert_eq!(group.len(), 1);
    assert_eq!(group.active_id(), Some(a));
    assert!(group.get(b).is_none());
}

#[tokio::test]
async fn test_autosave_due_respects_delay() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("auto.txt");
    fs::write(&path, "").unwrap();

    let mut group = DocumentGroup::new();
    let saved = group.open(&path).await.unwrap();
    let untitled = group.new_window();
    let delay = Duration::from_millis(500);
    let start = Instant::now();

    group.get_mut(saved).unwrap().document.insert(0, "x");
    group.get_mut(untitled).unwrap().document.insert(0, "y");
    group.refresh(start);

    assert!(group.autosave_due(start, delay).is_empty());
    assert!(group
        .autosave_due(start + Duration::from_millis(100), delay)
        .is_empty());

    // Untitled windows are never autosaved
    let due = group.autosave_due(start + delay, delay);
    assert_eq!(due, vec![saved]);

    group.save(saved).await.unwrap();
    assert!(group.autosave_due(start + delay * 2, delay).is_empty());
}

#[tokio::test]
async fn test_failed_autosave_waits_for_next_edit() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gone").join("auto.txt");

    let mut group = DocumentGroup::new();
    let id = group.new_window_at(&path);
    let delay = Duration::from_millis(100);
    let start = Instant::now();

    group.get_mut(id).unwrap().document.insert(0, "x");
    group.refresh(start);
    assert_eq!(group.autosave_due(start + delay, delay), vec![id]);

    assert!(group.save(id).await.is_err());
    group.autosave_failed(id);
    assert!(group.autosave_due(start + delay * 10, delay).is_empty());

    group.get_mut(id).unwrap().document.insert(1, "y");
    let later = start + delay * 20;
    group.refresh(later);
    assert_eq!(group.autosave_due(later + delay, delay), vec![id]);
}
