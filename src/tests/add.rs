use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[tokio::test]
async fn test_add_and_list() {
    let mut app = helper::setup_test_app().await;

    let (status_code, message) = helper::maybe_add_note(&mut app, "A", "B", &[]).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(message.success);
    assert_eq!("Note added", message.msg);

    let (status_code, notes, _) = helper::list_notes(&mut app, "?query=A").await;
    assert_eq!(StatusCode::OK, status_code);
    let notes = notes.unwrap();
    assert_eq!(1, notes.notes.len());
    assert_eq!(1, notes.total_notes);

    let note = &notes.notes[0];
    assert_eq!("A", note.title);
    assert_eq!("B", note.content);
    assert!(note.tags.is_empty());
    assert!(!note.is_pinned);
    assert_eq!(note.created_at, note.updated_at);
}

#[tokio::test]
async fn test_add_trims_and_keeps_tag_order() {
    let mut app = helper::setup_test_app().await;

    let (status_code, _) = helper::maybe_add_note(
        &mut app,
        "  Groceries \n",
        "\tMilk, eggs  ",
        &["weekly", "errands", "home"],
    )
    .await;
    assert_eq!(StatusCode::OK, status_code);

    let note = helper::find_note(&mut app, "Groceries").await;
    assert_eq!("Milk, eggs", note.content);
    assert_eq!(vec!["weekly", "errands", "home"], note.tags);
}

#[tokio::test]
async fn test_add_without_tags() {
    let mut app = helper::setup_test_app().await;

    let payload = json!({ "title": "title", "content": "content" });
    let (status_code, _) = helper::maybe_add_note_with_payload(&mut app, &payload).await;
    assert_eq!(StatusCode::OK, status_code);

    let payload = json!({ "title": "other", "content": "content", "tags": null });
    let (status_code, _) = helper::maybe_add_note_with_payload(&mut app, &payload).await;
    assert_eq!(StatusCode::OK, status_code);

    let notes = helper::list_all_notes(&mut app).await;
    assert_eq!(2, notes.total_notes);
    assert!(notes.notes.iter().all(|note| note.tags.is_empty()));
}

#[tokio::test]
async fn test_add_requires_title_and_content() {
    let mut app = helper::setup_test_app().await;

    // title is checked first
    let (status_code, message) = helper::maybe_add_note_with_payload(&mut app, &json!({})).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(!message.success);
    assert_eq!("Title is required", message.msg);

    let payload = json!({ "content": "content" });
    let (status_code, message) = helper::maybe_add_note_with_payload(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Title is required", message.msg);

    let payload = json!({ "title": "title" });
    let (status_code, message) = helper::maybe_add_note_with_payload(&mut app, &payload).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Content is required", message.msg);

    // blank after trimming
    let (status_code, message) = helper::maybe_add_note(&mut app, "   ", "content", &[]).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Title is required", message.msg);

    let (status_code, message) = helper::maybe_add_note(&mut app, "title", "", &[]).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Content is required", message.msg);

    assert_eq!(0, helper::list_all_notes(&mut app).await.total_notes);
}
