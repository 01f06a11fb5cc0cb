mod common;

use std::sync::Arc;

use chat_room::common::MessagePatch;
use chat_room::session::{Focus, RoomController};
use chat_room::{Action, ChatError};
use common::{ME, RecordingStore, seeded};

async fn open_room(with_reply: bool) -> (Arc<RecordingStore>, RoomController<RecordingStore>) {
    let (store, chat_id) = seeded(with_reply).await;
    let store = Arc::new(store);
    let mut room = RoomController::new(Arc::clone(&store), ME);
    room.open(&chat_id).await.unwrap();
    (store, room)
}

fn texts(room: &RoomController<RecordingStore>) -> Vec<(String, String, i64)> {
    room.chat()
        .unwrap()
        .messages
        .iter()
        .map(|m| (m.id.clone(), m.text.clone(), m.timestamp))
        .collect()
}

#[tokio::test]
async fn sending_appends_in_order_and_scrolls_to_the_new_message() {
    let (_store, mut room) = open_room(false).await;
    assert_eq!(room.snapshot().scroll_to.as_deref(), Some("1"));

    room.set_draft("there");
    room.submit().await.unwrap();

    let messages = texts(&room);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], ("1".to_string(), "hi".to_string(), 100));
    assert_eq!((messages[1].1.as_str(), messages[1].2), ("there", 200));

    let snapshot = room.snapshot();
    assert_eq!(snapshot.scroll_to.as_deref(), Some(messages[1].0.as_str()));
    assert_eq!(snapshot.draft, "");
    // Scroll is a one-shot signal
    assert_eq!(room.snapshot().scroll_to, None);
}

#[tokio::test]
async fn blank_drafts_never_reach_the_store() {
    let (store, mut room) = open_room(false).await;

    room.set_draft("   \n ");
    assert!(!room.can_submit());
    assert!(matches!(room.submit().await, Err(ChatError::EmptyDraft)));

    room.begin_edit("1").unwrap();
    room.set_draft("\t");
    assert!(matches!(room.submit().await, Err(ChatError::EmptyDraft)));
    assert_eq!(room.focus(), &Focus::Editing("1".into()));

    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn reaction_toggles_and_overwrites() {
    let (store, mut room) = open_room(false).await;

    let reacted = room.toggle_reaction("1", "❤️").await.unwrap();
    assert_eq!(reacted.reaction.as_deref(), Some("❤️"));

    let cleared = room.toggle_reaction("1", "❤️").await.unwrap();
    assert_eq!(cleared.reaction, None);

    let replaced = room.toggle_reaction("1", "🔥").await.unwrap();
    assert_eq!(replaced.reaction.as_deref(), Some("🔥"));
    assert_eq!(
        room.chat().unwrap().message("1").unwrap().reaction.as_deref(),
        Some("🔥")
    );

    let patches: Vec<_> = store
        .recorded_patches()
        .into_iter()
        .map(|(_, patch)| patch)
        .collect();
    assert_eq!(
        patches,
        vec![
            MessagePatch::reaction(Some("❤️".into())),
            MessagePatch::reaction(None),
            MessagePatch::reaction(Some("🔥".into())),
        ]
    );
}

#[tokio::test]
async fn reacting_closes_the_picker_and_rejects_unknown_emoji() {
    let (store, mut room) = open_room(true).await;

    assert!(room.open_picker("2"));
    assert!(matches!(
        room.toggle_reaction("2", "🦀").await,
        Err(ChatError::UnsupportedReaction(_))
    ));
    assert!(store.recorded_patches().is_empty());

    room.open_picker("2");
    room.toggle_reaction("2", "👍").await.unwrap();
    assert_eq!(room.focus(), &Focus::Idle);
}

#[tokio::test]
async fn only_one_picker_is_open_at_a_time() {
    let (_store, mut room) = open_room(true).await;

    room.open_picker("1");
    room.open_picker("2");
    assert!(room.focus().is_picker_open_for("2"));
    assert!(!room.focus().is_picker_open_for("1"));

    assert!(room.close_picker());
    assert_eq!(room.focus(), &Focus::Idle);
}

#[tokio::test]
async fn editing_commits_the_new_text_and_resets_the_composer() {
    let (store, mut room) = open_room(false).await;

    room.open_picker("1");
    room.begin_edit("1").unwrap();
    assert_eq!(room.focus(), &Focus::Editing("1".into()));
    assert_eq!(room.draft(), "hi");
    assert!(!room.open_picker("1"));

    room.set_draft("hello");
    room.submit().await.unwrap();

    assert_eq!(
        store.recorded_patches(),
        vec![("1".to_string(), MessagePatch::text("hello"))]
    );
    assert_eq!(room.focus(), &Focus::Idle);
    assert_eq!(room.draft(), "");
    assert_eq!(room.chat().unwrap().message("1").unwrap().text, "hello");
    assert_eq!(room.chat().unwrap().messages.len(), 1);
}

#[tokio::test]
async fn cancel_edit_clears_the_draft() {
    let (_store, mut room) = open_room(false).await;

    room.begin_edit("1").unwrap();
    room.cancel_edit();

    assert_eq!(room.focus(), &Focus::Idle);
    assert_eq!(room.draft(), "");
}

#[tokio::test]
async fn other_peoples_messages_cannot_be_edited_or_deleted() {
    let (store, mut room) = open_room(true).await;

    assert!(matches!(
        room.begin_edit("2"),
        Err(ChatError::NotAuthorized { .. })
    ));
    assert_eq!(room.focus(), &Focus::Idle);

    assert!(matches!(
        room.delete("2").await,
        Err(ChatError::NotAuthorized { .. })
    ));
    assert_eq!(store.write_count(), 0);
    assert_eq!(room.chat().unwrap().messages.len(), 2);
}

#[tokio::test]
async fn rejected_edit_keeps_the_draft_and_edit_mode() {
    let (store, mut room) = open_room(false).await;
    store
        .reject_update
        .store(true, std::sync::atomic::Ordering::SeqCst);

    room.begin_edit("1").unwrap();
    room.set_draft("hello");
    let err = room.submit().await.unwrap_err();

    assert!(matches!(
        err,
        ChatError::OperationFailed {
            action: Action::Edit,
            ..
        }
    ));
    assert_eq!(room.focus(), &Focus::Editing("1".into()));
    assert_eq!(room.draft(), "hello");
    assert_eq!(room.notice().unwrap().to_string(), "could not edit message");
    assert_eq!(room.chat().unwrap().message("1").unwrap().text, "hi");
}

#[tokio::test]
async fn stored_edit_leaves_edit_mode_even_if_the_reload_fails() {
    let (store, mut room) = open_room(false).await;
    store
        .fail_loads_after_update
        .store(true, std::sync::atomic::Ordering::SeqCst);

    room.begin_edit("1").unwrap();
    let revision = room.snapshot().draft_revision;
    room.set_draft("hello");
    let err = room.submit().await.unwrap_err();

    assert!(matches!(
        err,
        ChatError::OperationFailed {
            action: Action::Load,
            ..
        }
    ));
    assert_eq!(room.focus(), &Focus::Idle);
    assert_eq!(room.draft(), "");
    assert!(room.snapshot().draft_revision > revision);
    assert_eq!(room.notice().unwrap().to_string(), "could not load chat");

    store
        .fail_loads
        .store(false, std::sync::atomic::Ordering::SeqCst);
    room.refresh().await.unwrap();
    assert_eq!(room.chat().unwrap().message("1").unwrap().text, "hello");
}

#[tokio::test]
async fn vanished_chat_drops_the_edit_draft() {
    let (store, mut room) = open_room(false).await;
    room.begin_edit("1").unwrap();
    let revision = room.snapshot().draft_revision;

    store
        .hide_chat
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let err = room.refresh().await.unwrap_err();

    assert!(matches!(err, ChatError::ChatNotFound(_)));
    assert!(room.is_not_found());
    assert_eq!(room.focus(), &Focus::Idle);
    assert_eq!(room.draft(), "");
    assert!(room.snapshot().draft_revision > revision);
}

#[tokio::test]
async fn rejected_delete_leaves_the_list_untouched() {
    let (store, mut room) = open_room(true).await;
    store
        .reject_delete
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let before = texts(&room);

    room.open_picker("1");
    assert!(room.delete("1").await.is_err());

    assert_eq!(texts(&room), before);
    assert_eq!(room.notice().unwrap().to_string(), "could not delete message");
    assert_eq!(room.focus(), &Focus::Idle);

    room.dismiss_notice();
    assert!(room.notice().is_none());
}

#[tokio::test]
async fn deleting_removes_the_message_without_scrolling() {
    let (_store, mut room) = open_room(true).await;
    room.snapshot();

    room.delete("1").await.unwrap();

    assert_eq!(texts(&room).len(), 1);
    assert_eq!(room.snapshot().scroll_to, None);
}

#[tokio::test]
async fn deleting_the_message_under_edit_returns_to_composing() {
    let (_store, mut room) = open_room(false).await;

    room.begin_edit("1").unwrap();
    room.delete("1").await.unwrap();

    assert_eq!(room.focus(), &Focus::Idle);
    assert_eq!(room.draft(), "");
    assert!(room.chat().unwrap().messages.is_empty());
}

#[tokio::test]
async fn rejected_send_keeps_the_draft() {
    let (store, mut room) = open_room(false).await;
    store
        .reject_send
        .store(true, std::sync::atomic::Ordering::SeqCst);

    room.set_draft("there");
    assert!(room.submit().await.is_err());

    assert_eq!(room.draft(), "there");
    assert_eq!(room.notice().unwrap().to_string(), "could not send message");
    assert_eq!(texts(&room).len(), 1);
}

#[tokio::test]
async fn missing_chat_renders_the_fallback() {
    let (store, _chat_id) = seeded(false).await;
    let mut room = RoomController::new(Arc::new(store), ME);

    assert!(matches!(
        room.open("nope").await,
        Err(ChatError::ChatNotFound(_))
    ));
    assert!(room.is_not_found());
    assert!(room.chat().is_none());
    assert_eq!(room.title(), "Chat not found");
}

#[tokio::test]
async fn title_names_the_other_participant() {
    let (_store, room) = open_room(false).await;
    assert_eq!(room.title(), "Bob");
}
