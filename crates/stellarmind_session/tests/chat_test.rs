//! Tests for chat persistence.

mod test_utils;

use chrono::{Duration as ChronoDuration, Utc};
use futures_util::{FutureExt, StreamExt};
use stellarmind_client::CancellationToken;
use stellarmind_core::{AI_USER_ID, ChatMessage, ChatMessageBuilder, Sender};
use stellarmind_interface::{DocumentChange, DocumentStore};
use stellarmind_quota::{FeatureKey, Remaining};
use stellarmind_session::features::{self, NO_REPLY_FALLBACK};
use stellarmind_session::{ActionOutcome, MESSAGES};
use test_utils::{Harness, MockReply, MockTransport, guest, sent_prompt};

async fn stored_messages(h: &Harness) -> anyhow::Result<Vec<ChatMessage>> {
    let collection = h.ctx.collection(MESSAGES)?;
    let docs = h.store.list(&collection).await?;
    let mut messages = Vec::new();
    for doc in docs {
        messages.push(serde_json::from_value(doc.data().clone())?);
    }
    Ok(messages)
}

#[tokio::test(start_paused = true)]
async fn test_user_and_ai_messages_are_stored_in_order() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("Hi! How can I help?")));

    let outcome = features::send_message(&h.ctx, "Hello there", None).await;

    assert_eq!(outcome, ActionOutcome::Completed("Hi! How can I help?".to_string()));
    let messages = stored_messages(&h).await?;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "Hello there");
    assert_eq!(messages[0].user_id, "guest-1");
    assert_eq!(messages[1].sender, Sender::Ai);
    assert_eq!(messages[1].text, "Hi! How can I help?");
    assert_eq!(messages[1].user_id, AI_USER_ID);
    assert_eq!(messages[1].time.len(), 5);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_message_text_is_sent_as_prompt() {
    let h = guest(MockTransport::always(MockReply::text("ok")));

    features::send_message(&h.ctx, "What is Rust?", None).await;

    assert_eq!(sent_prompt(&h.transport, 0), "What is Rust?");
    let url = h.transport.requests()[0].url().clone();
    assert!(url.ends_with("/models/text-model:generateContent?key=sk-test"), "{}", url);
}

#[tokio::test(start_paused = true)]
async fn test_empty_reply_stores_fallback() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::Json(
        200,
        serde_json::json!({"candidates": []}),
    )));

    let outcome = features::send_message(&h.ctx, "Hello", None).await;

    assert_eq!(
        outcome,
        ActionOutcome::NoOutput {
            message: NO_REPLY_FALLBACK.to_string()
        }
    );
    let messages = stored_messages(&h).await?;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].text, "Sorry, I couldn't generate a response.");
    assert_eq!(messages[1].sender, Sender::Ai);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failure_stores_error_message() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::error(404, "no model")));

    let outcome = features::send_message(&h.ctx, "Hello", None).await;

    let messages = stored_messages(&h).await?;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::Ai);
    assert!(
        messages[1]
            .text
            .starts_with("Error: Could not get a response. Resource not found at"),
        "{}",
        messages[1].text
    );
    assert!(!messages[1].text.contains("sk-test"));
    assert_eq!(outcome.message(), Some(messages[1].text.as_str()));
    assert_eq!(h.transport.call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_chat_stores_nothing() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("reply")));
    for n in 0..20 {
        let outcome = features::send_message(&h.ctx, &format!("message {}", n), None).await;
        assert!(outcome.is_completed());
    }
    assert_eq!(h.ctx.remaining(FeatureKey::ChatMessage), Remaining::Limited(0));

    let outcome = features::send_message(&h.ctx, "one more", None).await;

    assert!(matches!(outcome, ActionOutcome::QuotaExhausted { .. }));
    assert_eq!(stored_messages(&h).await?.len(), 40);
    assert_eq!(h.transport.call_count(), 20);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_blank_message_is_ignored() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("reply")));

    let outcome = features::send_message(&h.ctx, "  ", None).await;

    assert!(matches!(outcome, ActionOutcome::InvalidInput { .. }));
    assert!(stored_messages(&h).await?.is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_chat_keeps_only_the_user_message() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("never sent")));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = features::send_message(&h.ctx, "Hello", Some(&cancel)).await;

    assert!(matches!(outcome, ActionOutcome::Failed { .. }));
    let messages = stored_messages(&h).await?;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(h.transport.call_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_history_is_sorted_by_timestamp() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("Hi!")));
    features::send_message(&h.ctx, "Hello", None).await;

    let earlier = ChatMessageBuilder::default()
        .sender(Sender::User)
        .text("from yesterday")
        .timestamp(Utc::now() - ChronoDuration::days(1))
        .user_id("guest-1")
        .build()?;
    let collection = h.ctx.collection(MESSAGES)?;
    h.store.add(&collection, serde_json::to_value(&earlier)?).await?;

    let history = features::chat_history(&h.ctx).await?;

    let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["from yesterday", "Hello", "Hi!"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_history_skips_unreadable_documents() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("Hi!")));
    let collection = h.ctx.collection(MESSAGES)?;
    h.store
        .add(&collection, serde_json::json!({"note": "not a message"}))
        .await?;
    features::send_message(&h.ctx, "Hello", None).await;

    let history = features::chat_history(&h.ctx).await?;

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, "Hello");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_watch_sees_user_and_ai_messages() -> anyhow::Result<()> {
    let h = guest(MockTransport::always(MockReply::text("Hi! How can I help?")));
    let mut changes = features::watch_messages(&h.ctx)?;

    features::send_message(&h.ctx, "Hello there", None).await;

    let mut seen = Vec::new();
    for _ in 0..2 {
        match changes.next().await {
            Some(DocumentChange::Added(doc)) => {
                let message: ChatMessage = serde_json::from_value(doc.data().clone())?;
                seen.push((message.sender, message.text));
            }
            other => panic!("expected an added message, got {:?}", other),
        }
    }
    assert_eq!(
        seen,
        vec![
            (Sender::User, "Hello there".to_string()),
            (Sender::Ai, "Hi! How can I help?".to_string()),
        ]
    );
    assert!(changes.next().now_or_never().is_none());
    Ok(())
}
