//! Model input assembly
//!
//! Builds the per-request input from the fixed system prompt, bounded
//! conversation history, and the new turn.

use crate::db::{ChatRole, MessageRecord};
use crate::openai::responses::{ContentPart, InputItem, InputRole};

/// Fixed system prompt for every model call
pub const SYSTEM_PROMPT: &str = "You are a friendly Telegram assistant. \
Answer briefly and to the point. \
If the user sent a voice message, reply in both text and voice.";

/// Map a stored history role to a model input role.
///
/// Replayed assistant turns are relabeled to the neutral `developer` role so
/// the model does not treat its own prior output as a fresh user
/// instruction. Provider-specific; swapping vocabularies means swapping this
/// function.
#[must_use]
pub const fn to_input_role(role: ChatRole) -> InputRole {
    match role {
        ChatRole::User => InputRole::User,
        ChatRole::System => InputRole::System,
        ChatRole::Assistant => InputRole::Developer,
    }
}

/// Assemble model input: system prompt, chronological history, new turn.
///
/// The new turn carries the prompt text and, when an image URL is present,
/// an image part alongside it.
#[must_use]
pub fn build_model_input(
    history: &[MessageRecord],
    prompt_text: &str,
    image_url: Option<&str>,
) -> Vec<InputItem> {
    let mut input = Vec::with_capacity(history.len() + 2);

    input.push(InputItem::message(
        InputRole::System,
        vec![ContentPart::text(SYSTEM_PROMPT)],
    ));

    for record in history {
        input.push(InputItem::message(
            to_input_role(record.role),
            vec![ContentPart::text(record.content.clone())],
        ));
    }

    let mut turn = vec![ContentPart::text(prompt_text)];
    if let Some(url) = image_url {
        turn.push(ContentPart::image(url));
    }
    input.push(InputItem::message(InputRole::User, turn));

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(role: ChatRole, content: &str) -> MessageRecord {
        MessageRecord {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: 1,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_assistant_history_relabeled_to_developer() {
        assert_eq!(to_input_role(ChatRole::Assistant), InputRole::Developer);
        assert_eq!(to_input_role(ChatRole::User), InputRole::User);
        assert_eq!(to_input_role(ChatRole::System), InputRole::System);
    }

    #[test]
    fn test_input_order_system_history_turn() {
        let history = vec![
            record(ChatRole::User, "earlier question"),
            record(ChatRole::Assistant, "earlier answer"),
        ];

        let input = build_model_input(&history, "new question", None);

        assert_eq!(input.len(), 4);
        assert_eq!(input[0].role, InputRole::System);
        assert_eq!(input[1].role, InputRole::User);
        assert_eq!(input[2].role, InputRole::Developer);
        assert_eq!(input[3].role, InputRole::User);

        let json = serde_json::to_value(&input[3]).unwrap();
        assert_eq!(json["content"][0]["text"], "new question");
    }

    #[test]
    fn test_image_part_added_to_final_turn_only() {
        let input = build_model_input(&[], "Describe the image.", Some("https://x/p.jpg"));

        assert_eq!(input.len(), 2);
        let json = serde_json::to_value(&input[1]).unwrap();
        assert_eq!(json["content"].as_array().unwrap().len(), 2);
        assert_eq!(json["content"][1]["type"], "input_image");
        assert_eq!(json["content"][1]["image_url"], "https://x/p.jpg");
    }

    #[test]
    fn test_no_image_part_without_url() {
        let input = build_model_input(&[], "hello", None);
        let json = serde_json::to_value(&input[1]).unwrap();
        assert_eq!(json["content"].as_array().unwrap().len(), 1);
    }
}
