//! Responses API types and chat invocation

use serde::{Deserialize, Serialize};

use super::{API_BASE, OpenAiClient};
use crate::{Error, Result};

/// Role of a model input turn
///
/// `Developer` is the neutral input role replayed assistant history is
/// relabeled to; the Responses API does not accept a persisted `assistant`
/// role on input replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputRole {
    System,
    User,
    Developer,
}

/// One part of a turn's content
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputText { text: String },
    InputImage { image_url: String, detail: String },
}

impl ContentPart {
    /// Build a text part
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::InputText { text: text.into() }
    }

    /// Build an image part referencing a remote URL
    #[must_use]
    pub fn image(image_url: impl Into<String>) -> Self {
        Self::InputImage {
            image_url: image_url.into(),
            detail: "auto".to_string(),
        }
    }
}

/// One role-tagged turn of model input
#[derive(Debug, Clone, Serialize)]
pub struct InputItem {
    #[serde(rename = "type")]
    pub item_type: &'static str,
    pub role: InputRole,
    pub content: Vec<ContentPart>,
}

impl InputItem {
    /// Build a message turn
    #[must_use]
    pub fn message(role: InputRole, content: Vec<ContentPart>) -> Self {
        Self {
            item_type: "message",
            role,
            content,
        }
    }
}

/// Tool made available to the model for a call
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tool {
    FileSearch { vector_store_ids: Vec<String> },
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a [InputItem],
    tools: &'a [Tool],
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl OpenAiClient {
    /// Invoke the chat model with assembled input turns
    ///
    /// Returns the concatenated output text, which may be empty when the
    /// model produced no usable text.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn create_response(&self, input: &[InputItem], tools: &[Tool]) -> Result<String> {
        let request = ResponsesRequest {
            model: &self.models.chat,
            input,
            tools,
        };

        let response = self
            .client
            .post(format!("{API_BASE}/responses"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Model(format!("responses request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Model(format!("responses API error {status}: {body}")));
        }

        let result: ResponsesResponse = response
            .json()
            .await
            .map_err(|e| Error::Model(format!("responses parse error: {e}")))?;

        Ok(extract_output_text(&result))
    }
}

/// Concatenate the text parts of a Responses API result
fn extract_output_text(response: &ResponsesResponse) -> String {
    response
        .output
        .iter()
        .flat_map(|item| &item.content)
        .filter(|part| part.kind == "output_text")
        .map(|part| part.text.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_item_wire_shape() {
        let item = InputItem::message(
            InputRole::User,
            vec![
                ContentPart::text("Describe the image."),
                ContentPart::image("https://example.com/photo.jpg"),
            ],
        );

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "message");
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"][0]["type"], "input_text");
        assert_eq!(json["content"][1]["type"], "input_image");
        assert_eq!(json["content"][1]["detail"], "auto");
    }

    #[test]
    fn test_file_search_tool_wire_shape() {
        let tool = Tool::FileSearch {
            vector_store_ids: vec!["vs_123".to_string()],
        };

        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["type"], "file_search");
        assert_eq!(json["vector_store_ids"][0], "vs_123");
    }

    #[test]
    fn test_extract_output_text_skips_non_text_parts() {
        let response: ResponsesResponse = serde_json::from_value(serde_json::json!({
            "output": [
                {"content": [{"type": "refusal", "text": "nope"}]},
                {"content": [
                    {"type": "output_text", "text": "Hello"},
                    {"type": "output_text", "text": " world"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(extract_output_text(&response), "Hello world");
    }

    #[test]
    fn test_extract_output_text_empty_output() {
        let response: ResponsesResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(extract_output_text(&response), "");
    }
}
