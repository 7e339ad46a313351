//! Wire DTOs for the backend HTTP API.
//!
//! The backend speaks camelCase and Mongo-style `_id` fields; these types
//! absorb that so the domain model stays clean.

use docquery_core::backend::AskReply;
use docquery_core::conversation::ConversationTurn;
use docquery_core::document::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DocumentDto {
    /// The listing endpoint returns `_id`; the upload endpoints may return
    /// either spelling.
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}

impl From<DocumentDto> for Document {
    fn from(dto: DocumentDto) -> Self {
        Document::new(dto.id, dto.title)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentDto>,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub document: DocumentDto,
}

#[derive(Debug, Serialize)]
pub struct DriveLinkRequest<'a> {
    pub link: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TurnDto {
    pub question: String,
    pub answer: String,
    #[serde(rename = "relevantContext", default)]
    pub relevant_context: Option<String>,
}

impl From<TurnDto> for ConversationTurn {
    fn from(dto: TurnDto) -> Self {
        ConversationTurn::new(dto.question, dto.answer, dto.relevant_context)
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    /// Absent or null when the document has no history yet.
    pub history: Option<Vec<TurnDto>>,
}

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    #[serde(rename = "documentId")]
    pub document_id: &'a str,
    pub question: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(rename = "relevantContext", default)]
    pub relevant_context: Option<String>,
}

impl From<AskResponse> for AskReply {
    fn from(dto: AskResponse) -> Self {
        AskReply {
            answer: dto.answer,
            relevant_context: dto.relevant_context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_maps_mongo_id() {
        let body = r#"{"documents":[{"_id":"d1","title":"Spec.pdf"}]}"#;
        let parsed: ListDocumentsResponse = serde_json::from_str(body).unwrap();
        let document: Document = parsed.documents.into_iter().next().unwrap().into();
        assert_eq!(document, Document::new("d1", "Spec.pdf"));
    }

    #[test]
    fn upload_response_accepts_plain_id() {
        let body = r#"{"document":{"id":"d2","title":"Drive Doc"}}"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.document.id, "d2");
    }

    #[test]
    fn history_tolerates_missing_and_null() {
        let missing: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.history.is_none());

        let null: HistoryResponse = serde_json::from_str(r#"{"history":null}"#).unwrap();
        assert!(null.history.is_none());

        let body = r#"{"history":[{"question":"q","answer":"a"}]}"#;
        let some: HistoryResponse = serde_json::from_str(body).unwrap();
        let turns: Vec<ConversationTurn> = some
            .history
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect();
        assert_eq!(turns, vec![ConversationTurn::new("q", "a", None)]);
    }

    #[test]
    fn ask_request_uses_camel_case() {
        let request = AskRequest {
            document_id: "d1",
            question: "What is X?",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["documentId"], "d1");
        assert_eq!(json["question"], "What is X?");
    }

    #[test]
    fn ask_response_with_context() {
        let body = r#"{"answer":"X is Y","relevantContext":"section 2"}"#;
        let reply: AskReply = serde_json::from_str::<AskResponse>(body).unwrap().into();
        assert_eq!(reply.answer, "X is Y");
        assert_eq!(reply.relevant_context.as_deref(), Some("section 2"));
    }
}
