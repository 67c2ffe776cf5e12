//! # Client wire protocol (spec §6)
//!
//! One newline-delimited JSON object per request. Field names follow the
//! client-facing contract exactly, including the capitalized `Content`
//! field — a quirk carried forward from the original implementation
//! rather than something we'd choose fresh.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ClientRequest {
    pub op: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "Content")]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_capitalized_content_field() {
        let req: ClientRequest =
            serde_json::from_str(r#"{"op":"AppendRec","name":"f","Content":"hello"}"#).unwrap();
        assert_eq!(req.op, "AppendRec");
        assert_eq!(req.name, "f");
        assert_eq!(req.content, "hello");
    }

    #[test]
    fn name_and_content_default_to_empty() {
        let req: ClientRequest = serde_json::from_str(r#"{"op":"ListFiles"}"#).unwrap();
        assert_eq!(req.name, "");
        assert_eq!(req.content, "");
    }
}
