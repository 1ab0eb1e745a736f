// src/translator.rs
//
// Client for the translation collaborator. The service wraps a
// vision-language model: it receives the page image and an instruction
// prompt, and answers with free-form text that embeds a JSON array of
// detected regions. The call is network-bound and may be slow or
// rate-limited; nothing here assumes bounded-time completion.

use crate::annotation::{sanitize_regions, LanguageMode, RawRegion, TranslationItem};
use crate::utils::resource_url;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("translation service returned HTTP {0}")]
    Status(u16),
    #[error("translation service error: {0}")]
    Service(String),
    #[error("could not decode translation output: {0}")]
    Decode(String),
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    prompt: String,
    #[serde(rename = "imageParts")]
    image_parts: Vec<ImagePart<'a>>,
}

#[derive(Serialize)]
struct ImagePart<'a> {
    #[serde(rename = "inlineData")]
    inline_data: InlineData<'a>,
}

#[derive(Serialize)]
struct InlineData<'a> {
    data: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Send `image` (a data URL) to the translation service and decode the
/// ordered region list from its answer.
pub async fn translate(
    image: &str,
    mode: LanguageMode,
) -> Result<Vec<TranslationItem>, TranslateError> {
    let (mime_type, data) = split_data_url(image)
        .ok_or_else(|| TranslateError::Decode("source image is not a base64 data URL".into()))?;

    let body = TranslateBody {
        prompt: build_prompt(mode),
        image_parts: vec![ImagePart {
            inline_data: InlineData { data, mime_type },
        }],
    };

    let response = Request::post(&resource_url("api/translate"))
        .json(&body)
        .map_err(|e| TranslateError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| TranslateError::Request(e.to_string()))?;

    if !response.ok() {
        // The service reports failures as { "error": ... }; fall back to
        // the bare status when the payload is not readable.
        if let Ok(payload) = response.json::<TranslateResponse>().await {
            if let Some(message) = payload.error {
                return Err(TranslateError::Service(message));
            }
        }
        return Err(TranslateError::Status(response.status()));
    }

    let payload: TranslateResponse = response
        .json()
        .await
        .map_err(|e| TranslateError::Decode(e.to_string()))?;
    if let Some(message) = payload.error {
        return Err(TranslateError::Service(message));
    }
    let text = payload
        .text
        .ok_or_else(|| TranslateError::Decode("response carries no text".into()))?;

    decode_regions(&text)
}

/// Decode the model's answer into sanitized items. The array may arrive
/// bare or wrapped in a ```json fence.
pub fn decode_regions(text: &str) -> Result<Vec<TranslationItem>, TranslateError> {
    let json = extract_json(text)
        .ok_or_else(|| TranslateError::Decode("no JSON array in model output".into()))?;
    let raw: Vec<RawRegion> =
        serde_json::from_str(json).map_err(|e| TranslateError::Decode(e.to_string()))?;
    Ok(sanitize_regions(raw))
}

/// Pull the JSON array out of the model's answer: a fenced ```json block
/// first, then the outermost bare array.
fn extract_json(response: &str) -> Option<&str> {
    if let Some(start) = response.find("```json") {
        let rest = &response[start + 7..];
        if let Some(end) = rest.find("```") {
            return Some(rest[..end].trim());
        }
    }

    let start = response.find('[')?;
    let end = response.rfind(']')?;
    (end >= start).then(|| &response[start..=end])
}

/// Split a `data:<mime>;base64,<payload>` URL into mime type and payload.
fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    (!mime.is_empty() && !data.is_empty()).then_some((mime, data))
}

fn build_prompt(mode: LanguageMode) -> String {
    format!(
        "Detect every text region in this manga page ({source} text) and translate it \
         into {target}. Answer with a JSON array only, no prose. Each element: \
         {{\"id\": unique string, \
         \"bbox\": [ymin, xmin, ymax, xmax] normalized to 0..1, \
         \"type\": one of \"dialogue\", \"sfx\", \"narration\", \"other\", \
         \"original\": the source text, \
         \"translation\": the {target} translation, \
         \"bg_color\": dominant background color as hex, or \"complex\" if not uniform}}. \
         Keep the array in natural reading order.",
        source = mode.source_language(),
        target = mode.target_language(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::RegionKind;

    #[test]
    fn test_extract_json_prefers_fenced_block() {
        let response = "Here you go:\n```json\n[{\"id\": \"a\"}]\n```\ntrailing [junk]";
        assert_eq!(extract_json(response), Some("[{\"id\": \"a\"}]"));
    }

    #[test]
    fn test_extract_json_falls_back_to_bare_array() {
        let response = "The regions are [{\"id\": \"a\"}] as requested.";
        assert_eq!(extract_json(response), Some("[{\"id\": \"a\"}]"));
    }

    #[test]
    fn test_extract_json_rejects_prose() {
        assert_eq!(extract_json("I could not find any text."), None);
    }

    #[test]
    fn test_split_data_url() {
        let (mime, data) = split_data_url("data:image/png;base64,AAAA").unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(data, "AAAA");

        assert!(split_data_url("https://example.com/p.png").is_none());
        assert!(split_data_url("data:image/png;base64,").is_none());
        assert!(split_data_url("data:image/png,plain").is_none());
    }

    #[test]
    fn test_decode_regions_end_to_end() {
        let text = r#"```json
        [
          {"id": "a", "bbox": [0.10, 0.20, 0.30, 0.40], "type": "sfx",
           "original": "ドン", "translation": "BOOM", "bg_color": "complex"},
          {"id": "b", "bbox": [-0.5, 0.0, 1.5, 0.9], "type": "thought-bubble",
           "translation": "..."},
          {"id": "c", "type": "dialogue", "original": "?"}
        ]
        ```"#;
        let items = decode_regions(text).unwrap();
        // "c" has no bbox and is dropped; the rest keep their order.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "a");
        assert_eq!(items[0].kind, RegionKind::Sfx);
        assert_eq!(items[1].kind, RegionKind::Other);
        assert_eq!(items[1].bbox.ymin, 0.0);
        assert_eq!(items[1].bbox.ymax, 1.0);
    }

    #[test]
    fn test_decode_regions_reports_undecodable_payload() {
        assert!(matches!(
            decode_regions("[{\"id\": broken]"),
            Err(TranslateError::Decode(_))
        ));
    }

    #[test]
    fn test_prompt_names_both_languages() {
        let prompt = build_prompt(LanguageMode::JaToEn);
        assert!(prompt.contains("Japanese"));
        assert!(prompt.contains("English"));
        assert!(prompt.contains("bbox"));
    }
}
