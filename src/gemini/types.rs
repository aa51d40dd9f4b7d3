use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub error: Option<ApiError>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined in order. `None` when the
    /// model returned nothing (safety block, empty candidate list).
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.as_ref()?.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: Option<u16>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_parts(parts: &[&str]) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(Content {
                    parts: parts
                        .iter()
                        .map(|t| Part {
                            text: t.to_string(),
                        })
                        .collect(),
                    role: Some("model".into()),
                }),
                finish_reason: Some("STOP".into()),
            }]),
            error: None,
        }
    }

    #[test]
    fn text_joins_parts_of_first_candidate() {
        let response = response_with_parts(&["Hello, ", "world."]);
        assert_eq!(response.text().as_deref(), Some("Hello, world."));
    }

    #[test]
    fn text_is_none_without_candidates() {
        let response = GenerateContentResponse {
            candidates: None,
            error: None,
        };
        assert!(response.text().is_none());
    }

    #[test]
    fn text_is_none_for_blank_parts() {
        let response = response_with_parts(&["", "  "]);
        assert!(response.text().is_none());
    }

    #[test]
    fn request_serializes_generation_config_in_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".into(),
                }],
                role: None,
            }],
            generation_config: GenerationConfig::default(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert!(json["contents"][0].get("role").is_none());
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert!(json["generationConfig"]["topP"].is_number());
    }
}
