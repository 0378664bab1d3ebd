use super::{ImageGenerationService, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::generation_config::GenerationConfig;
use crate::domain::image::{GeneratedImage, ImageRequest};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationSettings>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Serialize, Default)]
struct GenerationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageSettings>,
}

#[derive(Serialize)]
struct ImageSettings {
    #[serde(rename = "aspectRatio")]
    aspect_ratio: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

impl GeminiResponse {
    fn parts(&self) -> impl Iterator<Item = &GeminiCandidatePart> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    fn first_text(&self) -> Option<String> {
        self.parts().find_map(|part| part.text.clone())
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(120)
    }
}

impl GeminiClient {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &GenerationConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::GenerationError("Missing API key for Google provider".to_string())
            })
    }

    fn endpoint(config: &GenerationConfig, model: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let base_url = config.base_url.trim_end_matches('/');
        Ok(format!(
            "{}/{}:generateContent?key={}",
            base_url,
            model.trim(),
            api_key
        ))
    }

    async fn send(&self, url: &str, body: &GeminiRequest) -> Result<GeminiResponse> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::GenerationError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GenerationError(format!("Failed to parse JSON: {}", e)))
    }

    async fn generate_one(
        &self,
        config: &GenerationConfig,
        request: &ImageRequest,
        prompt: &str,
    ) -> Result<GeneratedImage> {
        let url = Self::endpoint(config, &config.image_model)?;

        let mut parts = vec![GeminiPart::Text {
            text: prompt.to_string(),
        }];
        if let Some(reference) = request.reference_image.as_deref() {
            parts.push(GeminiPart::Inline {
                inline_data: InlineData {
                    mime_type: sniff_mime(reference).to_string(),
                    data: BASE64.encode(reference),
                },
            });
        }

        let body = GeminiRequest {
            contents: vec![GeminiContent { parts, role: None }],
            generation_config: Some(GenerationSettings {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                image_config: Some(ImageSettings {
                    aspect_ratio: request.style.aspect_ratio.as_str().to_string(),
                }),
                ..Default::default()
            }),
        };

        let json = self.send(&url, &body).await?;
        let inline = json
            .parts()
            .find_map(|part| part.inline_data.as_ref())
            .ok_or_else(|| AppError::GenerationError("Response contained no image".to_string()))?;

        let bytes = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| AppError::GenerationError(format!("Invalid image data: {}", e)))?;

        Ok(GeneratedImage::new(bytes, inline.mime_type.clone(), prompt))
    }
}

/// Guess an image mime type from its magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else {
        "application/octet-stream"
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &GenerationConfig, system: &str, user: &str) -> Result<String> {
        let url = Self::endpoint(config, &config.text_model)?;

        let mut parts = Vec::new();
        if !system.trim().is_empty() {
            parts.push(GeminiPart::Text {
                text: system.to_string(),
            });
        }
        if !user.trim().is_empty() {
            parts.push(GeminiPart::Text {
                text: user.to_string(),
            });
        }

        let body = GeminiRequest {
            contents: vec![GeminiContent { parts, role: None }],
            generation_config: Some(GenerationSettings {
                temperature: Some(config.temperature.unwrap_or(0.7) as f64),
                ..Default::default()
            }),
        };

        let json = self.send(&url, &body).await?;
        json.first_text()
            .ok_or_else(|| AppError::GenerationError("Invalid response format".to_string()))
    }
}

#[async_trait]
impl ImageGenerationService for GeminiClient {
    async fn generate_images(
        &self,
        config: &GenerationConfig,
        request: &ImageRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let prompt = format!("{}\n\n{}", request.prompt.trim(), request.style.describe());

        let attempts = (0..request.count).map(|_| self.generate_one(config, request, &prompt));
        let results = join_all(attempts).await;

        let mut images = Vec::with_capacity(results.len());
        for (attempt, result) in results.into_iter().enumerate() {
            match result {
                Ok(image) => images.push(image),
                Err(err) => tracing::warn!(attempt, error = %err, "Image generation attempt failed"),
            }
        }

        tracing::info!(
            requested = request.count,
            generated = images.len(),
            model = %config.image_model,
            "Image generation finished"
        );
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D]), "image/png");
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_mime(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_mime(b"hello"), "application/octet-stream");
    }

    #[test]
    fn test_missing_api_key() {
        let config = GenerationConfig::default();
        assert!(matches!(
            GeminiClient::endpoint(&config, "m"),
            Err(AppError::GenerationError(_))
        ));
    }

    #[test]
    fn test_endpoint_format() {
        let config = GenerationConfig {
            base_url: "https://example.test/v1beta/models/".to_string(),
            api_key: Some("k".to_string()),
            ..GenerationConfig::default()
        };
        assert_eq!(
            GeminiClient::endpoint(&config, " img-model ").unwrap(),
            "https://example.test/v1beta/models/img-model:generateContent?key=k"
        );
    }

    #[test]
    fn test_request_serializes_inline_image() {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart::Text { text: "p".to_string() },
                    GeminiPart::Inline {
                        inline_data: InlineData {
                            mime_type: "image/png".to_string(),
                            data: "AAAA".to_string(),
                        },
                    },
                ],
                role: None,
            }],
            generation_config: Some(GenerationSettings {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_response_finds_image_part() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"here"},{"inlineData":{"mimeType":"image/png","data":"aGk="}}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        let inline = response.parts().find_map(|p| p.inline_data.as_ref()).unwrap();
        assert_eq!(BASE64.decode(inline.data.as_bytes()).unwrap(), b"hi");
    }

    #[test]
    fn test_response_first_text_skips_image_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"aGk="}},{"text":"[1]"}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.first_text().as_deref(), Some("[1]"));

        let empty: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.first_text().is_none());
    }
}
