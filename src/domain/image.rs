use serde::{Deserialize, Serialize};
use validator::Validate;

/// One image returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub prompt_used: String,
}

impl GeneratedImage {
    pub fn new(image_bytes: Vec<u8>, mime_type: impl Into<String>, prompt_used: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_bytes,
            mime_type: mime_type.into(),
            prompt_used: prompt_used.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.image_bytes.len()
    }

    /// File extension matching the mime type, `png` when unknown.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Square => "1:1",
        }
    }
}

/// Visual style applied to every prompt in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub style: String,
    #[serde(default)]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub include_text: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style: "clean corporate presentation".to_string(),
            color_scheme: None,
            aspect_ratio: AspectRatio::Wide,
            include_text: true,
        }
    }
}

impl StyleConfig {
    /// Style description appended to a content prompt.
    pub fn describe(&self) -> String {
        let mut parts = vec![format!("Style: {}", self.style)];
        if let Some(colors) = self.color_scheme.as_deref().filter(|c| !c.trim().is_empty()) {
            parts.push(format!("Color scheme: {}", colors));
        }
        parts.push(format!("Aspect ratio: {}", self.aspect_ratio.as_str()));
        if self.include_text {
            parts.push("Render the slide title as legible text.".to_string());
        } else {
            parts.push("Do not render any text.".to_string());
        }
        parts.join("\n")
    }
}

/// How dense the generated outline should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Simple,
    #[default]
    Standard,
    Detailed,
}

impl ComplexityLevel {
    pub fn instruction(&self) -> &'static str {
        match self {
            ComplexityLevel::Simple => "Keep each page to one short sentence of content.",
            ComplexityLevel::Standard => "Give each page two or three concise bullet points.",
            ComplexityLevel::Detailed => {
                "Give each page a thorough explanation with supporting details."
            }
        }
    }
}

/// Upper bound for `ImageRequest::count`; configuration may lower it.
pub const MAX_IMAGES_PER_REQUEST: u32 = 8;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ImageRequest {
    #[validate(length(min = 1, max = 4096))]
    pub prompt: String,
    pub style: StyleConfig,
    #[validate(range(min = 1, max = 8))]
    pub count: u32,
    #[serde(skip)]
    pub reference_image: Option<Vec<u8>>,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, style: StyleConfig, count: u32) -> Self {
        Self {
            prompt: prompt.into(),
            style,
            count,
            reference_image: None,
        }
    }

    pub fn with_reference_image(mut self, bytes: Vec<u8>) -> Self {
        self.reference_image = Some(bytes);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutlineRequest {
    #[validate(length(min = 1, max = 4096))]
    pub prompt: String,
    #[validate(range(min = 1, max = 30))]
    pub page_count: u32,
    pub complexity: ComplexityLevel,
}

/// Image produced for one outline page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageImage {
    pub page_number: u32,
    pub image: GeneratedImage,
}

/// Images for an outline; pages whose generation failed are listed, not fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineImageBatch {
    pub images: Vec<PageImage>,
    pub failed_pages: Vec<u32>,
}

impl OutlineImageBatch {
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }
}
