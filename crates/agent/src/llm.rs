use anyhow::Result;
use async_trait::async_trait;

/// Prompt plus optional inline image payload for multimodal analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl AdviceRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), image: None }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Base64-encoded image bytes with their MIME type, as accepted by the
/// generative endpoint's `inlineData` part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data_base64: String,
}

#[async_trait]
pub trait AdviceModel: Send + Sync {
    async fn generate(&self, request: &AdviceRequest) -> Result<String>;
}
