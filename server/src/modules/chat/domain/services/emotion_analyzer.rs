use super::super::value_objects::Emotion;

/// 情感分析服务
///
/// 领域服务：分析用户消息内容，提取情感信息
#[derive(Debug, Clone, Default)]
pub struct EmotionAnalyzer;

impl EmotionAnalyzer {
    /// 创建新的情感分析器
    pub fn new() -> Self {
        Self
    }

    /// 分析文本的情感
    pub fn analyze(&self, text: &str) -> Emotion {
        let emotion = Emotion::detect_from_text(text);
        tracing::debug!(emotion = %emotion, "Detected user emotion");
        emotion
    }
}
