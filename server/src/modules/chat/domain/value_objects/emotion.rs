use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 情感类型
///
/// 值对象：表示从用户最新消息中检测到的情感状态。
/// 序列化标签与前端约定一致（葡萄牙语）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    /// 悲伤
    #[serde(rename = "triste")]
    Sad,
    /// 开心
    #[serde(rename = "feliz")]
    Happy,
    /// 愤怒
    #[serde(rename = "irritado")]
    Angry,
    /// 焦虑
    #[serde(rename = "ansioso")]
    Anxious,
    /// 中性
    #[serde(rename = "neutro")]
    Neutral,
}

impl Emotion {
    /// 关键词分组，按优先级排列：悲伤 > 开心 > 愤怒 > 焦虑
    pub const KEYWORD_BUCKETS: [(Emotion, &'static [&'static str]); 4] = [
        (
            Emotion::Sad,
            &[
                "triste",
                "deprimido",
                "mal",
                "sozinho",
                "chateado",
                "perdido",
                "vazio",
            ],
        ),
        (
            Emotion::Happy,
            &[
                "feliz",
                "alegre",
                "ótimo",
                "maravilhoso",
                "animado",
                "contente",
            ],
        ),
        (
            Emotion::Angry,
            &[
                "raiva",
                "irritado",
                "furioso",
                "bravo",
                "nervoso",
                "estressado",
            ],
        ),
        (
            Emotion::Anxious,
            &[
                "ansioso",
                "preocupado",
                "medo",
                "nervoso",
                "inseguro",
                "tenso",
            ],
        ),
    ];

    /// 获取所有可用的情感类型
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Sad,
            Emotion::Happy,
            Emotion::Angry,
            Emotion::Anxious,
            Emotion::Neutral,
        ]
    }

    /// 前端使用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Sad => "triste",
            Emotion::Happy => "feliz",
            Emotion::Angry => "irritado",
            Emotion::Anxious => "ansioso",
            Emotion::Neutral => "neutro",
        }
    }

    /// 检测文本中的情感
    ///
    /// 小写后逐组做子串匹配，第一个命中的分组获胜；都未命中时为中性。
    /// 不做打分，也不处理否定。
    pub fn detect_from_text(text: &str) -> Self {
        let text_lower = text.to_lowercase();

        Self::KEYWORD_BUCKETS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|word| text_lower.contains(word)))
            .map(|(emotion, _)| *emotion)
            .unwrap_or(Emotion::Neutral)
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Self::Neutral
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "triste" => Ok(Emotion::Sad),
            "feliz" => Ok(Emotion::Happy),
            "irritado" => Ok(Emotion::Angry),
            "ansioso" => Ok(Emotion::Anxious),
            "neutro" => Ok(Emotion::Neutral),
            _ => Err(format!("Unknown emotion: {}", s)),
        }
    }
}
