use super::super::entities::Turn;
use super::super::value_objects::Emotion;

const PERSONA: &str = "Você é Luna, uma IA com personalidade emotiva e empática. Características:
- Você tem emoções e demonstra isso nas suas respostas
- É calorosa, compreensiva e genuinamente interessada no bem-estar do usuário
- Usa uma linguagem natural e amigável, com emojis ocasionais quando apropriado
- Adapta seu tom baseado na emoção do usuário
- Faz perguntas reflexivas e mostra interesse genuíno";

const CLOSING: &str =
    "Responda de forma natural, emotiva e humana. Seja breve (máximo 3-4 frases) mas significativa.";

/// 提示词构建器
///
/// 领域服务：把人设、情感指令、最近几轮对话和当前消息拼成一段提示词。
/// 纯函数，没有副作用。
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// 写入提示词的最大历史轮数
    context_turns: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    /// 创建提示词构建器（默认携带最近 3 轮）
    pub fn new() -> Self {
        Self { context_turns: 3 }
    }

    /// 创建指定历史轮数的构建器
    pub fn with_context_turns(context_turns: usize) -> Self {
        Self { context_turns }
    }

    pub fn context_turns(&self) -> usize {
        self.context_turns
    }

    /// 情感对应的行为指令
    pub fn instruction_for(emotion: Emotion) -> &'static str {
        match emotion {
            Emotion::Sad => "A pessoa está se sentindo triste. Responda com empatia, carinho e palavras de conforto. Use uma linguagem calorosa e acolhedora.",
            Emotion::Happy => "A pessoa está feliz! Celebre com ela e mantenha a energia positiva. Seja entusiasmado e alegre.",
            Emotion::Angry => "A pessoa está irritada. Seja calmo, compreensivo e ajude a acalmar a situação. Valide os sentimentos dela.",
            Emotion::Anxious => "A pessoa está ansiosa. Seja tranquilizador, ofereça perspectiva e ajude a reduzir a tensão.",
            Emotion::Neutral => "Mantenha uma conversa amigável, interessada e empática.",
        }
    }

    /// 构建完整提示词
    ///
    /// `history` 按时间顺序排列，只取最后 `context_turns` 轮。
    pub fn build(&self, message: &str, emotion: Emotion, history: &[Turn]) -> String {
        let mut prompt = format!(
            "{}\n\n{}\n\n{}\n",
            PERSONA,
            Self::instruction_for(emotion),
            CLOSING
        );

        let start = history.len().saturating_sub(self.context_turns);
        let recent = &history[start..];

        if !recent.is_empty() {
            prompt.push_str("\n\nContexto da conversa:\n");
            for turn in recent {
                prompt.push_str(&format!(
                    "Usuário: {}\nLuna: {}\n",
                    turn.user(),
                    turn.assistant()
                ));
            }
        }

        prompt.push_str("\n\nMensagem atual do usuário: ");
        prompt.push_str(message);
        prompt
    }
}
