//! Character chat bridge
//!
//! Turns a transcript plus a new fan message into one prompt, forwards it to
//! Gemini and always hands back something displayable: the reply, a
//! placeholder, or a fixed in-character fallback.

use tracing::{debug, error, warn};

use crate::api::gemini::GeminiClient;
use crate::models::{ChatMessage, ChatRole};

/// Returned without any network call when no credential is configured
pub const MISSING_KEY_MESSAGE: &str = "Erro: Chave de API não configurada. Por favor, configure a chave para conversar com o personagem.";

/// Returned when the service call fails for any reason
pub const OUTAGE_MESSAGE: &str =
    "Desculpe, estou lidando com alguns problemas familiares agora. Falo com você depois.";

/// Returned when the service answers with empty content
pub const EMPTY_REPLY: &str = "...";

/// Speaker label for user turns in the prompt
pub const FAN_LABEL: &str = "Fã";

/// Series the persona belongs to
pub const SERIES_TITLE: &str = "Nós Somos Seus Pais";

/// Chat bridge over an optional Gemini client
#[derive(Debug, Clone)]
pub struct ChatBridge {
    client: Option<GeminiClient>,
}

impl ChatBridge {
    pub fn new(client: Option<GeminiClient>) -> Self {
        Self { client }
    }

    /// Bridge with no credential; every call returns [`MISSING_KEY_MESSAGE`]
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Produce the character's reply. Never fails.
    pub async fn reply(&self, character: &str, history: &[ChatMessage], message: &str) -> String {
        let Some(client) = &self.client else {
            warn!("API key is missing; chat request not sent");
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = build_prompt(character, history, message);
        debug!(
            character,
            turns = history.len(),
            model = client.model_name(),
            "sending chat prompt"
        );

        match client.generate(&prompt).await {
            Ok(text) if text.is_empty() => EMPTY_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                error!("Gemini error: {}", e);
                OUTAGE_MESSAGE.to_string()
            }
        }
    }
}

/// Persona instruction pinned at the top of every prompt
pub fn persona_instruction(character: &str) -> String {
    format!(
        "Você está interpretando o personagem {character} da série de drama \"{SERIES_TITLE}\".\n\
         \n\
         Contexto da Série:\n\
         Você é parte de uma família bilionária com muitos segredos. O tom é dramático, intenso e emocional.\n\
         Você deve responder aos fãs que estão assistindo a série.\n\
         Mantenha a personalidade do personagem (arrogante mas com bom coração, ou misterioso).\n\
         Não dê spoilers diretos do final, mas dê dicas intrigantes.\n\
         Responda em Português do Brasil.\n\
         Mantenha as respostas curtas (máximo 2 frases), como se fosse um chat rápido."
    )
}

/// Render the transcript as one speaker-prefixed line per turn
pub fn conversation_context(character: &str, history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                ChatRole::User => FAN_LABEL,
                ChatRole::Model => character,
            };
            format!("{}: {}", speaker, turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full prompt: persona, transcript, new utterance, open reply slot
pub fn build_prompt(character: &str, history: &[ChatMessage], message: &str) -> String {
    format!(
        "{}\n\nHistórico da conversa:\n{}\n\n{}: {}\n{}:",
        persona_instruction(character),
        conversation_context(character, history),
        FAN_LABEL,
        message,
        character
    )
}
