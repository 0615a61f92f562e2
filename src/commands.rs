//! CLI Command Handlers
//!
//! Each handler takes CLI args, the resolved config and Output, and returns
//! an ExitCode.

use serde::Serialize;

use crate::catalog::{self, COIN_PACKAGES, UNLOCK_COST};
use crate::cli::{ChatCmd, ChatResponse, EpisodesCmd, ExitCode, InfoCmd, Output, PackagesCmd};
use crate::config::Config;
use crate::models::{ChatMessage, Comment, Episode};
use crate::panel::chat_greeting;

// =============================================================================
// Episodes Command
// =============================================================================

pub async fn episodes_cmd(cmd: EpisodesCmd, output: &Output) -> ExitCode {
    let series = catalog::seed_series();

    let episodes: Vec<&Episode> = match cmd.lock_filter() {
        Some(locked) => series.episodes.iter().filter(|e| e.locked == locked).collect(),
        None => series.episodes.iter().collect(),
    };

    output.info(format!("{} episodes", episodes.len()));

    let result = output.print(&episodes, || {
        episodes
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    });
    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Info Command
// =============================================================================

/// Series summary without the episode list
#[derive(Debug, Serialize)]
pub struct SeriesInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub cast: Vec<String>,
    pub total_episodes: u32,
    pub rating: f32,
    pub available_episodes: usize,
    pub locked_episodes: usize,
    pub unlock_cost: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

pub async fn info_cmd(cmd: InfoCmd, output: &Output) -> ExitCode {
    let series = catalog::seed_series();

    let info = SeriesInfo {
        locked_episodes: series.locked_count(),
        available_episodes: series.episodes.len(),
        unlock_cost: UNLOCK_COST,
        comments: cmd.comments.then(|| series.comments.clone()),
        id: series.id.clone(),
        title: series.title.clone(),
        description: series.description.clone(),
        tags: series.tags.clone(),
        cast: series.cast.clone(),
        total_episodes: series.total_episodes,
        rating: series.rating,
    };

    let result = output.print(&info, || {
        let mut text = format!(
            "{}\n{}\nTags: {}\nElenco: {}\n{} of {} episodes locked ({} coins each)",
            series,
            info.description,
            info.tags.join(", "),
            info.cast.join(", "),
            info.locked_episodes,
            info.available_episodes,
            info.unlock_cost
        );
        if let Some(comments) = &info.comments {
            for c in comments {
                text.push('\n');
                text.push_str(&c.to_string());
            }
        }
        text
    });
    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Packages Command
// =============================================================================

pub async fn packages_cmd(_cmd: PackagesCmd, output: &Output) -> ExitCode {
    let result = output.print(COIN_PACKAGES, || {
        COIN_PACKAGES
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    });
    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Chat Command
// =============================================================================

pub async fn chat_cmd(cmd: ChatCmd, config: &Config, output: &Output) -> ExitCode {
    let message = match crate::cli::validate_message(&cmd.message) {
        Ok(m) => m.to_string(),
        Err(e) => return output.error(e, ExitCode::InvalidArgs),
    };

    let bridge = config.chat_bridge();
    if !bridge.is_configured() {
        output.info("No Gemini API key configured (set GEMINI_API_KEY)");
    }

    let character = cmd
        .character
        .unwrap_or_else(|| config.character().to_string());

    output.info(format!("{} está digitando...", character));

    // One-shot: the character's greeting is the only prior turn
    let history = vec![ChatMessage::model(chat_greeting(&character))];
    let reply = bridge.reply(&character, &history, &message).await;

    let response = ChatResponse {
        character,
        message,
        reply,
    };
    let result = output.print(&response, || {
        format!("{}: {}", response.character, response.reply)
    });
    if let Err(e) = result {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
