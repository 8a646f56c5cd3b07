//! Chat advisor command

use anyhow::{Context, Result};
use hearth_core::advisor::LedgerAdvisor;
use hearth_core::ai::AIClient;
use hearth_core::config::Config;
use hearth_core::db::Database;
use hearth_core::prompts::PromptLibrary;

use super::print_json;

pub async fn cmd_ask(db: &Database, config: &Config, question: &str, json: bool) -> Result<()> {
    let Some(client) = AIClient::from_config(&config.chat) else {
        anyhow::bail!(
            "Chat is not configured. Set HEARTH_CHAT_HOST (and HEARTH_CHAT_API_KEY if needed) or [chat] host in hearth.toml"
        );
    };
    let prompts = PromptLibrary::from_config(config.prompts_dir.as_deref());

    let answer = LedgerAdvisor::new(db, &client, &prompts)
        .with_recent_limit(config.chat.recent_limit)
        .ask(question)
        .await
        .context("Chat request failed")?;

    if json {
        return print_json(&answer);
    }

    println!();
    println!("🤖 {}", answer.model);
    println!();
    println!("{}", answer.reply.trim());
    Ok(())
}
