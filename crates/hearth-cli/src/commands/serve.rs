//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::config::Config;

use super::open_db;

/// Start the web server, with flags taking precedence over the config file
pub async fn cmd_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<&Path>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("🚀 Starting Hearth web server...");
    println!("   Database: {}", config.database.path.display());
    println!(
        "   Listening: http://{}:{}",
        config.server.host, config.server.port
    );
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if config.chat.is_enabled() {
        println!("   🤖 Chat model: {}", config.chat.model);
    }
    if config.server.host != "127.0.0.1" && config.server.host != "localhost" {
        println!();
        println!("   ⚠️  No authentication - do not expose to untrusted networks!");
    }
    println!();

    let db = open_db(&config)?;
    let static_dir = match static_dir {
        Some(dir) => Some(
            dir.to_str()
                .context("Static directory path is not valid UTF-8")?
                .to_string(),
        ),
        None => None,
    };

    hearth_server::serve_with_config(db, config, static_dir.as_deref()).await
}
