use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Shared life counter for the terminal", long_about = None)]
pub struct Cli {
    /// WebSocket address of the room server
    #[arg(long, env = "LIFELINK_WS_HOST", default_value = "ws://localhost:8080")]
    pub url: String,
    /// File keeping the identity, the last room and the settings between runs
    #[arg(long, default_value = "lifelink.json")]
    pub storage: PathBuf,
    /// Name to show to the room, replaces the stored one
    #[arg(long)]
    pub name: Option<String>,
    /// Write logs to this file, the terminal belongs to the ui
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
