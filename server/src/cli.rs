use clap::Parser;

use crate::logger::LogLevel;

#[derive(Parser, Debug)]
#[command(version, about = "Room server for the life counter", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "LIFELINK_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,
    /// Name of a room that exists from start-up on and is never closed, can be repeated
    #[arg(long = "room")]
    pub rooms: Vec<String>,
    /// Log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log: LogLevel,
}
