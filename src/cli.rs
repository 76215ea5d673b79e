use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "trusty_todo_lists",
    version,
    about = "Session-backed todo lists served over HTTP"
)]
pub struct Cli {
    /// Configuration file (default: ~/.config/trtodo-web/config.json)
    #[arg(long, global = true, env = "TRTODO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Address to listen on, overriding server.bind
        #[arg(long)]
        bind: Option<String>,
    },
    /// Read or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective value of a key
    Get { key: String },
    /// Set a key
    Set { key: String, value: String },
    /// Reset a key to its default
    Unset { key: String },
    /// Print every key
    List,
}
