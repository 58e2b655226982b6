use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "disrelay",
    version,
    about = "Resolve Discord entities and attachments through the relay cache",
    long_about = None
)]
pub struct CliArgs {
    /// Bot token used for Discord API lookups.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Discord REST API base URL.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Attachment lifetime in seconds.
    #[arg(long, value_name = "SECS")]
    pub attachment_lifetime_secs: Option<u64>,

    /// Maximum number of attachments kept after a clean.
    #[arg(long, value_name = "COUNT")]
    pub attachment_prune_threshold: Option<usize>,

    /// Request timeout in seconds for both API lookups and downloads.
    #[arg(long, value_name = "SECS")]
    pub request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up a channel by ID.
    Channel { id: String },

    /// Look up a user by ID.
    User { id: String },

    /// Look up a guild by ID.
    Guild { id: String },

    /// Download an attachment and print its metadata.
    Attachment {
        url: String,

        /// File name to report.
        #[arg(long, default_value = "")]
        name: String,

        /// Content type to report when the server sends none.
        #[arg(long, default_value = "")]
        content_type: String,
    },

    /// Resolve message-create events read from JSON files.
    Message {
        #[arg(value_name = "PATH", required = true)]
        events: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attachment_command() {
        let args = CliArgs::parse_from([
            "disrelay",
            "attachment",
            "https://example.com/a.png",
            "--name",
            "a.png",
        ]);

        match &args.command {
            Command::Attachment {
                url,
                name,
                content_type,
            } => {
                assert_eq!(url, "https://example.com/a.png");
                assert_eq!(name, "a.png");
                assert!(content_type.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_token_flag_before_subcommand() {
        let args = CliArgs::parse_from(["disrelay", "--token", "abc", "guild", "9101112"]);

        assert_eq!(args.token.as_deref(), Some("abc"));
        assert!(matches!(args.command, Command::Guild { ref id } if id == "9101112"));
    }

    #[test]
    fn test_message_requires_a_path() {
        assert!(CliArgs::try_parse_from(["disrelay", "message"]).is_err());

        let args = CliArgs::parse_from(["disrelay", "message", "a.json", "b.json"]);
        match args.command {
            Command::Message { events } => assert_eq!(events.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
