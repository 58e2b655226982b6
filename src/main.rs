use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use disrelay::application::cache::{AttachmentCache, Cache, CacheCleaner};
use disrelay::application::use_cases::ResolveMessageUseCase;
use disrelay::domain::entities::{
    Attachment, AttachmentDescriptor, BotToken, MessageEvent, ResolvedMessage,
};
use disrelay::infrastructure::{
    AppConfig, CliArgs, Command, ConfigStore, DiscordRestProvider, HttpAttachmentFetcher,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let store = ConfigStore::new()?;
    let mut config = store.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn build_cache(config: &AppConfig, token: Option<&str>) -> Result<Arc<Cache>> {
    let token = token
        .and_then(BotToken::new)
        .ok_or_else(|| eyre!("a bot token is required, pass --token or set DISCORD_TOKEN"))?;

    let provider = DiscordRestProvider::with_base_url(
        token,
        config.discord.api_base.clone(),
        config.discord.request_timeout(),
    )?;
    let cache_config = config.cache_config();
    let fetcher = HttpAttachmentFetcher::new(cache_config.request_timeout)?;

    Ok(Arc::new(Cache::new(
        Arc::new(provider),
        Arc::new(fetcher),
        cache_config,
    )))
}

fn attachment_json(attachment: &Attachment) -> serde_json::Value {
    json!({
        "name": attachment.name(),
        "content_type": attachment.content_type(),
        "size": attachment.len(),
        "last_reference": attachment.last_reference(),
    })
}

fn message_json(resolved: &ResolvedMessage) -> serde_json::Value {
    json!({
        "id": resolved.event.id,
        "guild": resolved.guild_label(),
        "channel": resolved.channel_label(),
        "author": resolved.event.author.display_name(),
        "content": resolved.event.content,
        "attachments": resolved.downloads.iter().map(attachment_json).collect::<Vec<_>>(),
    })
}

fn print(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: CliArgs, config: AppConfig) -> Result<()> {
    let token = args.token.as_deref();

    match args.command {
        Command::Channel { id } => print(&build_cache(&config, token)?.channel(&id).await?)?,
        Command::User { id } => print(&build_cache(&config, token)?.user(&id).await?)?,
        Command::Guild { id } => print(&build_cache(&config, token)?.guild(&id).await?)?,
        Command::Attachment {
            url,
            name,
            content_type,
        } => {
            let cache_config = config.cache_config();
            let fetcher = HttpAttachmentFetcher::new(cache_config.request_timeout)?;
            let attachments = AttachmentCache::new(Arc::new(fetcher), &cache_config);
            let attachment = attachments
                .get(&AttachmentDescriptor::new(url, name, content_type))
                .await?;
            print(&attachment_json(&attachment))?;
        }
        Command::Message { events } => {
            let cache = build_cache(&config, token)?;
            let cleaner = CacheCleaner::for_cache(&cache);
            let handle = cleaner.start(cache.clone());
            let use_case = ResolveMessageUseCase::new(cache.clone());

            for path in events {
                let raw = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
                let event: MessageEvent = serde_json::from_str(&raw)
                    .wrap_err_with(|| format!("malformed message event in {}", path.display()))?;

                match use_case.execute(event).await {
                    Ok(resolved) => print(&message_json(&resolved))?,
                    Err(e) => warn!(path = %path.display(), error = %e, "Skipping message"),
                }
            }

            cleaner.stop();
            if let Some(handle) = handle {
                handle.await?;
            }
            info!(stats = %cache.stats(), "Done");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = disrelay::VERSION, "Starting {}", disrelay::NAME);

    run(args, config).await
}
