//! CLI entrypoint for the Adaptive Gaming Guide
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use guide_application::{
    AskGuideInput, AskGuideUseCase, ConversationLogger, GuideParams, NoConversationLogger,
    RenderReplyUseCase, ReplySource,
};
use guide_domain::{Language, classify, infer_from_content};
use guide_infrastructure::{ConfigLoader, EchoReplySource, FileConfig, JsonlConversationLogger};
use guide_presentation::{
    ChatRepl, Cli, Command, LanguageArg, OutputConfig, PanelFormatter, ReplConfig,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Adaptive Gaming Guide");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))?
    };
    check_config(&config)?;

    let params = config.guide_params();
    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help for usage.");
    };

    match command {
        Command::Parse { file, lang } => {
            let raw = read_reply(file.as_ref())?;
            let expected = lang.map(Language::from).unwrap_or(params.ui_language);
            let rendered = RenderReplyUseCase::new(params).render(&raw, expected);
            emit(&PanelFormatter::format_as(&rendered, output.effective_format()));
        }

        Command::Classify {
            text,
            fallback,
            headings,
        } => {
            let fallback = Language::from(fallback);
            let language = if headings {
                infer_from_content(&text, fallback)
            } else {
                classify(&text, fallback)
            };
            println!("{}", language);
        }

        Command::Ask {
            message,
            lang,
            stream,
        } => {
            let params = with_language(params, lang);
            let use_case = AskGuideUseCase::new(build_source(&config)?, params)
                .with_conversation_logger(build_logger(&config));
            let input = AskGuideInput::new(message);

            let result = if stream || config.backend.stream {
                use_case.execute_streaming(input, |_| {}).await?
            } else {
                use_case.execute(input).await?
            };

            if result.retries > 0 {
                info!("Reply needed {} refusal retries", result.retries);
            }
            if let Some(id) = &result.conversation_id {
                info!("Conversation: {}", id);
            }
            emit(&PanelFormatter::format_as(
                &result.rendered,
                output.effective_format(),
            ));
        }

        Command::Chat { lang, stream } => {
            let params = with_language(params, lang);
            let mut repl = ChatRepl::new(build_source(&config)?, params)
                .with_conversation_logger(build_logger(&config))
                .with_output(output)
                .with_config(ReplConfig {
                    stream: stream || config.backend.stream,
                });
            repl.run().await?;
        }
    }

    Ok(())
}

/// Log configuration warnings; fail on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|issue| !issue.is_error()) {
        warn!("{}", issue.message);
    }

    let errors: Vec<&str> = issues
        .iter()
        .filter(|issue| issue.is_error())
        .map(|issue| issue.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn with_language(params: GuideParams, lang: Option<LanguageArg>) -> GuideParams {
    match lang {
        Some(lang) => params.with_ui_language(lang.into()),
        None => params,
    }
}

fn read_reply(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Could not read stdin")?;
            Ok(raw)
        }
    }
}

/// Create the reply source adapter for the configured backend.
fn build_source(config: &FileConfig) -> Result<Arc<dyn ReplySource>> {
    let Some(url) = config.backend.url() else {
        info!("No backend configured, answering offline");
        return Ok(Arc::new(EchoReplySource::new()));
    };

    http_source(url, config)
}

#[cfg(feature = "http")]
fn http_source(url: &str, config: &FileConfig) -> Result<Arc<dyn ReplySource>> {
    info!("Using guide backend at {}", url);
    let source = guide_infrastructure::HttpReplySource::new(url, config.backend.timeout())?;
    Ok(Arc::new(source))
}

#[cfg(not(feature = "http"))]
fn http_source(url: &str, _config: &FileConfig) -> Result<Arc<dyn ReplySource>> {
    warn!(
        "backend.url is {} but this build has no HTTP support, answering offline",
        url
    );
    Ok(Arc::new(EchoReplySource::new()))
}

fn build_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::open)
        .map(|logger| {
            info!("Writing transcript to {}", logger.path().display());
            Arc::new(logger) as Arc<dyn ConversationLogger>
        })
        .unwrap_or_else(|| Arc::new(NoConversationLogger))
}
