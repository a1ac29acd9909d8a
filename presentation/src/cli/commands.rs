//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use guide_domain::{Language, OutputFormat};
use std::path::PathBuf;

/// Output format for rendered replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Coloured panel with headings and numbered suggestions
    Panel,
    /// Panel layout without colour
    Plain,
    /// JSON blocks and suggestions
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Panel => OutputFormat::Panel,
            OutputArg::Plain => OutputFormat::Plain,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// English
    En,
    /// Spanish
    Es,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::English,
            LanguageArg::Es => Language::Spanish,
        }
    }
}

/// CLI arguments for adaptive-guide
#[derive(Parser, Debug)]
#[command(name = "adaptive-guide")]
#[command(author, version, about = "Adaptive Gaming Guide - bilingual assistant for accessible play")]
#[command(long_about = r#"
Adaptive Gaming Guide answers questions about adaptive controllers, accessible
setups and game therapy, in English or Spanish.

Replies are structured under Summary / Recommendations / Rationale headings,
and follow-up questions are offered as numbered suggestions.

Configuration files are loaded from (in priority order):
1. GUIDE_<SECTION>__<KEY>  Environment variables
2. --config <path>         Explicit config file
3. ./guide.toml            Project-level config
4. ~/.config/adaptive-guide/config.toml   Global config

Example:
  adaptive-guide ask "Which controller works with one hand?"
  adaptive-guide ask --lang es "¿Qué control sirve para una mano?"
  adaptive-guide parse reply.txt
  adaptive-guide classify "¿Qué juego recomiendas?"
  adaptive-guide chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a structured reply and print it
    Parse {
        /// File containing the reply (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Language the reply was requested in
        #[arg(short, long, value_enum)]
        lang: Option<LanguageArg>,
    },

    /// Print the language code of a text
    Classify {
        /// Text to classify
        text: String,

        /// Language returned when nothing points to the other one
        #[arg(long, value_enum, default_value = "en")]
        fallback: LanguageArg,

        /// Read the language off section headings instead of lexical hints
        #[arg(long)]
        headings: bool,
    },

    /// Ask the guide one question
    Ask {
        /// The question
        message: String,

        /// UI language (overrides [language] default)
        #[arg(short, long, value_enum)]
        lang: Option<LanguageArg>,

        /// Use the streaming endpoint
        #[arg(long)]
        stream: bool,
    },

    /// Start an interactive chat
    Chat {
        /// UI language (overrides [language] default)
        #[arg(short, long, value_enum)]
        lang: Option<LanguageArg>,

        /// Use the streaming endpoint
        #[arg(long)]
        stream: bool,
    },
}
