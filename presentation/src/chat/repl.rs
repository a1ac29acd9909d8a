//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::PanelFormatter;
use crate::config::{OutputConfig, ReplConfig};
use guide_application::{
    AskGuideError, AskGuideInput, AskGuideOutput, AskGuideUseCase, ConversationLogger,
    GuideParams, NoConversationLogger, ReplySource,
};
use guide_domain::Language;
use guide_domain::reply::canned;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// Send this message to the guide
    Ask(String),
    /// A slash command
    Command(ReplCommand),
    /// Nothing to do
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    /// Start a new conversation
    New,
    /// Switch the UI language, or show it when `None`
    Lang(Option<Language>),
    Unknown(String),
}

/// Interactive chat REPL
pub struct ChatRepl {
    source: Arc<dyn ReplySource>,
    logger: Arc<dyn ConversationLogger>,
    params: GuideParams,
    use_case: AskGuideUseCase,
    output: OutputConfig,
    config: ReplConfig,
    conversation_id: Option<String>,
    suggestions: Vec<String>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(source: Arc<dyn ReplySource>, params: GuideParams) -> Self {
        let logger: Arc<dyn ConversationLogger> = Arc::new(NoConversationLogger);
        Self {
            use_case: AskGuideUseCase::new(source.clone(), params.clone())
                .with_conversation_logger(logger.clone()),
            source,
            logger,
            params,
            output: OutputConfig::default(),
            config: ReplConfig::default(),
            conversation_id: None,
            suggestions: Vec::new(),
        }
    }

    /// Set the conversation logger
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self.rebuild_use_case();
        self
    }

    /// Set the output configuration
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Set the REPL configuration
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn language(&self) -> Language {
        self.params.ui_language
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Suggestions offered by the last reply.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    fn rebuild_use_case(&mut self) {
        self.use_case = AskGuideUseCase::new(self.source.clone(), self.params.clone())
            .with_conversation_logger(self.logger.clone());
    }

    /// Run the interactive REPL on stdin
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with(BufReader::new(tokio::io::stdin())).await
    }

    /// Run the REPL on any line source
    pub async fn run_with<R>(&mut self, reader: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        self.print_welcome();

        loop {
            print!(">>> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                println!("Bye!");
                break;
            };

            match self.interpret(&line) {
                ReplInput::Skip => continue,
                ReplInput::Command(command) => {
                    if self.handle_command(command) {
                        break;
                    }
                }
                ReplInput::Ask(message) => self.process_message(message).await,
            }
        }

        Ok(())
    }

    /// Classify a typed line. A bare number picks a suggestion of the last reply.
    pub fn interpret(&self, line: &str) -> ReplInput {
        let line = line.trim();
        if line.is_empty() {
            return ReplInput::Skip;
        }

        if let Some(command) = line.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            let command = match parts.next().unwrap_or("") {
                "quit" | "exit" | "q" => ReplCommand::Quit,
                "help" | "h" | "?" => ReplCommand::Help,
                "new" => ReplCommand::New,
                "lang" => match parts.next() {
                    None => ReplCommand::Lang(None),
                    Some(code) => match code.parse::<Language>() {
                        Ok(language) => ReplCommand::Lang(Some(language)),
                        Err(_) => ReplCommand::Unknown(line.to_string()),
                    },
                },
                _ => ReplCommand::Unknown(line.to_string()),
            };
            return ReplInput::Command(command);
        }

        if let Ok(n) = line.parse::<usize>()
            && let Some(suggestion) = n.checked_sub(1).and_then(|i| self.suggestions.get(i))
        {
            return ReplInput::Ask(suggestion.clone());
        }

        ReplInput::Ask(line.to_string())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Adaptive Gaming Guide - Chat         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{}", canned::help_offer(self.language()));
        println!();
        self.print_help();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /lang [en|es]    - Show or switch the UI language");
        println!("  /new             - Start a new conversation");
        println!("  /quit, /exit, /q - Exit chat");
        println!("  <number>         - Ask a suggested question");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                self.print_help();
            }
            ReplCommand::New => {
                self.conversation_id = None;
                self.suggestions.clear();
                println!("Started a new conversation.");
            }
            ReplCommand::Lang(None) => println!("Language: {}", self.language()),
            ReplCommand::Lang(Some(language)) => {
                self.params = self.params.clone().with_ui_language(language);
                self.rebuild_use_case();
                println!("Language: {}", language);
                println!("{}", canned::help_offer(language));
            }
            ReplCommand::Unknown(line) => {
                println!("Unknown command: {}", line);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_message(&mut self, message: String) {
        println!();

        let input = AskGuideInput::new(message).with_conversation_id(self.conversation_id.clone());
        let result = self.ask(input).await;

        match result {
            Ok(output) => {
                self.conversation_id = output.conversation_id;
                self.suggestions = output.rendered.suggestions.clone();
                let format = self.output.effective_format();
                println!("{}", PanelFormatter::format_as(&output.rendered, format));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }

    async fn ask(&self, input: AskGuideInput) -> Result<AskGuideOutput, AskGuideError> {
        if !self.config.stream {
            return self.use_case.execute(input).await;
        }

        let result = self
            .use_case
            .execute_streaming(input, |_| {
                eprint!(".");
                let _ = std::io::stderr().flush();
            })
            .await;
        eprintln!();
        result
    }
}
