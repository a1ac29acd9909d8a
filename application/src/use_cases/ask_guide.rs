//! Ask Guide use case.
//!
//! One conversational turn: resolve the language of the user's message, get
//! a reply from the [`ReplySource`], retry once in a fresh conversation if the
//! model refused, and render the reply.

use crate::config::GuideParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::reply_source::{ReplySource, SourceError};
use crate::use_cases::render_reply::{RenderReplyUseCase, RenderedReply};
use guide_domain::reply::canned;
use guide_domain::util::preview;
use guide_domain::{ChatReply, ChatRequest, Language, classify, looks_like_refusal};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during an Ask Guide turn.
#[derive(Error, Debug)]
pub enum AskGuideError {
    #[error("Reply source error: {0}")]
    SourceError(#[from] SourceError),

    #[error("Message is empty")]
    EmptyMessage,
}

/// Input for the [`AskGuideUseCase`].
#[derive(Debug, Clone)]
pub struct AskGuideInput {
    /// The user's message.
    pub message: String,
    /// Conversation to continue, if any.
    pub conversation_id: Option<String>,
}

impl AskGuideInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
        }
    }

    pub fn with_conversation_id(mut self, id: Option<String>) -> Self {
        self.conversation_id = id;
        self
    }
}

/// Result of one turn.
#[derive(Debug, Clone)]
pub struct AskGuideOutput {
    /// Language the message was sent in.
    pub request_language: Language,
    /// Conversation to pass on the next turn.
    pub conversation_id: Option<String>,
    /// Reply text after empty-reply substitution.
    pub raw_reply: String,
    pub rendered: RenderedReply,
    /// Number of refusal retries that were made.
    pub retries: u32,
}

/// Use case for one Ask Guide turn.
pub struct AskGuideUseCase {
    source: Arc<dyn ReplySource>,
    renderer: RenderReplyUseCase,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for AskGuideUseCase {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            renderer: self.renderer.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl AskGuideUseCase {
    pub fn new(source: Arc<dyn ReplySource>, params: GuideParams) -> Self {
        Self {
            source,
            renderer: RenderReplyUseCase::new(params),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &GuideParams {
        self.renderer.params()
    }

    /// Language an outgoing message is sent in.
    pub fn request_language(&self, message: &str) -> Language {
        let params = self.params();
        if params.auto_detect {
            classify(message, params.ui_language)
        } else {
            params.ui_language
        }
    }

    /// Execute one turn, waiting for the complete reply.
    pub async fn execute(&self, input: AskGuideInput) -> Result<AskGuideOutput, AskGuideError> {
        let request = self.prepare(&input)?;
        let reply = self.source.send(&request).await?;
        self.finish(&request, input.conversation_id, reply).await
    }

    /// Execute one turn over the streaming path.
    ///
    /// `on_update` receives a re-render of the reply prefix after every chunk.
    pub async fn execute_streaming<F>(
        &self,
        input: AskGuideInput,
        mut on_update: F,
    ) -> Result<AskGuideOutput, AskGuideError>
    where
        F: FnMut(&RenderedReply) + Send,
    {
        let request = self.prepare(&input)?;
        let handle = self.source.send_streaming(&request).await?;
        let renderer = &self.renderer;
        let language = request.language;
        let reply = handle
            .collect_reply(|buffer| on_update(&renderer.render_partial(buffer, language)))
            .await?;
        self.finish(&request, input.conversation_id, reply).await
    }

    fn prepare(&self, input: &AskGuideInput) -> Result<ChatRequest, AskGuideError> {
        let message = input.message.trim();
        if message.is_empty() {
            return Err(AskGuideError::EmptyMessage);
        }

        let language = self.request_language(message);
        info!(
            "Asking guide via {} ({}): {}",
            self.source.name(),
            language,
            preview(message, 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({
                "message": message,
                "language": language,
                "conversation_id": input.conversation_id,
            }),
        ));

        Ok(ChatRequest::new(message, language).with_conversation_id(input.conversation_id.clone()))
    }

    async fn finish(
        &self,
        request: &ChatRequest,
        previous_conversation: Option<String>,
        mut reply: ChatReply,
    ) -> Result<AskGuideOutput, AskGuideError> {
        let max_retries = self.params().refusal_retries;
        let mut retries = 0;

        while retries < max_retries && looks_like_refusal(&reply.reply) {
            retries += 1;
            warn!(
                "Reply looks like a refusal, retrying in a new conversation ({}/{})",
                retries, max_retries
            );
            reply = self.source.send(&request.without_conversation()).await?;
        }

        if reply.is_blank() {
            debug!("Empty reply, substituting the no-answer text");
            reply.reply = canned::no_answer(request.language).to_string();
        }

        self.conversation_logger.log(ConversationEvent::new(
            "reply_received",
            json!({
                "reply": reply.reply,
                "conversation_id": reply.conversation_id,
                "retries": retries,
            }),
        ));

        let rendered = self.renderer.render(&reply.reply, request.language);
        debug!(
            "Rendered {} blocks, {} suggestions ({})",
            rendered.blocks.len(),
            rendered.suggestions.len(),
            rendered.language
        );
        self.conversation_logger.log(ConversationEvent::new(
            "reply_parsed",
            json!({
                "language": rendered.language,
                "blocks": rendered.blocks.len(),
                "suggestions": rendered.suggestions,
            }),
        ));

        Ok(AskGuideOutput {
            request_language: request.language,
            conversation_id: reply.conversation_id.or(previous_conversation),
            raw_reply: reply.reply,
            rendered,
            retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use guide_domain::{DisplayBlock, SectionKind};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Mocks ====================

    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<ChatReply, SourceError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<ChatReply, SourceError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReplySource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn send(&self, request: &ChatRequest) -> Result<ChatReply, SourceError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SourceError::InvalidResponse("no more replies".into())))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn ok(reply: &str, id: Option<&str>) -> Result<ChatReply, SourceError> {
        Ok(ChatReply::new(reply, id.map(String::from)))
    }

    fn use_case(source: Arc<ScriptedSource>) -> AskGuideUseCase {
        AskGuideUseCase::new(source, GuideParams::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_structured_reply_is_rendered() {
        let source = Arc::new(ScriptedSource::new(vec![ok(
            "Summary: Try a flex controller.\nNext questions:\n- Which console?\n- Which game?",
            Some("c1"),
        )]));

        let output = use_case(source.clone())
            .execute(AskGuideInput::new("Which controller should I buy?"))
            .await
            .unwrap();

        assert_eq!(output.request_language, Language::English);
        assert_eq!(output.conversation_id.as_deref(), Some("c1"));
        assert_eq!(
            output.rendered.blocks,
            vec![
                DisplayBlock::heading(SectionKind::Summary),
                DisplayBlock::paragraph("Try a flex controller."),
            ]
        );
        assert_eq!(output.rendered.suggestions, vec!["Which console?", "Which game?"]);
        assert_eq!(output.retries, 0);
    }

    #[tokio::test]
    async fn test_spanish_message_is_sent_in_spanish() {
        let source = Arc::new(ScriptedSource::new(vec![ok("Resumen: Claro.", None)]));

        let output = use_case(source.clone())
            .execute(AskGuideInput::new("¿Qué control me recomiendas?"))
            .await
            .unwrap();

        assert_eq!(source.requests()[0].language, Language::Spanish);
        assert_eq!(output.rendered.language, Language::Spanish);
    }

    #[tokio::test]
    async fn test_ui_language_used_without_auto_detect() {
        let source = Arc::new(ScriptedSource::new(vec![ok("ok", None)]));
        let params = GuideParams::default()
            .with_auto_detect(false)
            .with_ui_language(Language::English);

        AskGuideUseCase::new(source.clone(), params)
            .execute(AskGuideInput::new("¿Hola?"))
            .await
            .unwrap();

        assert_eq!(source.requests()[0].language, Language::English);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let result = use_case(source.clone())
            .execute(AskGuideInput::new("   "))
            .await;

        assert!(matches!(result, Err(AskGuideError::EmptyMessage)));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_refusal_is_retried_without_conversation() {
        let source = Arc::new(ScriptedSource::new(vec![
            ok("Sorry, I am unable to assist with that.", Some("c1")),
            ok("Summary: Here is some help.", Some("c2")),
        ]));

        let output = use_case(source.clone())
            .execute(AskGuideInput::new("help me").with_conversation_id(Some("c0".into())))
            .await
            .unwrap();

        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].conversation_id.as_deref(), Some("c0"));
        assert_eq!(requests[1].conversation_id, None);
        assert_eq!(output.retries, 1);
        assert_eq!(output.conversation_id.as_deref(), Some("c2"));
        assert_eq!(output.rendered.blocks.len(), 2);
    }

    #[tokio::test]
    async fn test_refusal_retries_are_bounded() {
        let source = Arc::new(ScriptedSource::new(vec![
            ok("I cannot help.", None),
            ok("I still cannot help.", None),
            ok("never requested", None),
        ]));

        let output = use_case(source.clone())
            .execute(AskGuideInput::new("help me"))
            .await
            .unwrap();

        assert_eq!(source.requests().len(), 2);
        assert_eq!(output.raw_reply, "I still cannot help.");
    }

    #[tokio::test]
    async fn test_blank_reply_gets_no_answer_text() {
        let source = Arc::new(ScriptedSource::new(vec![ok("  ", None)]));

        let output = use_case(source.clone())
            .execute(AskGuideInput::new("¿y ahora?").with_conversation_id(Some("c9".into())))
            .await
            .unwrap();

        assert_eq!(output.raw_reply, "No tengo respuesta.");
        assert_eq!(
            output.rendered.blocks,
            vec![DisplayBlock::paragraph("No tengo respuesta.")]
        );
        // Source did not return an id, keep the one we had
        assert_eq!(output.conversation_id.as_deref(), Some("c9"));
    }

    #[tokio::test]
    async fn test_source_error_is_propagated() {
        let source = Arc::new(ScriptedSource::new(vec![Err(SourceError::Timeout)]));
        let result = use_case(source).execute(AskGuideInput::new("hi")).await;
        assert!(matches!(
            result,
            Err(AskGuideError::SourceError(SourceError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_events_are_logged() {
        let source = Arc::new(ScriptedSource::new(vec![ok("Summary: ok", None)]));
        let logger = Arc::new(RecordingLogger::default());

        use_case(source)
            .with_conversation_logger(logger.clone())
            .execute(AskGuideInput::new("hi"))
            .await
            .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["user_message", "reply_received", "reply_parsed"]
        );
    }

    #[tokio::test]
    async fn test_streaming_reports_partial_renders() {
        let source = Arc::new(ScriptedSource::new(vec![ok(
            "Summary: streamed\nNext questions:\n- Q1",
            Some("s1"),
        )]));
        let mut updates = Vec::new();

        let output = use_case(source)
            .execute_streaming(AskGuideInput::new("hi"), |rendered| {
                updates.push(rendered.clone())
            })
            .await
            .unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0], output.rendered);
        assert_eq!(output.conversation_id.as_deref(), Some("s1"));
        assert_eq!(output.rendered.suggestions, vec!["Q1"]);
    }
}
