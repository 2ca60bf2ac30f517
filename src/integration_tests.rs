//! Integration tests for hecker-client
//!
//! These tests exercise full workflows across multiple modules: session,
//! renderer, transcript export, chat log and the study panels.

#[cfg(test)]
mod integration_tests {
    use crate::engagement::FeedbackForm;
    use crate::logging::Logger;
    use crate::protocol::{BackendAction, GuiEvent};
    use crate::render::{EmojiCategory, MessageRenderer};
    use crate::state::{ChatSession, APOLOGIES};
    use crate::transcript::Sender;

    /// A full exchange: question, formatted reply, exported transcript
    #[test]
    fn test_conversation_round_to_html_export() {
        let mut session = ChatSession::seeded("session_1700000000000".into(), 21);

        let action = session.submit("How do I solve x^2 = 4?").expect("send action");
        let BackendAction::SendMessage { message, session_id } = action else {
            panic!("expected a send action");
        };
        assert_eq!(message, "How do I solve x^2 = 4?");
        assert_eq!(session_id, "session_1700000000000");

        session.handle_event(GuiEvent::ReplyReceived {
            text: "## Solution\n\n**Step 1:** Take the square root\n\n$$x = \\pm 2$$\n\nGreat job, keep going!"
                .into(),
            timestamp: None,
        });

        assert_eq!(session.transcript.len(), 2);
        let reply = session.transcript.last().unwrap();
        assert!(reply.html.contains("<h2>Solution</h2>"));
        assert!(reply.html.contains("<span class=\"step-label\">Step 1</span>"));
        assert!(reply.html.contains("<div class=\"math-block\">\\[x = \\pm 2\\]</div>"));
        // Encouragement glyphs go after the body
        assert!(reply.html.ends_with("</span>"));

        let doc = session.transcript.to_html_document("Hecker transcript");
        assert!(doc.contains("How do I solve x^2 = 4?"));
        assert!(doc.contains("<h2>Solution</h2>"));
    }

    /// Several failures in a row each add exactly one apology
    #[test]
    fn test_repeated_failures_keep_input_usable() {
        let mut session = ChatSession::seeded("s".into(), 2);
        for round in 1..=3 {
            let action = session.submit(&format!("question {}", round));
            assert!(action.is_some());
            session.handle_event(GuiEvent::ReplyFailed("request failed".into()));
            assert!(session.input_enabled());
            assert_eq!(session.transcript.len(), round * 2);
            assert!(APOLOGIES.contains(&session.transcript.last().unwrap().text.as_str()));
        }
    }

    /// Same-category replies never show the same glyph twice in a row
    #[test]
    fn test_consecutive_replies_rotate_emoji() {
        let mut renderer = MessageRenderer::seeded(99);
        let mut previous: Option<&'static str> = None;
        for _ in 0..50 {
            let out = renderer.render(Some("Let's try a short breathing exercise."));
            let choice = out.emoji.expect("emoji");
            assert_eq!(choice.category, EmojiCategory::Mindfulness);
            assert_ne!(Some(choice.glyph), previous);
            previous = Some(choice.glyph);
        }
    }

    /// Messages flow into the on-disk chat log
    #[test]
    fn test_session_writes_chat_log() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::with_directory(dir.path().to_path_buf()).unwrap();
        let mut session = ChatSession::seeded("session_log".into(), 4).with_logger(Some(logger));

        session.submit("I'm nervous about my exam");
        session.handle_event(GuiEvent::ReplyReceived {
            text: "It's normal to feel anxious. Let's plan your revision.".into(),
            timestamp: None,
        });

        if let Some(logger) = session.logger.take() {
            logger.shutdown();
        }

        let session_dir = dir.path().join("session_log");
        let log_file = std::fs::read_dir(&session_dir)
            .unwrap()
            .next()
            .expect("one daily log file")
            .unwrap()
            .path();
        let content = std::fs::read_to_string(log_file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("<You> I'm nervous about my exam"));
        assert!(lines[1].contains("<Hecker>"));
        assert!(lines[1].contains("It's normal to feel anxious."));
    }

    /// Feedback form to status toast
    #[test]
    fn test_feedback_flow() {
        let mut session = ChatSession::seeded("s".into(), 5);
        let mut form = FeedbackForm::new();

        assert!(form.submit().is_err());

        form.select_star(5);
        form.comment = "Loved the step-by-step answers".into();
        let action = form.submit().unwrap();
        let BackendAction::SubmitFeedback { rating, .. } = action else {
            panic!("expected feedback action");
        };
        session.handle_event(GuiEvent::FeedbackSubmitted { rating });

        assert_eq!(
            session.status_messages.last().map(|(s, _, _)| s.as_str()),
            Some("Thank you for your feedback! Rating: 5/5")
        );
        // Feedback never touches the transcript
        assert!(session.transcript.is_empty());
    }

    /// User text is shown verbatim, never interpreted as markup
    #[test]
    fn test_user_messages_are_not_formatted() {
        let mut session = ChatSession::seeded("s".into(), 6);
        session.submit("**why** <b>is</b> $x$ here?");
        let msg = session.transcript.last().unwrap();
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "**why** <b>is</b> $x$ here?");
        assert_eq!(msg.html, "<p>**why** &lt;b&gt;is&lt;/b&gt; $x$ here?</p>");
    }
}
