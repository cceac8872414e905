//! Integration tests for the salesbot chat session.
//! These run against an in-memory backend; no server is needed.

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::sync::{Barrier, Notify};

    use salesbot::chat::{ChatSession, Phase, SendOutcome};
    use salesbot::{
        AgentLabel, AgentType, ChatBackend, ChatRequest, ChatResponse, ClientLogger, Collection,
        ERROR_REPLY, Error, Message, Result, Stats,
    };

    /// Replies from a script and records every request it receives.
    #[derive(Default)]
    struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<ChatResponse>>>,
        requests: Mutex<Vec<ChatRequest>>,
        collections: Mutex<Vec<(Collection, Result<usize>)>>,
    }

    impl ScriptedBackend {
        fn replying(replies: Vec<Result<ChatResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        fn with_collection(self, collection: Collection, result: Result<usize>) -> Self {
            self.collections.lock().unwrap().push((collection, result));
            self
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::connection("script exhausted", None)))
        }

        async fn collection(&self, collection: Collection) -> Result<Vec<serde_json::Value>> {
            let collections = self.collections.lock().unwrap();
            match collections.iter().find(|(c, _)| *c == collection) {
                Some((_, Ok(n))) => Ok(vec![serde_json::Value::Null; *n]),
                Some((_, Err(err))) => Err(err.clone()),
                None => Ok(Vec::new()),
            }
        }
    }

    #[tokio::test]
    async fn one_user_and_one_bot_message_per_send() {
        let backend = ScriptedBackend::replying(vec![Ok(ChatResponse::new(
            "You have 12 open leads.",
            AgentType::LeadQualification,
        ))]);
        let mut session = ChatSession::with_session_id(backend, "sess-1");
        session.select_agent(AgentType::LeadQualification);
        session.set_input("How many open leads?");

        assert_eq!(session.send_message().await, SendOutcome::Replied);

        assert_eq!(
            session.messages(),
            &[
                Message::user("How many open leads?", AgentType::LeadQualification),
                Message::bot(
                    "You have 12 open leads.",
                    AgentLabel::Agent(AgentType::LeadQualification),
                    None,
                ),
            ]
        );
        assert_eq!(
            session.backend().requests(),
            vec![ChatRequest {
                message: "How many open leads?".to_string(),
                agent_type: AgentType::LeadQualification,
                session_id: "sess-1".to_string(),
            }]
        );
        assert_eq!(session.input(), "");
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let mut session = ChatSession::new(ScriptedBackend::default());
        for input in ["", "   ", "\n"] {
            session.set_input(input);
            assert_eq!(session.send_message().await, SendOutcome::Skipped);
        }
        assert!(session.messages().is_empty());
        assert!(session.backend().requests().is_empty());
    }

    #[tokio::test]
    async fn charts_are_keyed_from_one() {
        let backend = ScriptedBackend::replying(vec![Ok(ChatResponse::new(
            "Revenue by salesperson",
            AgentType::Analytics,
        )
        .with_charts(vec!["a".to_string(), "b".to_string()]))]);
        let mut session = ChatSession::new(backend);
        session.set_input("chart revenue");
        session.send_message().await;

        let charts = session.messages()[1].charts.as_ref().unwrap();
        let pairs: Vec<(&str, &str)> = charts.iter().collect();
        assert_eq!(pairs, vec![("chart_1", "a"), ("chart_2", "b")]);
    }

    #[tokio::test]
    async fn empty_or_absent_charts_leave_no_mapping() {
        let backend = ScriptedBackend::replying(vec![
            Ok(ChatResponse::new("no charts", AgentType::Analytics).with_charts(Vec::new())),
            Ok(ChatResponse::new("still none", AgentType::Analytics)),
        ]);
        let mut session = ChatSession::new(backend);
        for text in ["first", "second"] {
            session.set_input(text);
            assert_eq!(session.send_message().await, SendOutcome::Replied);
        }
        assert!(session.messages()[1].charts.is_none());
        assert!(session.messages()[3].charts.is_none());
    }

    #[tokio::test]
    async fn every_failure_becomes_the_same_error_message() {
        let backend = ScriptedBackend::replying(vec![
            Err(Error::connection("connection refused", None)),
            Err(Error::api(500, "An error occurred while processing your request")),
            Err(Error::serialization("missing field `response`", None)),
        ]);
        let mut session = ChatSession::new(backend);
        for text in ["one", "two", "three"] {
            session.set_input(text);
            assert_eq!(session.send_message().await, SendOutcome::Failed);
            // Input survives a failure so it can be resent.
            assert_eq!(session.input(), text);
        }

        let expected = Message {
            content: ERROR_REPLY.to_string(),
            is_user: false,
            agent: Some(AgentLabel::Error),
            charts: None,
        };
        assert_eq!(expected.content, "Sorry, I encountered an error. Please try again.");
        for reply in session.messages().iter().skip(1).step_by(2) {
            assert_eq!(reply, &expected);
        }
        assert_eq!(session.messages().len(), 6);
    }

    #[tokio::test]
    async fn stats_failure_is_isolated() {
        let backend = ScriptedBackend::default()
            .with_collection(Collection::Salespersons, Ok(3))
            .with_collection(Collection::Dealers, Err(Error::api(500, "db down")))
            .with_collection(Collection::Meetings, Ok(5))
            .with_collection(Collection::Leads, Ok(2));
        let mut session = ChatSession::new(backend);

        let stats = session.refresh_stats().await;
        assert_eq!(
            stats,
            Stats {
                salespersons: 3,
                dealers: 0,
                meetings: 5,
                leads: 2,
            }
        );
        assert_eq!(session.stats(), stats);
    }

    #[tokio::test]
    async fn all_stats_failing_yields_zeros() {
        let backend = ScriptedBackend::default()
            .with_collection(Collection::Salespersons, Err(Error::timeout("slow", None)))
            .with_collection(Collection::Dealers, Err(Error::timeout("slow", None)))
            .with_collection(Collection::Meetings, Err(Error::timeout("slow", None)))
            .with_collection(Collection::Leads, Err(Error::timeout("slow", None)));
        let mut session = ChatSession::new(backend);
        assert_eq!(session.refresh_stats().await, Stats::default());
    }

    /// Answers a collection only once all four have been requested.
    struct BarrierBackend {
        barrier: Barrier,
    }

    #[async_trait::async_trait]
    impl ChatBackend for BarrierBackend {
        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
            Err(Error::connection("chat not expected", None))
        }

        async fn collection(&self, collection: Collection) -> Result<Vec<serde_json::Value>> {
            self.barrier.wait().await;
            let n = match collection {
                Collection::Salespersons => 3,
                Collection::Dealers => 5,
                Collection::Meetings => 2,
                Collection::Leads => 1,
            };
            Ok(vec![serde_json::Value::Null; n])
        }
    }

    #[tokio::test]
    async fn stats_requests_are_in_flight_together() {
        let mut session = ChatSession::new(BarrierBackend {
            barrier: Barrier::new(4),
        });

        let stats = tokio::time::timeout(Duration::from_secs(5), session.refresh_stats())
            .await
            .expect("stats requests were not issued concurrently");

        assert_eq!(
            stats,
            Stats {
                salespersons: 3,
                dealers: 5,
                meetings: 2,
                leads: 1,
            }
        );
    }

    #[tokio::test]
    async fn quick_action_selects_agent_and_sends() {
        let backend = ScriptedBackend::replying(vec![Ok(ChatResponse::new(
            "ok",
            AgentType::Analytics,
        ))]);
        let mut session = ChatSession::new(backend);

        let outcome = session.quick_action("X", AgentType::Analytics).await;

        assert_eq!(outcome, SendOutcome::Replied);
        assert_eq!(session.selected_agent(), AgentType::Analytics);
        assert_eq!(session.messages()[0], Message::user("X", AgentType::Analytics));
        assert_eq!(session.backend().requests()[0].agent_type, AgentType::Analytics);
    }

    /// Holds every chat call until released.
    struct GatedBackend {
        release: Notify,
    }

    #[async_trait::async_trait]
    impl ChatBackend for GatedBackend {
        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
            self.release.notified().await;
            Ok(ChatResponse::new("done", AgentType::Manager))
        }

        async fn collection(&self, _collection: Collection) -> Result<Vec<serde_json::Value>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn busy_exactly_while_request_outstanding() {
        let backend = Arc::new(GatedBackend {
            release: Notify::new(),
        });
        let mut session = ChatSession::new(SharedBackend(backend.clone()));
        session.set_input("hello");
        let mut phase = session.subscribe_phase();
        assert_eq!(*phase.borrow(), Phase::Idle);

        let observer = async {
            phase.changed().await.unwrap();
            assert_eq!(*phase.borrow_and_update(), Phase::AwaitingResponse);
            backend.release.notify_one();
            phase.changed().await.unwrap();
            assert_eq!(*phase.borrow_and_update(), Phase::Idle);
        };
        let (outcome, ()) = tokio::join!(session.send_message(), observer);

        assert_eq!(outcome, SendOutcome::Replied);
        assert!(!session.is_busy());
        assert_eq!(session.messages().len(), 2);
    }

    struct SharedBackend<B>(Arc<B>);

    #[async_trait::async_trait]
    impl<B: ChatBackend> ChatBackend for SharedBackend<B> {
        async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
            self.0.chat(request).await
        }

        async fn collection(&self, collection: Collection) -> Result<Vec<serde_json::Value>> {
            self.0.collection(collection).await
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<String>>,
    }

    impl ClientLogger for RecordingLogger {
        fn log_chat_request(&self, request: &ChatRequest) {
            self.events
                .lock()
                .unwrap()
                .push(format!("request:{}", request.message));
        }

        fn log_chat_response(&self, response: &ChatResponse) {
            self.events
                .lock()
                .unwrap()
                .push(format!("response:{}", response.agent_type));
        }

        fn log_chat_failure(&self, _request: &ChatRequest, error: &Error) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failure:{}", error.kind()));
        }

        fn log_stats_failure(&self, collection: Collection, error: &Error) {
            self.events
                .lock()
                .unwrap()
                .push(format!("stats:{collection}:{}", error.kind()));
        }
    }

    #[tokio::test]
    async fn logger_sees_failures_the_conversation_hides() {
        let backend = ScriptedBackend::replying(vec![
            Ok(ChatResponse::new("hi", "forecasting")),
            Err(Error::timeout("slow", Some(60.0))),
        ])
        .with_collection(Collection::Leads, Err(Error::api(503, "unavailable")));
        let logger = Arc::new(RecordingLogger::default());
        let mut session = ChatSession::new(backend).with_logger(logger.clone());

        session.set_input("a");
        session.send_message().await;
        session.set_input("b");
        session.send_message().await;
        session.refresh_stats().await;

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "request:a".to_string(),
                "response:forecasting".to_string(),
                "request:b".to_string(),
                "failure:timeout".to_string(),
                "stats:leads:api".to_string(),
            ]
        );
        assert_eq!(
            session.messages()[1].agent,
            Some(AgentLabel::Unknown("forecasting".to_string()))
        );
    }
}
