#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::level_filters::LevelFilter;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;

    use std::rc::Rc;

    use shared::{CommittedVote, VoteOption, STARTING_BUDGET};
    use yew::Reducible;

    use crate::logging::ConsoleLayer;
    use crate::vote_log::VoteLog;

    fn capture(max_level: LevelFilter, emit: impl FnOnce()) -> Vec<(Level, String)> {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let lines = lines.clone();
            move |level: &Level, line: String| lines.lock().unwrap().push((*level, line))
        };
        let subscriber = tracing_subscriber::registry().with(max_level).with(ConsoleLayer::new(sink));
        tracing::subscriber::with_default(subscriber, emit);
        let captured = lines.lock().unwrap().clone();
        captured
    }

    #[test]
    fn test_events_reach_console_sink() {
        let lines = capture(LevelFilter::DEBUG, || {
            tracing::warn!(status = 503u16, url = "/api/proposal/eu", "request failed");
        });
        assert_eq!(lines.len(), 1);
        let (level, line) = &lines[0];
        assert_eq!(*level, Level::WARN);
        assert!(line.starts_with("WARN"));
        assert!(line.contains("request failed"));
        assert!(line.contains("status=503"));
        assert!(line.contains("url=/api/proposal/eu"));
    }

    #[test]
    fn test_session_logs_are_forwarded() {
        let lines = capture(LevelFilter::DEBUG, || {
            let mut session = shared::VoteSession::new();
            let _ = session.begin_load("eu".into());
        });
        assert!(lines.iter().any(|(level, line)| *level == Level::DEBUG && line.contains("loading proposal")));
    }

    #[test]
    fn test_level_filter_applies() {
        let lines = capture(LevelFilter::INFO, || {
            tracing::debug!("hidden");
            tracing::info!("shown");
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].1.contains("shown"));
    }

    #[test]
    fn test_vote_log_reducer_records_votes() {
        let log = Rc::new(VoteLog::default());
        let vote = CommittedVote { proposal_id: "eu".into(), option: VoteOption::Blank, amount: 25 };
        let next = log.clone().reduce(vote.clone());

        assert!(log.0.is_empty());
        assert_eq!(next.0.votes().next(), Some(&vote));
        assert_eq!(next.0.remaining(), STARTING_BUDGET - 25);
    }
}
