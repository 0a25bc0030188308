#[cfg(test)]
mod tests {
    use crate::gateway::{GatewayCall, GatewayError, MemoryGateway, ProposalGateway};
    use crate::models::{ArgumentReaction, CreateProposalRequest, IncrementRequest, Proposal, ProposalId, ProposalStatus, Tally, VoteOption, STARTING_BUDGET};
    use crate::session::{SessionError, SessionPhase, VoteController, VoteSession};
    use crate::tally_chart::{bar_height, chart_bars, scale_max, trending};
    use crate::validation::*;
    use crate::history::{CommittedVote, VoteHistory};
    use crate::topics::{category_label, group_by_category, UNCATEGORIZED};

    fn proposal(id: &str, title: &str, yes: u64, no: u64, blank: u64) -> Proposal {
        let mut p = Proposal::new(id, title);
        p.tally = Tally { yes, no, blank };
        p
    }

    fn store() -> MemoryGateway {
        MemoryGateway::with_proposals([proposal("eu", "Norge bør bli med i EU", 120, 80, 10)])
    }

    async fn loaded(gateway: &MemoryGateway, budget: u64) -> VoteController<&MemoryGateway> {
        let mut c = VoteController::with_session(gateway, VoteSession::with_budget(budget));
        c.load("eu").await.unwrap();
        c
    }

    #[tokio::test]
    async fn test_commit_decrements_budget() {
        let gateway = store();
        let mut c = loaded(&gateway, STARTING_BUDGET).await;
        assert_eq!(c.session().title(), Some("Norge bør bli med i EU"));

        c.set_pending_amount(200);
        c.submit_vote(VoteOption::Yes).await.unwrap();

        assert_eq!(c.session().remaining_budget(), 800);
        assert_eq!(c.session().pending_amount(), 0);
        assert!(c.session().last_error().is_none());
        assert!(gateway.calls().contains(&GatewayCall::Increment("eu".into(), VoteOption::Yes, 200)));
        assert_eq!(gateway.snapshot(&"eu".into()).unwrap().tally.yes, 320);
        assert_eq!(c.session().tally().unwrap().yes, 320);
    }

    #[tokio::test]
    async fn test_insufficient_budget_skips_gateway() {
        let gateway = store();
        let mut c = loaded(&gateway, 50).await;
        c.set_pending_amount(100);

        let err = c.submit_vote(VoteOption::No).await.unwrap_err();
        assert_eq!(err, SessionError::InsufficientBudget { requested: 100, remaining: 50 });
        assert_eq!(gateway.increment_calls(), 0);
        assert_eq!(c.session().remaining_budget(), 50);
        assert_eq!(c.session().pending_amount(), 100);
        assert_eq!(c.session().last_error(), Some(&err));
    }

    #[tokio::test]
    async fn test_non_positive_amounts_rejected() {
        let gateway = store();
        let mut c = loaded(&gateway, STARTING_BUDGET).await;

        for amount in [0, -5] {
            c.set_pending_amount(amount);
            assert_eq!(c.submit_vote(VoteOption::Blank).await, Err(SessionError::InvalidAmount(amount)));
        }
        assert_eq!(gateway.increment_calls(), 0);
        assert_eq!(c.session().remaining_budget(), STARTING_BUDGET);
    }

    #[tokio::test]
    async fn test_missing_proposal_is_terminal() {
        let gateway = store();
        let mut c = VoteController::new(&gateway);

        let err = c.load("missing-id").await.unwrap_err();
        assert_eq!(err, SessionError::NotFound("missing-id".into()));
        assert_eq!(c.session().phase(), SessionPhase::NotFound);

        c.set_pending_amount(10);
        assert!(matches!(c.submit_vote(VoteOption::Yes).await, Err(SessionError::NotFound(_))));
        assert_eq!(gateway.increment_calls(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_sum() {
        let gateway = store();
        let mut a = loaded(&gateway, STARTING_BUDGET).await;
        let mut b = loaded(&gateway, STARTING_BUDGET).await;
        a.set_pending_amount(300);
        b.set_pending_amount(300);

        let (ra, rb) = tokio::join!(a.submit_vote(VoteOption::Yes), b.submit_vote(VoteOption::Yes));
        ra.unwrap();
        rb.unwrap();

        assert_eq!(gateway.snapshot(&"eu".into()).unwrap().tally.yes, 120 + 600);
        assert_eq!(a.session().remaining_budget(), 700);
        assert_eq!(b.session().remaining_budget(), 700);
    }

    #[test]
    fn test_gateway_increments_from_threads() {
        let gateway = store();
        let id = ProposalId::from("eu");
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
                    for _ in 0..25 {
                        rt.block_on(gateway.increment_tally(&id, VoteOption::No, 2)).unwrap();
                    }
                });
            }
        });
        assert_eq!(gateway.snapshot(&id).unwrap().tally.no, 80 + 8 * 25 * 2);
    }

    #[tokio::test]
    async fn test_budget_tracks_committed_sum() {
        let gateway = store();
        let mut c = loaded(&gateway, STARTING_BUDGET).await;
        let amounts = [100, 250, 5000, 0, 400, 300];
        let mut committed = 0;
        for (i, amount) in amounts.into_iter().enumerate() {
            c.set_pending_amount(amount);
            let option = VoteOption::ALL[i % 3];
            if c.submit_vote(option).await.is_ok() {
                committed += amount as u64;
            }
            assert_eq!(c.session().remaining_budget(), STARTING_BUDGET - committed);
        }
        assert_eq!(committed, 750);
        assert_eq!(gateway.increment_calls(), 3);
    }

    #[tokio::test]
    async fn test_commit_failure_leaves_state() {
        let gateway = store();
        let mut c = loaded(&gateway, STARTING_BUDGET).await;
        c.set_pending_amount(150);
        gateway.fail_next_increment(GatewayError::Transport("connection reset".into()));

        let err = c.submit_vote(VoteOption::Yes).await.unwrap_err();
        assert_eq!(err, SessionError::Commit(GatewayError::Transport("connection reset".into())));
        assert_eq!(c.session().remaining_budget(), STARTING_BUDGET);
        assert_eq!(c.session().pending_amount(), 150);
        assert_eq!(c.session().tally().unwrap().yes, 120);

        c.submit_vote(VoteOption::Yes).await.unwrap();
        assert_eq!(c.session().remaining_budget(), 850);
        assert!(c.session().last_error().is_none());
    }

    #[tokio::test]
    async fn test_closed_proposal_surfaces_commit_error() {
        let gateway = store();
        let mut c = loaded(&gateway, STARTING_BUDGET).await;
        gateway.close(&"eu".into()).unwrap();
        c.set_pending_amount(10);

        assert_eq!(
            c.submit_vote(VoteOption::No).await,
            Err(SessionError::Commit(GatewayError::Closed("eu".into())))
        );
        assert_eq!(c.session().remaining_budget(), STARTING_BUDGET);
    }

    #[tokio::test]
    async fn test_fetch_error_is_retryable() {
        let gateway = store();
        gateway.fail_next_get(GatewayError::Transport("timeout".into()));
        let mut c = VoteController::new(&gateway);

        assert!(matches!(c.load("eu").await, Err(SessionError::Fetch(_))));
        assert_eq!(c.session().phase(), SessionPhase::FetchFailed);
        c.set_pending_amount(10);
        assert_eq!(c.submit_vote(VoteOption::Yes).await, Err(SessionError::NotLoaded));

        c.load("eu").await.unwrap();
        assert_eq!(c.session().phase(), SessionPhase::Ready);
        assert!(c.session().last_error().is_none());
    }

    #[test]
    fn test_submit_before_load() {
        let mut s = VoteSession::new();
        s.set_pending_amount(10);
        assert_eq!(s.prepare_submit(VoteOption::Yes), Err(SessionError::NotLoaded));
    }

    #[test]
    fn test_late_responses_after_close_are_ignored() {
        let mut s = VoteSession::new();
        let load = s.begin_load("eu".into()).unwrap();
        s.close();
        assert_eq!(s.apply_loaded(load, Ok(proposal("eu", "EU", 1, 2, 3))), Err(SessionError::Discarded));
        assert!(s.title().is_none());

        let mut s = VoteSession::new();
        let load = s.begin_load("eu".into()).unwrap();
        s.apply_loaded(load, Ok(proposal("eu", "EU", 1, 2, 3))).unwrap();
        s.set_pending_amount(40);
        let commit = s.prepare_submit(VoteOption::Yes).unwrap();
        s.close();
        assert_eq!(s.apply_commit(commit, Ok(())), Err(SessionError::Discarded));
        assert_eq!(s.remaining_budget(), STARTING_BUDGET);
        assert_eq!(s.prepare_submit(VoteOption::Yes), Err(SessionError::Closed));
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let mut s = VoteSession::new();
        let first = s.begin_load("eu".into()).unwrap();
        let second = s.begin_load("eu".into()).unwrap();

        s.apply_loaded(second, Ok(proposal("eu", "EU", 5, 0, 0))).unwrap();
        assert_eq!(s.apply_loaded(first, Ok(proposal("eu", "EU", 1, 0, 0))), Err(SessionError::Discarded));
        assert_eq!(s.tally().unwrap().yes, 5);
    }

    #[test]
    fn test_commit_for_previous_proposal_keeps_new_state() {
        let mut s = VoteSession::with_budget(100);
        let load = s.begin_load("a".into()).unwrap();
        s.apply_loaded(load, Ok(proposal("a", "A", 0, 0, 0))).unwrap();
        s.set_pending_amount(30);
        let failing = s.prepare_submit(VoteOption::Yes).unwrap();

        let load = s.begin_load("b".into()).unwrap();
        s.apply_loaded(load, Ok(proposal("b", "B", 7, 0, 0))).unwrap();
        s.set_pending_amount(5);

        let err = s.apply_commit(failing, Err(GatewayError::Transport("x".into()))).unwrap_err();
        assert!(matches!(err, SessionError::Commit(_)));
        assert_eq!(s.phase(), SessionPhase::Ready);
        assert_eq!(s.proposal_id(), Some(&ProposalId::from("b")));
        assert!(s.last_error().is_none());
        assert_eq!(s.remaining_budget(), 100);
        assert_eq!(s.pending_amount(), 5);

        // A fetch error on "b" survives a late success for "a".
        let load = s.begin_load("a".into()).unwrap();
        s.apply_loaded(load, Ok(proposal("a", "A", 0, 0, 0))).unwrap();
        s.set_pending_amount(30);
        let succeeding = s.prepare_submit(VoteOption::No).unwrap();
        let load = s.begin_load("b".into()).unwrap();
        let _ = s.apply_loaded(load, Err(GatewayError::Transport("offline".into())));
        s.set_pending_amount(5);

        s.apply_commit(succeeding, Ok(())).unwrap();
        assert_eq!(s.remaining_budget(), 70);
        assert_eq!(s.pending_amount(), 5);
        assert_eq!(s.phase(), SessionPhase::FetchFailed);
        assert!(matches!(s.last_error(), Some(SessionError::Fetch(_))));
        assert!(!s.is_submitting());
    }

    #[test]
    fn test_one_commit_in_flight() {
        let mut s = VoteSession::with_budget(100);
        let load = s.begin_load("eu".into()).unwrap();
        s.apply_loaded(load, Ok(proposal("eu", "EU", 0, 0, 0))).unwrap();
        s.set_pending_amount(80);
        let commit = s.prepare_submit(VoteOption::Yes).unwrap();
        assert!(s.is_submitting());
        assert_eq!(s.prepare_submit(VoteOption::No), Err(SessionError::SubmitInFlight));

        s.apply_commit(commit.clone(), Ok(())).unwrap();
        assert_eq!(s.remaining_budget(), 20);
        assert_eq!(s.apply_commit(commit, Ok(())), Err(SessionError::Discarded));
        assert_eq!(s.remaining_budget(), 20);
    }

    #[test]
    fn test_chart_bars() {
        let bars = chart_bars(&Tally { yes: 120, no: 80, blank: 0 });
        let labels: Vec<_> = bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Ja", "Nei", "Blank"]);
        assert_eq!(bars[0].color, "#4caf50");
        assert!((bars[0].share - 60.0).abs() < f64::EPSILON);
        assert_eq!(bars[2].share, 0.0);
        assert_eq!(scale_max(&bars), 120);

        let empty = chart_bars(&Tally::default());
        assert!(empty.iter().all(|b| b.share == 0.0));
        assert_eq!(scale_max(&empty), 1);
    }

    #[test]
    fn test_bar_height_scaling() {
        assert_eq!(bar_height(50, 100, 160), 80);
        assert_eq!(bar_height(0, 1, 160), 0);
        assert_eq!(bar_height(u64::MAX, u64::MAX, 160), 160);
        assert_eq!(bar_height(u64::MAX / 2, u64::MAX, 160), 79);
        assert_eq!(bar_height(5, 0, 160), 0);

        let bars = chart_bars(&Tally { yes: u64::MAX, no: 1, blank: 0 });
        let max = scale_max(&bars);
        assert_eq!(bar_height(bars[0].value, max, 160), 160);
        assert_eq!(bar_height(bars[2].value, max, 160), 0);
    }

    #[test]
    fn test_trending_order() {
        let mut closed = proposal("c", "Closed", 999, 0, 0);
        closed.status = ProposalStatus::Closed;
        let proposals = vec![
            proposal("a", "Skatt", 10, 0, 0),
            proposal("b", "EU", 95, 110, 5),
            closed,
            proposal("d", "Avgift", 5, 5, 0),
        ];
        let ids: Vec<_> = trending(&proposals, 5).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a"]);
        assert_eq!(trending(&proposals, 1).len(), 1);
    }

    #[test]
    fn test_validation() {
        assert!(validate_argument("Dette er et godt argument", 0).is_ok());
        assert_eq!(validate_argument("   ", 0), Err(ValidationError::EmptyArgument));
        let long = vec!["ord"; MAX_ARGUMENT_WORDS + 1].join(" ");
        assert_eq!(validate_argument(&long, 0), Err(ValidationError::ArgumentTooLong(51)));
        assert_eq!(validate_argument("kort", MAX_ARGUMENTS_PER_PROPOSAL), Err(ValidationError::TooManyArguments));

        assert_eq!(validate_suggestion(" \n"), Err(ValidationError::EmptySuggestion));
        assert_eq!(validate_suggestion(&"x".repeat(MAX_SUGGESTION_LENGTH + 1)), Err(ValidationError::SuggestionTooLong));

        let category = CreateProposalRequest { title: "Bompenger".into(), category: "k".repeat(MAX_CATEGORY_LENGTH + 1) };
        assert_eq!(validate_proposal_request(&category), Err(ValidationError::CategoryTooLong));

        let title = CreateProposalRequest { title: "a".repeat(MAX_TITLE_LENGTH + 1), category: String::new() };
        assert_eq!(validate_proposal_request(&title), Err(ValidationError::TitleTooLong));
        assert_eq!(
            validate_proposal_request(&CreateProposalRequest { title: "  ".into(), category: String::new() }),
            Err(ValidationError::EmptyTitle)
        );

        assert_eq!(validate_increment(&IncrementRequest { option: VoteOption::Yes, amount: 0 }), Err(ValidationError::ZeroAmount));
        assert!(validate_increment(&IncrementRequest { option: VoteOption::Yes, amount: u64::MAX }).is_err());
    }

    #[test]
    fn test_reaction_path_targets_argument_id() {
        let first = uuid::Uuid::new_v4();
        let second = uuid::Uuid::new_v4();
        let path = ArgumentReaction::Up.path(second);
        assert_eq!(path, format!("/argument/{}/up", second));
        assert!(!path.contains(&first.to_string()));

        let down_path = ArgumentReaction::Down.path(first);
        let segments: Vec<&str> = down_path.rsplitn(3, '/').collect();
        assert_eq!(segments[0].parse::<ArgumentReaction>(), Ok(ArgumentReaction::Down));
        assert_eq!(segments[1].parse::<uuid::Uuid>().unwrap(), first);
    }

    #[test]
    fn test_topics_grouped_by_category() {
        let mut closed = proposal("old", "Gammel sak", 0, 0, 0).with_category("Økonomi og finans");
        closed.status = ProposalStatus::Closed;
        let proposals = vec![
            proposal("tax", "Inntektsskatt", 0, 0, 0).with_category("Økonomi og finans"),
            proposal("misc", "Sommertid", 0, 0, 0),
            proposal("wind", "Havvind", 0, 0, 0).with_category("Miljø og klima"),
            closed,
            proposal("corp", "Bedriftsskatt", 0, 0, 0).with_category("Økonomi og finans"),
        ];

        let groups = group_by_category(&proposals);
        let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Miljø og klima", "Økonomi og finans", UNCATEGORIZED]);

        let economy: Vec<&str> = groups[1].1.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(economy, vec!["tax", "corp"]);
        assert_eq!(category_label(&proposals[1]), UNCATEGORIZED);
        assert!(group_by_category(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_history_tracks_confirmed_votes() {
        let gateway = store();
        let mut history = VoteHistory::with_budget(100);
        let mut session = VoteSession::with_budget(history.remaining());
        let load = session.begin_load("eu".into()).unwrap();
        let result = gateway.get(&load.proposal_id).await;
        session.apply_loaded(load, result).unwrap();

        session.set_pending_amount(40);
        let ticket = session.prepare_submit(VoteOption::No).unwrap();
        session.apply_commit(ticket.clone(), Ok(())).unwrap();
        history.record(CommittedVote::from(&ticket));

        session.set_pending_amount(10);
        let failed = session.prepare_submit(VoteOption::Yes).unwrap();
        assert!(session.apply_commit(failed, Err(GatewayError::Store("nede".into()))).is_err());

        assert_eq!(history.spent(), 40);
        assert_eq!(history.remaining(), session.remaining_budget());
        assert_eq!(history.spent_on(&"eu".into()), 40);
        assert_eq!(history.spent_on(&"other".into()), 0);
        let latest = history.votes().next().unwrap();
        assert_eq!((latest.option, latest.amount), (VoteOption::No, 40));
    }

    #[test]
    fn test_wire_format() {
        let req: IncrementRequest = serde_json::from_str(r#"{"option":"blank","amount":7}"#).unwrap();
        assert_eq!(req, IncrementRequest { option: VoteOption::Blank, amount: 7 });

        let p: Proposal = serde_json::from_str(
            r#"{"id":"eu","title":"EU","tally":{"yes":1,"no":2,"blank":3}}"#
        ).unwrap();
        assert!(p.is_open());
        assert_eq!(p.total_votes(), 6);
        assert_eq!("no".parse::<VoteOption>(), Ok(VoteOption::No));
        assert!("maybe".parse::<VoteOption>().is_err());
    }
}
