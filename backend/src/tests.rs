#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rocket::http::Status;
    use shared::{ArgumentReaction, ProposalId, ErrorCode, GatewayError, ProposalStatus, ValidationError, VoteOption};
    use time::{Duration, OffsetDateTime};

    use crate::admin::token_matches;
    use crate::cors::is_allowed_origin;
    use crate::config::{Config, DEFAULT_INCREMENT_LIMIT_PER_MINUTE, DEFAULT_SUGGESTION_WINDOW_MINUTES};
    use crate::error::ApiError;
    use crate::processor::{check_profanity, ProposalProcessor};
    use crate::rate_limiter::RateLimiter;
    use crate::store::ProposalRow;
    use crate::utils::{parse_argument_id, parse_reaction, rate_limit_key};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let secrets: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| secrets.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        init_tracing();
        let config = config_from(&[]);
        assert!(config.admin_token.is_none());
        assert_eq!(config.increment_limit_per_minute, DEFAULT_INCREMENT_LIMIT_PER_MINUTE);
        assert_eq!(config.suggestion_window_minutes, DEFAULT_SUGGESTION_WINDOW_MINUTES);
    }

    #[test]
    fn test_config_overrides_and_bad_values() {
        init_tracing();
        let config = config_from(&[
            ("ADMIN_TOKEN", "  s3cret  "),
            ("INCREMENT_LIMIT_PER_MINUTE", "5"),
            ("SUGGESTION_WINDOW_MINUTES", "soon"),
        ]);
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(config.increment_limit_per_minute, 5);
        assert_eq!(config.suggestion_window_minutes, DEFAULT_SUGGESTION_WINDOW_MINUTES);

        assert!(config_from(&[("ADMIN_TOKEN", "   ")]).admin_token.is_none());
    }

    #[test]
    fn test_admin_token() {
        assert!(token_matches(Some("s3cret"), Some("s3cret")));
        assert!(!token_matches(Some("s3cret"), Some("s3cre")));
        assert!(!token_matches(Some("s3cret"), None));
        assert!(!token_matches(None, Some("")));
        assert!(!token_matches(None, None));
    }

    #[test]
    fn test_rate_limiter_window() {
        init_tracing();
        let limiter = RateLimiter::new(2, 1);
        let start = OffsetDateTime::now_utc();
        let key = rate_limit_key("increment", "abc");

        assert!(limiter.check_at(&key, start).is_ok());
        assert!(limiter.check_at(&key, start + Duration::seconds(10)).is_ok());
        let err = limiter.check_at(&key, start + Duration::seconds(20)).unwrap_err();
        assert_eq!(err.status(), Status::TooManyRequests);

        assert!(limiter.check_at(&rate_limit_key("increment", "other"), start).is_ok());
        assert!(limiter.check_at(&key, start + Duration::seconds(61)).is_ok());
    }

    #[test]
    fn test_gateway_errors_map_to_status() {
        let cases = [
            (GatewayError::NotFound("p".into()), Status::NotFound, ErrorCode::NotFound),
            (GatewayError::Closed("p".into()), Status::Forbidden, ErrorCode::Closed),
            (GatewayError::Store("boom".into()), Status::InternalServerError, ErrorCode::SystemError),
        ];
        for (gateway_error, status, code) in cases {
            let err = ApiError::from(gateway_error);
            assert_eq!(err.status(), status);
            assert_eq!(err.body().code, code);
        }
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let body = ApiError::Internal("connection refused to 10.0.0.3".into()).body();
        assert!(!body.error.contains("10.0.0.3"));

        let body = ApiError::from(ValidationError::TooManyArguments).body();
        assert_eq!(body.code, ErrorCode::InvalidInput);
        assert!(body.error.contains("at most 5"));
    }

    #[test]
    fn test_error_body_wire_format() {
        let body = serde_json::to_value(ApiError::Closed.body()).unwrap();
        assert_eq!(body["code"], "closed");
        assert!(body["error"].is_string());

        let body = serde_json::to_value(ApiError::Invalid("bad".into()).body()).unwrap();
        assert_eq!(body["code"], "invalidInput");
    }

    #[test]
    fn test_sqlx_row_not_found_is_404() {
        assert_eq!(ApiError::from(sqlx::Error::RowNotFound).status(), Status::NotFound);
    }

    #[test]
    fn test_row_conversion() {
        let proposal: shared::Proposal = ProposalRow {
            id: "eu".into(),
            title: "Norge bør bli med i EU".into(),
            category: "Styring og administrasjon".into(),
            yes_votes: 120,
            no_votes: 80,
            blank_votes: -1,
            status: ProposalStatus::Closed,
        }
        .into();
        assert_eq!(proposal.tally.get(VoteOption::Yes), 120);
        assert_eq!(proposal.tally.blank, 0);
        assert!(!proposal.is_open());
        assert_eq!(proposal.category, "Styring og administrasjon");
    }

    #[test]
    fn test_request_parsing() {
        assert!(parse_argument_id("not-a-uuid").is_err());
        assert!(parse_argument_id("67e55044-10b1-426f-9247-bb680e5fe0c8").is_ok());
        assert_eq!(parse_reaction("up").unwrap(), ArgumentReaction::Up);
        assert!(matches!(parse_reaction("sideways"), Err(ApiError::Invalid(_))));
    }

    #[test]
    fn test_dev_origins() {
        assert!(is_allowed_origin("http://localhost:8080"));
        assert!(is_allowed_origin("http://127.0.0.1"));
        assert!(!is_allowed_origin("http://localhost.evil.com"));
        assert!(!is_allowed_origin("https://example.org"));
    }

    #[test]
    fn test_rejected_suggestion_keeps_rate_window() {
        init_tracing();
        let limiter = RateLimiter::new(1, DEFAULT_SUGGESTION_WINDOW_MINUTES);

        assert!(matches!(ProposalProcessor::admit_suggestion(&limiter, "abc", "   "), Err(ApiError::Invalid(_))));
        assert!(matches!(
            ProposalProcessor::admit_suggestion(&limiter, "abc", "fuck this"),
            Err(ApiError::Invalid(_))
        ));

        let text = ProposalProcessor::admit_suggestion(&limiter, "abc", "  Gratis kollektivtransport  ").unwrap();
        assert_eq!(text, "Gratis kollektivtransport");
        let err = ProposalProcessor::admit_suggestion(&limiter, "abc", "Flere parker").unwrap_err();
        assert_eq!(err.status(), Status::TooManyRequests);
    }

    #[test]
    fn test_rejected_argument_keeps_rate_window() {
        let limiter = RateLimiter::new(1, 1);
        let id = ProposalId::from("eu");
        let long = vec!["ord"; 51].join(" ");

        assert!(matches!(ProposalProcessor::admit_argument(&limiter, &id, "abc", &long), Err(ApiError::Invalid(_))));
        assert!(ProposalProcessor::admit_argument(&limiter, &id, "abc", "Billigere strøm").is_ok());
        assert!(ProposalProcessor::admit_argument(&limiter, &id, "abc", "Mer handel").is_err());
        assert!(ProposalProcessor::admit_argument(&limiter, &ProposalId::from("nato"), "abc", "Sikkerhet").is_ok());
    }

    #[test]
    fn test_profanity_filter() {
        assert!(check_profanity("suggestion", "Bygg flere sykkelveier i Oslo").is_ok());
        assert!(matches!(check_profanity("suggestion", "fuck this"), Err(ApiError::Invalid(_))));
    }
}
