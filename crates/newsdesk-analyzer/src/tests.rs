//! Pipeline tests for the Analyzer

#[cfg(test)]
mod tests {
    use crate::{Analyzer, AnalyzerConfig, AnalyzerError, ENTITY_SYSTEM, SUMMARY_SYSTEM};
    use newsdesk_domain::{normalize, EntityBundle, EntityCategory};
    use newsdesk_llm::MockProvider;
    use std::error::Error as _;
    use std::time::Duration;

    const ARTICLE: &str = "Breaking news: the leaders of France and Germany met today in Paris \
        to discuss a joint response to rising energy prices across the European Union.";

    const SUMMARY: &str = "The French and German leaders met in Paris to coordinate on energy prices.";

    fn mock_backend() -> MockProvider {
        let mut llm = MockProvider::default();
        llm.add_response(SUMMARY_SYSTEM, SUMMARY);
        llm.add_response(
            ENTITY_SYSTEM,
            r#"{
                "countries": ["France", "Germany", "France"],
                "nationalities": ["French", " German "],
                "people": [],
                "organizations": ["European Union", ""]
            }"#,
        );
        llm
    }

    #[tokio::test]
    async fn test_full_analysis_flow() {
        let llm = mock_backend();
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await.unwrap();

        let mut expected = EntityBundle::default();
        for country in ["France", "Germany"] {
            expected.insert(EntityCategory::Countries, country);
        }
        for nationality in ["French", "German"] {
            expected.insert(EntityCategory::Nationalities, nationality);
        }
        expected.insert(EntityCategory::Organizations, "European Union");

        assert_eq!(result.summary, SUMMARY);
        assert_eq!(result.entities, expected);
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_both_calls_see_the_normalized_article() {
        let llm = mock_backend();
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let messy = format!("  {}\n\n\n\n   ", ARTICLE.replace(' ', "   "));
        analyzer.analyze_text(&messy).await.unwrap();

        let normalized = normalize(ARTICLE);
        for request in llm.requests() {
            assert!(request.prompt.contains(normalized.as_str()));
        }
    }

    #[tokio::test]
    async fn test_extraction_failure_keeps_summary() {
        let mut llm = mock_backend();
        llm.add_error(ENTITY_SYSTEM);
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await.unwrap();
        assert_eq!(result.summary, SUMMARY);
        assert_eq!(result.entities, EntityBundle::default());
    }

    #[tokio::test]
    async fn test_malformed_entities_keep_summary() {
        let mut llm = mock_backend();
        llm.add_response(ENTITY_SYSTEM, "Here are the entities: France, Germany");
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await.unwrap();
        assert_eq!(result.summary, SUMMARY);
        assert!(result.entities.is_empty());
    }

    #[tokio::test]
    async fn test_summary_failure_fails_analysis() {
        let mut llm = mock_backend();
        llm.add_error(SUMMARY_SYSTEM);
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let err = analyzer.analyze_text(ARTICLE).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::AnalysisFailed(_)));
        assert!(!err.is_client_error());

        let source = err.source().unwrap();
        assert!(source.to_string().contains("Mock error"));

        // Extraction still ran; there is simply no partial result
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_both_failures_fail_analysis() {
        let mut llm = MockProvider::default();
        llm.add_error(SUMMARY_SYSTEM);
        llm.add_error(ENTITY_SYSTEM);
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await;
        assert!(matches!(result, Err(AnalyzerError::AnalysisFailed(_))));
    }

    #[tokio::test]
    async fn test_minimum_length_boundary() {
        let llm = mock_backend();
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let just_short = "a".repeat(49);
        assert!(matches!(
            analyzer.analyze_text(&just_short).await,
            Err(AnalyzerError::InvalidInput { length: 49, minimum: 50 })
        ));
        assert_eq!(llm.call_count(), 0);

        let just_enough = "a".repeat(50);
        assert!(analyzer.analyze_text(&just_enough).await.is_ok());
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_minimum_length_counts_characters() {
        let llm = mock_backend();
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        // 25 two-byte characters: 50 bytes, but only 25 characters
        let article = "é".repeat(25);
        assert!(matches!(
            analyzer.analyze_text(&article).await,
            Err(AnalyzerError::InvalidInput { length: 25, .. })
        ));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_minimum() {
        let llm = mock_backend();
        let config = AnalyzerConfig {
            min_article_chars: 10,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(llm, config).unwrap();

        assert!(analyzer.analyze_text("Twelve chars").await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_run_concurrently() {
        let mut llm = mock_backend();
        llm.add_delay(SUMMARY_SYSTEM, Duration::from_secs(10));
        llm.add_delay(ENTITY_SYSTEM, Duration::from_secs(10));
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let start = tokio::time::Instant::now();
        analyzer.analyze_text(ARTICLE).await.unwrap();

        // Sequential calls would take 20s
        assert!(start.elapsed() < Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_extraction_times_out_to_empty_bundle() {
        let mut llm = mock_backend();
        llm.add_delay(ENTITY_SYSTEM, Duration::from_secs(300));
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await.unwrap();
        assert_eq!(result.summary, SUMMARY);
        assert!(result.entities.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_summary_times_out_to_failure() {
        let mut llm = mock_backend();
        llm.add_delay(SUMMARY_SYSTEM, Duration::from_secs(300));
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let err = analyzer.analyze_text(ARTICLE).await.unwrap_err();
        match err {
            AnalyzerError::AnalysisFailed(inner) => {
                assert!(matches!(*inner, AnalyzerError::Timeout(_)));
            }
            other => panic!("Expected AnalysisFailed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_analysis_cancels_both_calls() {
        let mut llm = mock_backend();
        llm.add_delay(SUMMARY_SYSTEM, Duration::from_secs(20));
        llm.add_delay(ENTITY_SYSTEM, Duration::from_secs(20));
        let analyzer = Analyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_secs(1), analyzer.analyze_text(ARTICLE)).await;
        assert!(outcome.is_err());

        // Both calls had started before the abort
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_every_response_shape_yields_four_categories() {
        let responses = [
            "",
            "null",
            "[]",
            "\"France\"",
            "{}",
            r#"{"countries": "France"}"#,
            r#"{"countries": ["USA"], "peoples": ["ignored"]}"#,
            "```json\n{\"people\": [\"Ada\"]}\n```",
            "{\"countries\": [",
        ];

        for response in responses {
            let mut llm = mock_backend();
            llm.add_response(ENTITY_SYSTEM, response);
            let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

            let result = analyzer.analyze_text(ARTICLE).await.unwrap();
            let json = serde_json::to_value(&result).unwrap();
            let entities = json["geopolitical_entities"].as_object().unwrap();

            assert_eq!(entities.len(), 4, "response {:?}", response);
            for category in EntityCategory::ALL {
                assert!(entities[category.key()].is_array(), "response {:?}", response);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_keys_ignored_end_to_end() {
        let mut llm = mock_backend();
        llm.add_response(ENTITY_SYSTEM, r#"{"countries": ["USA"], "peoples": ["ignored"]}"#);
        let analyzer = Analyzer::new(llm, AnalyzerConfig::default()).unwrap();

        let result = analyzer.analyze_text(ARTICLE).await.unwrap();
        let mut expected = EntityBundle::default();
        expected.insert(EntityCategory::Countries, "USA");
        assert_eq!(result.entities, expected);
    }

    #[tokio::test]
    async fn test_config_toml_serialization() {
        let config = AnalyzerConfig::default();
        let toml_str = config.to_toml().unwrap();

        let parsed = AnalyzerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config.min_article_chars, parsed.min_article_chars);
        assert_eq!(config.request_timeout_secs, parsed.request_timeout_secs);
    }
}
