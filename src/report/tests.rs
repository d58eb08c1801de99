//! Tests for analysis runs and CSV export

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::sentiment::{ClassificationResult, Sentiment};

    #[test]
    fn test_split_reviews() {
        let text = "  First review  \n\n\r\nSecond review\r\n   \nThird";
        assert_eq!(
            split_reviews(text),
            vec!["First review", "Second review", "Third"]
        );
    }

    #[test]
    fn test_empty_input_rejected() {
        let analyzer = Analyzer::default();
        for input in ["", "   ", "\n\n", " \t \n  "] {
            let err = analyzer.analyze(input).unwrap_err();
            assert!(err.is_empty_input(), "{:?}", input);
        }
    }

    #[test]
    fn test_blank_vector_rejected() {
        let analyzer = Analyzer::default();
        let err = analyzer
            .analyze_reviews(vec!["".to_string(), "  ".to_string()])
            .unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_sample_analysis() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze(&sample_text()).unwrap();

        assert_eq!(analysis.results.len(), 15);
        assert_eq!(analysis.summary.total, 15);

        let counted: usize = analysis.summary.shares.iter().map(|s| s.count).sum();
        assert_eq!(counted, 15);

        let percent: f64 = analysis.summary.shares.iter().map(|s| s.percentage).sum();
        assert!((percent - 100.0).abs() < 1e-9);

        assert_eq!(analysis.keywords.len(), 15);
        assert!(!analysis.cloud_words.is_empty());
        assert_eq!(analysis.reviews()[0], SAMPLE_REVIEWS[0]);
        assert_eq!(analysis.results[0].sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_results_keep_input_order() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze("b review\na review\nc review").unwrap();
        assert_eq!(analysis.reviews(), vec!["b review", "a review", "c review"]);
    }

    #[test]
    fn test_symbols_only_review_is_neutral() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze("!!! ??? 123").unwrap();
        assert_eq!(analysis.results.len(), 1);
        assert_eq!(analysis.results[0].sentiment, Sentiment::Neutral);
        assert_eq!(analysis.results[0].score, 0.0);
        assert!(analysis.keywords.is_empty());
    }

    #[test]
    fn test_summary_percentages() {
        let results: Vec<ClassificationResult> = [
            Sentiment::Positive,
            Sentiment::Positive,
            Sentiment::Negative,
        ]
        .iter()
        .map(|&sentiment| ClassificationResult {
            review: "r".to_string(),
            sentiment,
            score: 0.0,
        })
        .collect();

        let summary = SentimentSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Sentiment::Positive), 2);
        assert_eq!(summary.count(Sentiment::Neutral), 0);
        assert!((summary.percentage(Sentiment::Positive) - 66.666).abs() < 0.01);
        assert!((summary.percentage(Sentiment::Negative) - 33.333).abs() < 0.01);

        let present: Vec<Sentiment> = summary.present().map(|s| s.sentiment).collect();
        assert_eq!(present, vec![Sentiment::Positive, Sentiment::Negative]);
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = SentimentSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.shares.iter().all(|s| s.percentage == 0.0));
        assert_eq!(summary.present().count(), 0);
    }

    #[test]
    fn test_with_top_n() {
        let analyzer = Analyzer::default().with_top_n(3);
        assert_eq!(analyzer.top_n(), 3);
        let analysis = analyzer.analyze(&sample_text()).unwrap();
        assert_eq!(analysis.keywords.len(), 3);
    }

    #[test]
    fn test_with_top_n_zero_reports_no_keywords() {
        let analysis = Analyzer::default().with_top_n(0).analyze(&sample_text()).unwrap();
        assert!(analysis.keywords.is_empty());
        assert_eq!(analysis.results.len(), SAMPLE_REVIEWS.len());
    }

    #[test]
    fn test_csv_header_and_rows() {
        let results = vec![
            ClassificationResult {
                review: "Great, really \"great\" product".to_string(),
                sentiment: Sentiment::Positive,
                score: 0.8,
            },
            ClassificationResult {
                review: "Meh".to_string(),
                sentiment: Sentiment::Neutral,
                score: 0.0,
            },
        ];

        let csv = to_csv(&results).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Review,Sentiment,Score"));
        assert_eq!(
            lines.next(),
            Some("\"Great, really \"\"great\"\" product\",Positive,0.8")
        );
        assert_eq!(lines.next(), Some("Meh,Neutral,0.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_round_trip() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze(&sample_text()).unwrap();

        let csv = to_csv(&analysis.results).unwrap();
        let parsed = from_csv(&csv).unwrap();

        assert_eq!(parsed, analysis.results);
    }

    #[test]
    fn test_csv_empty_results_has_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "Review,Sentiment,Score");
        assert!(from_csv(&csv).unwrap().is_empty());
    }

    #[test]
    fn test_csv_rejects_foreign_header() {
        let err = from_csv("Text,Label,Value\nx,Positive,0.5\n").unwrap_err();
        assert!(err.to_string().contains("unexpected CSV header"));
    }

    #[test]
    fn test_csv_rejects_unknown_label() {
        let err = from_csv("Review,Sentiment,Score\nx,Great,0.5\n").unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidLabel(ref label) if label == "Great"));
    }

    #[test]
    fn test_analysis_serializes() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze("Great product").unwrap();
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["results"][0]["sentiment"], "Positive");
        assert_eq!(json["summary"]["total"], 1);
        assert!(json["run_id"].is_string());
    }
}
