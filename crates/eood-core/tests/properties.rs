//! Invariants that hold for any sales batch.

use eood_core::{AnalysisConfig, AnalysisSession};
use eood_model::{Batch, OOD_COLUMNS, OodType, Record};
use proptest::prelude::*;

fn product_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Alpha".to_string()),
        Just(" alpha ".to_string()),
        Just("Beta".to_string()),
        Just("Gamma (New)".to_string()),
        Just("brand new Delta".to_string()),
        Just(String::new()),
        "[A-Za-z ]{0,12}",
    ]
}

fn revenue() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100_000).prop_map(|value| value.to_string()),
        (0u32..10_000).prop_map(|value| format!("{},{:03}", value / 1000 + 1, value % 1000)),
        Just("n/a".to_string()),
        Just("1e308".to_string()),
        Just("0.001".to_string()),
        Just(String::new()),
    ]
}

fn sales_batch() -> impl Strategy<Value = Batch> {
    prop::collection::vec((product_name(), revenue()), 0..40).prop_map(|rows| {
        Batch::new(
            vec!["product".to_string(), "revenue".to_string()],
            rows.into_iter()
                .map(|(product, revenue)| {
                    Record::from_pairs([("product", product), ("revenue", revenue)])
                })
                .collect(),
        )
    })
}

fn kpi_batch() -> impl Strategy<Value = Batch> {
    prop::collection::vec((product_name(), revenue()), 0..10).prop_map(|rows| {
        Batch::new(
            vec!["product".to_string(), "kpi_revenue".to_string()],
            rows.into_iter()
                .map(|(product, target)| {
                    Record::from_pairs([("product", product), ("kpi_revenue", target)])
                })
                .collect(),
        )
    })
}

fn is_three_decimal(score: &str) -> bool {
    match score.split_once('.') {
        Some((whole, fraction)) => {
            !whole.is_empty()
                && whole.chars().all(|ch| ch.is_ascii_digit())
                && fraction.len() == 3
                && fraction.chars().all(|ch| ch.is_ascii_digit())
        }
        None => false,
    }
}

proptest! {
    #[test]
    fn every_record_gets_one_well_formed_assessment(sales in sales_batch(), kpi in kpi_batch()) {
        let mut session = AnalysisSession::new(AnalysisConfig::default());
        session.load_kpi(&kpi);
        let analysis = session.analyze(&sales);

        prop_assert_eq!(analysis.enriched.len(), sales.len());
        for record in &analysis.enriched {
            let assessment = &record.assessment;
            prop_assert!(OodType::ALL.contains(&assessment.ood_type));
            let score = assessment.score.expect("resolved columns always score");
            prop_assert!(score >= 0.0);
            prop_assert!(is_three_decimal(&assessment.formatted_score()));
        }
    }

    #[test]
    fn novel_products_are_always_new(sales in sales_batch(), kpi in kpi_batch()) {
        let mut session = AnalysisSession::new(AnalysisConfig::default());
        session.load_kpi(&kpi);
        let analysis = session.analyze(&sales);

        for record in &analysis.enriched {
            let name = record.record.value("product").trim().to_lowercase();
            if name.contains("(new)") || name.contains(" new") {
                prop_assert_eq!(record.ood_type(), OodType::New);
                prop_assert_eq!(record.assessment.formatted_score(), "1.000");
            }
        }
    }

    #[test]
    fn reclassifying_enriched_output_is_idempotent(sales in sales_batch(), kpi in kpi_batch()) {
        let mut session = AnalysisSession::new(AnalysisConfig::default());
        session.load_kpi(&kpi);
        let first = session.analyze(&sales);
        let second = session.analyze(&first.enriched.to_batch());

        prop_assert_eq!(first.enriched.len(), second.enriched.len());
        prop_assert_eq!(first.enriched.headers(), second.enriched.headers());
        for (a, b) in first.enriched.iter().zip(second.enriched.iter()) {
            prop_assert_eq!(a.ood_type(), b.ood_type());
            prop_assert_eq!(a.assessment.formatted_score(), b.assessment.formatted_score());
            prop_assert_eq!(b.to_record().len(), a.record.len() + OOD_COLUMNS.len());
        }
    }

    #[test]
    fn unresolved_revenue_column_is_all_id(names in prop::collection::vec(product_name(), 1..20)) {
        let sales = Batch::new(
            vec!["product".to_string(), "units".to_string()],
            names
                .into_iter()
                .map(|product| Record::from_pairs([("product", product), ("units", "1".to_string())]))
                .collect(),
        );
        let analysis = AnalysisSession::new(AnalysisConfig::default()).analyze(&sales);

        prop_assert!(analysis.report.missing_sales_columns);
        for record in &analysis.enriched {
            prop_assert_eq!(record.ood_type(), OodType::Id);
            prop_assert_eq!(record.assessment.score, None);
        }
    }
}
