//! Analysis session lifecycle and the query layer.

use std::io::Write;

use eood_core::{
    AnalysisConfig, AnalysisSession, ClassifierConfig, ConfigError, RecordQuery, Scope,
    load_config,
};
use eood_model::{Batch, OodType, ProductKey, Record};
use tempfile::NamedTempFile;

fn kpi_batch(rows: &[(&str, &str)]) -> Batch {
    Batch::from_records(
        rows.iter()
            .map(|(product, target)| {
                Record::from_pairs([("Tên sản phẩm", *product), ("KPI doanh thu", *target)])
            })
            .collect(),
    )
}

fn sales_batch() -> Batch {
    Batch::from_records(vec![
        Record::from_pairs([("Tên sản phẩm", "Áo thun"), ("Doanh thu", "1,000"), ("Tháng", "01")]),
        Record::from_pairs([("Tên sản phẩm", "Áo thun"), ("Doanh thu", "2,000"), ("Tháng", "02")]),
        Record::from_pairs([("Tên sản phẩm", "Quần jean (New)"), ("Doanh thu", "50"), ("Tháng", "02")]),
        Record::from_pairs([("Tên sản phẩm", "Mũ"), ("Doanh thu", "310"), ("Tháng", "02")]),
    ])
}

#[test]
fn session_classifies_against_loaded_kpi() {
    let mut session = AnalysisSession::new(AnalysisConfig::default());
    session.load_kpi(&kpi_batch(&[("Áo thun", "1,000"), ("mũ", "300")]));
    let analysis = session.analyze(&sales_batch());

    let types: Vec<OodType> = analysis.enriched.iter().map(|r| r.ood_type()).collect();
    assert_eq!(
        types,
        vec![OodType::Id, OodType::Kpi, OodType::New, OodType::Id]
    );
    assert_eq!(
        analysis.enriched.records()[1].assessment.label,
        "OOD: High-entropy (KPI deviation) (month: 02)"
    );

    let report = &analysis.report;
    assert_eq!(report.records, 4);
    assert_eq!(report.kpi_entries, 2);
    assert_eq!(report.stats_products, 3);
    assert_eq!(report.ood_count(), 2);
    assert_eq!(report.counts[&OodType::Kpi], 1);
    assert!(!report.missing_sales_columns);
    assert_eq!(report.sales_columns.month.as_deref(), Some("Tháng"));
}

#[test]
fn reloading_kpi_replaces_the_registry() {
    let mut session = AnalysisSession::new(AnalysisConfig::default());
    session.load_kpi(&kpi_batch(&[("A", "1"), ("B", "2")]));
    assert_eq!(session.kpi().len(), 2);

    session.load_kpi(&kpi_batch(&[("C", "3")]));
    assert_eq!(session.kpi().len(), 1);
    assert_eq!(session.kpi().target(&ProductKey::new("a").unwrap()), None);
}

#[test]
fn unresolvable_kpi_batch_disables_kpi_rule() {
    let mut session = AnalysisSession::new(AnalysisConfig::default());
    let kpi = Batch::from_records(vec![Record::from_pairs([("sku", "A"), ("goal", "1")])]);
    session.load_kpi(&kpi);
    assert!(session.kpi().is_empty());
    assert!(!session.kpi_columns().is_complete());

    let analysis = session.analyze(&sales_batch());
    assert_eq!(analysis.report.counts[&OodType::Kpi], 0);
}

#[test]
fn statistics_are_rebuilt_per_batch() {
    let session = AnalysisSession::new(AnalysisConfig::default());
    let first = session.analyze(&sales_batch());
    let second = session.analyze(&Batch::from_records(vec![Record::from_pairs([
        ("product", "Other"),
        ("revenue", "1"),
    ])]));
    assert_eq!(first.stats.len(), 3);
    assert_eq!(second.stats.len(), 1);
}

#[test]
fn query_filters_by_scope_type_and_text() {
    let mut session = AnalysisSession::new(AnalysisConfig::default());
    session.load_kpi(&kpi_batch(&[("Áo thun", "1,000")]));
    let analysis = session.analyze(&sales_batch());
    let enriched = &analysis.enriched;

    assert_eq!(RecordQuery::new().apply(enriched).len(), 4);
    assert_eq!(
        RecordQuery::new()
            .with_scope(Scope::OutOfDistribution)
            .apply(enriched)
            .len(),
        2
    );
    assert_eq!(
        RecordQuery::new()
            .with_scope(Scope::InDistribution)
            .apply(enriched)
            .len(),
        2
    );

    let new_only = RecordQuery::new().with_type(OodType::New).apply(enriched);
    assert_eq!(new_only.len(), 1);
    assert_eq!(new_only[0].record.value("Tên sản phẩm"), "Quần jean (New)");

    let text = RecordQuery::new().with_text("ÁO THUN").apply(enriched);
    assert_eq!(text.len(), 2);

    let label_text = RecordQuery::new().with_text("high-entropy").apply(enriched);
    assert_eq!(label_text.len(), 1);

    let contradictory = RecordQuery::new()
        .with_scope(Scope::InDistribution)
        .with_type(OodType::Kpi)
        .apply(enriched);
    assert!(contradictory.is_empty());

    assert_eq!(RecordQuery::new().with_text("   ").apply(enriched).len(), 4);
}

#[test]
fn load_config_merges_with_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"classifier": {{"deviation_threshold": 0.2}}, "aliases": {{"month": ["ky"]}}}}"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.classifier.deviation_threshold, 0.2);
    assert_eq!(config.classifier.spike_threshold, 3.0);
    assert_eq!(config.aliases.month, vec!["ky".to_string()]);
    assert_eq!(config.aliases.product, AnalysisConfig::default().aliases.product);
}

#[test]
fn load_config_rejects_invalid_thresholds() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"classifier": {{"spike_threshold": -1}}}}"#).unwrap();

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidThreshold { name: "spike_threshold", .. }));
    assert!(ClassifierConfig::default().validate().is_ok());
}

#[test]
fn load_config_rejects_zero_id_score() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"classifier": {{"id_score": 0}}}}"#).unwrap();

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidIdScore { .. }));
}
