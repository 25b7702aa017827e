use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use eood_cli::export::{ExportFormat, export_records};
use eood_cli::render::{EMPTY_MESSAGE, RenderOptions, kpi_table, print_summary, render_records};
use eood_core::{AnalysisConfig, AnalysisSession, KpiReference, RecordQuery, load_config};
use eood_ingest::load_batch;
use eood_model::Batch;

use crate::cli::{AnalyzeArgs, KpiArgs, OutputFormatArg};

pub fn run_analyze(args: &AnalyzeArgs, styled: bool) -> Result<()> {
    let span = info_span!("analyze", sales = %args.sales.display());
    let _guard = span.enter();
    let start = Instant::now();

    let config = analysis_config(args.config.as_deref(), args.deviation_threshold, args.spike_threshold)?;
    let mut session = AnalysisSession::new(config);
    match &args.kpi {
        Some(path) => {
            let kpi = load_source(path, "KPI")?;
            session.load_kpi(&kpi);
        }
        None => info!("no KPI source given, KPI rule disabled"),
    }
    let sales = load_source(&args.sales, "sales")?;
    let analysis = session.analyze(&sales);

    let query = query_from_args(args);
    let selected = query.apply(&analysis.enriched);
    let headers = analysis.enriched.headers();

    print_summary(&analysis.report, styled);
    let options = RenderOptions {
        max_rows: args.max_rows,
        columns: args.columns.clone(),
        styled,
    };
    println!("{}", render_records(headers, &selected, &options));

    if let Some(path) = &args.output {
        let format = match args.output_format {
            Some(OutputFormatArg::Csv) => ExportFormat::Csv,
            Some(OutputFormatArg::Json) => ExportFormat::Json,
            None => ExportFormat::from_path(path).ok_or_else(|| {
                anyhow!(
                    "cannot export to {}; use a .csv or .json path or --output-format",
                    path.display()
                )
            })?,
        };
        export_records(path, format, headers, &selected)?;
        println!("Exported {} records to {}", selected.len(), path.display());
    }

    info!(
        records = analysis.report.records,
        shown = selected.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );
    Ok(())
}

pub fn run_kpi(args: &KpiArgs, styled: bool) -> Result<()> {
    let config = analysis_config(args.config.as_deref(), None, None)?;
    let batch = load_source(&args.kpi, "KPI")?;
    let (kpi, columns) = KpiReference::from_batch(&batch, &config.aliases);
    if !columns.is_complete() {
        println!(
            "KPI columns not found ({}); registry is empty.",
            columns.missing_fields().join(", ")
        );
    }
    if kpi.is_empty() {
        println!("{EMPTY_MESSAGE}");
    } else {
        println!("{} KPI targets", kpi.len());
        println!("{}", kpi_table(&kpi, styled));
    }
    Ok(())
}

/// Config file first, then command-line threshold overrides.
fn analysis_config(
    path: Option<&Path>,
    deviation_threshold: Option<f64>,
    spike_threshold: Option<f64>,
) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(path) => load_config(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(value) = deviation_threshold {
        config.classifier = config.classifier.with_deviation_threshold(value);
    }
    if let Some(value) = spike_threshold {
        config.classifier = config.classifier.with_spike_threshold(value);
    }
    config.classifier.validate().context("invalid thresholds")?;
    Ok(config)
}

fn load_source(path: &Path, role: &str) -> Result<Batch> {
    let batch = load_batch(path).with_context(|| format!("load {role} source {}", path.display()))?;
    info!(role, records = batch.len(), "source loaded");
    Ok(batch)
}

fn query_from_args(args: &AnalyzeArgs) -> RecordQuery {
    let mut query = RecordQuery::new().with_scope(args.scope.into());
    if let Some(ood_type) = args.ood_type {
        query = query.with_type(ood_type.into());
    }
    if let Some(text) = &args.search {
        query = query.with_text(text.as_str());
    }
    query
}
