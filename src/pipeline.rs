use crate::config::{ChartSettings, Settings};
use crate::load::{load_census_csv, RawTable};
use crate::render::{render_bar_chart, BarChart};
use crate::resolve::{resolve_brackets, top_languages};
use crate::summary::{summarize, IncomeSummary};
use crate::table::{CountedLabel, TopicTable};
use crate::taxonomy::{IncomeTaxonomy, LanguageTaxonomy};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct LanguageReport {
    pub languages: Vec<CountedLabel>,
    pub chart: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeReport {
    pub brackets: Vec<CountedLabel>,
    pub summary: IncomeSummary,
    pub chart: PathBuf,
}

/// Load the export named in `settings`.
pub fn load(settings: &Settings) -> Result<RawTable> {
    info!(path = %settings.input.display(), "loading data");
    Ok(load_census_csv(&settings.input, &settings.load)?)
}

/// Top non-official mother tongues.
pub fn analyze_languages(raw: &RawTable) -> Vec<CountedLabel> {
    let taxonomy = LanguageTaxonomy::census_2021();
    let mut table = TopicTable::select(raw, taxonomy.topic);
    table.normalize_labels();
    top_languages(&table, &taxonomy)
}

/// Household total income per bracket, plus ratios.
pub fn analyze_income(raw: &RawTable) -> (Vec<CountedLabel>, IncomeSummary) {
    let taxonomy = IncomeTaxonomy::census_2021();
    let mut table = TopicTable::select(raw, taxonomy.topic);
    table.normalize_labels();
    let brackets = resolve_brackets(&table, &taxonomy);
    let summary = summarize(&brackets, taxonomy.low_income_brackets);
    (brackets, summary)
}

pub fn run_languages(settings: &Settings, raw: &RawTable) -> Result<LanguageReport> {
    let languages = analyze_languages(raw);
    let chart = settings.language_chart_path();
    draw(&settings.languages, &languages, &chart, settings.font_path.as_deref())?;
    Ok(LanguageReport { languages, chart })
}

pub fn run_income(settings: &Settings, raw: &RawTable) -> Result<IncomeReport> {
    let (brackets, summary) = analyze_income(raw);
    let chart = settings.income_chart_path();
    draw(&settings.income, &brackets, &chart, settings.font_path.as_deref())?;
    Ok(IncomeReport {
        brackets,
        summary,
        chart,
    })
}

fn draw(
    chart: &ChartSettings,
    bars: &[CountedLabel],
    output: &Path,
    font_path: Option<&Path>,
) -> Result<()> {
    let bar_chart = BarChart {
        title: &chart.title,
        subtitle: chart.subtitle.as_deref(),
        x_label: &chart.x_label,
        y_label: &chart.y_label,
        bars,
        style: &chart.style,
    };
    render_bar_chart(&bar_chart, output, font_path)
        .with_context(|| format!("rendering {}", output.display()))
}
