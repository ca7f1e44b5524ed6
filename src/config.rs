use crate::load::LoadOptions;
use crate::render::ChartStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub const DEFAULT_INPUT: &str =
    "./data/CensusProfile2021-ProfilRecensement2021-20260205015247.csv";
pub const DEFAULT_RESULTS_DIR: &str = "./results";

/// Runtime settings. A YAML file is layered over `Settings::default()`, so
/// it only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    #[serde(flatten)]
    pub load: LoadOptions,
    pub results_dir: PathBuf,
    /// TrueType font for chart text; common system fonts are tried otherwise.
    pub font_path: Option<PathBuf>,
    pub languages: ChartSettings,
    pub income: ChartSettings,
}

/// Output file name and labelling of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub file_name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub style: ChartStyle,
}

impl ChartSettings {
    pub fn languages() -> Self {
        Self {
            file_name: "top5_languages.png".to_string(),
            title: "Top 5 Non-Official Mother Tongues (Manual Analysis)".to_string(),
            subtitle: None,
            x_label: "Language".to_string(),
            y_label: "Number of Speakers".to_string(),
            style: ChartStyle::default(),
        }
    }

    pub fn income() -> Self {
        Self {
            file_name: "income_distribution.png".to_string(),
            title: "Household Total Income Distribution (2020)".to_string(),
            subtitle: Some("Metro Vancouver A".to_string()),
            x_label: "Income Brackets".to_string(),
            y_label: "Number of Households".to_string(),
            style: ChartStyle {
                width: 1400,
                height: 800,
                fill: "#008080".to_string(),
                opacity: 0.8,
                edge: Some("#000000".to_string()),
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            load: LoadOptions::default(),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            font_path: None,
            languages: ChartSettings::languages(),
            income: ChartSettings::income(),
        }
    }
}

impl Settings {
    /// Read a YAML file and layer it over the defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let settings = Self::from_yaml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(config = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let overlay: Value = serde_yaml::from_str(text)?;
        let mut merged = serde_yaml::to_value(Self::default())?;
        if !overlay.is_null() {
            merge_yaml(&mut merged, overlay);
        }
        Ok(serde_yaml::from_value(merged)?)
    }

    /// Defaults, or the file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn language_chart_path(&self) -> PathBuf {
        self.results_dir.join(&self.languages.file_name)
    }

    pub fn income_chart_path(&self) -> PathBuf {
        self.results_dir.join(&self.income.file_name)
    }
}

/// Recursively overwrite `base` with `overlay`; mappings merge key by key.
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_yaml(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
