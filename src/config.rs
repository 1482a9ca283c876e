use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};

/// Run configuration uploaded as `config.txt` (YAML).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Teams excluded from the run outright (postseason bans etc).
    #[serde(rename = "INELIGIBLE", default, deserialize_with = "null_as_default")]
    pub ineligible: HashSet<String>,
    /// Teams counted as at-large candidates when tallying at-large records.
    #[serde(rename = "AT_LARGE", default, deserialize_with = "null_as_default")]
    pub at_large: HashSet<String>,
    /// Teams eligible for alternate scoring when the formula runs in select mode.
    #[serde(rename = "SELECTED", default, deserialize_with = "null_as_default")]
    pub selected: HashSet<String>,
    /// Report columns, in output order, by display name.
    #[serde(rename = "VISIBLE_COLUMNS", default, deserialize_with = "null_as_default")]
    pub visible_columns: Vec<String>,
    #[serde(rename = "JORDAN_FORMULA")]
    pub formula: Option<FormulaConfig>,
}

/// Point weights and thresholds for the ranking formula. Absent point keys
/// contribute nothing; the deduction threshold has no default and must be
/// supplied whenever the deduction itself is in play.
#[derive(Debug, Clone, Deserialize)]
pub struct FormulaConfig {
    #[serde(rename = "ENABLED", default)]
    pub enabled: bool,
    #[serde(rename = "SELECT_MODE", default)]
    pub select_mode: bool,

    #[serde(rename = "SOR_PTS", default)]
    pub sor_pts: f64,
    #[serde(rename = "Q3_AND_Q4_PTS", default)]
    pub q3_and_q4_pts: f64,
    #[serde(rename = "Q4_PTS", default)]
    pub q4_pts: f64,
    #[serde(rename = "KPI_PTS", default)]
    pub kpi_pts: f64,
    #[serde(rename = "WAB_PTS", default)]
    pub wab_pts: f64,
    #[serde(rename = "NC_SOS_PTS", default)]
    pub nc_sos_pts: f64,
    #[serde(rename = "BPI_PTS", default)]
    pub bpi_pts: f64,
    #[serde(rename = "BPI_SELECT_PTS", default)]
    pub bpi_select_pts: f64,
    #[serde(rename = "POM_PTS", default)]
    pub pom_pts: f64,
    #[serde(rename = "POM_SELECT_PTS", default)]
    pub pom_select_pts: f64,
    #[serde(rename = "T-RANK_PTS", default)]
    pub t_rank_pts: f64,
    #[serde(rename = "T-RANK_SELECT_PTS", default)]
    pub t_rank_select_pts: f64,

    #[serde(rename = "WAALT_PTS", default)]
    pub waalt_pts: f64,
    #[serde(rename = "ROAD_AND_NEUTRAL_PTS", default)]
    pub road_and_neutral_pts: f64,
    #[serde(rename = "HIGH_Q1_PTS", default)]
    pub high_q1_pts: f64,
    #[serde(rename = "HIGH_Q1_RN_PTS", default)]
    pub high_q1_rn_pts: f64,
    #[serde(rename = "Q1_PTS", default)]
    pub q1_pts: f64,
    #[serde(rename = "Q1_AND_Q2_PTS", default)]
    pub q1_and_q2_pts: f64,

    #[serde(rename = "NEW_RECORD_COMPARISON", default = "default_true")]
    pub new_record_comparison: bool,

    #[serde(rename = "CONF_LEADER_PTS", default)]
    pub conf_leader_pts: f64,
    #[serde(rename = "BAD_NC_SOS_DEDUCT_PTS", default)]
    pub bad_nc_sos_deduct_pts: f64,
    #[serde(rename = "BAD_NC_SOS_DEDUCT_THRESHOLD")]
    pub bad_nc_sos_deduct_threshold: Option<i32>,
}

impl Default for FormulaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            select_mode: false,
            sor_pts: 0.0,
            q3_and_q4_pts: 0.0,
            q4_pts: 0.0,
            kpi_pts: 0.0,
            wab_pts: 0.0,
            nc_sos_pts: 0.0,
            bpi_pts: 0.0,
            bpi_select_pts: 0.0,
            pom_pts: 0.0,
            pom_select_pts: 0.0,
            t_rank_pts: 0.0,
            t_rank_select_pts: 0.0,
            waalt_pts: 0.0,
            road_and_neutral_pts: 0.0,
            high_q1_pts: 0.0,
            high_q1_rn_pts: 0.0,
            q1_pts: 0.0,
            q1_and_q2_pts: 0.0,
            new_record_comparison: true,
            conf_leader_pts: 0.0,
            bad_nc_sos_deduct_pts: 0.0,
            bad_nc_sos_deduct_threshold: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    // `INELIGIBLE:` with no entries parses as null, not an empty list.
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn load(path: &Path) -> Result<RunConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading config {}", path.display()))?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<RunConfig> {
    let cleaned = cleanse_text(raw);
    let config: RunConfig = serde_yaml::from_str(&cleaned).context("invalid config YAML")?;
    validate(&config)?;
    Ok(config)
}

/// Uploaded configs routinely arrive with Windows clipboard junk in them.
fn cleanse_text(raw: &str) -> String {
    raw.replace('\u{00a0}', " ")
        .replace('\u{feff}', "")
        .replace('Â', "")
}

fn validate(config: &RunConfig) -> Result<()> {
    if let Some(formula) = config.formula.as_ref().filter(|f| f.enabled) {
        if formula.bad_nc_sos_deduct_pts != 0.0 && formula.bad_nc_sos_deduct_threshold.is_none() {
            bail!("BAD_NC_SOS_DEDUCT_PTS is set but BAD_NC_SOS_DEDUCT_THRESHOLD is missing");
        }
    }
    Ok(())
}
