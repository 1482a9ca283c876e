use anyhow::{Context, Result};

use crate::nitty_scrape::CleansedRow;
use crate::records::Record;
use crate::team_sheet::TeamSheetStats;

/// Worst possible value for a scalar metric. A metric the site has not
/// published yet (early-season KPI, say) is normalized to this instead of
/// being carried as a missing value, so every comparison stays total.
pub const WORST_METRIC_RANK: i32 = 1000;

/// One team's full stat snapshot for a single ranking run.
///
/// Constructed once from the nitty table row plus the team net-sheet, then
/// immutable; the ranking only moves records around, it never edits them.
#[derive(Debug, Clone, Default)]
pub struct TeamRecord {
    pub team: String,
    /// `=HYPERLINK(...)` formula string pointing at the team net-sheet.
    pub team_url: String,
    pub net_rank: i32,
    pub conference: String,

    pub sor: i32,
    pub kpi: i32,
    pub wab: i32,
    pub bpi: i32,
    pub pom: i32,
    pub t_rank: i32,
    pub nc_sos: i32,

    pub overall: Record,
    pub conf: Record,
    pub nc: Record,
    pub home: Record,
    pub road: Record,
    pub neutral: Record,
    pub q1: Record,
    pub q2: Record,
    pub q3: Record,
    pub q4: Record,
    pub high_q1: Record,
    pub high_q1_rn: Record,
    pub at_large: Record,

    /// Average NET of wins/losses as printed on the table; report-only.
    pub avg_net_wins: String,
    pub avg_net_losses: String,

    pub is_conference_leader: bool,
    pub is_ineligible: bool,
}

impl TeamRecord {
    /// Road + neutral record, recomputed from its components.
    pub fn road_neutral(&self) -> Record {
        self.road.combined(&self.neutral)
    }

    /// Q1 + Q2 record, recomputed from its components.
    pub fn q1_q2(&self) -> Record {
        self.q1.combined(&self.q2)
    }

    /// Total losses across the two weakest quadrants.
    pub fn combined_q3_q4_losses(&self) -> u32 {
        self.q3.losses + self.q4.losses
    }

    pub fn from_scrape(
        row: &CleansedRow,
        sheet: &TeamSheetStats,
        conf_leader: bool,
    ) -> Result<Self> {
        let ctx = |field: &'static str| format!("{field} for {}", row.team);

        Ok(TeamRecord {
            team: row.team.clone(),
            team_url: sheet.team_url.clone(),
            net_rank: parse_net_rank(&row.net).with_context(|| ctx("NET rank"))?,
            conference: row.conf.clone(),
            sor: metric_or_worst(&sheet.sor).with_context(|| ctx("SOR"))?,
            kpi: metric_or_worst(&sheet.kpi).with_context(|| ctx("KPI"))?,
            wab: metric_or_worst(&sheet.wab).with_context(|| ctx("WAB"))?,
            bpi: metric_or_worst(&sheet.bpi).with_context(|| ctx("BPI"))?,
            pom: metric_or_worst(&sheet.pom).with_context(|| ctx("POM"))?,
            t_rank: metric_or_worst(&sheet.t_rank).with_context(|| ctx("T-Rank"))?,
            nc_sos: metric_or_worst(&row.nc_sos).with_context(|| ctx("NC SOS"))?,
            overall: row.overall_record.parse().with_context(|| ctx("overall record"))?,
            conf: row.conf_record.parse().with_context(|| ctx("conference record"))?,
            nc: row.nc_record.parse().with_context(|| ctx("NC record"))?,
            home: row.home_record.parse().with_context(|| ctx("home record"))?,
            road: row.road_record.parse().with_context(|| ctx("road record"))?,
            neutral: row.neutral_record.parse().with_context(|| ctx("neutral record"))?,
            q1: row.q1_record.parse().with_context(|| ctx("Q1 record"))?,
            q2: row.q2_record.parse().with_context(|| ctx("Q2 record"))?,
            q3: row.q3_record.parse().with_context(|| ctx("Q3 record"))?,
            q4: row.q4_record.parse().with_context(|| ctx("Q4 record"))?,
            high_q1: sheet.high_q1,
            high_q1_rn: sheet.high_q1_rn,
            at_large: sheet.at_large,
            avg_net_wins: row.avg_net_wins.clone(),
            avg_net_losses: row.avg_net_losses.clone(),
            is_conference_leader: conf_leader,
            is_ineligible: false,
        })
    }
}

/// The NET cell sometimes carries a movement marker after the rank
/// ("12 +3"); only the leading integer matters.
fn parse_net_rank(raw: &str) -> Result<i32> {
    let head = raw.split_whitespace().next().unwrap_or("");
    head.parse::<i32>()
        .with_context(|| format!("malformed NET rank {raw:?}"))
}

/// Empty means the site has not published the metric yet; anything else
/// must be an integer rank, and garbage is a fatal scrape failure.
fn metric_or_worst(raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(WORST_METRIC_RANK);
    }
    trimmed
        .parse::<i32>()
        .with_context(|| format!("malformed metric value {raw:?}"))
}
