use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::warn;

use crate::team::TeamRecord;

/// Output filename in the shape downstream tooling expects:
/// `warrennolan_nitty_{formula|net}_{sorted|selected}_{timestamp}.xlsx`.
pub fn report_filename(use_formula: bool, select_mode: bool, now: DateTime<Local>) -> String {
    let basis = if use_formula { "formula" } else { "net" };
    let order = if select_mode { "selected" } else { "sorted" };
    let stamp = now.format("%Y-%m-%d %H%M");
    format!("warrennolan_nitty_{basis}_{order}_{stamp}.xlsx")
}

/// Write the ranking report: one header row of the configured column names,
/// then one row per team in ranked order.
pub fn write_report(path: &Path, teams: &[TeamRecord], visible_columns: &[String]) -> Result<()> {
    let probe = TeamRecord::default();
    for name in visible_columns {
        if column_value(&probe, name).is_none() {
            warn!("No valid key mapping exists for {name}");
        }
    }

    let mut rows: Vec<Vec<String>> = vec![visible_columns.to_vec()];
    for team in teams {
        rows.push(
            visible_columns
                .iter()
                .map(|name| column_value(team, name).unwrap_or_default())
                .collect(),
        );
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Rankings")?;
        write_rows(sheet, &rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

/// Map a report column name to the matching record field. Derived records
/// are recomputed here from their components, never cached.
pub fn column_value(team: &TeamRecord, column: &str) -> Option<String> {
    let value = match column {
        "NET" => team.net_rank.to_string(),
        "Team" => team.team.clone(),
        "Team Link" => team.team_url.clone(),
        "Record" => team.overall.to_string(),
        "Conf Record" => team.conf.to_string(),
        "Road/Neutral Record" => team.road_neutral().to_string(),
        "Q3/Q4 Losses" => team.combined_q3_q4_losses().to_string(),
        "SOR" => team.sor.to_string(),
        "KPI" => team.kpi.to_string(),
        "WAB" => team.wab.to_string(),
        "BPI" => team.bpi.to_string(),
        "POM" => team.pom.to_string(),
        "T-Rank" => team.t_rank.to_string(),
        "Conf" => team.conference.clone(),
        "NC Record" => team.nc.to_string(),
        "NC SOS" => team.nc_sos.to_string(),
        "Home Record" => team.home.to_string(),
        "Home Wins" => team.home.wins.to_string(),
        "Home Losses" => team.home.losses.to_string(),
        "Road Record" => team.road.to_string(),
        "Road Wins" => team.road.wins.to_string(),
        "Road Losses" => team.road.losses.to_string(),
        "Neutral Record" => team.neutral.to_string(),
        "Neutral Wins" => team.neutral.wins.to_string(),
        "Neutral Losses" => team.neutral.losses.to_string(),
        "Road/Neutral Wins" => team.road_neutral().wins.to_string(),
        "Road/Neutral Losses" => team.road_neutral().losses.to_string(),
        "Q1/Q2 Record" => team.q1_q2().to_string(),
        "Q1/Q2 Wins" => team.q1_q2().wins.to_string(),
        "Q1/Q2 Losses" => team.q1_q2().losses.to_string(),
        "Q1 Record" => team.q1.to_string(),
        "Q1 Wins" => team.q1.wins.to_string(),
        "Q1 Losses" => team.q1.losses.to_string(),
        "Q2 Record" => team.q2.to_string(),
        "Q2 Wins" => team.q2.wins.to_string(),
        "Q2 Losses" => team.q2.losses.to_string(),
        "Q3 Record" => team.q3.to_string(),
        "Q3 Wins" => team.q3.wins.to_string(),
        "Q3 Losses" => team.q3.losses.to_string(),
        "Q4 Record" => team.q4.to_string(),
        "Q4 Wins" => team.q4.wins.to_string(),
        "Q4 Losses" => team.q4.losses.to_string(),
        "High Q1 Record" => team.high_q1.to_string(),
        "High Q1 Wins" => team.high_q1.wins.to_string(),
        "High Q1 Losses" => team.high_q1.losses.to_string(),
        "High Q1 R/N Record" => team.high_q1_rn.to_string(),
        "High Q1 R/N Wins" => team.high_q1_rn.wins.to_string(),
        "High Q1 R/N Losses" => team.high_q1_rn.losses.to_string(),
        "At Large Record" => team.at_large.to_string(),
        "At Large Wins" => team.at_large.wins.to_string(),
        "At Large Losses" => team.at_large.losses.to_string(),
        "Avg NET Wins" => team.avg_net_wins.clone(),
        "Avg NET Losses" => team.avg_net_losses.clone(),
        _ => return None,
    };
    Some(value)
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Record;
    use chrono::TimeZone;

    #[test]
    fn column_mapping_covers_derived_records() {
        let team = TeamRecord {
            team: "Kansas".to_string(),
            net_rank: 3,
            overall: Record::new(20, 5),
            road: Record::new(6, 4),
            neutral: Record::new(2, 1),
            q3: Record::new(5, 2),
            q4: Record::new(6, 1),
            ..TeamRecord::default()
        };
        assert_eq!(column_value(&team, "NET").as_deref(), Some("3"));
        assert_eq!(column_value(&team, "Record").as_deref(), Some("20-5"));
        assert_eq!(
            column_value(&team, "Road/Neutral Record").as_deref(),
            Some("8-5")
        );
        assert_eq!(column_value(&team, "Q3/Q4 Losses").as_deref(), Some("3"));
        assert_eq!(column_value(&team, "Bogus Column"), None);
    }

    #[test]
    fn filename_reflects_run_mode() {
        let now = Local.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap();
        assert_eq!(
            report_filename(true, false, now),
            "warrennolan_nitty_formula_sorted_2026-02-14 0930.xlsx"
        );
        assert_eq!(
            report_filename(false, true, now),
            "warrennolan_nitty_net_selected_2026-02-14 0930.xlsx"
        );
    }
}
