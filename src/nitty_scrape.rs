use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, NaiveDate};
use scraper::{Html, Selector};
use tracing::info;

use crate::config::RunConfig;
use crate::http_client::fetch_page;
use crate::team::TeamRecord;
use crate::team_sheet;

/// Column count of a cleansed nitty table row.
const NITTY_COLUMNS: usize = 17;

/// Season year the site keys its pages by: from October onward the pages
/// already belong to next spring's tournament.
pub fn season_year(today: NaiveDate) -> i32 {
    if today.month() >= 10 {
        today.year() + 1
    } else {
        today.year()
    }
}

pub fn nitty_url(year: i32) -> String {
    format!("http://warrennolan.com/basketball/{year}/net-nitty")
}

/// One nitty table row after cleansing, still text-valued. Field order
/// follows the table's column order; `sos` is scraped but feeds nothing.
#[derive(Debug, Clone, Default)]
pub struct CleansedRow {
    pub net: String,
    pub team: String,
    pub conf: String,
    pub conf_record: String,
    pub overall_record: String,
    pub sos: String,
    pub nc_record: String,
    pub nc_sos: String,
    pub home_record: String,
    pub road_record: String,
    pub neutral_record: String,
    pub q1_record: String,
    pub q2_record: String,
    pub q3_record: String,
    pub q4_record: String,
    pub avg_net_wins: String,
    pub avg_net_losses: String,
    pub conf_leader: bool,
    pub ineligible: bool,
}

pub fn fetch_nitty_rows(year: i32) -> Result<Vec<CleansedRow>> {
    let url = nitty_url(year);
    info!("Fetching nitty table from {url}");
    let body = fetch_page(&url)?;
    parse_nitty_table(&body)
}

/// Extract and cleanse the first table on the net-nitty page. Header rows
/// are dropped; cell background styling carries the conference-leader (blue)
/// and ineligible (black) flags.
pub fn parse_nitty_table(html: &str) -> Result<Vec<CleansedRow>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").map_err(|e| anyhow!("table selector: {e}"))?;
    let row_sel = Selector::parse("tr").map_err(|e| anyhow!("row selector: {e}"))?;
    let cell_sel = Selector::parse("th, td").map_err(|e| anyhow!("cell selector: {e}"))?;

    let table = document
        .select(&table_sel)
        .next()
        .context("no table found on nitty page")?;

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<(String, String)> = row
            .select(&cell_sel)
            .map(|cell| {
                (
                    cell.text().collect::<String>(),
                    cell.value().attr("style").unwrap_or("").to_string(),
                )
            })
            .collect();
        if cells.is_empty() || cells[0].0.trim_start().starts_with("NET") {
            continue;
        }
        rows.push(cleanse_row(&cells)?);
    }
    Ok(rows)
}

fn cleanse_row(cells: &[(String, String)]) -> Result<CleansedRow> {
    let mut fields: Vec<String> = Vec::with_capacity(NITTY_COLUMNS);
    let mut conf_leader = false;
    let mut ineligible = false;

    for (idx, (text, style)) in cells.iter().enumerate() {
        if idx == 0 {
            conf_leader = style.contains("background-color:Blue");
            ineligible = style.contains("background-color:Black");
        }
        if text.trim().is_empty() {
            continue;
        }
        let text = text.trim_start_matches('\n');
        if idx == 1 {
            // Team cell holds the name on one line and "Conf (W-L)" on the next.
            let mut lines = text.split('\n');
            let team = lines.next().unwrap_or("").trim();
            let conf_line = lines
                .next()
                .with_context(|| format!("team cell missing conference line: {text:?}"))?;
            let open = conf_line
                .find('(')
                .with_context(|| format!("team cell missing conference record: {conf_line:?}"))?;
            let conf = conf_line[..open].trim();
            let conf_record = conf_line[open + 1..].replace(')', "");
            fields.push(team.to_string());
            fields.push(conf.to_string());
            fields.push(conf_record.trim().to_string());
        } else if idx == 2 {
            // Team logo cell; nothing useful.
            continue;
        } else {
            fields.push(text.trim().to_string());
        }
    }

    if fields.len() != NITTY_COLUMNS {
        bail!(
            "unexpected nitty row shape: got {} fields, want {NITTY_COLUMNS}: {fields:?}",
            fields.len()
        );
    }

    let mut it = fields.into_iter();
    let mut next = || it.next().unwrap_or_default();
    Ok(CleansedRow {
        net: next(),
        team: next(),
        conf: next(),
        conf_record: next(),
        overall_record: next(),
        sos: next(),
        nc_record: next(),
        nc_sos: next(),
        home_record: next(),
        road_record: next(),
        neutral_record: next(),
        q1_record: next(),
        q2_record: next(),
        q3_record: next(),
        q4_record: next(),
        avg_net_wins: next(),
        avg_net_losses: next(),
        conf_leader,
        ineligible,
    })
}

/// Fetch each remaining team's net-sheet and assemble full records, in the
/// table's (NET) order. Style-flagged or config-listed ineligible teams are
/// skipped before their sheet is ever fetched, as are non-SELECTED teams when
/// select mode is on.
pub fn collect_team_records(
    rows: &[CleansedRow],
    config: &RunConfig,
    year: i32,
    select_mode: bool,
) -> Result<Vec<TeamRecord>> {
    let mut teams = Vec::new();
    for row in rows {
        if row.ineligible
            || config.ineligible.contains(&row.team)
            || (select_mode && !config.selected.contains(&row.team))
        {
            info!(
                "   Skipping {} due to ineligibility and/or not being SELECTED",
                row.team
            );
            continue;
        }
        info!("   Getting {} Stats", row.team);
        let sheet = team_sheet::fetch_team_sheet(&row.team, year, &config.at_large)?;
        teams.push(TeamRecord::from_scrape(row, &sheet, row.conf_leader)?);
    }
    Ok(teams)
}
