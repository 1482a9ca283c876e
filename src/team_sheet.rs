use std::collections::HashSet;

use anyhow::{Context, Result};
use scraper::Html;
use tracing::warn;

use crate::http_client::fetch_page;
use crate::records::Record;

/// Stats only available on a team's net-sheet page: the secondary metric
/// ranks plus the records that have to be tallied game by game.
#[derive(Debug, Clone, Default)]
pub struct TeamSheetStats {
    /// `=HYPERLINK(...)` cell formula for the report.
    pub team_url: String,
    pub kpi: String,
    pub sor: String,
    pub wab: String,
    pub bpi: String,
    pub pom: String,
    pub t_rank: String,
    pub high_q1: Record,
    pub high_q1_rn: Record,
    pub at_large: Record,
}

/// Team name as it appears in the site's URLs.
pub fn team_slug(name: &str) -> String {
    name.replace(' ', "-")
        .replace('\'', "")
        .replace('&', "")
        .replace('(', "")
        .replace(')', "")
        .replace('.', "")
        .replace("--", "-")
}

pub fn team_sheet_url(slug: &str, year: i32) -> String {
    format!("http://warrennolan.com/basketball/{year}/team-net-sheet?team={slug}")
}

pub fn fetch_team_sheet(
    team: &str,
    year: i32,
    at_large_teams: &HashSet<String>,
) -> Result<TeamSheetStats> {
    let slug = team_slug(team);
    let url = team_sheet_url(&slug, year);
    let body = fetch_page(&url)?;
    let document = Html::parse_document(&body);
    let text: String = document.root_element().text().collect();

    let mut stats = parse_team_sheet(&text, at_large_teams)
        .with_context(|| format!("failed parsing team sheet for {team}"))?;
    stats.team_url = format!("=HYPERLINK(\"{url}\", \"{slug}\")");
    Ok(stats)
}

/// Parse the flattened page text. The page has no stable markup to hook
/// into, so this anchors on the `KPI:` label for the metric block and on the
/// `H: 1-15 |` quadrant header for the game log, then walks fixed line
/// strides — the same shape the site has rendered for years.
pub fn parse_team_sheet(text: &str, at_large_teams: &HashSet<String>) -> Result<TeamSheetStats> {
    let kpi_idx = text
        .find("KPI:\n")
        .context("KPI anchor not found on team sheet")?;
    let tail = &text[kpi_idx..];
    let lines: Vec<&str> = tail.split('\n').collect();

    let metric = |idx: usize| -> Result<String> {
        lines
            .get(idx)
            .map(|line| line.trim().to_string())
            .with_context(|| format!("team sheet truncated before metric line {idx}"))
    };
    let kpi = metric(5)?;
    let sor = metric(6)?;
    let wab = metric(7)?;
    let bpi = metric(19)?;
    let pom = metric(20)?;
    let t_rank = metric(21)?;

    let (high_q1, high_q1_rn, at_large) = walk_game_log(tail, at_large_teams)?;

    Ok(TeamSheetStats {
        team_url: String::new(),
        kpi,
        sor,
        wab,
        bpi,
        pom,
        t_rank,
        high_q1,
        high_q1_rn,
        at_large,
    })
}

/// Tally high-Q1, high-Q1 road/neutral, and at-large records from the game
/// log. Games sit in 8-line blocks: a numeric game row followed by location,
/// opponent, and the two scores. The first `H:` sub-header after the Q1
/// anchor ends the high-Q1 band.
fn walk_game_log(
    tail: &str,
    at_large_teams: &HashSet<String>,
) -> Result<(Record, Record, Record)> {
    let q1_off = tail
        .find("H: 1-15 |")
        .context("quadrant 1 header not found on team sheet")?;
    let lines: Vec<&str> = tail[q1_off..].split('\n').collect();

    let mut high_q1 = Record::default();
    let mut high_q1_rn = Record::default();
    let mut at_large = Record::default();
    let mut on_high_q1 = true;

    let mut line_idx = 10;
    while line_idx < lines.len() {
        let line = lines[line_idx].trim();
        if !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()) {
            let location = game_line(&lines, line_idx, 1)?;
            let opponent = game_line(&lines, line_idx, 2)?;
            let team_score: i32 = game_line(&lines, line_idx, 3)?
                .parse()
                .with_context(|| format!("malformed team score at line {line_idx}"))?;
            let opponent_score: i32 = game_line(&lines, line_idx, 4)?
                .parse()
                .with_context(|| format!("malformed opponent score at line {line_idx}"))?;
            let won = team_score > opponent_score;
            let road_or_neutral = location == "A" || location == "N";

            if on_high_q1 {
                if won {
                    high_q1.wins += 1;
                    if road_or_neutral {
                        high_q1_rn.wins += 1;
                    }
                } else {
                    high_q1.losses += 1;
                    if road_or_neutral {
                        high_q1_rn.losses += 1;
                    }
                }
            }
            if at_large_teams.contains(opponent) {
                if won {
                    at_large.wins += 1;
                } else {
                    at_large.losses += 1;
                }
            }
            line_idx += 8;
        } else if line.starts_with("H: ") {
            on_high_q1 = false;
            line_idx += 10;
        } else if line.is_empty() {
            line_idx += 1;
        } else if line.starts_with("Quadrant") {
            line_idx += 17;
        } else if line.starts_with("Non-Division I Games") {
            break;
        } else {
            warn!("Unexpected line on team sheet: {line}");
            line_idx += 1;
        }
    }

    Ok((high_q1, high_q1_rn, at_large))
}

fn game_line<'a>(lines: &[&'a str], base: usize, offset: usize) -> Result<&'a str> {
    lines
        .get(base + offset)
        .map(|l| l.trim())
        .with_context(|| format!("truncated game entry at line {base}"))
}
