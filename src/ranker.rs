use tracing::info;

use crate::comparator::compare_teams;
use crate::config::FormulaConfig;
use crate::team::TeamRecord;

/// Teams short of two games over .500 are not ranked unless they lead their
/// conference (the auto-bid path keeps them alive).
const MIN_OVERALL_MARGIN: i64 = 2;

/// Build the formula ranking from teams already ordered by ascending NET rank.
///
/// This is an incremental insertion, not a sort: each eligible team scans the
/// current output from the weakest entry upward and splices itself in directly
/// below the first entry that beats it. With a non-transitive comparator the
/// scan direction and splice are the contract — a library sort over the same
/// comparator produces a different list.
pub fn rank(teams: Vec<TeamRecord>, formula: &FormulaConfig, select_mode: bool) -> Vec<TeamRecord> {
    let mut out: Vec<TeamRecord> = Vec::new();

    for team in teams {
        info!(" Placing {}", team.team);
        if team.is_ineligible {
            info!("{} filtered out due to ineligibility", team.team);
            continue;
        }
        if team.overall.margin() < MIN_OVERALL_MARGIN && !team.is_conference_leader {
            info!(
                "{} filtered out due to {} overall record",
                team.team, team.overall
            );
            continue;
        }
        if out.is_empty() {
            out.push(team);
            continue;
        }

        debug_assert!(
            out.iter().all(|placed| placed.net_rank != team.net_rank),
            "duplicate NET rank {} would make the tie-break degenerate",
            team.net_rank
        );

        let mut insert_at = 0;
        for idx in (0..out.len()).rev() {
            if compare_teams(&team, &out[idx], formula, select_mode) > 0 {
                // out[idx] is better; the new team goes just below them.
                insert_at = idx + 1;
                break;
            }
        }
        out.insert(insert_at, team);
    }

    out
}
