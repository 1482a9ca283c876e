use tracing::{debug, info};

use crate::config::FormulaConfig;
use crate::records::Record;
use crate::team::TeamRecord;

/// `compare_teams` verdict when the left-hand team outranks the right.
pub const X_WINS: i32 = -1;
/// Verdict when the right-hand team outranks the left.
pub const Y_WINS: i32 = 1;

/// Decide which of two teams ranks higher under the formula.
///
/// Returns [`X_WINS`] or [`Y_WINS`] when the accumulated points differ. On an
/// exact point tie the verdict falls back to raw NET rank and the return value
/// is `x.net_rank - y.net_rank` — negative means `x` outranks `y`, and the
/// magnitude carries how far apart the seeds were.
///
/// The relation is total and antisymmetric but deliberately not transitive:
/// different pairs can be decided by different metrics, and the NET fallback
/// cuts across the point ordering. The ranker is written for exactly this
/// relation; do not feed it to a comparison sort.
pub fn compare_teams(
    x: &TeamRecord,
    y: &TeamRecord,
    formula: &FormulaConfig,
    select_mode: bool,
) -> i32 {
    let mut x_pts = 0.0_f64;
    let mut y_pts = 0.0_f64;

    // BPI / POM / T-Rank swap to their SELECT weights in select mode.
    let (bpi_pts, pom_pts, t_rank_pts) = if select_mode {
        (
            formula.bpi_select_pts,
            formula.pom_select_pts,
            formula.t_rank_select_pts,
        )
    } else {
        (formula.bpi_pts, formula.pom_pts, formula.t_rank_pts)
    };

    // Scalar metrics, all lower-is-better; strictly smaller value scores.
    let metrics: [(&str, i64, i64, f64); 9] = [
        ("sor", x.sor.into(), y.sor.into(), formula.sor_pts),
        (
            "combined_q3_q4_losses",
            x.combined_q3_q4_losses().into(),
            y.combined_q3_q4_losses().into(),
            formula.q3_and_q4_pts,
        ),
        (
            "q4_losses",
            x.q4.losses.into(),
            y.q4.losses.into(),
            formula.q4_pts,
        ),
        ("kpi", x.kpi.into(), y.kpi.into(), formula.kpi_pts),
        ("wab", x.wab.into(), y.wab.into(), formula.wab_pts),
        ("nc_sos", x.nc_sos.into(), y.nc_sos.into(), formula.nc_sos_pts),
        ("bpi", x.bpi.into(), y.bpi.into(), bpi_pts),
        ("pom", x.pom.into(), y.pom.into(), pom_pts),
        ("t_rank", x.t_rank.into(), y.t_rank.into(), t_rank_pts),
    ];
    for (label, x_val, y_val, metric_pts) in metrics {
        award_metric(x_val, y_val, metric_pts, &mut x_pts, &mut y_pts);
        debug!(
            "      {label} for {metric_pts} points ||| {} {x_pts} - {} {y_pts}",
            x.team, y.team
        );
    }

    let records: [(&str, Record, Record, f64); 6] = [
        ("al", x.at_large, y.at_large, formula.waalt_pts),
        (
            "road_neutral",
            x.road_neutral(),
            y.road_neutral(),
            formula.road_and_neutral_pts,
        ),
        ("high_q1", x.high_q1, y.high_q1, formula.high_q1_pts),
        ("high_q1_rn", x.high_q1_rn, y.high_q1_rn, formula.high_q1_rn_pts),
        ("q1", x.q1, y.q1, formula.q1_pts),
        ("q1_q2", x.q1_q2(), y.q1_q2(), formula.q1_and_q2_pts),
    ];
    for (label, x_rec, y_rec, metric_pts) in records {
        award_record(
            x_rec,
            y_rec,
            metric_pts,
            formula.new_record_comparison,
            &mut x_pts,
            &mut y_pts,
        );
        debug!(
            "      {label} record for {metric_pts} points ||| {} {x_pts} - {} {y_pts}",
            x.team, y.team
        );
    }

    // Conference leaders get the bonus independently; both sides may score.
    if x.is_conference_leader {
        x_pts += formula.conf_leader_pts;
    }
    if y.is_conference_leader {
        y_pts += formula.conf_leader_pts;
    }

    if let Some(threshold) = formula.bad_nc_sos_deduct_threshold {
        if x.nc_sos >= threshold {
            x_pts -= formula.bad_nc_sos_deduct_pts;
        }
        if y.nc_sos >= threshold {
            y_pts -= formula.bad_nc_sos_deduct_pts;
        }
    }

    if x_pts > y_pts {
        let diff = x_pts - y_pts;
        let suffix = if diff > 1.0 { "s" } else { "" };
        info!(
            "   {} > {} by {diff} point{suffix} | ({x_pts} - {y_pts})",
            x.team, y.team
        );
        X_WINS
    } else if y_pts > x_pts {
        let diff = y_pts - x_pts;
        let suffix = if diff > 1.0 { "s" } else { "" };
        debug!(
            "   {} > {} by {diff} point{suffix} | ({y_pts} - {x_pts})",
            y.team, x.team
        );
        Y_WINS
    } else {
        if x.net_rank < y.net_rank {
            debug!("   {} > {} due to NET ranking", x.team, y.team);
        } else {
            debug!("   {} > {} due to NET ranking", y.team, x.team);
        }
        x.net_rank - y.net_rank
    }
}

fn award_metric(x_val: i64, y_val: i64, metric_pts: f64, x_pts: &mut f64, y_pts: &mut f64) {
    if x_val < y_val {
        *x_pts += metric_pts;
    } else if y_val < x_val {
        *y_pts += metric_pts;
    }
}

fn award_record(
    x: Record,
    y: Record,
    metric_pts: f64,
    new_record_comparison: bool,
    x_pts: &mut f64,
    y_pts: &mut f64,
) {
    if new_record_comparison {
        // More wins takes it outright; with wins level (and anyone having
        // won at all), fewer losses takes it.
        if x.wins > y.wins && x.wins > 0 {
            *x_pts += metric_pts;
        } else if y.wins > x.wins && y.wins > 0 {
            *y_pts += metric_pts;
        } else if x.wins == 0 && y.wins == 0 {
            // Nobody has a win in this bucket; no points.
        } else if x.losses < y.losses {
            *x_pts += metric_pts;
        } else if y.losses < x.losses {
            *y_pts += metric_pts;
        } else {
            debug!("      No points awarded due to W-L tie");
        }
    } else {
        // Legacy comparison: a winless side concedes outright, then games
        // over .500, then winning percentage, then raw win count.
        if x.wins == 0 && y.wins > 0 {
            *y_pts += metric_pts;
        } else if y.wins == 0 && x.wins > 0 {
            *x_pts += metric_pts;
        } else if x.wins == 0 && y.wins == 0 {
            // No points.
        } else if x.margin() > y.margin() {
            *x_pts += metric_pts;
        } else if y.margin() > x.margin() {
            *y_pts += metric_pts;
        } else if x.winning_pct() > y.winning_pct() {
            *x_pts += metric_pts;
        } else if y.winning_pct() > x.winning_pct() {
            *y_pts += metric_pts;
        } else if x.wins > y.wins {
            *x_pts += metric_pts;
        } else if y.wins > x.wins {
            *y_pts += metric_pts;
        }
    }
}
