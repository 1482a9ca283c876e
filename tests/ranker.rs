use net_nitty::comparator::{X_WINS, compare_teams};
use net_nitty::config::FormulaConfig;
use net_nitty::ranker::rank;
use net_nitty::records::Record;
use net_nitty::team::TeamRecord;

fn team(name: &str, net_rank: i32, overall: Record) -> TeamRecord {
    TeamRecord {
        team: name.to_string(),
        net_rank,
        overall,
        ..TeamRecord::default()
    }
}

fn names(teams: &[TeamRecord]) -> Vec<&str> {
    teams.iter().map(|t| t.team.as_str()).collect()
}

#[test]
fn empty_input_ranks_empty() {
    let out = rank(Vec::new(), &FormulaConfig::default(), false);
    assert!(out.is_empty());
}

#[test]
fn better_sor_outranks_worse_net_seed() {
    let formula = FormulaConfig {
        sor_pts: 5.0,
        ..FormulaConfig::default()
    };
    let mut a = team("Kansas", 1, Record::new(20, 5));
    a.sor = 10;
    let mut b = team("Houston", 2, Record::new(18, 7));
    b.sor = 20;

    assert_eq!(names(&rank(vec![a, b], &formula, false)), vec!["Kansas", "Houston"]);
}

#[test]
fn point_tie_keeps_net_order() {
    let formula = FormulaConfig {
        sor_pts: 5.0,
        ..FormulaConfig::default()
    };
    let mut a = team("Kansas", 1, Record::new(20, 5));
    a.sor = 10;
    let mut b = team("Houston", 2, Record::new(18, 7));
    b.sor = 10;

    assert_eq!(names(&rank(vec![a, b], &formula, false)), vec!["Kansas", "Houston"]);
}

#[test]
fn later_team_can_take_the_top_spot() {
    let formula = FormulaConfig {
        sor_pts: 5.0,
        ..FormulaConfig::default()
    };
    let mut a = team("Kansas", 1, Record::new(20, 5));
    a.sor = 20;
    let mut b = team("Houston", 2, Record::new(22, 3));
    b.sor = 5;

    // Houston beats everyone on the scan and lands at index 0.
    assert_eq!(names(&rank(vec![a, b], &formula, false)), vec!["Houston", "Kansas"]);
}

#[test]
fn barely_over_five_hundred_is_filtered() {
    let c = team("Middling U", 30, Record::new(15, 14));
    let out = rank(vec![c], &FormulaConfig::default(), false);
    assert!(out.is_empty());
}

#[test]
fn conference_leader_survives_the_filter() {
    let mut d = team("Drake", 120, Record::new(10, 15));
    d.is_conference_leader = true;
    let out = rank(vec![d], &FormulaConfig::default(), false);
    assert_eq!(names(&out), vec!["Drake"]);
}

#[test]
fn ineligible_flag_is_excluded() {
    let mut e = team("Banned State", 12, Record::new(25, 2));
    e.is_ineligible = true;
    let out = rank(vec![e], &FormulaConfig::default(), false);
    assert!(out.is_empty());
}

#[test]
fn output_is_a_subset_permutation_of_input() {
    let formula = FormulaConfig {
        sor_pts: 2.0,
        kpi_pts: 3.0,
        ..FormulaConfig::default()
    };
    let mut input = Vec::new();
    for i in 0..12 {
        let mut t = team(&format!("Team {i}"), i + 1, Record::new(18, 8));
        t.sor = 40 - 3 * i;
        t.kpi = 5 + 7 * (i % 5);
        input.push(t);
    }
    // One team that cannot make the cut.
    input.push(team("Sub500", 13, Record::new(12, 13)));

    let out = rank(input, &formula, false);
    assert_eq!(out.len(), 12);
    let mut seen: Vec<&str> = names(&out);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 12);
    assert!(!seen.contains(&"Sub500"));
}

#[test]
fn insertion_stops_at_first_win_even_under_a_cycle() {
    // Three metrics at equal weight form a comparator cycle:
    // A beats B, B beats C, C beats A.
    let formula = FormulaConfig {
        sor_pts: 2.0,
        kpi_pts: 2.0,
        wab_pts: 2.0,
        ..FormulaConfig::default()
    };
    let mut a = team("A", 1, Record::new(20, 5));
    (a.sor, a.kpi, a.wab) = (1, 2, 3);
    let mut b = team("B", 2, Record::new(20, 5));
    (b.sor, b.kpi, b.wab) = (2, 3, 1);
    let mut c = team("C", 3, Record::new(20, 5));
    (c.sor, c.kpi, c.wab) = (3, 1, 2);

    assert_eq!(compare_teams(&a, &b, &formula, false), X_WINS);
    assert_eq!(compare_teams(&b, &c, &formula, false), X_WINS);
    assert_eq!(compare_teams(&c, &a, &formula, false), X_WINS);

    // C beats A head to head, but the backward scan stops as soon as B
    // (the weakest placed team) wins, so C still lands at the bottom.
    let out = rank(vec![a, b, c], &formula, false);
    assert_eq!(names(&out), vec!["A", "B", "C"]);
}
