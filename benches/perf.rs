use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use net_nitty::comparator::compare_teams;
use net_nitty::config::FormulaConfig;
use net_nitty::ranker::rank;
use net_nitty::records::Record;
use net_nitty::team::TeamRecord;

fn formula() -> FormulaConfig {
    FormulaConfig {
        sor_pts: 5.0,
        q3_and_q4_pts: 2.0,
        q4_pts: 1.0,
        kpi_pts: 3.0,
        wab_pts: 4.0,
        nc_sos_pts: 1.0,
        bpi_pts: 2.0,
        pom_pts: 2.0,
        t_rank_pts: 2.0,
        waalt_pts: 3.0,
        road_and_neutral_pts: 2.0,
        high_q1_pts: 3.0,
        high_q1_rn_pts: 2.0,
        q1_pts: 3.0,
        q1_and_q2_pts: 2.0,
        conf_leader_pts: 1.0,
        bad_nc_sos_deduct_pts: 2.0,
        bad_nc_sos_deduct_threshold: Some(250),
        ..FormulaConfig::default()
    }
}

/// Deterministic spread of plausible team stats across the NET field.
fn field(n: i32) -> Vec<TeamRecord> {
    (1..=n)
        .map(|i| TeamRecord {
            team: format!("Team {i}"),
            net_rank: i,
            sor: (i * 7) % 300 + 1,
            kpi: (i * 11) % 300 + 1,
            wab: (i * 13) % 300 + 1,
            bpi: (i * 17) % 300 + 1,
            pom: (i * 19) % 300 + 1,
            t_rank: (i * 23) % 300 + 1,
            nc_sos: (i * 29) % 350 + 1,
            overall: Record::new(25 - (i % 8) as u32, 4 + (i % 8) as u32),
            q1: Record::new((i % 6) as u32, (i % 4) as u32),
            q2: Record::new((i % 7) as u32, (i % 3) as u32),
            q3: Record::new(5, (i % 3) as u32),
            q4: Record::new(6, (i % 2) as u32),
            road: Record::new((i % 9) as u32, (i % 5) as u32),
            neutral: Record::new((i % 4) as u32, (i % 3) as u32),
            high_q1: Record::new((i % 4) as u32, (i % 5) as u32),
            high_q1_rn: Record::new((i % 3) as u32, (i % 4) as u32),
            at_large: Record::new((i % 5) as u32, (i % 4) as u32),
            is_conference_leader: i % 15 == 0,
            ..TeamRecord::default()
        })
        .collect()
}

fn bench_compare(c: &mut Criterion) {
    let formula = formula();
    let teams = field(2);
    c.bench_function("compare_teams", |b| {
        b.iter(|| black_box(compare_teams(&teams[0], &teams[1], &formula, false)))
    });
}

fn bench_rank(c: &mut Criterion) {
    let formula = formula();
    let teams = field(300);
    c.bench_function("rank_300_teams", |b| {
        b.iter(|| black_box(rank(teams.clone(), &formula, false)))
    });
}

criterion_group!(benches, bench_compare, bench_rank);
criterion_main!(benches);
