// Criterion benchmarks for Clubfit

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use clubfit::core::{estimation::estimate_swing_speed, scoring::score_club, Recommender};
use clubfit::models::{Catalog, ClubRecord, ClubType, GolferProfile, Locale, MissTendency, ScoringParams};
use std::collections::{BTreeMap, BTreeSet};

fn create_club(id: usize, club_type: ClubType) -> ClubRecord {
    let mut miss_tendency_fix = BTreeSet::new();
    if id % 2 == 0 {
        miss_tendency_fix.insert(MissTendency::Slice);
    }
    if id % 3 == 0 {
        miss_tendency_fix.insert(MissTendency::Fat);
    }

    ClubRecord {
        id: format!("club-{:05}", id),
        brand_id: Some(format!("brand-{}", id % 7)),
        brand_name: None,
        name: format!("Club {}", id),
        name_ko: None,
        club_type,
        forgiveness_level: (id % 5) as u8 + 1,
        distance_level: ((id + 1) % 5) as u8 + 1,
        control_level: ((id + 2) % 5) as u8 + 1,
        feel_level: 3,
        miss_tendency_fix,
        recommended_swing_speed_min: Some(70 + (id % 4) as u16 * 10),
        recommended_swing_speed_max: Some(90 + (id % 4) as u16 * 10),
        recommended_handicap_min: Some((id % 3) as u16 * 10),
        recommended_handicap_max: Some(20 + (id % 3) as u16 * 10),
        release_price: Some(300000 + (id % 20) as u64 * 50000),
        current_price: if id % 4 == 0 { None } else { Some(250000 + (id % 20) as u64 * 40000) },
        used_price_guide: BTreeMap::new(),
    }
}

fn create_catalog(per_type: usize) -> Catalog {
    ClubType::ALL
        .into_iter()
        .map(|club_type| {
            let clubs = (0..per_type).map(|i| create_club(i, club_type)).collect();
            (club_type, clubs)
        })
        .collect()
}

fn create_profile() -> GolferProfile {
    GolferProfile {
        height: Some(178),
        average_score: Some(94),
        swing_speed: None,
        miss_tendencies: [MissTendency::Slice, MissTendency::Fat].into_iter().collect(),
        budget: Some(600000),
    }
}

fn bench_swing_speed_estimate(c: &mut Criterion) {
    let params = ScoringParams::default();
    let profile = create_profile();

    c.bench_function("estimate_swing_speed", |b| {
        b.iter(|| estimate_swing_speed(black_box(&profile), black_box(&params)));
    });
}

fn bench_score_club(c: &mut Criterion) {
    let params = ScoringParams::default();
    let profile = create_profile();
    let club = create_club(6, ClubType::Driver);

    c.bench_function("score_club", |b| {
        b.iter(|| score_club(black_box(&profile), black_box(&club), black_box(&params)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let recommender = Recommender::with_default_params();
    let profile = create_profile();

    for size in [10, 100, 1000].iter() {
        let catalog = create_catalog(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| recommender.recommend(black_box(&profile), black_box(&catalog), Locale::Ko));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_swing_speed_estimate, bench_score_club, bench_recommend);
criterion_main!(benches);
