use vgsales_gen::data::datasets::SeedRow;
use vgsales_gen::data::generator::rng_from_seed;
use vgsales_gen::data::months::{month_window, DEFAULT_WINDOW_START};
use vgsales_gen::materialize::{
    national_volume, volume_adjustment, SalesMaterializer, DEFAULT_UNIT_SCALE,
};
use vgsales_gen::synth::regions::Region;

fn seed_row(platform: &str, genre: &str, publisher: &str, jp: f64, global: f64) -> SeedRow {
    SeedRow {
        name: "Test Title".to_string(),
        platform: platform.to_string(),
        release_year: 2010,
        genre: genre.to_string(),
        publisher: publisher.to_string(),
        jp_sales_million: jp,
        global_sales_million: global,
    }
}

#[test]
fn global_sales_stand_in_for_missing_jp_sales() {
    let row = seed_row("PS3", "Action", "Capcom", 0.0, 1.2);
    assert_eq!(national_volume(&row), Some(1.2));

    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, DEFAULT_UNIT_SCALE);
    let mut rng = rng_from_seed(8);
    let facts = materializer
        .materialize(&mut rng, &row)
        .expect("materialize")
        .expect("fallback volume should be used");
    assert_eq!(facts.national_volume, 1.2);
    assert!(!facts.lifetime.is_empty());
}

#[test]
fn titles_without_sales_emit_nothing() {
    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, DEFAULT_UNIT_SCALE);
    let mut rng = rng_from_seed(8);
    for (jp, global) in [(0.0, 0.0), (-1.0, 0.0), (0.0, -0.5), (f64::NAN, 0.0)] {
        let row = seed_row("PS3", "Action", "Capcom", jp, global);
        assert_eq!(national_volume(&row), None);
        let facts = materializer.materialize(&mut rng, &row).expect("materialize");
        assert!(facts.is_none());
    }
}

#[test]
fn units_are_only_lost_to_truncation() {
    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, DEFAULT_UNIT_SCALE);
    let rows = [
        seed_row("WII", "Platform", "Nintendo", 3.77, 82.74),
        seed_row("PS2", "Role-Playing", "Square Enix", 2.73, 8.05),
        seed_row("PC", "Strategy", "Unknown", 0.0, 0.02),
        seed_row("DS", "Puzzle", "Namco Bandai Games", 0.000_004, 0.1),
    ];

    for seed in 0..40 {
        let mut rng = rng_from_seed(seed);
        for row in &rows {
            let facts = materializer
                .materialize(&mut rng, row)
                .expect("materialize")
                .expect("volume");
            let national_units = facts.adjusted_volume * DEFAULT_UNIT_SCALE;
            assert!(facts.lifetime_units() as f64 <= national_units + 1e-6);

            for lifetime in &facts.lifetime {
                assert!(lifetime.units > 0);
                assert!(facts.monthly_units_for(lifetime.region) <= lifetime.units);
                assert_eq!(lifetime.revenue, lifetime.units * facts.pricing.price_yen);
            }
            for monthly in &facts.monthly {
                assert!(monthly.units > 0);
                assert!(monthly.revenue >= 0);
                assert!(months.contains(&monthly.year_month));
                assert!(facts.lifetime.iter().any(|l| l.region == monthly.region));
            }
        }
    }
}

#[test]
fn tiny_volumes_drop_empty_regions() {
    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, DEFAULT_UNIT_SCALE);
    let mut rng = rng_from_seed(2);
    let row = seed_row("PC", "Strategy", "Unknown", 0.000_002, 0.0);
    let facts = materializer
        .materialize(&mut rng, &row)
        .expect("materialize")
        .expect("volume");
    assert!(facts.lifetime.len() < Region::ALL.len());
    assert!(facts.lifetime_units() <= 2);
}

#[test]
fn square_role_playing_titles_are_amplified() {
    let mut rng = rng_from_seed(13);
    for _ in 0..100 {
        let rpg = volume_adjustment(&mut rng, "Square Enix", "Role-Playing");
        assert!((1.55..=1.70).contains(&rpg), "rpg factor {rpg}");
        let other = volume_adjustment(&mut rng, "Square Enix", "Action");
        assert!((0.88..=0.95).contains(&other), "other factor {other}");
        assert_eq!(volume_adjustment(&mut rng, "Nintendo", "Role-Playing"), 1.0);
    }
}

#[test]
fn monthly_revenue_tracks_the_markdown_curve() {
    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, DEFAULT_UNIT_SCALE);
    let mut rng = rng_from_seed(4);
    let row = seed_row("PS4", "Shooter", "Ubisoft", 1.0, 3.0);
    let facts = materializer
        .materialize(&mut rng, &row)
        .expect("materialize")
        .expect("volume");

    for monthly in &facts.monthly {
        let idx = months
            .iter()
            .position(|m| *m == monthly.year_month)
            .expect("month in window");
        let expected = facts.pricing.monthly_revenue(monthly.units, idx).expect("revenue");
        assert_eq!(monthly.revenue, expected);
    }
}

#[test]
fn oversized_unit_counts_are_rejected() {
    let months = month_window(DEFAULT_WINDOW_START, 36);
    let materializer = SalesMaterializer::new(&months, 1e17);
    let mut rng = rng_from_seed(6);
    let row = seed_row("WII", "Sports", "Nintendo", 3.77, 82.74);
    let err = materializer
        .materialize(&mut rng, &row)
        .expect_err("revenue cannot fit in i64");
    assert!(err.to_string().contains("does not fit"), "unexpected error: {err}");
}
