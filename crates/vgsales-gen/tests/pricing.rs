use vgsales_gen::data::generator::rng_from_seed;
use vgsales_gen::synth::pricing::{
    discount_factor, genre_price_multiplier, round_to_hundred, PlatformClass, TitlePricing,
};

#[test]
fn platform_classes_map_to_base_prices() {
    assert_eq!(PlatformClass::of("WII").base_price(), 6800);
    assert_eq!(PlatformClass::of("Wii").base_price(), 6800);
    assert_eq!(PlatformClass::of("PS4").base_price(), 6800);
    assert_eq!(PlatformClass::of("3DS").base_price(), 4800);
    assert_eq!(PlatformClass::of("PSP").base_price(), 4800);
    assert_eq!(PlatformClass::of("PC").base_price(), 5980);
    assert_eq!(PlatformClass::of("2600").base_price(), 6000);
    assert_eq!(PlatformClass::of("").base_price(), 6000);
}

#[test]
fn genre_multipliers() {
    assert_eq!(genre_price_multiplier("Role-Playing"), 1.30);
    assert_eq!(genre_price_multiplier("Simulation"), 1.15);
    assert_eq!(genre_price_multiplier("Action"), 1.10);
    assert_eq!(genre_price_multiplier("Shooter"), 1.10);
    assert_eq!(genre_price_multiplier("Sports"), 0.95);
    assert_eq!(genre_price_multiplier("Racing"), 0.95);
    assert_eq!(genre_price_multiplier("Misc"), 0.85);
    assert_eq!(genre_price_multiplier("Platform"), 1.0);
    assert_eq!(genre_price_multiplier("Puzzle"), 1.0);
}

#[test]
fn sampled_prices_are_jittered_and_rounded() {
    let mut rng = rng_from_seed(21);
    for _ in 0..200 {
        let pricing = TitlePricing::sample(&mut rng, "WII", "Platform", 36);
        assert_eq!(pricing.price_yen % 100, 0);
        assert!(
            (6100..=7500).contains(&pricing.price_yen),
            "price {} outside jitter band",
            pricing.price_yen
        );
        assert_eq!(pricing.window_len, 36);
    }
}

#[test]
fn discount_runs_linearly_from_110_to_60_percent() {
    assert!((discount_factor(0, 36) - 1.1).abs() < 1e-12);
    assert!((discount_factor(35, 36) - 0.6).abs() < 1e-12);
    for idx in 1..36 {
        let step = discount_factor(idx - 1, 36) - discount_factor(idx, 36);
        assert!((step - 0.5 / 35.0).abs() < 1e-12);
    }
}

#[test]
fn degenerate_windows_have_no_discount() {
    assert_eq!(discount_factor(0, 1), 1.0);
    assert_eq!(discount_factor(0, 0), 1.0);
}

#[test]
fn monthly_revenue_applies_discount_and_truncates() {
    let pricing = TitlePricing {
        price_yen: 6800,
        window_len: 36,
    };
    assert_eq!(pricing.monthly_revenue(2, 0).expect("revenue"), 14_960);
    assert_eq!(pricing.monthly_revenue(3, 35).expect("revenue"), 12_240);
    assert_eq!(pricing.lifetime_revenue(3).expect("revenue"), 20_400);
}

#[test]
fn revenue_overflow_is_an_error() {
    let pricing = TitlePricing {
        price_yen: 6800,
        window_len: 36,
    };
    let units = i64::MAX / 1000;
    let err = pricing.lifetime_revenue(units).expect_err("lifetime overflow");
    assert!(err.to_string().contains("does not fit"), "unexpected error: {err}");
    assert!(pricing.monthly_revenue(units, 0).is_err());
    assert!(pricing.lifetime_revenue(i64::MAX / 6800).is_ok());
}

#[test]
fn rounding_to_hundred() {
    assert_eq!(round_to_hundred(6849.0), 6800);
    assert_eq!(round_to_hundred(6850.0), 6900);
    assert_eq!(round_to_hundred(5980.0 * 1.0), 6000);
}
