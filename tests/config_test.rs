use spotmix::{config, recommend::RecommendSettings};

fn set_env(vars: &[(&str, &str)]) {
    for (name, value) in vars {
        // SAFETY: this binary has a single test, nothing reads the environment concurrently
        unsafe { std::env::set_var(name, value) };
    }
}

#[test]
fn test_recommend_settings_from_env() {
    let defaults = RecommendSettings::default();

    set_env(&[
        ("RECOMMENDATION_LIMIT", "0"),
        ("ARTIST_SATURATION_CAP", "0"),
        ("RECENTLY_PLAYED_LIMIT", "many"),
        ("VARIANTS_PER_TEMPLATE", "0"),
    ]);
    let settings = config::recommend_settings();
    // zero limit and cap fall back, zero variants is a valid choice
    assert_eq!(settings.limit, defaults.limit);
    assert_eq!(settings.saturation_cap, defaults.saturation_cap);
    assert_eq!(settings.recently_played_limit, defaults.recently_played_limit);
    assert_eq!(settings.variants_per_template, 0);

    set_env(&[
        ("RECOMMENDATION_LIMIT", " 25 "),
        ("ARTIST_SATURATION_CAP", "1"),
        ("RECENTLY_PLAYED_LIMIT", "20"),
        ("VARIANTS_PER_TEMPLATE", "2"),
    ]);
    let settings = config::recommend_settings();
    assert_eq!(settings.limit, 25);
    assert_eq!(settings.saturation_cap, 1);
    assert_eq!(settings.recently_played_limit, 20);
    assert_eq!(settings.variants_per_template, 2);
    assert_eq!(settings.max_templates, defaults.max_templates);
}
