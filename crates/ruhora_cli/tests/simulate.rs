use ruhora_cli::{Report, Runner, Scenario, SiteConfig};
use std::fs;

fn config(reduced_motion: bool) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.motion.reduced_motion = Some(reduced_motion);
    config
}

fn run(config: &SiteConfig, json: &str) -> Report {
    let scenario = Scenario::from_json(json).unwrap();
    Runner::new(config, false).unwrap().run(&scenario)
}

#[test]
fn load_config_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("ruhora.toml"),
        "[viewport]\nwidth = 390\nheight = 844\n\n[motion]\nreduced_motion = true\nframe_ms = 8\n",
    )
    .unwrap();

    let config = SiteConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.viewport.width, 390.0);
    assert_eq!(config.motion.frame_ms, 8.0);
    assert!(!config.viewport().is_desktop());

    let direct = SiteConfig::load_from_dir(&dir.path().join("ruhora.toml")).unwrap();
    assert_eq!(direct, config);
}

#[test]
fn missing_or_invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SiteConfig::load_from_dir(dir.path()).is_err());

    fs::write(dir.path().join("ruhora.toml"), "[motion]\nframe_ms = 0\n").unwrap();
    assert!(SiteConfig::load_from_dir(dir.path()).is_err());
}

#[test]
fn reduced_motion_session_passes() {
    let report = run(
        &config(true),
        r#"{
            "name": "reduced session",
            "steps": [
                { "type": "assert_visible", "element": "about-heading" },
                { "type": "click", "element": "ritual-cta-product-1" },
                { "type": "assert_overlay", "open": true },
                { "type": "key", "key": "Tab" },
                { "type": "click", "element": "ritual-overlay-order" },
                { "type": "key", "key": "Escape" },
                { "type": "assert_overlay", "open": false },
                { "type": "click", "element": "journal-toggle-2" },
                { "type": "assert_expanded", "entry": 2 },
                { "type": "assert_visible", "element": "journal-full-2" },
                { "type": "click", "element": "journal-toggle-2" },
                { "type": "assert_expanded", "entry": null },
                { "type": "assert_hidden", "element": "journal-full-2" },
                { "type": "click", "element": "nav-products" },
                { "type": "assert_active_nav", "section": "products" }
            ]
        }"#,
    );

    assert!(report.passed, "{:?}", report.message);
    assert!(report.reduced_motion);
    assert_eq!(report.steps_run, 15);
    assert_eq!(report.opened_links.len(), 1);
    assert!(report.opened_links[0].starts_with("https://api.whatsapp.com/send/?phone="));
}

#[test]
fn animated_session_reveals_over_time() {
    let report = run(
        &config(false),
        r#"{
            "steps": [
                { "type": "assert_hidden", "element": "about-heading" },
                { "type": "wait", "ms": 2000 },
                { "type": "assert_visible", "element": "hero-headline" },
                { "type": "click", "element": "ritual-cta-product-2" },
                { "type": "wait", "ms": 1500 },
                { "type": "assert_visible", "element": "ritual-overlay-step-1" },
                { "type": "click", "element": "ritual-overlay-close" },
                { "type": "assert_overlay", "open": true },
                { "type": "wait", "ms": 600 },
                { "type": "assert_overlay", "open": false }
            ]
        }"#,
    );
    assert!(report.passed, "{:?}", report.message);
    assert!(report.frames > 0);
}

#[test]
fn failing_step_is_reported() {
    let report = run(
        &config(true),
        r#"{ "steps": [
            { "type": "tick", "frames": 3 },
            { "type": "assert_overlay", "open": true },
            { "type": "tick", "frames": 3 }
        ] }"#,
    );

    assert!(!report.passed);
    assert_eq!(report.failed_step, Some(1));
    assert_eq!(report.failed_kind.as_deref(), Some("assert_overlay"));
    assert_eq!(report.steps_run, 2);
    assert_eq!(report.frames, 3);

    let json = serde_json::to_string(&report).unwrap();
    let parsed: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn unknown_key_and_section_fail() {
    let report = run(&config(true), r#"{ "steps": [{ "type": "key", "key": "F13" }] }"#);
    assert!(report.message.unwrap().contains("F13"));

    let report = run(
        &config(true),
        r#"{ "steps": [{ "type": "assert_active_nav", "section": "shop" }] }"#,
    );
    assert!(!report.passed);
}
