use std::time::Duration;

use pretty_assertions::assert_eq;
use showcase_core::{
    parse_project_list, Breakpoint, EmbedSettings, IntroTarget, ProjectDescriptor,
    ShowcaseSettings, ValidationError,
};

#[test]
fn defaults_match_page_tuning() {
    let settings = ShowcaseSettings::default();
    assert_eq!(settings.embed.load_timeout(), Duration::from_secs(10));
    assert_eq!(settings.embed.resize_debounce(), Duration::from_millis(250));
    assert_eq!(settings.fade.threshold, 0.1);
    assert_eq!(settings.fade.root_margin, "0px 0px -50px 0px");
    assert_eq!(settings.fade.collections.len(), 4);
    assert_eq!(settings.fade.collections[0].stagger_ms, 150);
    assert_eq!(
        settings.scroll.section_ids,
        vec!["products", "automations", "web-design"]
    );
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let settings = ShowcaseSettings::from_json(
        r#"{ "embed": { "load_timeout_ms": 5000 }, "layout": { "tablet_max_width": 900 } }"#,
    )
    .expect("valid settings");

    assert_eq!(settings.embed.load_timeout(), Duration::from_secs(5));
    assert_eq!(settings.embed.resize_debounce_ms, 250);
    assert_eq!(settings.layout.breakpoint_for(850.0), Breakpoint::Tablet);
    assert_eq!(settings.layout.mobile_height_px, 450);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(ShowcaseSettings::from_json("{ embed: ").is_err());
}

#[test]
fn sandbox_never_grants_top_navigation() {
    let embed = EmbedSettings {
        sandbox: "allow-scripts allow-top-navigation allow-top-navigation-by-user-activation allow-forms"
            .to_string(),
        ..EmbedSettings::default()
    };
    assert_eq!(embed.sandbox_tokens(), "allow-scripts allow-forms");
    assert_eq!(
        EmbedSettings::default().sandbox_tokens(),
        "allow-same-origin allow-scripts allow-forms allow-popups allow-modals"
    );
}

#[test]
fn intro_timeline_is_ordered() {
    let timeline = ShowcaseSettings::default().intro.timeline();
    let order: Vec<_> = timeline.iter().map(|cue| cue.target).collect();
    assert_eq!(
        order,
        vec![
            IntroTarget::RightDot,
            IntroTarget::LeftDot,
            IntroTarget::StudioText,
            IntroTarget::Tagline,
        ]
    );
    assert_eq!(timeline[3].at, Duration::from_millis(1900));
}

#[test]
fn project_list_parses_camel_case_and_keeps_invalid_entries() {
    let projects = parse_project_list(
        r#"[
            { "title": "Orbit", "url": "https://studio.example/orbit/", "description": "Physics toy" },
            { "title": "Ledger", "url": "https://studio.example/ledger/", "containerId": "ledger-embed" },
            { "url": "https://studio.example/untitled/" }
        ]"#,
    )
    .expect("valid list");

    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].description(), Some("Physics toy"));
    assert_eq!(projects[1].container_id.as_deref(), Some("ledger-embed"));
    assert_eq!(projects[2].validate(), Err(ValidationError::MissingTitle));
    assert_eq!(
        projects[0],
        ProjectDescriptor::new("Orbit", "https://studio.example/orbit/")
            .with_description("Physics toy")
    );
}
