// SPDX-License-Identifier: MPL-2.0
use langpack::{catalog, Callback, FluentArgs, I18n, LanguageIdentifier, MessageConfig, Options};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn write_package(dir: &Path, file_name: &str, content: &str) {
    std::fs::write(dir.join(file_name), content).expect("failed to write package");
}

fn write_default_pair(dir: &Path) {
    write_package(dir, "en.lang", "# [i18n] <en> <English>\ngreeting = Hello\n");
    write_package(
        dir,
        "zh.lang",
        "# [i18n] <zh-Hans> <简体中文>\ngreeting = 你好\n",
    );
}

fn quiet_options(dir: &Path) -> Options {
    Options::new()
        .package_path(dir)
        .log_info(|_| {})
        .log_error(|_| {})
}

fn tag(raw: &str) -> LanguageIdentifier {
    raw.parse().expect("failed to parse tag")
}

#[test]
fn greeting_scenario_across_switch() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let mut engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");
    assert_eq!(engine.resolve("", "greeting", None, None), "Hello");

    engine.switch(&tag("zh-Hans")).expect("failed to switch");
    assert_eq!(engine.resolve("", "greeting", None, None), "你好");
}

#[test]
fn missing_key_degrades_to_fallback_in_both_catalogs() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let mut engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");
    assert_eq!(
        engine.resolve("fallback", "missing.key", None, None),
        "fallback"
    );

    engine.switch(&tag("zh-Hans")).expect("failed to switch");
    assert_eq!(
        engine.resolve("fallback", "missing.key", None, None),
        "fallback"
    );
}

#[test]
fn template_variables_and_plurals_resolve() {
    let dir = tempdir().expect("failed to create temp dir");
    write_package(
        dir.path(),
        "en.lang",
        concat!(
            "# [i18n] <en> <English>\n",
            "welcome = Welcome, { $name }!\n",
            "emails = { $count ->\n",
            "    [one] You have one email\n",
            "   *[other] You have { $count } emails\n",
            "}\n",
        ),
    );

    let engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");

    let mut args = FluentArgs::new();
    args.set("name", "Alice");
    assert_eq!(
        engine.resolve("", "welcome", Some(&args), None),
        "Welcome, Alice!"
    );
    assert_eq!(engine.resolve("", "emails", None, Some(1)), "You have one email");
    assert_eq!(engine.resolve("", "emails", None, Some(5)), "You have 5 emails");
}

#[test]
fn subscribed_renderers_refresh_after_each_switch() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let mut engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");

    // Models a UI label: owns the last rendered text, refreshed on switch.
    let label: Arc<Mutex<String>> = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&label);
    engine.subscribe_text("", "greeting", None, None, move |text| {
        *sink.lock().expect("label poisoned") = text;
    });
    assert_eq!(*label.lock().expect("label poisoned"), "Hello");

    engine.switch(&tag("zh-Hans")).expect("failed to switch");
    assert_eq!(*label.lock().expect("label poisoned"), "你好");

    engine.switch(&tag("en")).expect("failed to switch back");
    assert_eq!(*label.lock().expect("label poisoned"), "Hello");
}

#[test]
fn every_subscriber_runs_exactly_once_per_switch() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let mut engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");
    let runs = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&runs);
    engine.subscribe(Callback::new(move |_| {
        *counter.lock().expect("counter poisoned") += 1;
    }));

    engine.switch(&tag("zh-Hans")).expect("failed to switch");
    assert_eq!(*runs.lock().expect("counter poisoned"), 1);
}

#[test]
fn broken_package_is_skipped_but_batch_survives() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());
    write_package(dir.path(), "broken.lang", "no identity label here\n");

    let engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");
    assert_eq!(engine.languages().len(), 2);
}

#[test]
fn toml_decoder_option_loads_toml_packages() {
    let dir = tempdir().expect("failed to create temp dir");
    write_package(
        dir.path(),
        "en.toml",
        concat!(
            "# [i18n] <en> <English>\n",
            "greeting = \"Hello\"\n",
            "\n",
            "[menu]\n",
            "file = \"File\"\n",
        ),
    );

    let options = Options::new()
        .log_info(|_| {})
        .log_error(|_| {})
        .decode(catalog::decode_toml)
        .package_path(dir.path())
        .package_suffix("toml");

    let engine = I18n::initialize(Some(tag("en")), options).expect("failed to initialize");
    assert_eq!(engine.t("greeting"), "Hello");
    assert_eq!(engine.t("menu-file"), "File");
}

#[test]
fn explicit_pattern_narrows_discovery() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let pattern = dir.path().join("en.*").display().to_string();
    let options = Options::new()
        .log_info(|_| {})
        .log_error(|_| {})
        .package_pattern(pattern);

    let engine = I18n::initialize(Some(tag("en")), options).expect("failed to initialize");
    assert_eq!(engine.languages().len(), 1);
    assert_eq!(engine.t("greeting"), "Hello");
}

#[test]
fn formatted_wraps_resolved_text() {
    let dir = tempdir().expect("failed to create temp dir");
    write_default_pair(dir.path());

    let engine =
        I18n::initialize(Some(tag("en")), quiet_options(dir.path())).expect("failed to initialize");
    let config = MessageConfig::new("greeting").wrapper("<< {} >>");
    assert_eq!(engine.formatted(&config), "<< Hello >>");
}
