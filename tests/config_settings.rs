// tests/config_settings.rs
use std::fs;
use std::path::Path;

use guidepress::config::copy::PageCopy;
use guidepress::config::site::SiteConfig;
use guidepress::config::{load_settings, merge_settings, write_config_template, RunOptions, Settings};
use serde_json::{json, Value};

fn obj(v: Value) -> Settings {
    v.as_object().cloned().unwrap()
}

#[test]
fn template_loads_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/site.json");
    write_config_template(&path).unwrap();

    let settings = load_settings(&path).unwrap();
    assert_eq!(SiteConfig::from_settings(&settings), SiteConfig::default());
    assert_eq!(PageCopy::from_settings(&settings, dir.path()), PageCopy::default());
    let opts = RunOptions::from_settings(&settings, dir.path());
    assert_eq!(opts.top_n, 10);
    assert_eq!(opts.input, dir.path().join("productdata.csv"));
}

#[test]
fn toml_file_with_cli_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    fs::write(
        &path,
        r#"
site_name = "Sock Lab"
site_url = "socklab.test/"
top_n = "2"
keywords = ["Wool Socks", " ", "Ski&nbsp;Socks"]
output = "/srv/site"

[page_copy]
home_hero_title = "Warm feet, {{year}}"
"#,
    )
    .unwrap();

    let overrides = obj(json!({"site_name": "", "top_n": 6, "tag": "sock-20", "seed": null}));
    let settings = merge_settings(load_settings(&path).unwrap(), overrides);

    let site = SiteConfig::from_settings(&settings);
    assert_eq!(site.site_name, "Sock Lab");
    assert_eq!(site.site_url, "https://socklab.test");

    let opts = RunOptions::from_settings(&settings, Path::new("/work"));
    assert_eq!(opts.top_n, 6);
    assert_eq!(opts.tag, "sock-20");
    assert_eq!(opts.seed, None);
    assert_eq!(opts.keywords, vec!["Wool Socks", "Ski Socks"]);
    assert_eq!(opts.output, Path::new("/srv/site"));
    assert_eq!(opts.input, Path::new("/work/productdata.csv"));

    let copy = PageCopy::from_settings(&settings, dir.path());
    assert_eq!(copy.get("home_hero_title"), "Warm feet, {{year}}");
}

#[test]
fn top_n_is_never_below_three() {
    let opts = RunOptions::from_settings(&obj(json!({"top_n": "2"})), Path::new("."));
    assert_eq!(opts.top_n, 3);
    let opts = RunOptions::from_settings(&obj(json!({"top_n": "many"})), Path::new("."));
    assert_eq!(opts.top_n, 10);
}

#[test]
fn legacy_page_content_file_is_still_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("copy.json"), r#"{"contact_html": "<h1>Write to us</h1>", "n": 3}"#).unwrap();
    let settings = obj(json!({"page_content_file": "copy.json"}));
    let copy = PageCopy::from_settings(&settings, dir.path());
    assert_eq!(copy.get("contact_html"), "<h1>Write to us</h1>");
    assert_eq!(copy.get("terms_html"), PageCopy::default().get("terms_html"));

    let missing = obj(json!({"page_content_file": "nope.json"}));
    assert_eq!(PageCopy::from_settings(&missing, dir.path()), PageCopy::default());
}

#[test]
fn non_object_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(load_settings(&path).is_err());
}
