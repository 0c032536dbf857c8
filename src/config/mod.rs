// src/config/mod.rs
//! Loose settings: a JSON or TOML object merged with CLI overrides, read
//! leniently into typed configs with defaults and clamps.

pub mod copy;
pub mod site;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::clean_text_artifacts;

/// Raw settings object, keyed by snake_case setting name.
pub type Settings = Map<String, Value>;

pub const ENV_CONFIG_PATH: &str = "GUIDEPRESS_CONFIG";

pub const DEFAULT_INPUT: &str = "productdata.csv";
pub const DEFAULT_OUTPUT: &str = "generated_html_pages";
pub const DEFAULT_TOP_N: i64 = 10;

/// Load a settings object from `path`. `.toml` files are parsed as TOML,
/// everything else as JSON with a TOML fallback.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_settings(&content, &ext).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_settings(s: &str, hint_ext: &str) -> Result<Settings> {
    let value: Value = if hint_ext == "toml" {
        toml::from_str(s)?
    } else {
        match serde_json::from_str(s) {
            Ok(v) => v,
            Err(json_err) => toml::from_str(s).map_err(|_| anyhow!(json_err))?,
        }
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("config must be an object"),
    }
}

/// Overlay `overrides` onto `base`. Nulls and blank strings never override.
pub fn merge_settings(mut base: Settings, overrides: Settings) -> Settings {
    for (key, value) in overrides {
        match &value {
            Value::Null => continue,
            Value::String(s) if s.trim().is_empty() => continue,
            _ => {
                base.insert(key, value);
            }
        }
    }
    base
}

/// Integer from a number or numeric string (`"4.0"` → 4); anything else
/// yields `default`.
pub fn parse_int_like(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(default),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .unwrap_or(default),
        _ => default,
    }
}

/// Booleans plus the usual yes/no spellings; unknown values yield `default`.
pub fn parse_bool_like(value: Option<&Value>, default: bool) -> bool {
    let text = match value {
        Some(Value::Bool(b)) => return *b,
        Some(Value::String(s)) => s.trim().to_lowercase(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return default,
    };
    match text.as_str() {
        "1" | "true" | "yes" | "y" | "on" => true,
        "0" | "false" | "no" | "n" | "off" => false,
        _ => default,
    }
}

/// Trimmed text of a string or number value, or `fallback` when absent/blank.
pub fn text_or(value: Option<&Value>, fallback: &str) -> String {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

fn clamp_at_least(value: i64, min: i64) -> usize {
    value.max(min) as usize
}

/// Generation inputs that are not part of the site identity.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub top_n: usize,
    pub keywords: Vec<String>,
    pub tag: String,
    pub seed: Option<String>,
}

impl RunOptions {
    /// Relative input/output paths are resolved against `base`.
    pub fn from_settings(settings: &Settings, base: &Path) -> Self {
        let resolve = |key: &str, fallback: &str| {
            let p = PathBuf::from(text_or(settings.get(key), fallback));
            if p.is_absolute() {
                p
            } else {
                base.join(p)
            }
        };
        let seed = text_or(settings.get("seed"), "");
        Self {
            input: resolve("input", DEFAULT_INPUT),
            output: resolve("output", DEFAULT_OUTPUT),
            top_n: clamp_at_least(parse_int_like(settings.get("top_n"), DEFAULT_TOP_N), 3),
            keywords: keyword_list(settings.get("keywords")),
            tag: text_or(settings.get("tag"), ""),
            seed: (!seed.is_empty()).then_some(seed),
        }
    }
}

/// Keyword allow-list from a JSON array or a comma separated string.
pub fn keyword_list(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().map(|v| text_or(Some(v), "")).collect(),
        other => text_or(other, "").split(',').map(str::to_string).collect(),
    };
    raw.into_iter()
        .filter(|k| !k.trim().is_empty())
        .map(|k| clean_text_artifacts(&k))
        .collect()
}

/// Write an example config with every setting at its default.
pub fn write_config_template(path: &Path) -> Result<()> {
    let mut template = Settings::new();
    template.insert("input".into(), DEFAULT_INPUT.into());
    template.insert("output".into(), DEFAULT_OUTPUT.into());
    template.insert("top_n".into(), DEFAULT_TOP_N.into());
    template.insert("keywords".into(), Value::Array(Vec::new()));
    template.insert("tag".into(), "yourtag-20".into());
    template.insert("seed".into(), "".into());
    let site = serde_json::to_value(site::SiteConfig::default())?;
    if let Value::Object(fields) = site {
        template.extend(fields);
    }
    template.insert(
        "page_copy".into(),
        serde_json::to_value(copy::PageCopy::default().entries())?,
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_string_pretty(&Value::Object(template))?)
        .with_context(|| format!("writing config template {}", path.display()))?;
    Ok(())
}
