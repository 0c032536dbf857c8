// src/args.rs
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use guidepress::config::{Settings, ENV_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(name = "guidepress")]
#[command(about = "Generate a static comparison-guide site from a product CSV")]
#[command(version)]
pub struct Args {
    /// Site config (JSON or TOML)
    #[arg(long, env = ENV_CONFIG_PATH)]
    pub config_file: Option<PathBuf>,

    /// Write an example config to this path and exit
    #[arg(long)]
    pub write_config_template: Option<PathBuf>,

    /// Product CSV
    #[arg(long)]
    pub input: Option<String>,

    /// Output directory
    #[arg(long)]
    pub output: Option<String>,

    /// Products per article
    #[arg(long)]
    pub top_n: Option<i64>,

    /// Comma separated keyword list
    #[arg(long)]
    pub keywords: Option<String>,

    /// Affiliate tag appended to product links
    #[arg(long)]
    pub tag: Option<String>,

    /// Deterministic seed; defaults to the run timestamp
    #[arg(long)]
    pub seed: Option<String>,

    #[arg(long)]
    pub site_name: Option<String>,

    /// Final deployed site URL
    #[arg(long)]
    pub site_url: Option<String>,

    #[arg(long)]
    pub author_name: Option<String>,

    #[arg(long)]
    pub author_role: Option<String>,

    #[arg(long)]
    pub author_bio: Option<String>,

    /// Shown on the contact and legal pages
    #[arg(long)]
    pub contact_email: Option<String>,

    /// Legacy external page copy JSON; prefer `page_copy` in the config
    #[arg(long)]
    pub page_content_file: Option<String>,

    /// Cards on the homepage
    #[arg(long)]
    pub home_cards_limit: Option<i64>,

    /// Guides per listing page
    #[arg(long)]
    pub guides_page_size: Option<i64>,

    /// Related links per article
    #[arg(long)]
    pub related_links_count: Option<i64>,

    /// URLs per sitemap file before splitting
    #[arg(long)]
    pub sitemap_chunk_size: Option<i64>,

    #[arg(long)]
    pub indexnow_key: Option<String>,

    /// Public URL or path of the key file
    #[arg(long)]
    pub indexnow_key_location: Option<String>,

    #[arg(long)]
    pub indexnow_endpoint: Option<String>,

    /// Submit URLs after generation (true/false)
    #[arg(long)]
    pub indexnow_submit: Option<String>,

    /// URLs per IndexNow POST
    #[arg(long)]
    pub indexnow_batch_size: Option<i64>,

    /// Submit the existing URL manifest without regenerating pages
    #[arg(long)]
    pub indexnow_submit_existing: bool,
}

impl Args {
    /// Flags given on the command line, as settings that override the config.
    pub fn overrides(&self) -> Settings {
        let mut s = Settings::new();
        let mut text = |key: &str, v: &Option<String>| {
            if let Some(v) = v {
                s.insert(key.into(), Value::String(v.clone()));
            }
        };
        text("input", &self.input);
        text("output", &self.output);
        text("keywords", &self.keywords);
        text("tag", &self.tag);
        text("seed", &self.seed);
        text("site_name", &self.site_name);
        text("site_url", &self.site_url);
        text("author_name", &self.author_name);
        text("author_role", &self.author_role);
        text("author_bio", &self.author_bio);
        text("contact_email", &self.contact_email);
        text("page_content_file", &self.page_content_file);
        text("indexnow_key", &self.indexnow_key);
        text("indexnow_key_location", &self.indexnow_key_location);
        text("indexnow_endpoint", &self.indexnow_endpoint);
        text("indexnow_submit", &self.indexnow_submit);

        for (key, v) in [
            ("top_n", self.top_n),
            ("home_cards_limit", self.home_cards_limit),
            ("guides_page_size", self.guides_page_size),
            ("related_links_count", self.related_links_count),
            ("sitemap_chunk_size", self.sitemap_chunk_size),
            ("indexnow_batch_size", self.indexnow_batch_size),
        ] {
            if let Some(n) = v {
                s.insert(key.into(), n.into());
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[serial]
    #[test]
    fn config_path_falls_back_to_env() {
        std::env::set_var(ENV_CONFIG_PATH, "from-env.toml");
        let args = Args::try_parse_from(["guidepress"]).unwrap();
        assert_eq!(args.config_file, Some(PathBuf::from("from-env.toml")));

        let args = Args::try_parse_from(["guidepress", "--config-file", "cli.json"]).unwrap();
        assert_eq!(args.config_file, Some(PathBuf::from("cli.json")));
        std::env::remove_var(ENV_CONFIG_PATH);
    }

    #[serial]
    #[test]
    fn only_given_flags_override() {
        std::env::remove_var(ENV_CONFIG_PATH);
        let args = Args::try_parse_from([
            "guidepress",
            "--site-url",
            "socks.test",
            "--top-n",
            "7",
            "--indexnow-submit",
            "yes",
        ])
        .unwrap();
        let o = args.overrides();
        assert_eq!(o.len(), 3);
        assert_eq!(o["site_url"], "socks.test");
        assert_eq!(o["top_n"], 7);
        assert_eq!(o["indexnow_submit"], "yes");
        assert!(!args.indexnow_submit_existing);
    }
}
