//! guidepress: binary entrypoint
//! Resolves config (file + flags), generates the site and optionally
//! notifies IndexNow. Progress goes to tracing; the final status lines go to
//! stdout.

mod args;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use guidepress::config::copy::PageCopy;
use guidepress::config::site::SiteConfig;
use guidepress::config::{load_settings, merge_settings, write_config_template, RunOptions, Settings};
use guidepress::engine::{self, indexnow_status};
use guidepress::notify::ReqwestTransport;

use crate::args::Args;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("guidepress=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<()> {
    // .env may carry GUIDEPRESS_CONFIG / RUST_LOG; missing file is fine.
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing();

    if let Some(path) = &args.write_config_template {
        write_config_template(path)?;
        println!("Config template written: {}", path.display());
        return Ok(());
    }

    let base = std::env::current_dir()?;
    let config_file: Option<PathBuf> = args
        .config_file
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| if p.is_absolute() { p.clone() } else { base.join(p) });
    let file_settings = match &config_file {
        Some(path) => load_settings(path)?,
        None => Settings::new(),
    };
    let settings = merge_settings(file_settings, args.overrides());

    let site = SiteConfig::from_settings(&settings);
    let opts = RunOptions::from_settings(&settings, &base);
    let transport = ReqwestTransport::new()?;
    let now = Utc::now();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if args.indexnow_submit_existing {
        let report = rt.block_on(engine::submit_existing(
            &opts.output,
            &site,
            now,
            config_file.as_deref(),
            &transport,
        ))?;
        // A submit-only run always reports, even without a key.
        let line = indexnow_status(&report.indexnow, true).unwrap_or_else(|| {
            format!(
                "IndexNow submit failed or partial. error={} status={}",
                report.indexnow.result.error.as_deref().unwrap_or_default(),
                report.indexnow.result.last_status_code
            )
        });
        println!("{line}");
        return Ok(());
    }

    let copy = PageCopy::from_settings(&settings, &base);
    let report = rt.block_on(engine::run(
        &opts,
        &site,
        &copy,
        now,
        config_file.as_deref(),
        &transport,
    ))?;
    if let Some(line) = indexnow_status(&report.indexnow, site.indexnow_submit) {
        println!("{line}");
    }
    println!(
        "Done. Generated {} article pages + {} site pages in {}",
        report.article_count,
        report.static_count,
        opts.output.display()
    );
    Ok(())
}
