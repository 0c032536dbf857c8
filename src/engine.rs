// src/engine.rs
//! # Generation Engine
//! Drives one run: CSV → grouped builds → variation → relatedness → pages,
//! sitemaps and side files, then the optional IndexNow submission.
//!
//! Page assembly is synchronous; the only awaited work is the notification
//! transport. Everything time-dependent reads the injected `now`, so the same
//! seed and timestamp reproduce the output byte for byte.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{debug, info};

use crate::config::copy::PageCopy;
use crate::config::site::SiteConfig;
use crate::config::RunOptions;
use crate::group::{build_pages, group_by_keyword, PageBuild};
use crate::ingest::load_products;
use crate::notify::indexnow::{read_url_manifest, write_key_file, write_url_manifest};
use crate::notify::{submit_urls, IndexTransport, NotificationResult, MANIFEST_FILE};
use crate::paginate::plan_listing;
use crate::related::{build_related_map, related_for};
use crate::render::article::render_article;
use crate::render::assets::write_assets;
use crate::render::home::render_home;
use crate::render::listing::render_listing;
use crate::render::pages::static_pages;
use crate::render::SiteContext;
use crate::report::{
    display_path, timestamp, write_report, GenerationReport, IndexNowReport, SubmitReport,
};
use crate::sitemap::write_sitemaps;
use crate::slug::SlugRegistry;
use crate::telemetry::{ensure_metrics_described, PAGES_GENERATED};
use crate::variation::body::article_copy;
use crate::variation::{body_rng, prepare_all};

/// Pages from older layouts that a fresh run removes.
pub const DEPRECATED_PAGES: [&str; 1] = ["blog.html"];

const CLOUDFLARE_HEADERS: &str = "/*
  X-Content-Type-Options: nosniff
  Referrer-Policy: strict-origin-when-cross-origin
  X-Frame-Options: SAMEORIGIN

/assets/*
  Cache-Control: public, max-age=31536000, immutable
";

const CLOUDFLARE_REDIRECTS: &str = "/index.html / 301
/:slug.html /:slug 301
/home / 301
/all-guides/ /all-guides.html 301
/privacy /privacy-policy.html 301
/terms /terms-of-use.html 301
";

/// Files written by [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub run_seed: String,
    pub article_files: Vec<String>,
    /// Home, listing and trust/legal pages.
    pub static_files: Vec<String>,
    pub sitemap_files: Vec<String>,
    /// Absolute public URL of every page, sorted and unique.
    pub public_urls: Vec<String>,
    pub key_file: Option<PathBuf>,
    pub manifest_file: PathBuf,
}

/// Seed used when none is configured: the run time to the second.
pub fn default_run_seed(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

fn write_page(dir: &Path, name: &str, html: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
    counter!(PAGES_GENERATED).increment(1);
    Ok(())
}

fn write_text(dir: &Path, name: &str, body: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, body).with_context(|| format!("writing {}", path.display()))
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn robots_txt(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nSitemap: {}\n",
        site.absolute_url("sitemap.xml")
    )
}

/// Build every page and side file for `opts` into `opts.output`.
///
/// Fails when the CSV is missing, has no usable rows, or no keyword has
/// enough distinct products. Notification is left to [`run`].
pub fn generate(
    opts: &RunOptions,
    site: &SiteConfig,
    copy: &PageCopy,
    now: DateTime<Utc>,
) -> Result<Generation> {
    ensure_metrics_described();

    if !opts.input.exists() {
        bail!("input CSV not found: {}", opts.input.display());
    }
    let records = load_products(&opts.input)?;
    if records.is_empty() {
        bail!("no valid rows found in {}", opts.input.display());
    }
    let grouped = group_by_keyword(records);

    let mut registry = SlugRegistry::new();
    let mut builds = build_pages(&grouped, opts.top_n, &opts.keywords, &mut registry);
    if builds.is_empty() {
        bail!("no keyword group qualified; check the CSV and keyword filter");
    }
    info!(
        keywords = grouped.len(),
        pages = builds.len(),
        "keyword groups selected"
    );

    let out = opts.output.as_path();
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    write_assets(out)?;

    let run_seed = opts.seed.clone().unwrap_or_else(|| default_run_seed(now));
    prepare_all(&mut builds, &run_seed);
    let related_map = build_related_map(&builds, site.related_links_count);
    let by_slug: HashMap<&str, &PageBuild> = builds.iter().map(|b| (b.slug.as_str(), b)).collect();

    let ctx = SiteContext::new(site, copy, now);
    let mut article_files = Vec::with_capacity(builds.len());
    for build in &builds {
        let mut rng = body_rng(&run_seed, &build.keyword);
        let text = article_copy(build, ctx.year(), &mut rng);
        let related = related_for(&build.slug, &related_map, &by_slug);
        let html = render_article(&ctx, build, &text, &opts.tag, &related);
        let name = build.file_name();
        write_page(out, &name, &html)?;
        debug!(keyword = %build.keyword, file = %name, "article written");
        article_files.push(name);
    }

    let mut static_files = Vec::new();
    write_page(out, "index.html", &render_home(&ctx, &builds))?;
    static_files.push("index.html".to_string());
    for page in plan_listing(&builds, site.guides_page_size) {
        write_page(out, &page.file_name, &render_listing(&ctx, &page))?;
        static_files.push(page.file_name.clone());
    }
    for (name, html) in static_pages(&ctx) {
        write_page(out, &name, &html)?;
        static_files.push(name);
    }

    for name in DEPRECATED_PAGES {
        let stale = out.join(name);
        if stale.exists() {
            fs::remove_file(&stale).with_context(|| format!("removing {}", stale.display()))?;
            debug!(file = name, "stale page removed");
        }
    }

    let all_pages: Vec<String> = article_files.iter().chain(&static_files).cloned().collect();
    let sitemap_files = write_sitemaps(
        out,
        &all_pages,
        &site.site_url,
        site.sitemap_chunk_size,
        &now.format("%Y-%m-%d").to_string(),
    )?;
    write_text(out, "robots.txt", &robots_txt(site))?;
    write_text(out, "_headers", CLOUDFLARE_HEADERS)?;
    write_text(out, "_redirects", CLOUDFLARE_REDIRECTS)?;

    let public_urls: Vec<String> = all_pages
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|name| site.absolute_url(name))
        .collect();
    let key_file = write_key_file(out, &site.indexnow_key)?;
    let manifest_file = write_url_manifest(out, &public_urls)?;

    info!(
        articles = article_files.len(),
        static_pages = static_files.len(),
        sitemaps = sitemap_files.len(),
        output = %out.display(),
        "site generated"
    );
    Ok(Generation {
        run_seed,
        article_files,
        static_files,
        sitemap_files,
        public_urls,
        key_file,
        manifest_file,
    })
}

/// Generate, submit when enabled and a key is set, then write the report.
pub async fn run(
    opts: &RunOptions,
    site: &SiteConfig,
    copy: &PageCopy,
    now: DateTime<Utc>,
    config_file: Option<&Path>,
    transport: &dyn IndexTransport,
) -> Result<GenerationReport> {
    let generation = generate(opts, site, copy, now)?;

    let has_key = !site.indexnow_key.trim().is_empty();
    let result = if site.indexnow_submit && has_key {
        submit_urls(site, &generation.public_urls, transport).await
    } else {
        NotificationResult {
            enabled: has_key,
            ..NotificationResult::default()
        }
    };

    let report = GenerationReport {
        generated_at: timestamp(now),
        input_csv: opts.input.display().to_string(),
        output_dir: opts.output.display().to_string(),
        article_count: generation.article_files.len(),
        static_count: generation.static_files.len(),
        count_total: generation.article_files.len() + generation.static_files.len(),
        site_url: site.site_url.clone(),
        config_file: display_path(config_file),
        indexnow: IndexNowReport::new(
            result,
            generation.public_urls.len(),
            generation.key_file.as_deref(),
            &generation.manifest_file,
        ),
        article_files: generation.article_files,
        static_files: generation.static_files,
    };
    write_report(&opts.output, &report)?;
    Ok(report)
}

/// Re-submit the manifest of an earlier run in `output` without regenerating.
pub async fn submit_existing(
    output: &Path,
    site: &SiteConfig,
    now: DateTime<Utc>,
    config_file: Option<&Path>,
    transport: &dyn IndexTransport,
) -> Result<SubmitReport> {
    let urls = read_url_manifest(output)?;
    if urls.is_empty() {
        bail!(
            "IndexNow URL manifest not found or empty: {}",
            output.join(MANIFEST_FILE).display()
        );
    }
    let key_file = write_key_file(output, &site.indexnow_key)?;
    let result = submit_urls(site, &urls, transport).await;

    let report = SubmitReport {
        generated_at: timestamp(now),
        output_dir: output.display().to_string(),
        site_url: site.site_url.clone(),
        config_file: display_path(config_file),
        indexnow: IndexNowReport::new(
            result,
            urls.len(),
            key_file.as_deref(),
            &output.join(MANIFEST_FILE),
        ),
    };
    write_report(output, &report)?;
    Ok(report)
}

/// Terminal line describing the notification outcome, if there is one to
/// show. `submit_requested` mirrors the `indexnow_submit` setting.
pub fn indexnow_status(report: &IndexNowReport, submit_requested: bool) -> Option<String> {
    let r = &report.result;
    if r.submitted {
        return Some(format!("IndexNow submitted: {} URLs", r.submitted_url_count));
    }
    if !r.enabled {
        return None;
    }
    if submit_requested {
        Some(format!(
            "IndexNow submit failed or partial. error={} status={}",
            r.error.as_deref().unwrap_or_default(),
            r.last_status_code
        ))
    } else {
        Some("IndexNow ready: key file + URL manifest generated (submit disabled in config).".into())
    }
}
