// src/sitemap.rs
//! Sitemap plan and XML: one `<urlset>` when everything fits in a chunk,
//! otherwise numbered chunk files behind a `<sitemapindex>`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::site::absolute_url;
use crate::paginate::chunked;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const SITEMAP_FILE: &str = "sitemap.xml";

#[derive(Debug, Serialize)]
#[serde(rename = "urlset")]
struct UrlSet {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<Entry>,
}

#[derive(Debug, Serialize)]
#[serde(rename = "sitemapindex")]
struct SitemapIndex {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "sitemap")]
    sitemaps: Vec<Entry>,
}

#[derive(Debug, Serialize)]
struct Entry {
    loc: String,
    lastmod: String,
}

/// How page names are spread over sitemap files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapPlan {
    /// Everything in `sitemap.xml`.
    Single(Vec<String>),
    /// `sitemap-1.xml`, `sitemap-2.xml`, ... referenced from `sitemap.xml`.
    Chunked(Vec<Vec<String>>),
}

impl SitemapPlan {
    /// Dedupe and sort `pages`, then split when they exceed `chunk_size`
    /// (clamped to ≥ 1).
    pub fn new(pages: &[String], chunk_size: usize) -> Self {
        let mut unique: Vec<String> = pages.to_vec();
        unique.sort();
        unique.dedup();
        let chunk_size = chunk_size.max(1);
        if unique.len() <= chunk_size {
            SitemapPlan::Single(unique)
        } else {
            SitemapPlan::Chunked(chunked(&unique, chunk_size).map(<[String]>::to_vec).collect())
        }
    }

    pub fn chunk_file_names(&self) -> Vec<String> {
        match self {
            SitemapPlan::Single(_) => Vec::new(),
            SitemapPlan::Chunked(chunks) => (1..=chunks.len()).map(chunk_file_name).collect(),
        }
    }
}

pub fn chunk_file_name(n: usize) -> String {
    format!("sitemap-{n}.xml")
}

fn to_xml<T: Serialize>(value: &T) -> Result<String> {
    let mut body = String::new();
    let mut ser = quick_xml::se::Serializer::new(&mut body);
    ser.indent(' ', 2);
    value.serialize(ser).context("serialize sitemap xml")?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}\n"))
}

fn urlset_xml(pages: &[String], site_url: &str, lastmod: &str) -> Result<String> {
    to_xml(&UrlSet {
        xmlns: SITEMAP_NS,
        urls: pages
            .iter()
            .map(|p| Entry {
                loc: absolute_url(site_url, p),
                lastmod: lastmod.to_string(),
            })
            .collect(),
    })
}

/// Render the plan to `(file name, xml)` pairs; `sitemap.xml` comes last.
pub fn render_sitemaps(plan: &SitemapPlan, site_url: &str, lastmod: &str) -> Result<Vec<(String, String)>> {
    match plan {
        SitemapPlan::Single(pages) => Ok(vec![(
            SITEMAP_FILE.to_string(),
            urlset_xml(pages, site_url, lastmod)?,
        )]),
        SitemapPlan::Chunked(chunks) => {
            let mut files = Vec::with_capacity(chunks.len() + 1);
            for (i, chunk) in chunks.iter().enumerate() {
                files.push((chunk_file_name(i + 1), urlset_xml(chunk, site_url, lastmod)?));
            }
            let index = SitemapIndex {
                xmlns: SITEMAP_NS,
                sitemaps: plan
                    .chunk_file_names()
                    .iter()
                    .map(|name| Entry {
                        loc: absolute_url(site_url, name),
                        lastmod: lastmod.to_string(),
                    })
                    .collect(),
            };
            files.push((SITEMAP_FILE.to_string(), to_xml(&index)?));
            Ok(files)
        }
    }
}

/// Write every sitemap file for `pages` into `dir`. Returns the file names.
pub fn write_sitemaps(
    dir: &Path,
    pages: &[String],
    site_url: &str,
    chunk_size: usize,
    lastmod: &str,
) -> Result<Vec<String>> {
    let plan = SitemapPlan::new(pages, chunk_size);
    let files = render_sitemaps(&plan, site_url, lastmod)?;
    let mut names = Vec::with_capacity(files.len());
    for (name, xml) in files {
        let path = dir.join(&name);
        fs::write(&path, xml).with_context(|| format!("write {}", path.display()))?;
        names.push(name);
    }
    tracing::debug!(files = names.len(), "sitemaps written");
    Ok(names)
}
