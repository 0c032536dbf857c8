// src/render/assets.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const ASSETS_DIR: &str = "assets";

pub const SITE_CSS: &str = r#":root{--ink:#14213d;--muted:#5c677d;--line:#dde3ec;--bg:#f6f8fb;--card:#fff;--brand:#0b7a75;--brand-dark:#07524f;--accent:#f4a259;--radius:14px}
*{box-sizing:border-box}
body{margin:0;font-family:"Inter","Segoe UI",system-ui,sans-serif;color:var(--ink);background:var(--bg);line-height:1.6}
a{color:var(--brand)}
img{max-width:100%;display:block}
.site-header{background:#fff;border-bottom:1px solid var(--line);position:sticky;top:0;z-index:10}
.site-header-inner,.site-footer-inner{max-width:1180px;margin:0 auto;padding:14px 20px;display:flex;gap:18px;align-items:center;justify-content:space-between;flex-wrap:wrap}
.logo{display:flex;gap:10px;align-items:center;font-weight:800;color:var(--ink);text-decoration:none}
.logo-mark{width:26px;height:26px;border-radius:8px;background:linear-gradient(135deg,var(--brand),var(--accent))}
.site-nav{display:flex;gap:6px;align-items:center;flex-wrap:wrap}
.nav-link{padding:6px 12px;border-radius:999px;text-decoration:none;color:var(--muted);font-weight:600}
.nav-link.active,.nav-link:hover{background:var(--bg);color:var(--ink)}
.nav-cta,.button,.top-pick-btn,.review-cta{display:inline-block;padding:9px 16px;border-radius:10px;background:var(--brand);color:#fff;text-decoration:none;font-weight:700;border:0}
.nav-cta:hover,.button:hover,.top-pick-btn:hover,.review-cta:hover{background:var(--brand-dark)}
.button.secondary{background:#fff;color:var(--brand);border:1px solid var(--brand)}
.button.disabled{opacity:.45;pointer-events:none}
.page-wrap{max-width:1180px;margin:0 auto;padding:24px 20px 48px}
.content-card,.hero-card,.article-card,.disclosure-card,.author-card{background:var(--card);border:1px solid var(--line);border-radius:var(--radius);padding:24px;margin-bottom:22px}
.disclosure-card{background:#fff8ec;border-color:#f3d9b1;font-size:.95rem}
.author-card .author-name{font-weight:700}
.author-role,.micro-note,.meta-line,.breadcrumb{color:var(--muted);font-size:.9rem}
.breadcrumb a{color:var(--muted)}
.hero-grid{display:grid;grid-template-columns:1.4fr 1fr;gap:24px}
.hero-kicker,.ops-heading{text-transform:uppercase;letter-spacing:.08em;font-size:.78rem;font-weight:700;color:var(--brand)}
.hero-actions{display:flex;gap:10px;flex-wrap:wrap;margin:14px 0}
.hero-stats{display:flex;gap:14px;flex-wrap:wrap}
.hero-stat{background:var(--bg);border-radius:10px;padding:10px 14px}
.hero-stat strong{display:block;font-size:1.15rem}
.hero-stat span{color:var(--muted);font-size:.85rem}
.hero-preview{background:var(--bg);border-radius:var(--radius);padding:16px}
.hero-mini-row{display:flex;justify-content:space-between;gap:8px;padding:8px 0;border-bottom:1px dashed var(--line)}
.hero-search-wrap{margin-top:18px}
.search-input{width:100%;padding:12px 14px;border:1px solid var(--line);border-radius:10px;font-size:1rem}
.article-grid,.related-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:16px}
.article-link-card,.related-card,.related-item{display:block;border:1px solid var(--line);border-radius:var(--radius);overflow:hidden;background:#fff;color:var(--ink);text-decoration:none;transition:transform .15s}
.article-link-card:hover,.related-card:hover{transform:translateY(-2px)}
.article-card-content{padding:14px}
.article-card-content h3{margin:0 0 6px;font-size:1.05rem}
.card-cta{font-weight:700;color:var(--brand)}
.category-nav-grid,.final-link-grid{display:flex;flex-wrap:wrap;gap:10px}
.category-nav-item,.final-link-grid a{padding:8px 14px;border:1px solid var(--line);border-radius:999px;text-decoration:none;background:#fff}
.final-contact{margin-top:14px;color:var(--muted)}
.pager{display:flex;gap:12px;align-items:center;justify-content:space-between;margin:16px 0}
.pager-status{color:var(--muted);font-weight:600}
.table-scroll{overflow-x:auto}
.compare-table{width:100%;border-collapse:collapse;font-size:.95rem}
.compare-table th,.compare-table td{padding:10px;border-bottom:1px solid var(--line);text-align:left;vertical-align:top}
.compare-table th{background:var(--bg)}
.col-rank{width:56px;font-weight:800}
.col-action{white-space:nowrap}
.review-block{border-top:1px solid var(--line);padding-top:20px;margin-top:20px}
.review-media img{max-height:260px;object-fit:contain;margin:0 auto}
.review-summary{font-size:1.02rem}
.spec-box{background:var(--bg);border-radius:10px;padding:12px 16px;margin:12px 0}
.amz-pros-cons-grid{display:grid;grid-template-columns:1fr 1fr;gap:14px;margin:12px 0}
.amz-pros-cons-col{border-radius:10px;padding:12px 16px}
.amz-pros-cons-col.pros{background:#ecf8f1}
.amz-pros-cons-col.cons{background:#fdf0f0}
.amz-dual-btn-container,.affiliate-container{display:flex;gap:10px;flex-wrap:wrap;margin:12px 0}
.guide-factor{margin-bottom:10px}
.mistakes li{margin-bottom:6px}
.top-pick-card{display:flex;gap:16px;align-items:center;border:2px solid var(--accent);border-radius:var(--radius);padding:16px;text-decoration:none;color:var(--ink)}
.top-pick-name{font-weight:800;font-size:1.1rem}
.feature-collage{position:relative;display:grid;gap:4px;margin:0;overflow:hidden;background:#e9eef5}
.feature-collage-article{border-radius:var(--radius);height:340px;margin-bottom:18px}
.feature-collage-card{height:170px}
.feature-collage .tile{width:100%;height:100%;object-fit:cover}
.feature-collage.layout-a{grid-template-columns:2fr 1fr;grid-template-rows:1fr 1fr 1fr}
.feature-collage.layout-a .tile-1{grid-row:1/4}
.feature-collage.layout-b{grid-template-columns:1fr 1fr;grid-template-rows:1fr 1fr}
.feature-collage.layout-c{grid-template-columns:1fr 1fr 1fr;grid-template-rows:2fr 1fr}
.feature-collage.layout-c .tile-1{grid-column:1/4}
.feature-collage.layout-d{grid-template-columns:1fr 2fr 1fr;grid-template-rows:1fr 1fr}
.feature-collage.layout-d .tile-2{grid-row:1/3}
.feature-collage.layout-c .tile-4,.feature-collage.layout-d .tile-4{display:none}
.feature-collage-overlay{position:absolute;inset:0;pointer-events:none}
.overlay-a{background:linear-gradient(180deg,transparent 40%,rgba(20,33,61,.78))}
.overlay-b{background:linear-gradient(0deg,rgba(11,122,117,.75),transparent 55%)}
.overlay-c{background:radial-gradient(circle at 30% 20%,transparent 30%,rgba(0,0,0,.65))}
.overlay-d{background:linear-gradient(90deg,rgba(244,162,89,.7),transparent 60%)}
.feature-collage-title{position:absolute;left:16px;right:16px;bottom:12px;color:#fff;font-weight:800;font-size:1.4rem;line-height:1.2;text-shadow:0 2px 8px rgba(0,0,0,.35)}
.feature-collage-card .feature-collage-title{font-size:1rem}
.font-a{font-family:Georgia,"Times New Roman",serif}
.font-b{font-family:"Trebuchet MS",sans-serif;text-transform:uppercase;letter-spacing:.04em}
.font-c{font-family:"Inter","Segoe UI",sans-serif;font-style:italic}
.font-d{font-family:"Courier New",monospace}
.legal-page h1{margin-top:0}
.site-footer{background:var(--ink);color:#cfd6e4;margin-top:40px}
.site-footer a{color:#fff;display:block;text-decoration:none;margin:4px 0}
.site-footer-inner{flex-direction:column;align-items:flex-start}
.footer-columns{display:grid;grid-template-columns:repeat(4,minmax(140px,1fr));gap:20px;width:100%}
.footer-col h4{margin:0 0 6px;color:#fff}
@media (max-width:760px){.hero-grid,.amz-pros-cons-grid{grid-template-columns:1fr}.footer-columns{grid-template-columns:1fr 1fr}.feature-collage-article{height:240px}}
"#;

pub const SITE_LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512" viewBox="0 0 512 512">
<defs><linearGradient id="g" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="#0b7a75"/><stop offset="1" stop-color="#f4a259"/></linearGradient></defs>
<rect width="512" height="512" rx="96" fill="url(#g)"/>
<path d="M150 270l70 70 142-170" fill="none" stroke="#fff" stroke-width="44" stroke-linecap="round" stroke-linejoin="round"/>
</svg>
"##;

/// Write the stylesheet and logo under `<out>/assets/`.
pub fn write_assets(out: &Path) -> Result<Vec<PathBuf>> {
    let dir = out.join(ASSETS_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut written = Vec::with_capacity(2);
    for (name, body) in [("site.css", SITE_CSS), ("site-logo.svg", SITE_LOGO_SVG)] {
        let path = dir.join(name);
        fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variation::{PLACEHOLDER_IMAGE, STYLE_PALETTE};

    #[test]
    fn stylesheet_covers_every_collage_variant() {
        for v in STYLE_PALETTE {
            for class in [v.layout, v.overlay, v.font] {
                assert!(SITE_CSS.contains(&format!(".{class}")), "missing {class}");
            }
        }
    }

    #[test]
    fn assets_land_where_pages_point() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_assets(dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join(PLACEHOLDER_IMAGE).exists());
        assert!(dir.path().join("assets/site.css").exists());
    }
}
