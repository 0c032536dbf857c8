//! URL slugs and the per-run uniqueness registry.

use crate::ingest::norm;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashMap;

/// `"Best  Wool Socks!"` → `"best-wool-socks"`; empty results become `"page"`.
pub fn slugify(text: &str) -> String {
    static RE_NON_ALNUM: OnceCell<Regex> = OnceCell::new();
    let re = RE_NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug regex"));
    let slug = re.replace_all(&norm(text), "-").trim_matches('-').to_string();
    if slug.is_empty() {
        "page".to_string()
    } else {
        slug
    }
}

/// Occurrence counter per base slug. Owned by whoever drives page creation and
/// passed along explicitly; there is no shared instance.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashMap<String, u32>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First occurrence gets the bare slug, later ones `-2`, `-3`, ...
    pub fn assign(&mut self, keyword: &str) -> String {
        let base = slugify(keyword);
        let n = self.used.entry(base.clone()).or_insert(0);
        *n += 1;
        if *n == 1 {
            base
        } else {
            format!("{base}-{n}")
        }
    }

    /// Number of slugs handed out so far.
    pub fn len(&self) -> usize {
        self.used.values().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_symbols() {
        assert_eq!(slugify("  Best Wool Socks (2024)! "), "best-wool-socks-2024");
        assert_eq!(slugify("!!!"), "page");
        assert_eq!(slugify("Ünïcode"), "n-code");
    }

    #[test]
    fn collisions_get_increasing_suffixes() {
        let mut reg = SlugRegistry::new();
        assert_eq!(reg.assign("socks"), "socks");
        assert_eq!(reg.assign("Socks"), "socks-2");
        assert_eq!(reg.assign("SOCKS!"), "socks-3");
        assert_eq!(reg.assign("hats"), "hats");
        assert_eq!(reg.len(), 4);
    }
}
