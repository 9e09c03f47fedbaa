#![forbid(unsafe_code)]
//! URL enumeration and priority assignment for the site's sitemap.
//!
//! Priorities come from an ordered rule table matched against the path
//! string; the first matching rule wins.

use patchline_model::ContentStore;
use regex::Regex;
use std::sync::OnceLock;

/// The headquarters city page outranks other city pages.
pub const HEADQUARTERS_PATH: &str = "/locations/maryland/frederick";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMeta {
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

pub const DEFAULT_META: PageMeta = PageMeta {
    priority: 0.7,
    changefreq: ChangeFreq::Weekly,
};

enum Matcher {
    Exact(&'static str),
    Pattern(Regex),
}

struct Rule {
    matcher: Matcher,
    meta: PageMeta,
}

fn rule(matcher: Matcher, priority: f32, changefreq: ChangeFreq) -> Rule {
    Rule {
        matcher,
        meta: PageMeta {
            priority,
            changefreq,
        },
    }
}

fn pattern(re: &str) -> Matcher {
    Matcher::Pattern(Regex::new(re).expect("sitemap rule pattern"))
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(Matcher::Exact("/"), 1.0, ChangeFreq::Daily),
            rule(Matcher::Exact("/services"), 0.95, ChangeFreq::Weekly),
            rule(Matcher::Exact("/locations"), 0.9, ChangeFreq::Weekly),
            rule(Matcher::Exact("/blog"), 0.8, ChangeFreq::Weekly),
            rule(Matcher::Exact(HEADQUARTERS_PATH), 0.85, ChangeFreq::Weekly),
            rule(pattern(r"^/services/[a-z0-9-]+$"), 0.9, ChangeFreq::Weekly),
            rule(pattern(r"^/locations/[a-z0-9-]+$"), 0.85, ChangeFreq::Weekly),
            rule(
                pattern(r"^/locations/[a-z0-9-]+/[a-z0-9-]+$"),
                0.8,
                ChangeFreq::Monthly,
            ),
            rule(pattern(r"^/blog/.+"), 0.6, ChangeFreq::Monthly),
        ]
    })
}

/// First matching rule wins; unmatched paths get 0.7/weekly.
#[must_use]
pub fn classify_path(path: &str) -> PageMeta {
    for rule in rules() {
        let hit = match &rule.matcher {
            Matcher::Exact(exact) => *exact == path,
            Matcher::Pattern(re) => re.is_match(path),
        };
        if hit {
            return rule.meta;
        }
    }
    DEFAULT_META
}

/// Every page the site serves, in stable order: fixed pages first, then
/// services, locations, and posts as enumerated from the content tables.
#[must_use]
pub fn site_paths(store: &ContentStore) -> Vec<String> {
    let mut paths = vec![
        "/".to_string(),
        "/services".to_string(),
        "/locations".to_string(),
        "/blog".to_string(),
        "/contact".to_string(),
        "/quote".to_string(),
    ];
    for service in store.services() {
        paths.push(format!("/services/{}", service.slug));
    }
    for state in store.states() {
        paths.push(format!("/locations/{}", state.slug));
        for city in &state.cities {
            paths.push(format!("/locations/{}/{}", state.slug, city));
        }
    }
    for post in store.posts() {
        paths.push(format!("/blog/{}", post.slug));
    }
    paths
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[must_use]
pub fn render_xml(base_url: &str, paths: &[String]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut out = String::with_capacity(paths.len() * 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for path in paths {
        let meta = classify_path(path);
        out.push_str("  <url>\n");
        out.push_str(&format!(
            "    <loc>{}{}</loc>\n",
            xml_escape(base),
            xml_escape(path)
        ));
        out.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            meta.changefreq.as_str()
        ));
        out.push_str(&format!("    <priority>{:.2}</priority>\n", meta.priority));
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}
