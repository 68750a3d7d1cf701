//! Sitemap generation
//!
//! Enumerates every public page of the guide (static pages, one page per
//! attraction, category and tag) and renders the sitemaps.org XML document.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::catalog::{query, AttractionRepository, RepositoryResult};
use crate::config::SiteConfig;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// One `<url>` entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Ordered list of sitemap entries
#[derive(Debug, Clone, Default, Serialize)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
}

impl Sitemap {
    fn push(
        &mut self,
        loc: String,
        last_modified: DateTime<Utc>,
        change_frequency: ChangeFrequency,
        priority: f32,
    ) {
        self.entries.push(SitemapEntry {
            loc,
            last_modified,
            change_frequency,
            priority,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a sitemaps.org `urlset` document
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.change_frequency.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Build the sitemap from the current catalog contents
///
/// Static pages come first, then attractions in name order, then categories
/// and tags in label order. Every entry carries the same `lastmod`.
pub async fn build(repo: &dyn AttractionRepository, site: &SiteConfig) -> RepositoryResult<Sitemap> {
    let attractions = repo.load_all().await?;
    let now = Utc::now();

    let mut sitemap = Sitemap::default();
    sitemap.push(site.url("/"), now, ChangeFrequency::Daily, 1.0);
    sitemap.push(site.url("/attractions"), now, ChangeFrequency::Daily, 0.9);
    sitemap.push(site.url("/map"), now, ChangeFrequency::Monthly, 0.5);
    sitemap.push(site.url("/search"), now, ChangeFrequency::Monthly, 0.5);

    for attraction in &attractions {
        let loc = site.url(&format!("/attractions/{}", attraction.id));
        sitemap.push(loc, now, ChangeFrequency::Weekly, 0.8);
    }
    for category in query::categories(&attractions) {
        let loc = site.url(&format!("/categories/{}", category));
        sitemap.push(loc, now, ChangeFrequency::Weekly, 0.7);
    }
    for tag in query::tags(&attractions) {
        let loc = site.url(&format!("/tags/{}", tag));
        sitemap.push(loc, now, ChangeFrequency::Monthly, 0.6);
    }

    tracing::debug!(entries = sitemap.len(), "Sitemap built");
    Ok(sitemap)
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
