//! SEO text for attraction, category and tag pages
//!
//! Every function here is pure: it reads one record (or one label and the
//! number of attractions carrying it) plus the [`SiteConfig`] and returns the
//! string or JSON-LD object a page embeds.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SiteConfig;
use crate::models::Attraction;

/// Tags included in the keyword list
const KEYWORD_TAGS: usize = 5;

/// Categories included in the keyword list
const KEYWORD_CATEGORIES: usize = 3;

/// Metadata bundle for one attraction page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub price_range: String,
    pub structured_data: Value,
}

impl AttractionMeta {
    pub fn new(attraction: &Attraction, site: &SiteConfig) -> Self {
        Self {
            title: attraction_title(attraction, site),
            description: attraction_description(attraction, site),
            keywords: keywords(attraction, site),
            price_range: format_price_range(&attraction.price_range, site),
            structured_data: structured_data(attraction, site),
        }
    }
}

/// Title and description for a label listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelMeta {
    pub title: String,
    pub description: String,
}

impl LabelMeta {
    pub fn category(category: &str, count: usize, site: &SiteConfig) -> Self {
        Self {
            title: category_title(category, count, site),
            description: category_description(category, count, site),
        }
    }

    pub fn tag(tag: &str, count: usize, site: &SiteConfig) -> Self {
        Self {
            title: tag_title(tag, count, site),
            description: tag_description(tag, count, site),
        }
    }
}

pub fn attraction_title(attraction: &Attraction, site: &SiteConfig) -> String {
    format!(
        "{} - Everything You Need to Know | {}",
        attraction.name, site.site_name
    )
}

/// Meta description built from opening hours, admission price and tagline
pub fn attraction_description(attraction: &Attraction, site: &SiteConfig) -> String {
    let hours = attraction.primary_hours().unwrap_or("Check hours");
    let adult = attraction.visiting_information.admission_prices.adult;
    let price = if attraction.is_free() {
        "Free entry".to_string()
    } else {
        format!("{}{}", site.currency_symbol, adult)
    };

    format!(
        "Planning to visit {}? Get {} hours, {} prices, photos & insider cruise passenger tips. {}",
        attraction.name, hours, price, attraction.tagline
    )
}

pub fn category_title(category: &str, count: usize, site: &SiteConfig) -> String {
    let name = humanize_label(category);
    format!(
        "Best {name} in {city} - Top {count} {name} for Cruise Passengers",
        name = name,
        city = site.city,
        count = count
    )
}

pub fn category_description(category: &str, count: usize, site: &SiteConfig) -> String {
    let name = spaced(category);
    format!(
        "Discover the best {name} in {city}. Compare {count} options with photos, reviews, prices, and directions from cruise port. Find your perfect {name} today!",
        name = name,
        city = site.city,
        count = count
    )
}

pub fn tag_title(tag: &str, count: usize, site: &SiteConfig) -> String {
    format!(
        "Top {} Attractions in {} - {} Options for Cruise Passengers",
        humanize_label(tag),
        site.city,
        count
    )
}

pub fn tag_description(tag: &str, count: usize, site: &SiteConfig) -> String {
    format!(
        "{} amazing {} attractions in {} perfect for cruise passengers. Explore with photos, reviews, directions from port, and visitor information.",
        count,
        spaced(tag),
        site.city
    )
}

/// Comma-separated keyword list for the attraction page
pub fn keywords(attraction: &Attraction, site: &SiteConfig) -> String {
    let mut words: Vec<&str> = vec![attraction.name.as_str()];
    words.extend(attraction.tags.iter().take(KEYWORD_TAGS).map(String::as_str));
    words.extend(
        attraction
            .categories
            .iter()
            .take(KEYWORD_CATEGORIES)
            .map(String::as_str),
    );
    words.extend([site.city.as_str(), "cruise port", "tourist attraction"]);
    words.join(", ")
}

/// Human form of a `$`-scale price tier
pub fn format_price_range(price_range: &str, site: &SiteConfig) -> String {
    let symbol = &site.currency_symbol;
    match price_range {
        "Free" => "Free".to_string(),
        "$" => format!("{}0-10", symbol),
        "$$" => format!("{}10-20", symbol),
        "$$$" => format!("{}20-30", symbol),
        "$$$$" => format!("{}30+", symbol),
        _ => "Varies".to_string(),
    }
}

/// schema.org `TouristAttraction` JSON-LD for the attraction page
pub fn structured_data(attraction: &Attraction, site: &SiteConfig) -> Value {
    let address = &attraction.location.address;
    let coordinates = attraction.location.coordinates;

    json!({
        "@context": "https://schema.org",
        "@type": "TouristAttraction",
        "name": attraction.name,
        "description": attraction.description.short,
        "image": attraction.images.hero_image.url,
        "address": {
            "@type": "PostalAddress",
            "streetAddress": address.street,
            "addressLocality": address.city,
            "addressRegion": address.region,
            "postalCode": address.postal_code,
            "addressCountry": site.country_code,
        },
        "geo": {
            "@type": "GeoCoordinates",
            "latitude": coordinates.latitude,
            "longitude": coordinates.longitude,
        },
        "telephone": attraction.contact.phone,
        "url": attraction.contact.website,
        "aggregateRating": {
            "@type": "AggregateRating",
            "ratingValue": attraction.rating,
            "reviewCount": attraction.review_count,
        },
        "priceRange": attraction.price_range,
    })
}

/// Turn a slug label into display text: `tram-28` becomes `Tram 28`
///
/// Hyphens become spaces and every word character that starts a word is
/// uppercased.
pub fn humanize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut at_boundary = true;

    for c in spaced(label).chars() {
        let word = is_word_char(c);
        if word && at_boundary {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !word;
    }

    out
}

fn spaced(label: &str) -> String {
    label.replace('-', " ")
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
