//! Pure queries over a loaded attraction collection
//!
//! Every function takes the collection as loaded (name-sorted) and
//! preserves that order in its output unless it documents otherwise.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::collation::CollationKey;
use crate::models::{slugify, Attraction};

/// Aggregate counts over the whole catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_attractions: usize,
    pub total_categories: usize,
    pub total_tags: usize,
    pub free_attractions: usize,
    pub wheelchair_accessible: usize,
    pub ideal_for_cruise_passengers: usize,
}

/// Sort by display name using locale-aware collation (stable)
pub fn sort_by_name(attractions: &mut [Attraction]) {
    attractions.sort_by_cached_key(|a| CollationKey::new(&a.name));
}

/// Deduplicate labels and sort them lexicographically
pub fn unique_sorted<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn categories(attractions: &[Attraction]) -> Vec<String> {
    unique_sorted(
        attractions
            .iter()
            .flat_map(|a| a.categories.iter().map(String::as_str)),
    )
}

pub fn tags(attractions: &[Attraction]) -> Vec<String> {
    unique_sorted(attractions.iter().flat_map(|a| a.tags.iter().map(String::as_str)))
}

pub fn types(attractions: &[Attraction]) -> Vec<String> {
    unique_sorted(attractions.iter().map(|a| a.kind.as_str()))
}

/// Attractions listing `category` exactly (case-sensitive)
pub fn filter_by_category(attractions: Vec<Attraction>, category: &str) -> Vec<Attraction> {
    attractions
        .into_iter()
        .filter(|a| a.categories.iter().any(|c| c == category))
        .collect()
}

/// Attractions carrying `tag` exactly (case-sensitive)
pub fn filter_by_tag(attractions: Vec<Attraction>, tag: &str) -> Vec<Attraction> {
    attractions
        .into_iter()
        .filter(|a| a.tags.iter().any(|t| t == tag))
        .collect()
}

/// Attractions whose primary type is exactly `kind`
pub fn filter_by_type(attractions: Vec<Attraction>, kind: &str) -> Vec<Attraction> {
    attractions.into_iter().filter(|a| a.kind == kind).collect()
}

/// Check whether an attraction matches an already-lowercased query
///
/// Searched fields: name, short description, tagline, every tag and every
/// category.
pub fn matches_query(attraction: &Attraction, lowered_query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(lowered_query);

    contains(&attraction.name)
        || contains(&attraction.description.short)
        || contains(&attraction.tagline)
        || attraction.tags.iter().any(|t| contains(t))
        || attraction.categories.iter().any(|c| contains(c))
}

/// Case-insensitive substring search
///
/// An empty query matches nothing. Results keep collection order; there is
/// no relevance ranking.
pub fn search(attractions: Vec<Attraction>, query: &str) -> Vec<Attraction> {
    if query.is_empty() {
        return Vec::new();
    }

    let lowered = query.to_lowercase();
    attractions
        .into_iter()
        .filter(|a| matches_query(a, &lowered))
        .collect()
}

/// Top-rated attractions flagged as ideal for cruise passengers
///
/// Highest rating first; equal ratings keep collection (name) order.
pub fn featured(attractions: Vec<Attraction>, limit: usize) -> Vec<Attraction> {
    let mut ideal: Vec<Attraction> = attractions
        .into_iter()
        .filter(Attraction::is_ideal_for_cruise_passengers)
        .collect();

    ideal.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    ideal.truncate(limit);
    ideal
}

/// Resolve `target`'s name-based nearby references against the collection
///
/// Each referenced display name is slugified and matched against ids.
/// References that match nothing are dropped, and the target itself is
/// never returned.
pub fn nearby(target: &Attraction, attractions: Vec<Attraction>, limit: usize) -> Vec<Attraction> {
    let candidates: HashSet<String> = target
        .nearby_attractions
        .iter()
        .map(|n| slugify(&n.name))
        .collect();

    attractions
        .into_iter()
        .filter(|a| a.id != target.id && candidates.contains(&a.id))
        .take(limit)
        .collect()
}

pub fn stats(attractions: &[Attraction]) -> CatalogStats {
    CatalogStats {
        total_attractions: attractions.len(),
        total_categories: categories(attractions).len(),
        total_tags: tags(attractions).len(),
        free_attractions: attractions.iter().filter(|a| a.is_free()).count(),
        wheelchair_accessible: attractions
            .iter()
            .filter(|a| a.is_wheelchair_accessible())
            .count(),
        ideal_for_cruise_passengers: attractions
            .iter()
            .filter(|a| a.is_ideal_for_cruise_passengers())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::AttractionBuilder;

    fn ids(attractions: &[Attraction]) -> Vec<&str> {
        attractions.iter().map(|a| a.id.as_str()).collect()
    }

    fn sample() -> Vec<Attraction> {
        let mut all = vec![
            AttractionBuilder::new("gamma-tower", "Gamma Tower")
                .kind("monument")
                .categories(&["monument", "viewpoint"])
                .tags(&["river-views", "historic"])
                .rating(3.0)
                .build(),
            AttractionBuilder::new("alpha-museum", "Alpha Museum")
                .kind("museum")
                .categories(&["museum"])
                .tags(&["art", "indoor"])
                .tagline("Tiles through five centuries")
                .rating(4.5)
                .ideal_for_cruise_passengers(true)
                .free()
                .build(),
            AttractionBuilder::new("beta-park", "Beta Park")
                .kind("park")
                .categories(&["park", "viewpoint"])
                .tags(&["outdoor", "historic"])
                .short_description("Shady gardens above the OCEAN terminal")
                .rating(4.9)
                .ideal_for_cruise_passengers(true)
                .wheelchair_accessible(true)
                .build(),
        ];
        sort_by_name(&mut all);
        all
    }

    #[test]
    fn test_sort_by_name() {
        assert_eq!(ids(&sample()), vec!["alpha-museum", "beta-park", "gamma-tower"]);
    }

    #[test]
    fn test_label_listings_are_unique_and_sorted() {
        let all = sample();
        assert_eq!(categories(&all), vec!["monument", "museum", "park", "viewpoint"]);
        assert_eq!(tags(&all), vec!["art", "historic", "indoor", "outdoor", "river-views"]);
        assert_eq!(types(&all), vec!["monument", "museum", "park"]);
    }

    #[test]
    fn test_filters_are_exact() {
        assert_eq!(
            ids(&filter_by_category(sample(), "viewpoint")),
            vec!["beta-park", "gamma-tower"]
        );
        assert!(filter_by_category(sample(), "Viewpoint").is_empty());
        assert!(filter_by_category(sample(), "view").is_empty());

        assert_eq!(ids(&filter_by_tag(sample(), "historic")), vec!["beta-park", "gamma-tower"]);
        assert!(filter_by_tag(sample(), "river views").is_empty());

        assert_eq!(ids(&filter_by_type(sample(), "museum")), vec!["alpha-museum"]);
    }

    #[test]
    fn test_search_fields() {
        // name
        assert_eq!(ids(&search(sample(), "tower")), vec!["gamma-tower"]);
        // tagline
        assert_eq!(ids(&search(sample(), "centuries")), vec!["alpha-museum"]);
        // short description
        assert_eq!(ids(&search(sample(), "terminal")), vec!["beta-park"]);
        // tag and category
        assert_eq!(ids(&search(sample(), "river-")), vec!["gamma-tower"]);
        assert_eq!(ids(&search(sample(), "viewpoint")), vec!["beta-park", "gamma-tower"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        assert_eq!(search(sample(), "OCEAN"), search(sample(), "ocean"));
        assert_eq!(ids(&search(sample(), "OcEaN")), vec!["beta-park"]);
    }

    #[test]
    fn test_search_empty_query_matches_nothing() {
        assert!(search(sample(), "").is_empty());
    }

    #[test]
    fn test_featured() {
        assert_eq!(ids(&featured(sample(), 6)), vec!["beta-park", "alpha-museum"]);
        assert_eq!(ids(&featured(sample(), 1)), vec!["beta-park"]);
        assert!(featured(sample(), 0).is_empty());
    }

    #[test]
    fn test_featured_ties_keep_name_order() {
        let mut all = vec![
            AttractionBuilder::new("zeta", "Zeta")
                .rating(4.0)
                .ideal_for_cruise_passengers(true)
                .build(),
            AttractionBuilder::new("eta", "Eta")
                .rating(4.0)
                .ideal_for_cruise_passengers(true)
                .build(),
            AttractionBuilder::new("theta", "Theta")
                .rating(4.8)
                .ideal_for_cruise_passengers(true)
                .build(),
        ];
        sort_by_name(&mut all);
        assert_eq!(ids(&featured(all, 3)), vec!["theta", "eta", "zeta"]);
    }

    #[test]
    fn test_nearby() {
        let target = AttractionBuilder::new("belem-tower", "Belém Tower")
            .nearby(&["Jerónimos Monastery", "Belém Tower", "Padrao dos Descobrimentos", "Nowhere"])
            .build();
        let mut all = vec![
            target.clone(),
            AttractionBuilder::new("jer-nimos-monastery", "Jerónimos Monastery").build(),
            AttractionBuilder::new("padrao-dos-descobrimentos", "Padrão dos Descobrimentos").build(),
            AttractionBuilder::new("lx-factory", "LX Factory").build(),
        ];
        sort_by_name(&mut all);

        assert_eq!(
            ids(&nearby(&target, all.clone(), 4)),
            vec!["jer-nimos-monastery", "padrao-dos-descobrimentos"]
        );
        assert_eq!(ids(&nearby(&target, all, 1)), vec!["jer-nimos-monastery"]);
    }

    #[test]
    fn test_nearby_excludes_target_even_when_self_referenced() {
        let target = AttractionBuilder::new("alpha", "Alpha").nearby(&["Alpha"]).build();
        assert!(nearby(&target, vec![target.clone()], 4).is_empty());
    }

    #[test]
    fn test_stats() {
        let all = sample();
        let stats = stats(&all);
        assert_eq!(
            stats,
            CatalogStats {
                total_attractions: 3,
                total_categories: 4,
                total_tags: 5,
                free_attractions: 1,
                wheelchair_accessible: 1,
                ideal_for_cruise_passengers: 2,
            }
        );
    }
}
