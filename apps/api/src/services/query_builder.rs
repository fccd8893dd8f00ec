//! Turns a resolved mood into the list of search queries to fan out

use crate::services::mood_table::ResolvedMood;
use serde::Serialize;

const GENRE_TERM_WEIGHT: f32 = 2.0;
const CATEGORY_WEIGHT: f32 = 1.8;
const ENERGY_PAIR_WEIGHT: f32 = 1.5;
const DEPTH_PAIR_WEIGHT: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Restricted to the search service's subject field
    Subject,
    /// Free-text search
    General,
}

/// A single search to issue against the book search service
///
/// `weight` is informational only; it never affects ordering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub kind: QueryKind,
    pub text: String,
    pub weight: f32,
}

impl Query {
    fn subject(text: &str, weight: f32) -> Self {
        Self {
            kind: QueryKind::Subject,
            text: text.to_string(),
            weight,
        }
    }

    fn general(left: &str, right: &str, weight: f32) -> Self {
        Self {
            kind: QueryKind::General,
            text: format!("{} {}", left, right),
            weight,
        }
    }
}

/// How wide a net the query builder casts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breadth {
    /// Bounded fan-out for the first page of recommendations
    Standard,
    /// Full cross-products plus category queries, used on refresh
    Expanded,
}

struct BreadthLimits {
    energy_pair_genre_terms: usize,
    energy_pair_energy_terms: usize,
    depth_pair_genre_terms: usize,
    depth_pair_depth_terms: usize,
    include_categories: bool,
}

impl Breadth {
    /// Result cap passed to the search service for each query
    pub fn max_results_per_query(&self) -> usize {
        match self {
            Breadth::Standard => 15,
            Breadth::Expanded => 25,
        }
    }

    fn limits(&self) -> BreadthLimits {
        match self {
            Breadth::Standard => BreadthLimits {
                energy_pair_genre_terms: 2,
                energy_pair_energy_terms: 2,
                depth_pair_genre_terms: 1,
                depth_pair_depth_terms: 1,
                include_categories: false,
            },
            Breadth::Expanded => BreadthLimits {
                energy_pair_genre_terms: usize::MAX,
                energy_pair_energy_terms: usize::MAX,
                depth_pair_genre_terms: usize::MAX,
                depth_pair_depth_terms: usize::MAX,
                include_categories: true,
            },
        }
    }
}

/// Build the ordered query list for a mood
///
/// Order is fixed: genre subject queries, genre x energy pairs, genre x depth
/// pairs, then (expanded only) genre category subject queries.
pub fn build_queries(mood: &ResolvedMood, breadth: Breadth) -> Vec<Query> {
    let limits = breadth.limits();
    let genre_terms = &mood.genre.keywords;
    let mut queries = Vec::new();

    queries.extend(
        genre_terms
            .iter()
            .map(|term| Query::subject(term, GENRE_TERM_WEIGHT)),
    );

    for genre_term in genre_terms.iter().take(limits.energy_pair_genre_terms) {
        for energy_term in mood
            .energy
            .keywords
            .iter()
            .take(limits.energy_pair_energy_terms)
        {
            queries.push(Query::general(genre_term, energy_term, ENERGY_PAIR_WEIGHT));
        }
    }

    for genre_term in genre_terms.iter().take(limits.depth_pair_genre_terms) {
        for depth_term in mood
            .depth
            .keywords
            .iter()
            .take(limits.depth_pair_depth_terms)
        {
            queries.push(Query::general(genre_term, depth_term, DEPTH_PAIR_WEIGHT));
        }
    }

    if limits.include_categories {
        queries.extend(
            mood.genre
                .categories
                .iter()
                .map(|category| Query::subject(category, CATEGORY_WEIGHT)),
        );
    }

    queries
}
