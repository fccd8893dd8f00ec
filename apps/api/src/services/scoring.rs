//! Mood match scoring and ranking
//!
//! Every candidate gets a raw `match_score` built from fixed bonuses and three
//! weighted match ratios (genre, energy, depth), a display percentage, up to
//! two reasons and up to three mood tags.

use crate::{
    models::{BookRecord, ScoredBook},
    services::mood_table::{MoodCriteria, ResolvedMood},
};
use std::cmp::Ordering;
use tracing::debug;

const GENRE_WEIGHT: f64 = 30.0;
const ENERGY_WEIGHT: f64 = 20.0;
const DEPTH_WEIGHT: f64 = 15.0;

/// Approximate highest reachable score. Only used to normalise the display
/// percentage and must be revisited by hand whenever the weights change.
const SCORE_NORMALIZER: f64 = 105.0;
const MAX_MATCH_PERCENTAGE: f64 = 98.0;

const MAX_REASONS: usize = 2;
const MAX_MOOD_TAGS: usize = 3;

/// Genre ratio for books without any categories
const UNCATEGORIZED_GENRE_MATCH: f64 = 0.3;

/// Score every candidate against the mood
pub fn score_books(books: Vec<BookRecord>, mood: &ResolvedMood) -> Vec<ScoredBook> {
    books.into_iter().map(|book| score_book(book, mood)).collect()
}

pub fn score_book(book: BookRecord, mood: &ResolvedMood) -> ScoredBook {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    if book.average_rating >= 3.5 {
        score += 10.0;
    }
    if book.average_rating >= 4.0 {
        score += 5.0;
        reasons.push("Highly rated".to_string());
    }

    let genre_ratio = genre_match(&book, mood.genre);
    score += genre_ratio * GENRE_WEIGHT;
    if genre_ratio > 0.5 {
        reasons.push(format!("Perfect for {}", mood.genre.title));
    }

    let energy_ratio = energy_match(&book, mood.energy);
    score += energy_ratio * ENERGY_WEIGHT;
    if energy_ratio > 0.6 {
        reasons.push(format!(
            "Matches your {} mood",
            mood.energy.title.to_lowercase()
        ));
    }

    let depth_ratio = depth_match(&book, mood.depth);
    score += depth_ratio * DEPTH_WEIGHT;
    if depth_ratio > 0.5 {
        reasons.push(format!("Fits a {} read", mood.depth.title.to_lowercase()));
    }

    if book.description.chars().count() > 200 {
        score += 5.0;
    }

    if book.page_count > 0
        && mood
            .depth
            .page_range
            .is_some_and(|range| range.contains(book.page_count))
    {
        score += 10.0;
    }

    if book.ratings_count > 100 {
        score += 5.0;
    }
    if book.ratings_count > 1000 {
        score += 5.0;
        reasons.push("Popular choice".to_string());
    }

    reasons.truncate(MAX_REASONS);
    let mood_tags = mood_tags(&book, mood);

    debug!(
        "Scored '{}': {:.2} (genre={:.2}, energy={:.2}, depth={:.2})",
        book.title, score, genre_ratio, energy_ratio, depth_ratio
    );

    ScoredBook {
        match_percentage: match_percentage(score),
        match_score: score,
        match_reasons: reasons,
        mood_tags,
        book,
    }
}

/// Sort by score, highest first, and keep the top `limit`
///
/// The sort is stable: equal scores keep their incoming order.
pub fn rank(mut scored: Vec<ScoredBook>, limit: usize) -> Vec<ScoredBook> {
    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}

pub fn match_percentage(score: f64) -> u8 {
    let percentage = (score / SCORE_NORMALIZER * 100.0)
        .min(100.0)
        .min(MAX_MATCH_PERCENTAGE)
        .max(0.0);
    percentage.round() as u8
}

fn lowercase_categories(book: &BookRecord) -> Vec<String> {
    book.categories
        .iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Share of the genre's target categories found in the book's categories
fn genre_match(book: &BookRecord, genre: &MoodCriteria) -> f64 {
    let categories = lowercase_categories(book);
    if categories.is_empty() {
        return UNCATEGORIZED_GENRE_MATCH;
    }
    if genre.categories.is_empty() {
        return 0.0;
    }

    let matched = genre
        .categories
        .iter()
        .filter(|target| {
            let target = target.to_lowercase();
            categories
                .iter()
                .any(|category| category.contains(&target) || target.contains(category.as_str()))
        })
        .count();

    matched as f64 / genre.categories.len() as f64
}

/// Pace keywords in the title or description plus energy themes in categories
fn energy_match(book: &BookRecord, energy: &MoodCriteria) -> f64 {
    if energy.keywords.is_empty() {
        return 0.0;
    }

    let text = format!("{} {}", book.title, book.description).to_lowercase();
    let keyword_hits = energy
        .keywords
        .iter()
        .filter(|keyword| text.contains(&keyword.to_lowercase()))
        .count();

    let categories = lowercase_categories(book);
    let theme_hits = energy
        .categories
        .iter()
        .filter(|theme| {
            let theme = theme.to_lowercase();
            categories.iter().any(|category| category.contains(&theme))
        })
        .count();

    ((keyword_hits + theme_hits) as f64 / energy.keywords.len() as f64).min(1.0)
}

/// Base 0.5, plus page-range fit and tone keywords in the description
fn depth_match(book: &BookRecord, depth: &MoodCriteria) -> f64 {
    let mut ratio = 0.5;

    if depth
        .page_range
        .is_some_and(|range| range.contains(book.page_count))
    {
        ratio += 0.3;
    }

    let description = book.description.to_lowercase();
    let keyword_hits = depth
        .keywords
        .iter()
        .filter(|keyword| description.contains(&keyword.to_lowercase()))
        .count();
    ratio += (keyword_hits as f64 * 0.05).min(0.2);

    ratio.min(1.0)
}

fn mood_tags(book: &BookRecord, mood: &ResolvedMood) -> Vec<String> {
    let mut tags = vec![mood.genre.title.to_string()];

    tags.extend(mood.energy.mood_tag.map(str::to_string));
    tags.extend(mood.depth.mood_tag.map(str::to_string));

    if book.page_count < 250 {
        tags.push("Quick Read".to_string());
    } else if book.page_count > 500 {
        tags.push("Epic".to_string());
    }

    tags.truncate(MAX_MOOD_TAGS);
    tags
}
