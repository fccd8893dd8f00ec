use crate::models::BookRecord;
use std::collections::HashSet;

/// Keep the first occurrence of every book id, preserving order
pub fn dedupe(books: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen = HashSet::with_capacity(books.len());
    books
        .into_iter()
        .filter(|book| seen.insert(book.id.clone()))
        .collect()
}

/// Drop every book whose id is in `excluded`
pub fn exclude(books: Vec<BookRecord>, excluded: &HashSet<String>) -> Vec<BookRecord> {
    if excluded.is_empty() {
        return books;
    }

    books
        .into_iter()
        .filter(|book| !excluded.contains(&book.id))
        .collect()
}
