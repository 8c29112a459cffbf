//! Free-text search over management listings
//!
//! A search is driven by the raw `q` query parameter:
//! - absent: no filtering
//! - present but empty: rejected before anything is read
//! - present: case-insensitive substring match on the entity's search field
//!
//! Filtering never reorders: the filtered listing is a subsequence of the
//! full listing.

use serde::Serialize;
use thiserror::Error;

use crate::account::User;
use crate::catalog::Game;
use crate::checkout::Order;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("No search text entered!")]
    EmptyTerm,
}

/// Entities that can be matched against a search term
pub trait Searchable {
    /// The single field a search term is matched against
    fn search_text(&self) -> &str;
}

impl Searchable for Game {
    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Searchable for User {
    fn search_text(&self) -> &str {
        &self.username
    }
}

impl Searchable for Order {
    fn search_text(&self) -> &str {
        &self.order_number
    }
}

/// Parsed `q` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    All,
    Term(String),
}

impl SearchQuery {
    pub fn parse(raw: Option<&str>) -> Result<Self, SearchError> {
        match raw {
            None => Ok(Self::All),
            Some("") => Err(SearchError::EmptyTerm),
            Some(term) => Ok(Self::Term(term.to_string())),
        }
    }

    pub fn term(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Term(term) => Some(term),
        }
    }
}

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A full listing together with its filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub all: Vec<T>,
    pub filtered: Vec<T>,
    pub search_term: Option<String>,
}

impl<T: Searchable + Clone> Listing<T> {
    /// `all` must already be in display order
    pub fn build(all: Vec<T>, query: SearchQuery) -> Self {
        match query {
            SearchQuery::All => Self {
                filtered: all.clone(),
                all,
                search_term: None,
            },
            SearchQuery::Term(term) => {
                let filtered = all
                    .iter()
                    .filter(|item| contains_ignore_case(item.search_text(), &term))
                    .cloned()
                    .collect();
                Self {
                    all,
                    filtered,
                    search_term: Some(term),
                }
            }
        }
    }
}

impl<T> Listing<T> {
    pub fn map<U>(self, f: impl Fn(T) -> U) -> Listing<U> {
        Listing {
            all: self.all.into_iter().map(&f).collect(),
            filtered: self.filtered.into_iter().map(&f).collect(),
            search_term: self.search_term,
        }
    }
}
