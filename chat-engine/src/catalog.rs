//! Catalog resolver
//!
//! Fuzzy lookup of a free-text phrase against the menu. Stop words are
//! stripped, every candidate is scored by how many query tokens occur as
//! substrings of its normalized name or description, ties break by
//! catalog order. A miss on the full phrase retries token by token.
//!
//! Unavailable items ARE returned when they score best: the caller must
//! check `is_available` and answer "agotado" instead of adding them.

use crate::repository::{CatalogRepository, RepoResult};
use crate::text::{normalize, query_tokens};
use shared::models::CatalogItem;
use std::sync::Arc;

pub struct CatalogResolver {
    repo: Arc<dyn CatalogRepository>,
    restaurant_id: i64,
}

impl CatalogResolver {
    pub fn new(repo: Arc<dyn CatalogRepository>, restaurant_id: i64) -> Self {
        Self {
            repo,
            restaurant_id,
        }
    }

    /// Resolve a free-text phrase to the best-matching catalog item.
    pub async fn resolve(&self, free_text: &str) -> RepoResult<Option<CatalogItem>> {
        let tokens = query_tokens(free_text);
        if tokens.is_empty() {
            return Ok(None);
        }

        let query = tokens.join(" ");
        let candidates = self.repo.search_items(self.restaurant_id, &query).await?;
        if let Some(item) = best_match(&candidates, &tokens) {
            return Ok(Some(item.clone()));
        }

        // Secondary pass: one token at a time, short words skipped
        for token in tokens.iter().filter(|t| t.len() > 2) {
            let candidates = self.repo.search_items(self.restaurant_id, token).await?;
            if let Some(item) = best_match(&candidates, std::slice::from_ref(token)) {
                return Ok(Some(item.clone()));
            }
        }

        Ok(None)
    }
}

/// Highest-scoring item, ties broken by position; None if nothing scores
fn best_match<'a>(items: &'a [CatalogItem], tokens: &[String]) -> Option<&'a CatalogItem> {
    let mut best: Option<(&CatalogItem, usize)> = None;
    for item in items {
        let score = score_item(item, tokens);
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((item, score));
        }
    }
    best.map(|(item, _)| item)
}

/// Number of query tokens occurring in the item's name or description
fn score_item(item: &CatalogItem, tokens: &[String]) -> usize {
    let haystack = format!("{} {}", normalize(&item.name), normalize(&item.description));
    tokens.iter().filter(|t| haystack.contains(t.as_str())).count()
}
