// File: src/core/ranker.rs
use crate::core::types::ScoredRecipe;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Paging and filtering parameters. Out-of-range values are clamped rather
/// than rejected; see [`PageRequest::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub limit: usize,
    /// 1-based.
    pub page: usize,
    pub min_score: f64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
            min_score: 0.0,
        }
    }
}

impl PageRequest {
    pub fn new(limit: usize, page: usize) -> Self {
        Self {
            limit,
            page,
            ..Self::default()
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// `limit` into `[1, 100]`, `page` to at least 1, `min_score` into
    /// `[0.0, 1.0]` with NaN treated as 0.
    pub fn clamped(&self) -> Self {
        let min_score = if self.min_score.is_nan() {
            0.0
        } else {
            self.min_score.clamp(0.0, 1.0)
        };
        Self {
            limit: self.limit.clamp(1, MAX_LIMIT),
            page: self.page.max(1),
            min_score,
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of ranked results plus the counts needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<ScoredRecipe>,
    pub page: usize,
    pub limit: usize,
    /// Records that passed the `min_score` filter.
    pub total: usize,
    pub total_pages: usize,
}

impl Page {
    pub fn empty(request: &PageRequest) -> Self {
        let request = request.clamped();
        Self {
            items: Vec::new(),
            page: request.page,
            limit: request.limit,
            total: 0,
            total_pages: 1,
        }
    }
}

/// Score descending, then match count descending, then title ascending by
/// codepoint.
pub fn compare(a: &ScoredRecipe, b: &ScoredRecipe) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.match_count.cmp(&a.match_count))
        .then_with(|| a.title.cmp(&b.title))
}

/// Filters by `min_score`, sorts with [`compare`] and returns the requested
/// slice. A page past the end is empty.
pub fn rank_and_page(scored: Vec<ScoredRecipe>, request: &PageRequest) -> Vec<ScoredRecipe> {
    paginate(scored, request).items
}

/// [`rank_and_page`] with page metadata.
pub fn paginate(scored: Vec<ScoredRecipe>, request: &PageRequest) -> Page {
    let request = request.clamped();

    let mut ranked: Vec<ScoredRecipe> = scored
        .into_iter()
        .filter(|r| r.score >= request.min_score)
        .collect();
    ranked.sort_by(compare);

    let total = ranked.len();
    let total_pages = total.div_ceil(request.limit).max(1);
    let items = ranked
        .into_iter()
        .skip(request.offset())
        .take(request.limit)
        .collect();

    Page {
        items,
        page: request.page,
        limit: request.limit,
        total,
        total_pages,
    }
}
