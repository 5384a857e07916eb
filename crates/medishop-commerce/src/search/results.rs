//! Listing results and pagination.

use crate::catalog::Medicine;
use serde::{Deserialize, Serialize};

/// Number of page links shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `page` is clamped into range.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(per_page)
        };
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Sliding window of page numbers around the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Whether page controls are worth showing.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }
}

/// State of a listing's add-to-cart control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CartButton {
    Available,
    InCart,
    OutOfStock,
}

impl CartButton {
    pub fn label(&self) -> &'static str {
        match self {
            CartButton::Available => "Add to Cart",
            CartButton::InCart => "Added",
            CartButton::OutOfStock => "Out of Stock",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CartButton::Available)
    }
}

/// One medicine on a listing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingEntry {
    pub medicine: Medicine,
    pub button: CartButton,
}

/// One page of the shop listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopPage {
    pub entries: Vec<ListingEntry>,
    pub pagination: Pagination,
    pub page_numbers: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(1, 9, 0).total_pages, 1);
        assert_eq!(Pagination::new(1, 9, 9).total_pages, 1);
        assert_eq!(Pagination::new(1, 9, 10).total_pages, 2);
    }

    #[test]
    fn test_page_clamped() {
        let p = Pagination::new(7, 9, 20);
        assert_eq!(p.page, 3);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(Pagination::new(0, 9, 20).page, 1);
    }

    #[test]
    fn test_page_window() {
        let at = |page| Pagination::new(page, 1, 10).page_numbers(MAX_VISIBLE_PAGES);
        assert_eq!(at(1), vec![1, 2, 3, 4, 5]);
        assert_eq!(at(5), vec![3, 4, 5, 6, 7]);
        assert_eq!(at(10), vec![6, 7, 8, 9, 10]);
        assert_eq!(Pagination::new(2, 1, 3).page_numbers(MAX_VISIBLE_PAGES), vec![1, 2, 3]);
    }

    #[test]
    fn test_button_labels() {
        assert_eq!(CartButton::InCart.label(), "Added");
        assert!(!CartButton::OutOfStock.is_enabled());
        assert!(CartButton::Available.is_enabled());
    }
}
