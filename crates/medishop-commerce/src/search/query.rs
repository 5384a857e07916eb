//! Shop listing query.

use crate::cart::{select_is_in_cart, CartState};
use crate::catalog::Medicine;
use crate::search::results::MAX_VISIBLE_PAGES;
use crate::search::{CartButton, Filter, ListingEntry, Pagination, ShopPage};
use serde::{Deserialize, Serialize};

/// Medicines shown per listing page.
pub const DEFAULT_PER_PAGE: usize = 9;

/// Sort options for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
}

impl SortOption {
    /// Parse a sort parameter (`asc` / `desc`). Anything else keeps catalog order.
    pub fn from_param(param: &str) -> Self {
        match param.trim().to_ascii_lowercase().as_str() {
            "asc" | "price-asc" => SortOption::PriceAsc,
            "desc" | "price-desc" => SortOption::PriceDesc,
            _ => SortOption::None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::None => "Default",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }

    /// Stable sort in place. Equal prices keep their catalog order.
    pub fn sort(&self, medicines: &mut [Medicine]) {
        match self {
            SortOption::None => {}
            SortOption::PriceAsc => medicines.sort_by_key(|m| m.price.amount_cents),
            SortOption::PriceDesc => {
                medicines.sort_by(|a, b| b.price.amount_cents.cmp(&a.price.amount_cents))
            }
        }
    }
}

/// A shop listing query.
///
/// `search` is forwarded to the catalog service; filters, sorting and paging
/// run locally over what it returns. Changing the search, a filter or the sort
/// resets the page to 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopQuery {
    /// Server-side text search.
    pub search: Option<String>,
    /// Filters to apply, at most one per attribute.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

impl Default for ShopQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            filters: Vec::new(),
            sort: SortOption::None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set the text search. Blank text clears it.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let q = q.trim();
        self.search = (!q.is_empty()).then(|| q.to_string());
        self.page = 1;
        self
    }

    /// Add a filter, replacing any filter on the same attribute.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.retain(|f| !f.same_kind(&filter));
        self.filters.push(filter);
        self.page = 1;
        self
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        self.with_filter(Filter::category(category))
    }

    pub fn with_form(self, form: impl Into<String>) -> Self {
        self.with_filter(Filter::form(form))
    }

    pub fn with_prescription(self, required: bool) -> Self {
        self.with_filter(Filter::Prescription(required))
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self.page = 1;
        self
    }

    /// Jump to a page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self.page = 1;
        self
    }

    /// Whether `medicine` passes every filter.
    pub fn matches(&self, medicine: &Medicine) -> bool {
        self.filters.iter().all(|f| f.matches(medicine))
    }

    /// Filter, sort and paginate `medicines`, marking each entry's cart
    /// button against `cart`.
    pub fn apply(&self, medicines: &[Medicine], cart: &CartState) -> ShopPage {
        let mut matching: Vec<Medicine> = medicines
            .iter()
            .filter(|m| self.matches(m))
            .cloned()
            .collect();
        self.sort.sort(&mut matching);

        let pagination = Pagination::new(self.page, self.per_page, matching.len());
        let entries = matching
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .map(|medicine| {
                let button = if medicine.is_out_of_stock() {
                    CartButton::OutOfStock
                } else if select_is_in_cart(cart, &medicine.id) {
                    CartButton::InCart
                } else {
                    CartButton::Available
                };
                ListingEntry { medicine, button }
            })
            .collect();

        ShopPage {
            entries,
            page_numbers: pagination.page_numbers(MAX_VISIBLE_PAGES),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, CartStore};
    use crate::money::Money;

    fn med(id: &str, cents: i64, stock: i64) -> Medicine {
        Medicine::new(id, id, Money::from_cents(cents), stock)
    }

    fn ids(page: &ShopPage) -> Vec<&str> {
        page.entries.iter().map(|e| e.medicine.id.as_str()).collect()
    }

    #[test]
    fn test_query_builder_resets_page() {
        let query = ShopQuery::new().with_page(3);
        assert_eq!(query.page, 3);
        assert_eq!(query.clone().with_category("Antibiotic").page, 1);
        assert_eq!(query.clone().with_sort(SortOption::PriceAsc).page, 1);
        assert_eq!(query.with_search("napa").page, 1);
    }

    #[test]
    fn test_filter_replaces_same_attribute() {
        let query = ShopQuery::new()
            .with_category("Antibiotic")
            .with_category("Antacid")
            .with_form("Tablet");
        assert_eq!(
            query.filters,
            vec![Filter::category("Antacid"), Filter::form("Tablet")]
        );
    }

    #[test]
    fn test_blank_search_is_cleared() {
        assert_eq!(ShopQuery::new().with_search("   ").search, None);
        assert_eq!(ShopQuery::new().with_search(" napa ").search.as_deref(), Some("napa"));
    }

    #[test]
    fn test_price_sort_is_stable() {
        let meds = vec![med("a", 500, 1), med("b", 100, 1), med("c", 500, 1), med("d", 300, 1)];
        let cart = CartState::default();

        let asc = ShopQuery::new().with_sort(SortOption::PriceAsc).apply(&meds, &cart);
        assert_eq!(ids(&asc), vec!["b", "d", "a", "c"]);

        let desc = ShopQuery::new().with_sort(SortOption::PriceDesc).apply(&meds, &cart);
        assert_eq!(ids(&desc), vec!["a", "c", "d", "b"]);

        let none = ShopQuery::new().apply(&meds, &cart);
        assert_eq!(ids(&none), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_pagination_slices_nine_per_page() {
        let meds: Vec<Medicine> = (0..20).map(|i| med(&format!("m{i}"), 100, 1)).collect();
        let page = ShopQuery::new().with_page(3).apply(&meds, &CartState::default());

        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(ids(&page), vec!["m18", "m19"]);
        assert_eq!(page.page_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_cart_button_states() {
        let meds = vec![med("a", 100, 5), med("b", 100, 0), med("c", 100, 5)];
        let mut store = CartStore::new();
        store.add_item(CartLineItem::new("a", "a", Money::from_cents(100), 1)).unwrap();

        let page = ShopQuery::new().apply(&meds, store.state());
        let buttons: Vec<CartButton> = page.entries.iter().map(|e| e.button).collect();
        assert_eq!(
            buttons,
            vec![CartButton::InCart, CartButton::OutOfStock, CartButton::Available]
        );
    }

    #[test]
    fn test_filters_narrow_listing() {
        let mut a = med("a", 100, 1);
        a.category = Some("Antibiotic".into());
        a.prescription_required = true;
        let mut b = med("b", 100, 1);
        b.category = Some("antibiotic".into());
        let c = med("c", 100, 1);

        let meds = vec![a, b, c];
        let cart = CartState::default();

        let page = ShopQuery::new().with_category("ANTIBIOTIC").apply(&meds, &cart);
        assert_eq!(ids(&page), vec!["a", "b"]);

        let page = ShopQuery::new()
            .with_category("antibiotic")
            .with_prescription(false)
            .apply(&meds, &cart);
        assert_eq!(ids(&page), vec!["b"]);
    }

    #[test]
    fn test_sort_param() {
        assert_eq!(SortOption::from_param("asc"), SortOption::PriceAsc);
        assert_eq!(SortOption::from_param("DESC"), SortOption::PriceDesc);
        assert_eq!(SortOption::from_param(""), SortOption::None);
    }
}
