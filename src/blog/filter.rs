//! Blog filter state
//!
//! Tracks the listing's category/year/search selections plus the current
//! page, and derives the filter expression sent to the content API.
//! Changing any filter dimension snaps the page back to 1.

use crate::cms::Filter;

/// Active filter selections for the blog listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    category_ids: Vec<String>,
    years: Vec<i32>,
    search: String,
    page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category_ids: Vec::new(),
            years: Vec::new(),
            search: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_ids(&self) -> &[String] {
        &self.category_ids
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current page, 1-based
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the selected categories
    pub fn set_categories<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_ids = ids.into_iter().map(Into::into).collect();
        self.page = 1;
    }

    /// Add or remove a single category selection
    pub fn toggle_category(&mut self, id: &str) {
        match self.category_ids.iter().position(|c| c == id) {
            Some(pos) => {
                self.category_ids.remove(pos);
            }
            None => self.category_ids.push(id.to_string()),
        }
        self.page = 1;
    }

    /// Replace the selected years
    pub fn set_years<I: IntoIterator<Item = i32>>(&mut self, years: I) {
        self.years = years.into_iter().collect();
        self.page = 1;
    }

    /// Add or remove a single year selection
    pub fn toggle_year(&mut self, year: i32) {
        match self.years.iter().position(|y| *y == year) {
            Some(pos) => {
                self.years.remove(pos);
            }
            None => self.years.push(year),
        }
        self.page = 1;
    }

    /// Replace the search text
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Move to another page without touching the filters
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Clear every dimension and return to page 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any filter dimension is set
    pub fn is_active(&self) -> bool {
        !self.category_ids.is_empty() || !self.years.is_empty() || !self.search.trim().is_empty()
    }

    /// Derive the filter expression for the content API
    ///
    /// Pure function of the three filter dimensions: equal states always
    /// produce equal expressions, so consumers can compare values to
    /// skip redundant fetches. An empty state yields `Filter::None`.
    pub fn expression(&self) -> Filter {
        let mut clauses = Vec::new();

        if !self.category_ids.is_empty() {
            clauses.push(Filter::is_in(
                &["categories", "documentId"],
                self.category_ids.iter().cloned(),
            ));
        }

        match self.years.len() {
            0 => {}
            1 => clauses.push(year_range(self.years[0])),
            // Each year keeps its own closed range; the selection need
            // not be contiguous.
            _ => clauses.push(Filter::any(
                self.years.iter().map(|y| year_range(*y)).collect(),
            )),
        }

        let search = self.search.trim();
        if !search.is_empty() {
            clauses.push(Filter::any(vec![
                Filter::contains_i(&["title"], search),
                Filter::contains_i(&["subtitle"], search),
            ]));
        }

        Filter::all(clauses)
    }
}

fn year_range(year: i32) -> Filter {
    Filter::between(
        &["publishedAt"],
        format!("{}-01-01", year),
        format!("{}-12-31", year),
    )
}
