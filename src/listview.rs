//! Searchable, sortable, paginated projection over in-memory row collections.
//!
//! Every listing endpoint (campaigns, ad groups, ads, keywords, audiences,
//! recommendation history) funnels its rows through [`select_page`] so that
//! free-text search, header sorting and pagination behave identically across
//! the whole API instead of being re-derived per list.

use std::cmp::Ordering;

use serde::Serialize;

/// A single cell value exposed by a row for searching and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Convenience constructor for text cells.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Named-field access used by the view model.
///
/// A row returns `None` for fields it does not carry; such fields never match
/// a search and never influence sort order.
pub trait ListRow {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Per-list configuration: which fields take part in free-text search and how
/// many rows a page holds.
#[derive(Debug, Clone, Copy)]
pub struct ListConfig {
    pub searchable_fields: &'static [&'static str],
    pub page_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// User-controlled list state: search term, sort key and requested page.
///
/// Absent sort keeps input order. Changing the search term or the sort column
/// resets the page to 1; changing only the page leaves the rest untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub search_term: String,
    pub sort: Option<SortKey>,
    pub page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            page: 1,
        }
    }
}

impl ListState {
    /// Stores the term verbatim and resets the page to 1. An empty term means
    /// "no filter".
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Selects `field` for sorting. Re-selecting the active column flips the
    /// direction; a new column starts ascending. Resets the page to 1.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(key) if key.field == field => Some(SortKey {
                field: key.field,
                direction: key.direction.flipped(),
            }),
            _ => Some(SortKey {
                field: field.to_string(),
                direction: SortDirection::Asc,
            }),
        };
        self.page = 1;
    }

    /// Requests a page. Values below 1 are floored here; the upper bound is
    /// clamped against the filtered row count during derivation.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// One page of rows plus the pagination metadata the client renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub filtered_count: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Pure derivation `(rows, state, config) -> page`.
///
/// Filtering happens before sorting, sorting before slicing. The sort is
/// stable, so rows with equal keys (and rows whose sort field is missing)
/// keep their input order. An out-of-range page is clamped, never an error.
pub fn select_page<T: ListRow>(rows: Vec<T>, state: &ListState, config: &ListConfig) -> PageView<T> {
    let total_count = rows.len();
    let page_size = config.page_size.max(1);

    let needle = state.search_term.to_lowercase();
    let mut filtered: Vec<T> = if needle.is_empty() {
        rows
    } else {
        rows.into_iter()
            .filter(|row| row_matches(row, config.searchable_fields, &needle))
            .collect()
    };
    let filtered_count = filtered.len();

    if let Some(key) = &state.sort {
        // Vec::sort_by is stable; ties fall back to input order.
        filtered.sort_by(|a, b| {
            let ordering = compare_values(a.field(&key.field), b.field(&key.field));
            match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total_pages = filtered_count.div_ceil(page_size).max(1);
    let page = state.page.clamp(1, total_pages);

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    PageView {
        items,
        page,
        total_pages,
        total_count,
        filtered_count,
        has_next: page < total_pages,
        has_previous: page > 1,
    }
}

fn row_matches<T: ListRow>(row: &T, fields: &[&str], needle: &str) -> bool {
    fields.iter().any(|field| match row.field(field) {
        Some(FieldValue::Text(text)) => text.to_lowercase().contains(needle),
        _ => false,
    })
}

/// Total order over optional cell values: missing values group first, numbers
/// compare numerically, text case-insensitively, flags false-before-true.
/// Values of differing kinds compare equal so a stable sort degrades to input
/// order instead of panicking or interleaving arbitrarily.
fn compare_values(a: Option<FieldValue>, b: Option<FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        },
    }
}
