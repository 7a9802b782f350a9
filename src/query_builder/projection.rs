use super::joins::Join;
use super::ordering::SortDirection;

/// A fixed "SELECT columns FROM table" shape together with the identifiers that are
/// allowed to appear in its ORDER BY and text-search predicates.
#[derive(Debug, PartialEq, Eq)]
pub struct Projection {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub joins: &'static [Join],
    pub group_by: &'static [&'static str],
    /// Columns the free-text query is matched against
    pub search_columns: &'static [&'static str],
    /// Text column whose word count threshold filters compare against, if any
    pub word_count_column: Option<&'static str>,
    /// Ordering allow-list
    pub sortable: &'static [&'static str],
    pub default_order: &'static str,
    pub default_direction: SortDirection,
}

impl Projection {
    /// Allow-listed column matching `requested` (case-insensitive), as the projection's
    /// own `'static` identifier
    pub fn sortable_column(&self, requested: &str) -> Option<&'static str> {
        let requested = requested.trim();
        self.sortable
            .iter()
            .copied()
            .find(|column| column.eq_ignore_ascii_case(requested))
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        self.sortable.contains(&column)
    }

    /// Whether `column` is projected under exactly that name
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}
