//! Data model for per column value filters.

/// A value based filter attached to a table column.
///
/// Filters are owned by the hosting table, not by the dropdown widget.
/// `predefined` entries come from the host itself and can be toggled but
/// never removed through the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub value: String,
    pub label: String,
    pub enabled: bool,
    pub predefined: bool,
}

impl Filter {
    /// A filter entered by the user. Starts out enabled, labeled by its value.
    pub fn user(value: impl Into<String>) -> Self {
        let value = value.into();
        Filter {
            label: value.clone(),
            value,
            enabled: true,
            predefined: false,
        }
    }

    pub fn predefined(label: impl Into<String>, value: impl Into<String>, enabled: bool) -> Self {
        Filter {
            label: label.into(),
            value: value.into(),
            enabled,
            predefined: true,
        }
    }
}

/// A column as seen by the filter dropdown: a stable key and an optional,
/// ordered filter list. A column that never had filters carries `None`,
/// one whose filters were all removed carries `Some(vec![])`. Both show
/// the empty state in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub filters: Option<Vec<Filter>>,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            filters: None,
        }
    }

    pub fn with_filters(key: impl Into<String>, filters: Vec<Filter>) -> Self {
        Column {
            key: key.into(),
            filters: Some(filters),
        }
    }

    pub fn filter_count(&self) -> usize {
        self.filters.as_deref().map_or(0, |filters| filters.len())
    }

    pub fn filter(&self, index: usize) -> Option<&Filter> {
        self.filters.as_deref().and_then(|filters| filters.get(index))
    }

    pub fn is_active(&self) -> bool {
        is_active(self.filters.as_deref())
    }
}

/// A column is "active" when at least one of its filters is enabled.
/// Derived from the list on every call, never stored.
pub fn is_active(filters: Option<&[Filter]>) -> bool {
    filters.is_some_and(|filters| filters.iter().any(|f| f.enabled))
}

/// Mutation callbacks the hosting table supplies to the dropdown.
///
/// The widget resolves filters by their index in the list it was handed on
/// the current frame and trusts the host to treat every call as total,
/// including indices that went stale through a concurrent list mutation.
pub trait ColumnFilterHandlers {
    fn on_add_column_filter(&mut self, column_id: &str, value: String);
    fn on_remove_column_filter(&mut self, column_id: &str, index: usize);
    fn on_toggle_column_filter(&mut self, column_id: &str, index: usize);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_filter_list_is_inactive() {
        assert!(!is_active(None));
        assert!(!Column::new("time").is_active());
    }

    #[test]
    fn empty_filter_list_is_inactive() {
        assert!(!is_active(Some(&[])));
        assert!(!Column::with_filters("tag", Vec::new()).is_active());
    }

    #[test]
    fn disabled_filters_are_inactive() {
        let filters = vec![
            Filter::predefined("error", "error", false),
            Filter {
                enabled: false,
                ..Filter::user("warn")
            },
        ];
        assert!(!is_active(Some(&filters)));
    }

    #[test]
    fn one_enabled_filter_is_active() {
        let filters = vec![
            Filter::predefined("error", "error", false),
            Filter::user("warn"),
        ];
        assert!(is_active(Some(&filters)));
    }

    #[test]
    fn user_filters_are_labeled_by_value() {
        let filter = Filter::user("timeout");
        assert_eq!(filter.label, "timeout");
        assert_eq!(filter.value, "timeout");
        assert!(filter.enabled);
        assert!(!filter.predefined);
    }
}
