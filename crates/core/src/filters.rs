use std::collections::BTreeMap;

/// Named filter values for a list request.
///
/// Values are trimmed on insert and an empty value removes the filter, so
/// the set only ever holds what should be sent as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FilterSet::set`].
    pub fn with(mut self, name: impl Into<String>, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Set a filter. Returns `true` if the stored value changed.
    pub fn set(&mut self, name: impl Into<String>, value: &str) -> bool {
        let name = name.into();
        let value = value.trim();
        if value.is_empty() {
            return self.values.remove(&name).is_some();
        }
        match self.values.insert(name, value.to_string()) {
            Some(previous) => previous != value,
            None => true,
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.values.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Query pairs in name order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_trimmed() {
        let filters = FilterSet::new().with("store_name", "  Food Square ");
        assert_eq!(filters.get("store_name"), Some("Food Square"));
    }

    #[test]
    fn empty_value_clears_filter() {
        let mut filters = FilterSet::new().with("search", "milk");
        assert!(filters.set("search", "   "));
        assert!(filters.is_empty());
        // Clearing an absent filter is not a change.
        assert!(!filters.set("search", ""));
    }

    #[test]
    fn set_reports_changes_only() {
        let mut filters = FilterSet::new();
        assert!(filters.set("state", "NSW"));
        assert!(!filters.set("state", "NSW "));
        assert!(filters.set("state", "VIC"));
    }

    #[test]
    fn query_pairs_are_sorted_by_name() {
        let filters = FilterSet::new()
            .with("search", "tea")
            .with("pricelist", "retail")
            .with("has_gst", "");
        assert_eq!(
            filters.query_pairs(),
            vec![
                ("pricelist".to_string(), "retail".to_string()),
                ("search".to_string(), "tea".to_string()),
            ]
        );
    }
}
