//! Multi-valued text storage for structured property components.

/// An ordered sequence of text values backing one component of a
/// structured property (e.g. the street address of an ADR).
///
/// Every component can carry several values, but most callers only ever
/// deal with one. Two accessor pairs are provided:
///
/// - [`single`](Self::single) / [`set_single`](Self::set_single) read the
///   first value and replace the whole sequence with at most one value.
/// - [`all`](Self::all) / [`set_all`](Self::set_all) expose the full
///   sequence.
///
/// Reading with [`single`](Self::single) after storing several values
/// returns only the first of them. This truncation is part of the contract.
/// [`joined`](Self::joined) recovers the full text, which matters when a
/// reader split a value on commas the producer forgot to escape.
///
/// An empty sequence means the component is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: Vec<String>,
}

impl FieldSet {
    /// Creates an empty (unset) field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value, or `None` if the set is empty.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns every value in insertion order.
    #[must_use]
    pub fn all(&self) -> &[String] {
        &self.values
    }

    /// Returns the backing sequence for in-place edits.
    pub fn all_mut(&mut self) -> &mut Vec<String> {
        &mut self.values
    }

    /// Replaces the whole sequence with `value`, or empties it when `value`
    /// is `None`. Never appends.
    pub fn set_single<S: Into<String>>(&mut self, value: Option<S>) {
        self.values.clear();
        if let Some(value) = value {
            self.values.push(value.into());
        }
    }

    /// Replaces the whole sequence, keeping the caller's order.
    pub fn set_all<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }

    /// Returns all values concatenated with `separator`, or `None` if the
    /// set is empty.
    #[must_use]
    pub fn joined(&self, separator: &str) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(separator))
        }
    }

    /// Returns whether the component is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.values.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for FieldSet {
    fn from(values: Vec<String>) -> Self {
        Self { values }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_all_preserves_order() {
        for values in [vec![], vec!["a"], vec!["b", "a"], vec!["x", "x", "y", ""]] {
            let mut set = FieldSet::new();
            set.set_all(values.clone());
            assert_eq!(set.all(), values.as_slice());
        }
    }

    #[test]
    fn iter_follows_insertion_order() {
        let set: FieldSet = ["b", "a", "b"].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), ["b", "a", "b"]);
        assert!(set.iter().eq(&set));
    }

    #[test]
    fn set_single_replaces_everything() {
        let mut set = FieldSet::new();
        set.set_all(["one", "two", "three"]);
        set.set_single(Some("only"));

        assert_eq!(set.single(), Some("only"));
        assert_eq!(set.all(), ["only"]);
    }

    #[test]
    fn set_single_is_idempotent() {
        let mut set = FieldSet::new();
        set.set_single(Some("Austin"));
        set.set_single(Some("Austin"));
        assert_eq!(set.all(), ["Austin"]);
    }

    #[test]
    fn set_single_none_resets() {
        let mut set = FieldSet::new();
        set.set_all(["a", "b"]);
        set.set_single(None::<String>);
        assert!(set.is_empty());
        assert_eq!(set.single(), None);

        set.set_single(None::<String>);
        assert!(set.is_empty());
    }

    #[test]
    fn single_truncates_while_joined_does_not() {
        let mut set = FieldSet::new();
        set.set_all(["123 Main St", "Suite 200"]);

        assert_eq!(set.single(), Some("123 Main St"));
        assert_eq!(set.joined(",").as_deref(), Some("123 Main St,Suite 200"));
    }

    #[test]
    fn joined_empty_is_none() {
        assert_eq!(FieldSet::new().joined(","), None);
    }

    #[test]
    fn all_mut_keeps_order() {
        let mut set: FieldSet = ["a"].into_iter().collect();
        set.all_mut().push("b".to_string());
        assert_eq!(set.all(), ["a", "b"]);
        assert_eq!(set.len(), 2);
    }
}
