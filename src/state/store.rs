use crate::core::FieldId;
use crate::core::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregate of every field value collected by a flow so far.
///
/// Also used for a single step's output: merging one store into another is how
/// step output joins the accumulated data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataStore {
    values: IndexMap<FieldId, Value>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: impl Into<FieldId>, value: impl Into<Value>) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: impl Into<FieldId>, value: impl Into<Value>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.values.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Value::as_text)
    }

    pub fn is_empty_field(&self, id: &str) -> bool {
        self.get(id).is_none_or(Value::is_empty)
    }

    /// Later values win; keys not present in `other` are left alone.
    pub fn merge(&mut self, other: DataStore) {
        self.values.extend(other.values);
    }

    /// Non-mutating union used to evaluate validity before committing.
    pub fn merged_with(&self, other: &DataStore) -> DataStore {
        let mut merged = self.clone();
        merged
            .values
            .extend(other.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<FieldId, Value> {
        self.values
    }
}

impl FromIterator<(FieldId, Value)> for DataStore {
    fn from_iter<T: IntoIterator<Item = (FieldId, Value)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataStore;
    use crate::core::value::Value;

    #[test]
    fn merge_overwrites_and_keeps_untouched_keys() {
        let mut store = DataStore::new().with("name", "Ana").with("site", "Pit 3");
        store.merge(DataStore::new().with("name", "Ana Lee"));

        assert_eq!(store.text("name"), Some("Ana Lee"));
        assert_eq!(store.text("site"), Some("Pit 3"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn merged_with_leaves_original_untouched() {
        let store = DataStore::new().with("a", "1");
        let merged = store.merged_with(&DataStore::new().with("b", Value::Bool(true)));

        assert!(store.get("b").is_none());
        assert_eq!(merged.get("b"), Some(&Value::Bool(true)));
    }

    #[test]
    fn missing_field_counts_as_empty() {
        let store = DataStore::new().with("blank", "  ");
        assert!(store.is_empty_field("blank"));
        assert!(store.is_empty_field("absent"));
    }
}
