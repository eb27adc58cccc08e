//! Tables held in memory, loaded from a JSON file.
//!
//! The file is a single object mapping table names to arrays of records:
//!
//! ```text
//! { "people": [ { "name": "Jon", "city": "NYC" } ] }
//! ```
use crate::Fetcher;
use crate::errors::{DatasourceError, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::Path;
use tracing::debug;
use translate::{Filter, Record};

type JsonObject = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: IndexMap<String, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: IndexMap<String, Vec<JsonObject>> = serde_json::from_str(text)?;
        let tables = raw
            .into_iter()
            .map(|(name, records)| (name, records.into_iter().map(Record::from).collect()))
            .collect();
        Ok(MemoryStore { tables })
    }

    /// Add or replace a table.
    pub fn with_table(mut self, name: impl Into<String>, records: Vec<Record>) -> Self {
        self.tables.insert(name.into(), records);
        self
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }
}

#[async_trait]
impl Fetcher for MemoryStore {
    async fn fetch(&self, table: &str, filter: &Filter) -> Result<Vec<Record>> {
        let records = self
            .tables
            .get(table)
            .ok_or_else(|| DatasourceError::MissingTable(table.to_string()))?;

        let matching: Vec<Record> = records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        debug!(%table, %filter, scanned = records.len(), matched = matching.len(), "memory fetch");

        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use translate::{CompareOp, Value};

    const PEOPLE: &str = r#"{
        "people": [
            {"_id": 1, "name": "Jon", "city": "NYC", "age": 30},
            {"_id": 2, "name": "GMP", "city": "Worc", "age": 12.5}
        ],
        "empty": []
    }"#;

    #[tokio::test]
    async fn fetch_all() {
        let store = MemoryStore::from_json_str(PEOPLE).unwrap();
        let records = store.fetch("people", &Filter::Empty).await.unwrap();
        assert_eq!(2, records.len());
        assert_eq!(
            vec!["_id", "name", "city", "age"],
            records[0].fields().collect::<Vec<_>>()
        );
        assert_eq!(Some(&Value::Float64(12.5)), records[1].get("age"));
    }

    #[tokio::test]
    async fn fetch_filtered() {
        let store = MemoryStore::from_json_str(PEOPLE).unwrap();
        let filter = Filter::or(
            Filter::comparison("city", CompareOp::Eq, "Worc"),
            Filter::comparison("age", CompareOp::Gt, 100),
        );
        let records = store.fetch("people", &filter).await.unwrap();
        assert_eq!(1, records.len());
        assert_eq!(Some(&Value::from("GMP")), records[0].get("name"));
    }

    #[tokio::test]
    async fn missing_table() {
        let store = MemoryStore::from_json_str(PEOPLE).unwrap();
        let err = store.fetch("cities", &Filter::Empty).await.unwrap_err();
        assert!(matches!(err, DatasourceError::MissingTable(t) if t == "cities"));

        let records = store.fetch("empty", &Filter::Empty).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn with_table() {
        let record: Record = [("name", "Ana")].into_iter().collect();
        let store = MemoryStore::new().with_table("people", vec![record]);
        assert_eq!(vec!["people"], store.table_names().collect::<Vec<_>>());
        let records = store.fetch("people", &Filter::Empty).await.unwrap();
        assert_eq!(1, records.len());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PEOPLE.as_bytes()).unwrap();

        let store = MemoryStore::from_json_file(file.path()).unwrap();
        assert_eq!(
            vec!["people", "empty"],
            store.table_names().collect::<Vec<_>>()
        );
    }

    #[test]
    fn bad_files() {
        let err = MemoryStore::from_json_file("/definitely/not/here.json").unwrap_err();
        assert_eq!("io", err.kind());

        let err = MemoryStore::from_json_str(r#"{"people": {"name": "Jon"}}"#).unwrap_err();
        assert_eq!("json", err.kind());
    }
}
