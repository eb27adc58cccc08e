//! MongoDB as a record store. Tables are collections of a single database.
use crate::Fetcher;
use crate::errors::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;
use translate::{CompareOp, Filter, Record, Value};

#[derive(Debug, Clone)]
pub struct MongoFetcher {
    database: Database,
}

impl MongoFetcher {
    pub async fn connect(connection_string: &str, database: &str) -> Result<MongoFetcher> {
        let mut opts = ClientOptions::parse(connection_string).await?;
        opts.app_name = Some("sqlgate".to_string());
        let client = Client::with_options(opts)?;

        Ok(MongoFetcher {
            database: client.database(database),
        })
    }
}

#[async_trait]
impl Fetcher for MongoFetcher {
    async fn fetch(&self, table: &str, filter: &Filter) -> Result<Vec<Record>> {
        let query = filter_to_document(filter);
        debug!(%table, %query, "mongodb find");

        let docs: Vec<Document> = self
            .database
            .collection::<Document>(table)
            .find(query)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(document_to_record).collect())
    }
}

/// Render a filter as a MongoDB query document.
pub fn filter_to_document(filter: &Filter) -> Document {
    match filter {
        Filter::Empty => Document::new(),
        Filter::Comparison { field, op, value } => {
            let value = value_to_bson(value);
            let mut doc = Document::new();
            match op {
                CompareOp::Eq => doc.insert(field.clone(), value),
                op => {
                    let mut cmp = Document::new();
                    cmp.insert(comparison_operator(*op), value);
                    doc.insert(field.clone(), cmp)
                }
            };
            doc
        }
        Filter::And(left, right) => doc! {
            "$and": [filter_to_document(left), filter_to_document(right)],
        },
        Filter::Or(left, right) => doc! {
            "$or": [filter_to_document(left), filter_to_document(right)],
        },
    }
}

fn comparison_operator(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "$eq",
        CompareOp::NotEq => "$ne",
        CompareOp::Gt => "$gt",
        CompareOp::GtEq => "$gte",
        CompareOp::Lt => "$lt",
        CompareOp::LtEq => "$lte",
    }
}

fn value_to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Boolean(b) => Bson::Boolean(*b),
        Value::Int64(i) => Bson::Int64(*i),
        Value::Float64(f) => Bson::Double(*f),
        Value::Utf8(s) => Bson::String(s.clone()),
    }
}

/// Convert a fetched document, keeping its field order. Values without a
/// direct counterpart are kept as text.
fn document_to_record(doc: Document) -> Record {
    doc.into_iter()
        .map(|(k, v)| (k, bson_to_value(v)))
        .collect()
}

fn bson_to_value(bson: Bson) -> Value {
    match bson {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Boolean(b),
        Bson::Int32(i) => Value::Int64(i as i64),
        Bson::Int64(i) => Value::Int64(i),
        Bson::Double(f) => Value::Float64(f),
        Bson::String(s) | Bson::Symbol(s) => Value::Utf8(s),
        Bson::ObjectId(oid) => Value::Utf8(oid.to_hex()),
        Bson::DateTime(dt) => Value::Utf8(dt.to_string()),
        other => Value::Utf8(other.into_relaxed_extjson().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn empty_filter() {
        assert_eq!(Document::new(), filter_to_document(&Filter::Empty));
    }

    #[test]
    fn equality() {
        assert_eq!(
            doc! { "name": "Jon" },
            filter_to_document(&Filter::comparison("name", CompareOp::Eq, "Jon"))
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            doc! { "age": { "$gte": 18_i64 } },
            filter_to_document(&Filter::comparison("age", CompareOp::GtEq, 18))
        );
        assert_eq!(
            doc! { "score": { "$ne": 2.5 } },
            filter_to_document(&Filter::comparison("score", CompareOp::NotEq, 2.5))
        );
    }

    #[test]
    fn nested_logic() {
        let filter = Filter::or(
            Filter::comparison("name", CompareOp::Eq, "Jon"),
            Filter::and(
                Filter::comparison("age", CompareOp::Lt, 10),
                Filter::comparison("city", CompareOp::Eq, Value::Null),
            ),
        );
        assert_eq!(
            doc! {
                "$or": [
                    { "name": "Jon" },
                    { "$and": [ { "age": { "$lt": 10_i64 } }, { "city": Bson::Null } ] },
                ]
            },
            filter_to_document(&filter)
        );
    }

    #[test]
    fn documents_to_records() {
        let oid = ObjectId::new();
        let doc = doc! {
            "_id": oid,
            "name": "Jon",
            "age": 30_i32,
            "tags": ["a", "b"],
        };
        let record = document_to_record(doc);

        assert_eq!(
            vec!["_id", "name", "age", "tags"],
            record.fields().collect::<Vec<_>>()
        );
        assert_eq!(Some(&Value::Utf8(oid.to_hex())), record.get("_id"));
        assert_eq!(Some(&Value::Int64(30)), record.get("age"));
        assert_eq!(Some(&Value::from(r#"["a","b"]"#)), record.get("tags"));
    }
}
