//! PostgreSQL document store backed by a JSONB column.
//!
//! Filters are translated to JSONB path equality so that selection happens
//! in the database. Streaming pages through the result set ordered by id;
//! each page is fetched only when the previous one has been consumed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, Statement,
};
use serde_json::Value;

use common::{AppError, AppResult};
use domain::{filter::path_segments, EntityId, Filter};

use super::entities::document::{self, Entity as DocumentEntity};
use super::{DocumentStore, DocumentStream};

/// Documents fetched per round-trip while streaming
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Concrete implementation of DocumentStore over PostgreSQL
pub struct PgDocumentStore {
    db: Arc<DatabaseConnection>,
    page_size: u64,
}

impl PgDocumentStore {
    /// Create new store over an already-connected pool
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self {
            db: db.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the streaming page size (minimum 1)
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Translate a filter into a SQL condition on the `body` column.
pub(crate) fn condition_for(filter: &Filter) -> Condition {
    match filter {
        Filter::All => Condition::all(),
        Filter::Eq { field, value } => Condition::all().add(json_path_eq(field, value)),
        Filter::And(filters) => filters
            .iter()
            .fold(Condition::all(), |cond, f| cond.add(condition_for(f))),
        Filter::Or(filters) if filters.is_empty() => Condition::all().add(Expr::cust("FALSE")),
        Filter::Or(filters) if filters.iter().any(selects_everything) => Condition::all(),
        Filter::Or(filters) => filters
            .iter()
            .fold(Condition::any(), |cond, f| cond.add(condition_for(f))),
        Filter::Not(inner) if selects_everything(inner) => {
            Condition::all().add(Expr::cust("FALSE"))
        }
        Filter::Not(inner) => condition_for(inner).not(),
    }
}

// An empty condition renders as nothing, so its negation must be spelled out
fn selects_everything(filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::And(filters) => filters.iter().all(selects_everything),
        Filter::Or(filters) => filters.iter().any(selects_everything),
        _ => false,
    }
}

/// `COALESCE("body" -> $1 -> $2 = CAST($3 AS jsonb), FALSE)`
///
/// A missing path compares as NULL; folding it to FALSE keeps negation
/// two-valued, matching [`Filter::matches`].
fn json_path_eq(field: &str, value: &Value) -> SimpleExpr {
    let mut values: Vec<sea_orm::Value> = path_segments(field)
        .map(|segment| sea_orm::Value::from(segment.to_string()))
        .collect();
    let path: String = (1..=values.len()).map(|n| format!(" -> ${}", n)).collect();
    let sql = format!(
        "COALESCE(\"body\"{} = CAST(${} AS jsonb), FALSE)",
        path,
        values.len() + 1
    );

    values.push(sea_orm::Value::from(value.to_string()));
    Expr::cust_with_values(sql, values)
}

fn in_collection(collection: &str) -> Condition {
    Condition::all().add(document::Column::Collection.eq(collection))
}

fn by_key(collection: &str, id: EntityId) -> Condition {
    in_collection(collection).add(document::Column::Id.eq(id))
}

/// Map unique-key violations to a conflict, everything else stays a DB fault.
fn insert_error(err: DbErr, id: EntityId) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::conflict(format!("Document {}", id))
        }
        _ => AppError::from(err),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn stream(&self, collection: &str, filter: Filter) -> DocumentStream {
        let db = Arc::clone(&self.db);
        let page_size = self.page_size;
        let condition = in_collection(collection).add(condition_for(&filter));

        stream::unfold(Some(0u64), move |offset| {
            let db = Arc::clone(&db);
            let condition = condition.clone();
            async move {
                let offset = offset?;
                let page = DocumentEntity::find()
                    .filter(condition)
                    .order_by_asc(document::Column::Id)
                    .offset(offset)
                    .limit(page_size)
                    .all(db.as_ref())
                    .await;

                match page {
                    Ok(rows) => {
                        let fetched = rows.len() as u64;
                        let next = (fetched == page_size).then_some(offset + fetched);
                        let docs: Vec<AppResult<Value>> =
                            rows.into_iter().map(|row| Ok(row.body)).collect();
                        Some((docs, next))
                    }
                    // Stop after surfacing the fault to the consumer
                    Err(e) => Some((vec![Err(AppError::from(e))], None)),
                }
            }
        })
        .flat_map(stream::iter)
        .boxed()
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>> {
        let row = DocumentEntity::find()
            .filter(in_collection(collection).add(condition_for(filter)))
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(|r| r.body))
    }

    async fn find_by_id(&self, collection: &str, id: EntityId) -> AppResult<Option<Value>> {
        let row = DocumentEntity::find()
            .filter(by_key(collection, id))
            .one(self.db.as_ref())
            .await?;

        Ok(row.map(|r| r.body))
    }

    async fn insert_one(&self, collection: &str, id: EntityId, body: Value) -> AppResult<()> {
        let now = Utc::now();
        let active_model = document::ActiveModel {
            collection: Set(collection.to_string()),
            id: Set(id),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        };

        DocumentEntity::insert(active_model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| insert_error(e, id))?;

        Ok(())
    }

    async fn replace_one(&self, collection: &str, id: EntityId, body: Value) -> AppResult<u64> {
        let result = DocumentEntity::update_many()
            .col_expr(document::Column::Body, Expr::value(body))
            .col_expr(document::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(by_key(collection, id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_one(&self, collection: &str, id: EntityId) -> AppResult<u64> {
        let result = DocumentEntity::delete_many()
            .filter(by_key(collection, id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
