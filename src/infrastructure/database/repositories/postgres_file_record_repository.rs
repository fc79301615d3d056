use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Nullable, Text};
use uuid::Uuid;

use crate::domain::entities::{FileRecord, SearchCriteria};
use crate::domain::repositories::file_record_repository::FileRecordRepositoryError;
use crate::domain::repositories::{AggregateField, FileRecordRepository, ValueCount};
use crate::infrastructure::database::models::FileRecordModel;
use crate::infrastructure::database::schema::file_records;
use crate::infrastructure::database::{DatabaseError, DbPool, with_connection};

const CONTENT_TYPE_COUNTS_SQL: &str = "SELECT content_type AS value, COUNT(*) AS count \
     FROM file_records \
     GROUP BY content_type \
     ORDER BY count DESC, value ASC \
     LIMIT $1";

// A tag is counted once per record even if the array repeats it.
const TAG_COUNTS_SQL: &str = "SELECT tag AS value, COUNT(*) AS count \
     FROM (SELECT DISTINCT id, unnest(tags) AS tag FROM file_records) AS record_tags \
     GROUP BY tag \
     ORDER BY count DESC, value ASC \
     LIMIT $1";

const HIGH_CONFIDENCE_PREDICATE: &str = "analysis->>'confidence' = 'high'";

#[derive(QueryableByName)]
struct ValueCountRow {
    #[diesel(sql_type = Text)]
    value: String,
    #[diesel(sql_type = BigInt)]
    count: i64,
}

impl From<DatabaseError> for FileRecordRepositoryError {
    fn from(error: DatabaseError) -> Self {
        FileRecordRepositoryError::DatabaseError(error.to_string())
    }
}

pub struct PostgresFileRecordRepository {
    pool: DbPool,
}

impl PostgresFileRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_records(models: Vec<FileRecordModel>) -> Result<Vec<FileRecord>, FileRecordRepositoryError> {
    models
        .into_iter()
        .map(|model| FileRecord::try_from(model).map_err(FileRecordRepositoryError::ValidationError))
        .collect()
}

#[async_trait]
impl FileRecordRepository for PostgresFileRecordRepository {
    async fn insert(&self, record: &FileRecord) -> Result<(), FileRecordRepositoryError> {
        let model = FileRecordModel::from(record);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(file_records::table)
                .values(&model)
                .execute(conn)
        })
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileRecordRepositoryError> {
        let result = with_connection(&self.pool, move |conn| {
            file_records::table
                .find(id)
                .select(FileRecordModel::as_select())
                .first(conn)
                .optional()
        })
        .await?;

        match result {
            Some(model) => {
                let record = FileRecord::try_from(model)
                    .map_err(FileRecordRepositoryError::ValidationError)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError> {
        let models = with_connection(&self.pool, move |conn| {
            file_records::table
                .select(FileRecordModel::as_select())
                .order((file_records::uploaded_at.asc(), file_records::id.asc()))
                .offset(skip)
                .limit(limit)
                .load(conn)
        })
        .await?;

        into_records(models)
    }

    async fn search(
        &self,
        criteria: &SearchCriteria,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError> {
        let pattern = criteria.like_pattern();
        let tags = criteria.tags().to_vec();
        let content_types = criteria.content_types().to_vec();

        let models = with_connection(&self.pool, move |conn| {
            let mut query = file_records::table
                .select(FileRecordModel::as_select())
                .into_boxed();

            if let Some(pattern) = pattern {
                query = query.or_filter(file_records::search_text.like(pattern));
            }
            if !tags.is_empty() {
                query = query.or_filter(file_records::tags.overlaps_with(tags));
            }
            if !content_types.is_empty() {
                query = query.or_filter(file_records::content_type.eq_any(content_types));
            }

            query
                .order((file_records::uploaded_at.asc(), file_records::id.asc()))
                .limit(limit)
                .load(conn)
        })
        .await?;

        into_records(models)
    }

    async fn aggregate_counts_by(
        &self,
        field: AggregateField,
        limit: Option<i64>,
    ) -> Result<Vec<ValueCount>, FileRecordRepositoryError> {
        let statement = match field {
            AggregateField::ContentType => CONTENT_TYPE_COUNTS_SQL,
            AggregateField::Tags => TAG_COUNTS_SQL,
        };

        // LIMIT NULL means no limit in Postgres.
        let rows = with_connection(&self.pool, move |conn| {
            diesel::sql_query(statement)
                .bind::<Nullable<BigInt>, _>(limit)
                .load::<ValueCountRow>(conn)
        })
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ValueCount::new(row.value, row.count))
            .collect())
    }

    async fn count(&self) -> Result<i64, FileRecordRepositoryError> {
        let total = with_connection(&self.pool, |conn| {
            file_records::table.count().get_result::<i64>(conn)
        })
        .await?;

        Ok(total)
    }

    async fn count_ai_analyzed(&self) -> Result<i64, FileRecordRepositoryError> {
        let total = with_connection(&self.pool, |conn| {
            file_records::table
                .filter(sql::<Bool>(HIGH_CONFIDENCE_PREDICATE))
                .count()
                .get_result::<i64>(conn)
        })
        .await?;

        Ok(total)
    }
}
