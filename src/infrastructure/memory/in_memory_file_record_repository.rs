use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{FileRecord, SearchCriteria};
use crate::domain::repositories::file_record_repository::{
    FileRecordRepositoryError, sort_value_counts,
};
use crate::domain::repositories::{AggregateField, FileRecordRepository, ValueCount};
use crate::domain::value_objects::Confidence;

struct IndexedRecord {
    record: FileRecord,
    search_document: String,
}

/// Records kept in insertion order, plus tag and content-type indexes that
/// map to positions in that order.
#[derive(Default)]
struct Store {
    records: Vec<IndexedRecord>,
    positions: HashMap<Uuid, usize>,
    tag_index: HashMap<String, BTreeSet<usize>>,
    type_index: HashMap<String, BTreeSet<usize>>,
}

/// Process-local repository used when no database is configured and as the
/// repository behind unit tests.
pub struct InMemoryFileRecordRepository {
    store: RwLock<Store>,
}

impl InMemoryFileRecordRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryFileRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileRecordRepository for InMemoryFileRecordRepository {
    async fn insert(&self, record: &FileRecord) -> Result<(), FileRecordRepositoryError> {
        let mut store = self.store.write().await;

        if store.positions.contains_key(&record.id()) {
            return Err(FileRecordRepositoryError::DatabaseError(format!(
                "Duplicate file record id: {}",
                record.id()
            )));
        }

        let position = store.records.len();
        for tag in record.tags().iter() {
            store
                .tag_index
                .entry(tag.to_string())
                .or_default()
                .insert(position);
        }
        store
            .type_index
            .entry(record.content_type().to_string())
            .or_default()
            .insert(position);
        store.positions.insert(record.id(), position);
        store.records.push(IndexedRecord {
            search_document: record.search_document(),
            record: record.clone(),
        });

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileRecordRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .positions
            .get(&id)
            .map(|&position| store.records[position].record.clone()))
    }

    async fn list(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .records
            .iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|indexed| indexed.record.clone())
            .collect())
    }

    async fn search(
        &self,
        criteria: &SearchCriteria,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError> {
        let store = self.store.read().await;
        let limit = limit.max(0) as usize;

        if criteria.is_empty() {
            return Ok(store
                .records
                .iter()
                .take(limit)
                .map(|indexed| indexed.record.clone())
                .collect());
        }

        let mut matched: BTreeSet<usize> = BTreeSet::new();

        for tag in criteria.tags() {
            if let Some(positions) = store.tag_index.get(tag) {
                matched.extend(positions);
            }
        }

        for content_type in criteria.content_types() {
            if let Some(positions) = store.type_index.get(content_type) {
                matched.extend(positions);
            }
        }

        if let Some(text) = criteria.normalized_text() {
            matched.extend(
                store
                    .records
                    .iter()
                    .enumerate()
                    .filter(|(_, indexed)| indexed.search_document.contains(&text))
                    .map(|(position, _)| position),
            );
        }

        Ok(matched
            .into_iter()
            .take(limit)
            .map(|position| store.records[position].record.clone())
            .collect())
    }

    async fn aggregate_counts_by(
        &self,
        field: AggregateField,
        limit: Option<i64>,
    ) -> Result<Vec<ValueCount>, FileRecordRepositoryError> {
        let store = self.store.read().await;

        let index = match field {
            AggregateField::ContentType => &store.type_index,
            AggregateField::Tags => &store.tag_index,
        };

        let mut counts: Vec<ValueCount> = index
            .iter()
            .map(|(value, positions)| ValueCount::new(value.clone(), positions.len() as i64))
            .collect();
        sort_value_counts(&mut counts);

        if let Some(limit) = limit {
            counts.truncate(limit.max(0) as usize);
        }

        Ok(counts)
    }

    async fn count(&self) -> Result<i64, FileRecordRepositoryError> {
        Ok(self.store.read().await.records.len() as i64)
    }

    async fn count_ai_analyzed(&self) -> Result<i64, FileRecordRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .records
            .iter()
            .filter(|indexed| indexed.record.analysis().confidence() == Some(Confidence::High))
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewFileRecord;
    use crate::domain::value_objects::{AnalysisResult, TagSet};

    fn record(name: &str, content_type: &str, tags: &str, classification: &str) -> FileRecord {
        FileRecord::create(NewFileRecord {
            original_filename: name.to_string(),
            stored_name: format!("{}-{}", Uuid::new_v4(), name),
            storage_location: format!("/uploads/{}", name),
            size_bytes: 1,
            content_type: content_type.to_string(),
            analysis: AnalysisResult::try_from(serde_json::json!({
                "classification": classification
            }))
            .unwrap(),
            tags: TagSet::parse_comma_separated(tags),
            is_public: false,
            uploaded_by: None,
        })
    }

    async fn seeded() -> InMemoryFileRecordRepository {
        let repository = InMemoryFileRecordRepository::new();
        for r in [
            record("holiday.jpg", "image/jpeg", "x,travel", "Landscape photo"),
            record("budget.xlsx", "application/vnd.ms-excel", "finance", "Spreadsheet"),
            record("x-ray.png", "image/png", "medical", "Scan"),
            record("notes.txt", "text/plain", "x", "Meeting notes"),
        ] {
            repository.insert(&r).await.unwrap();
        }
        repository
    }

    fn names(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.original_filename()).collect()
    }

    #[tokio::test]
    async fn test_list_is_paginated_in_upload_order() {
        let repository = seeded().await;

        let page = repository.list(1, 2).await.unwrap();
        assert_eq!(names(&page), vec!["budget.xlsx", "x-ray.png"]);

        assert!(repository.list(10, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tag_only_search_returns_every_tagged_record() {
        let repository = seeded().await;
        let criteria = SearchCriteria::new(None, Some(vec!["x".to_string()]), None);

        let found = repository.search(&criteria, 100).await.unwrap();
        assert_eq!(names(&found), vec!["holiday.jpg", "notes.txt"]);
    }

    #[tokio::test]
    async fn test_search_unions_criteria() {
        let repository = seeded().await;
        let criteria = SearchCriteria::new(
            Some("SPREADSHEET".to_string()),
            Some(vec!["medical".to_string()]),
            Some(vec!["text/plain".to_string()]),
        );

        let found = repository.search(&criteria, 100).await.unwrap();
        assert_eq!(names(&found), vec!["budget.xlsx", "x-ray.png", "notes.txt"]);
    }

    #[tokio::test]
    async fn test_text_search_matches_filename_tags_and_analysis() {
        let repository = seeded().await;

        let by_name = SearchCriteria::new(Some("x-r".to_string()), None, None);
        assert_eq!(names(&repository.search(&by_name, 100).await.unwrap()), vec!["x-ray.png"]);

        let by_tag = SearchCriteria::new(Some("trav".to_string()), None, None);
        assert_eq!(names(&repository.search(&by_tag, 100).await.unwrap()), vec!["holiday.jpg"]);

        let by_analysis = SearchCriteria::new(Some("meeting".to_string()), None, None);
        assert_eq!(
            names(&repository.search(&by_analysis, 100).await.unwrap()),
            vec!["notes.txt"]
        );
    }

    #[tokio::test]
    async fn test_empty_search_returns_all_up_to_cap() {
        let repository = seeded().await;

        let all = repository.search(&SearchCriteria::default(), 100).await.unwrap();
        assert_eq!(all.len(), 4);

        let capped = repository.search(&SearchCriteria::default(), 3).await.unwrap();
        assert_eq!(capped.len(), 3);
    }

    #[tokio::test]
    async fn test_tag_rollup_counts_each_tag_independently() {
        let repository = InMemoryFileRecordRepository::new();
        repository.insert(&record("1", "text/plain", "a,b", "")).await.unwrap();
        repository.insert(&record("2", "text/plain", "a", "")).await.unwrap();

        let counts = repository
            .aggregate_counts_by(AggregateField::Tags, None)
            .await
            .unwrap();
        assert_eq!(counts, vec![ValueCount::new("a", 2), ValueCount::new("b", 1)]);

        let top = repository
            .aggregate_counts_by(AggregateField::Tags, Some(1))
            .await
            .unwrap();
        assert_eq!(top, vec![ValueCount::new("a", 2)]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repository = InMemoryFileRecordRepository::new();
        let r = record("1", "text/plain", "", "");
        repository.insert(&r).await.unwrap();
        assert!(repository.insert(&r).await.is_err());
    }
}
