use std::sync::Arc;

use chrono::Utc;

use super::model::{ContentDetail, ContentInput, ContentSummary, NewContent};
use super::validate::{validate_category_filter, validate_content_fields, DateRange};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::ContentRepository;

/// Content use cases: CRUD, substring search and filtering.
#[derive(Clone)]
pub struct ContentService {
    repository: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(repository: Arc<dyn ContentRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> ServiceResult<Vec<ContentSummary>> {
        tracing::info!("listing contents");
        let contents = self.repository.find_all().await?;
        Ok(contents.into_iter().map(ContentSummary::from).collect())
    }

    pub async fn create(&self, input: ContentInput) -> ServiceResult<ContentDetail> {
        tracing::info!(category = %input.category, "creating content");
        validate_content_fields(&input)?;

        let saved = self
            .repository
            .insert(NewContent {
                category: input.category,
                body: input.body,
                media: input.media,
                created_time: Utc::now(),
            })
            .await?;

        tracing::info!(content_id = saved.id, "content created");
        Ok(saved.into())
    }

    pub async fn detail(&self, id: i64) -> ServiceResult<ContentDetail> {
        tracing::info!(content_id = id, "fetching content");
        self.repository
            .find_by_id(id)
            .await?
            .map(ContentDetail::from)
            .ok_or(ServiceError::NotFound(id))
    }

    /// Validation runs before the lookup, so invalid input on a missing id
    /// reports the validation failure.
    pub async fn update(&self, id: i64, input: ContentInput) -> ServiceResult<ContentDetail> {
        tracing::info!(content_id = id, category = %input.category, "updating content");
        validate_content_fields(&input)?;

        let updated = self
            .repository
            .update(id, input, Utc::now())
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        tracing::info!(content_id = id, "deleting content");
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }
        tracing::info!(content_id = id, "content deleted");
        Ok(())
    }

    pub async fn search(&self, query: &str) -> ServiceResult<Vec<ContentSummary>> {
        tracing::info!(query, "searching contents");
        let contents = self.repository.find_by_body_containing(query).await?;
        Ok(contents.into_iter().map(ContentSummary::from).collect())
    }

    pub async fn filter_by_category(&self, category: &str) -> ServiceResult<Vec<ContentSummary>> {
        tracing::info!(category, "filtering contents by category");
        validate_category_filter(category)?;

        let contents = self.repository.find_by_category(category).await?;
        Ok(contents.into_iter().map(ContentSummary::from).collect())
    }

    pub async fn filter_by_created_time(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ServiceResult<Vec<ContentSummary>> {
        tracing::info!(?start_date, ?end_date, "filtering contents by created time");
        let range = DateRange::resolve(start_date, end_date)?;

        let contents = self
            .repository
            .find_by_created_time_between(range.start, range.end)
            .await?;
        Ok(contents.into_iter().map(ContentSummary::from).collect())
    }

    /// Verifies the content store is reachable.
    pub async fn ping(&self) -> ServiceResult<()> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::content::validate::ValidationError;
    use crate::repository::memory::InMemoryContentRepository;

    fn input(category: &str, body: &str, media: &str) -> ContentInput {
        ContentInput {
            category: category.to_string(),
            body: body.to_string(),
            media: media.to_string(),
        }
    }

    fn service() -> (ContentService, Arc<InMemoryContentRepository>) {
        let repository = Arc::new(InMemoryContentRepository::new());
        (ContentService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn created_content_is_retrievable() {
        let (service, _) = service();

        let created = service
            .create(input("Technology", "Rust is amazing!", "https://example.com/image.png"))
            .await
            .unwrap();
        let fetched = service.detail(created.content_id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.category, "Technology");
        assert_eq!(fetched.body, "Rust is amazing!");
        assert_eq!(fetched.media, "https://example.com/image.png");
        assert_eq!(fetched.created_time, fetched.updated_time);
    }

    #[tokio::test]
    async fn overlong_body_is_rejected_and_not_stored() {
        let (service, repository) = service();

        let err = service
            .create(input("Tech", &"a".repeat(501), "/a.png"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::BodyTooLong)
        ));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_on_create() {
        let (service, repository) = service();

        let err = service.create(input("", "", "")).await.unwrap_err();

        assert_eq!(err.to_string(), "Category must not be blank");
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn missing_detail_is_not_found() {
        let (service, _) = service();
        let err = service.detail(999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(999)));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_created_time() {
        let (service, _) = service();
        let created = service
            .create(input("Tech", "Original", "/original.png"))
            .await
            .unwrap();

        let updated = service
            .update(created.content_id, input("Science", "Updated", "/updated.png"))
            .await
            .unwrap();

        assert_eq!(updated.content_id, created.content_id);
        assert_eq!(updated.category, "Science");
        assert_eq!(updated.body, "Updated");
        assert_eq!(updated.media, "/updated.png");
        assert_eq!(updated.created_time, created.created_time);
        assert!(updated.updated_time >= created.updated_time);
        assert_eq!(service.detail(created.content_id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let (service, _) = service();
        let err = service
            .update(42, input("Tech", "Body", "/a.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(42)));
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_unchanged() {
        let (service, _) = service();
        let created = service
            .create(input("Tech", "Original", "/original.png"))
            .await
            .unwrap();

        let err = service
            .update(created.content_id, input("Tech", " ", "/updated.png"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::BlankBody)
        ));
        assert_eq!(service.detail(created.content_id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let (service, _) = service();
        let created = service.create(input("Tech", "Body", "/a.png")).await.unwrap();

        service.delete(created.content_id).await.unwrap();
        let err = service.delete(created.content_id).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(id) if id == created.content_id));
        assert_eq!(
            err.to_string(),
            format!("Content with id {} not found", created.content_id)
        );
    }

    #[tokio::test]
    async fn list_returns_storage_order() {
        let (service, _) = service();
        service.create(input("Software", "John Doe's log", "/image.jpg")).await.unwrap();
        service.create(input("Network", "Jane Smith's announce", "/tech.jpg")).await.unwrap();

        let list = service.list().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].category, "Software");
        assert_eq!(list[1].category, "Network");
        assert!(list[0].content_id < list[1].content_id);
    }

    #[tokio::test]
    async fn search_matches_substrings_in_order() {
        let (service, _) = service();
        service.create(input("Tech", "Rust ownership", "/a.png")).await.unwrap();
        service.create(input("Tech", "Tokio runtimes", "/b.png")).await.unwrap();
        service.create(input("Tech", "Trust the borrow checker", "/c.png")).await.unwrap();

        let found = service.search("rust").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, "Trust the borrow checker");

        let found = service.search("Rust").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].body, "Rust ownership");

        assert_eq!(service.search("").await.unwrap().len(), 3);
        assert!(service.search("python").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_filter_is_exact() {
        let (service, _) = service();
        service.create(input("Tech", "one", "/a.png")).await.unwrap();
        service.create(input("Technology", "two", "/b.png")).await.unwrap();
        service.create(input("Tech", "three", "/c.png")).await.unwrap();

        let found = service.filter_by_category("Tech").await.unwrap();
        let bodies: Vec<_> = found.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, ["one", "three"]);
    }

    #[tokio::test]
    async fn empty_category_filter_is_rejected() {
        let (service, _) = service();
        let err = service.filter_by_category("").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid category string");
    }

    #[tokio::test]
    async fn created_time_filter_uses_inclusive_day_bounds() {
        let repository = Arc::new(InMemoryContentRepository::new());
        let service = ContentService::new(repository.clone());

        let stamps = [
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 5, 12, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 10, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap(),
        ];
        for (index, created_time) in stamps.into_iter().enumerate() {
            repository
                .insert(NewContent {
                    category: "Tech".to_string(),
                    body: format!("post {index}"),
                    media: "/a.png".to_string(),
                    created_time,
                })
                .await
                .unwrap();
        }

        let found = service
            .filter_by_created_time(Some("2025-01-01"), Some("2025-01-10"))
            .await
            .unwrap();
        let bodies: Vec<_> = found.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, ["post 1", "post 2", "post 3"]);

        let single_day = service
            .filter_by_created_time(None, Some("2025-01-05"))
            .await
            .unwrap();
        assert_eq!(single_day.len(), 1);
        assert_eq!(single_day[0].body, "post 2");
    }

    #[tokio::test]
    async fn created_time_filter_requires_a_date() {
        let (service, _) = service();
        let err = service.filter_by_created_time(None, None).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::MissingDateRange)
        ));
    }
}
