//! Link lifecycle: creation with code allocation, listing, update, delete.

use crate::domain::entities::{CurrentUser, Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::reachability::ReachabilityChecker;
use crate::utils::code_generator::{
    MAX_ATTEMPTS_PER_LENGTH, MAX_CODE_LENGTH, generate_code, validate_custom_code,
};
use crate::utils::target_url::prepare_target_url;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

/// Validated input for creating a link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub target_url: String,
    pub custom_code: Option<String>,
    pub title: Option<String>,
    pub tags: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    reachability: Arc<dyn ReachabilityChecker>,
    base_url: String,
    code_length: usize,
}

impl LinkService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        reachability: Arc<dyn ReachabilityChecker>,
        base_url: String,
        code_length: usize,
    ) -> Self {
        Self {
            links,
            reachability,
            base_url,
            code_length,
        }
    }

    /// Builds the public short URL for a link.
    pub fn short_url(&self, link: &Link) -> String {
        format!("{}/{}", self.base_url, link.short_code)
    }

    /// Creates a link, returning it together with a `created` flag.
    ///
    /// The flag is `false` when the same owner already shortened the same
    /// target without a custom code, in which case the existing link is
    /// returned instead of minting a second code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for malformed or unreachable targets, a
    ///   malformed custom code, or an expiry in the past
    /// - [`AppError::Conflict`] when a custom code is already taken
    pub async fn create(
        &self,
        user: &CurrentUser,
        input: CreateLink,
    ) -> Result<(Link, bool), AppError> {
        let target_url = prepare_target_url(&input.target_url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "target_url": input.target_url })))?;

        if !self.reachability.is_reachable(&target_url).await {
            return Err(AppError::bad_request(
                "Target URL is not reachable",
                json!({ "target_url": target_url }),
            ));
        }

        if let Some(expires_at) = input.expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::bad_request(
                    "Expiry must be in the future",
                    json!({ "expires_at": expires_at.to_rfc3339() }),
                ));
            }
        }

        if let Some(custom_code) = &input.custom_code {
            validate_custom_code(custom_code)?;

            if self.links.find_by_code(custom_code).await?.is_some() {
                return Err(AppError::conflict(
                    "Short code is already taken",
                    json!({ "short_code": custom_code }),
                ));
            }

            let link = self
                .links
                .insert(NewLink {
                    user_id: user.id,
                    short_code: custom_code.clone(),
                    target_url,
                    title: input.title,
                    tags: input.tags,
                    expires_at: input.expires_at,
                })
                .await?;

            return Ok((link, true));
        }

        if let Some(existing) = self
            .links
            .find_by_owner_and_target(user.id, &target_url)
            .await?
        {
            return Ok((existing, false));
        }

        let link = self
            .insert_with_generated_code(user.id, target_url, input)
            .await?;

        Ok((link, true))
    }

    /// Allocates a random code, widening by one character after exhausting
    /// the attempt budget at the current length.
    ///
    /// The pre-insert lookup is an optimization; a concurrent claim of the
    /// same code surfaces as a Conflict from the insert and counts as a
    /// failed attempt.
    async fn insert_with_generated_code(
        &self,
        user_id: i64,
        target_url: String,
        input: CreateLink,
    ) -> Result<Link, AppError> {
        let mut length = self.code_length.clamp(3, MAX_CODE_LENGTH);

        loop {
            for _ in 0..MAX_ATTEMPTS_PER_LENGTH {
                let code = generate_code(length);

                if self.links.find_by_code(&code).await?.is_some() {
                    continue;
                }

                match self
                    .links
                    .insert(NewLink {
                        user_id,
                        short_code: code,
                        target_url: target_url.clone(),
                        title: input.title.clone(),
                        tags: input.tags.clone(),
                        expires_at: input.expires_at,
                    })
                    .await
                {
                    Ok(link) => return Ok(link),
                    Err(AppError::Conflict { .. }) => continue,
                    Err(e) => return Err(e),
                }
            }

            if length >= MAX_CODE_LENGTH {
                return Err(AppError::internal(
                    "Could not allocate a unique short code",
                    json!({ "max_length": MAX_CODE_LENGTH }),
                ));
            }
            length += 1;
            tracing::warn!(length, "short code space congested, expanding length");
        }
    }

    pub async fn list(
        &self,
        user: &CurrentUser,
        skip: i64,
        limit: i64,
        search: Option<String>,
        active_only: bool,
    ) -> Result<Vec<Link>, AppError> {
        self.links
            .list_for_owner(user.id, skip, limit, search, active_only)
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids and for links owned
    /// by someone else.
    pub async fn get(&self, user: &CurrentUser, id: i64) -> Result<Link, AppError> {
        self.links
            .find_by_id_for_owner(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        id: i64,
        patch: LinkPatch,
    ) -> Result<Link, AppError> {
        self.links.update(id, user.id, patch).await
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), AppError> {
        if !self.links.delete(id, user.id).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::reachability::MockReachabilityChecker;
    use mockall::predicate::eq;

    fn reachable() -> MockReachabilityChecker {
        let mut checker = MockReachabilityChecker::new();
        checker.expect_is_reachable().returning(|_| true);
        checker
    }

    fn service(links: MockLinkRepository, checker: MockReachabilityChecker) -> LinkService {
        LinkService::new(
            Arc::new(links),
            Arc::new(checker),
            "https://sho.rt".to_string(),
            6,
        )
    }

    fn current_user() -> CurrentUser {
        CurrentUser {
            id: 7,
            username: "alice".to_string(),
            is_admin: false,
        }
    }

    fn input(target: &str) -> CreateLink {
        CreateLink {
            target_url: target.to_string(),
            custom_code: None,
            title: None,
            tags: None,
            expires_at: None,
        }
    }

    fn link_from(new_link: &NewLink) -> Link {
        let now = Utc::now();
        Link {
            id: 1,
            user_id: new_link.user_id,
            short_code: new_link.short_code.clone(),
            target_url: new_link.target_url.clone(),
            title: new_link.title.clone(),
            tags: new_link.tags.clone(),
            is_active: true,
            expires_at: new_link.expires_at,
            clicks_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_generates_code_and_inserts() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_owner_and_target().returning(|_, _| Ok(None));
        links.expect_find_by_code().returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|new_link: &NewLink| {
                new_link.short_code.len() == 6 && new_link.target_url == "https://example.com/"
            })
            .returning(|new_link| Ok(link_from(&new_link)));

        let (link, created) = service(links, reachable())
            .create(&current_user(), input("https://example.com"))
            .await
            .unwrap();

        assert!(created);
        assert_eq!(link.user_id, 7);
        assert_eq!(link.short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_create_prepends_https_to_bare_domains() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_owner_and_target().returning(|_, _| Ok(None));
        links.expect_find_by_code().returning(|_| Ok(None));
        links
            .expect_insert()
            .withf(|new_link: &NewLink| new_link.target_url == "https://example.com/docs")
            .returning(|new_link| Ok(link_from(&new_link)));

        let (link, _) = service(links, reachable())
            .create(&current_user(), input("example.com/docs"))
            .await
            .unwrap();

        assert_eq!(link.target_url, "https://example.com/docs");
    }

    #[tokio::test]
    async fn test_create_dedupes_repeat_targets() {
        let mut links = MockLinkRepository::new();
        let existing = link_from(&NewLink {
            user_id: 7,
            short_code: "aBc234".to_string(),
            target_url: "https://example.com/".to_string(),
            title: None,
            tags: None,
            expires_at: None,
        });
        links
            .expect_find_by_owner_and_target()
            .with(eq(7), eq("https://example.com/"))
            .returning(move |_, _| Ok(Some(existing.clone())));
        links.expect_insert().times(0);

        let (link, created) = service(links, reachable())
            .create(&current_user(), input("https://example.com"))
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(link.short_code, "aBc234");
    }

    #[tokio::test]
    async fn test_create_rejects_unreachable_target() {
        let mut checker = MockReachabilityChecker::new();
        checker.expect_is_reachable().returning(|_| false);
        let mut links = MockLinkRepository::new();
        links.expect_insert().times(0);

        let result = service(links, checker)
            .create(&current_user(), input("https://example.com"))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_unsupported_scheme() {
        let result = service(MockLinkRepository::new(), MockReachabilityChecker::new())
            .create(&current_user(), input("ftp://example.com/file"))
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_past_expiry() {
        let mut request = input("https://example.com");
        request.expires_at = Some(Utc::now() - chrono::Duration::hours(1));

        let result = service(MockLinkRepository::new(), reachable())
            .create(&current_user(), request)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_with_custom_code_conflicts_when_taken() {
        let mut links = MockLinkRepository::new();
        let taken = link_from(&NewLink {
            user_id: 3,
            short_code: "promo".to_string(),
            target_url: "https://other.example/".to_string(),
            title: None,
            tags: None,
            expires_at: None,
        });
        links
            .expect_find_by_code()
            .with(eq("promo"))
            .returning(move |_| Ok(Some(taken.clone())));
        links.expect_insert().times(0);

        let mut request = input("https://example.com");
        request.custom_code = Some("promo".to_string());

        let result = service(links, reachable()).create(&current_user(), request).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_with_malformed_custom_code_is_validation_error() {
        let mut request = input("https://example.com");
        request.custom_code = Some("no spaces!".to_string());

        let result = service(MockLinkRepository::new(), reachable())
            .create(&current_user(), request)
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_generation_expands_length_after_exhausting_attempts() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_owner_and_target().returning(|_, _| Ok(None));
        // Every 6-character candidate is taken; the first 7-character one is
        // free.
        links
            .expect_find_by_code()
            .returning(|code| {
                if code.len() == 6 {
                    Ok(Some(link_from(&NewLink {
                        user_id: 1,
                        short_code: code.to_string(),
                        target_url: "https://busy.example/".to_string(),
                        title: None,
                        tags: None,
                        expires_at: None,
                    })))
                } else {
                    Ok(None)
                }
            });
        links
            .expect_insert()
            .withf(|new_link: &NewLink| new_link.short_code.len() == 7)
            .returning(|new_link| Ok(link_from(&new_link)));

        let (link, _) = service(links, reachable())
            .create(&current_user(), input("https://example.com"))
            .await
            .unwrap();

        assert_eq!(link.short_code.len(), 7);
    }

    #[tokio::test]
    async fn test_delete_missing_link_is_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_delete().returning(|_, _| Ok(false));

        let result = service(links, MockReachabilityChecker::new())
            .delete(&current_user(), 99)
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_short_url_joins_base_and_code() {
        let link = link_from(&NewLink {
            user_id: 7,
            short_code: "aBc234".to_string(),
            target_url: "https://example.com/".to_string(),
            title: None,
            tags: None,
            expires_at: None,
        });

        let service = service(MockLinkRepository::new(), MockReachabilityChecker::new());

        assert_eq!(service.short_url(&link), "https://sho.rt/aBc234");
    }
}
