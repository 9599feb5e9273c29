//! Users API.
//!
//! [`Users`] exposes the user endpoints of one [`Client`]. Every read
//! follows the same shape: build the query, GET a fixed path, decode the
//! response envelope and return the payload under the endpoint's key.
//!
//! Operations this client does not support yet return
//! [`ZendeskError::NotImplemented`] without touching the network.

use crate::client::Client;
use crate::context::Context;
use crate::envelope::{unwrap_envelope, wrap_envelope, Envelope};
use crate::error::ZendeskError;
use crate::models::{JobStatus, User, UserRelated};
use crate::params::QueryParams;

const USERS_PATH: &str = "/api/v2/users.json";
const SHOW_MANY_PATH: &str = "/api/v2/show_many.json";
const AUTOCOMPLETE_PATH: &str = "/api/v2/users/autocomplete.json";
const ME_PATH: &str = "/api/v2/users/me.json";

/// Envelope key for collections.
const PLURAL_KEY: &str = "users";
/// Envelope key for a single user.
const SINGULAR_KEY: &str = "user";
/// Envelope key for relation counts.
const RELATED_KEY: &str = "user_related";

fn user_path(id: u64) -> String {
    format!("/api/v2/users/{}.json", id)
}

fn related_path(id: u64) -> String {
    format!("/api/v2/users/{}/related.json", id)
}

/// Accessor for the users API, bound to a client and a context.
///
/// Cheap to create; make one per call site.
///
/// # Example
///
/// ```ignore
/// let ctx = Context::background().with_timeout(Duration::from_secs(5));
/// let users = client.users().with_context(ctx);
///
/// let me = users.me().await?;
/// let related = users.related(me.id.unwrap_or_default()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Users {
    client: Client,
    ctx: Context,
}

impl Users {
    pub(crate) fn new(client: Client, ctx: Context) -> Self {
        Self { client, ctx }
    }

    /// Returns a new accessor sharing the client but using `ctx`.
    ///
    /// The receiver keeps its own context.
    pub fn with_context(&self, ctx: Context) -> Self {
        Self::new(self.client.clone(), ctx)
    }

    /// The context requests from this accessor run under.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    async fn get_users(
        &self,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<Vec<User>, ZendeskError> {
        let envelope: Envelope = self.client.get(&self.ctx, path, query).await?;
        unwrap_envelope(envelope, PLURAL_KEY)
    }

    async fn get_user(&self, path: &str) -> Result<User, ZendeskError> {
        let envelope: Envelope = self.client.get(&self.ctx, path, None).await?;
        unwrap_envelope(envelope, SINGULAR_KEY)
    }

    /// Lists users.
    ///
    /// Returns the first page only; pagination is not followed.
    pub async fn list(&self) -> Result<Vec<User>, ZendeskError> {
        self.get_users(USERS_PATH, None).await
    }

    /// Fetches several users by ID in one request.
    ///
    /// An empty slice still sends the request, with an empty `ids`.
    pub async fn show_many(&self, ids: &[u64]) -> Result<Vec<User>, ZendeskError> {
        let query = QueryParams::new().with_ids(ids);
        self.get_users(SHOW_MANY_PATH, Some(query)).await
    }

    /// Fetches one user.
    pub async fn show(&self, id: u64) -> Result<User, ZendeskError> {
        self.get_user(&user_path(id)).await
    }

    /// Counts records related to a user, keyed by relation name.
    ///
    /// A response without `user_related` yields an empty map.
    pub async fn related(&self, id: u64) -> Result<UserRelated, ZendeskError> {
        let envelope: Envelope = self.client.get(&self.ctx, &related_path(id), None).await?;
        unwrap_envelope(envelope, RELATED_KEY)
    }

    /// Creates a user and returns it as stored by Zendesk.
    pub async fn create(&self, user: &User) -> Result<User, ZendeskError> {
        let body = wrap_envelope(SINGULAR_KEY, user)?;
        let envelope: Envelope = self.client.post(&self.ctx, USERS_PATH, &body).await?;
        unwrap_envelope(envelope, SINGULAR_KEY)
    }

    /// Deletes (deactivates) a user and returns the server's view of it,
    /// normally with `active` set to false.
    pub async fn delete(&self, id: u64) -> Result<User, ZendeskError> {
        let envelope: Envelope = self.client.delete(&self.ctx, &user_path(id)).await?;
        unwrap_envelope(envelope, SINGULAR_KEY)
    }

    /// Searches users by free text.
    pub async fn search_query(&self, query: &str) -> Result<Vec<User>, ZendeskError> {
        let params = QueryParams::new().with("query", query);
        self.get_users(AUTOCOMPLETE_PATH, Some(params)).await
    }

    /// Searches users by external ID.
    pub async fn search_external_id(&self, external_id: &str) -> Result<Vec<User>, ZendeskError> {
        let params = QueryParams::new().with("external_id", external_id);
        self.get_users(AUTOCOMPLETE_PATH, Some(params)).await
    }

    /// Users whose name starts with `name`.
    pub async fn autocomplete(&self, name: &str) -> Result<Vec<User>, ZendeskError> {
        let params = QueryParams::new().with("name", name);
        self.get_users(AUTOCOMPLETE_PATH, Some(params)).await
    }

    /// The authenticated user.
    pub async fn me(&self) -> Result<User, ZendeskError> {
        self.get_user(ME_PATH).await
    }

    // ========================================================================
    // Not yet supported
    // ========================================================================

    /// Merges the authenticated end-user into the account of `email`.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn merge(&self, _email: &str, _password: &str) -> Result<User, ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Merges one user into another, as an admin.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn merge_by_admin(
        &self,
        _base_user_id: u64,
        _merged_user_id: u64,
    ) -> Result<User, ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Creates users in a background job.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn create_many(&self, _users: &[User]) -> Result<JobStatus, ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Updates a user.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn update_user(&self, _id: u64) -> Result<User, ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Suspends a user.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn suspend(&self, _id: u64) -> Result<User, ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Sets a user's password, as an admin.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn set_password(&self, _id: u64, _password: &str) -> Result<(), ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }

    /// Changes a user's own password.
    ///
    /// Not implemented; always returns `ZendeskError::NotImplemented`.
    pub async fn change_password(&self, _id: u64, _password: &str) -> Result<(), ZendeskError> {
        Err(ZendeskError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn users_with(mock: &Arc<MockTransport>) -> Users {
        Client::with_transport("acme", mock.clone()).unwrap().users()
    }

    fn sample_user(id: u64, name: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "email": format!("{}@acme.com", name.to_lowercase())})
    }

    #[tokio::test]
    async fn test_list() {
        let mock = MockTransport::responding(json!({
            "users": [sample_user(1, "Ada"), sample_user(2, "Grace")],
            "next_page": null,
            "count": 2
        }));

        let users = users_with(&mock).list().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name.as_deref(), Some("Grace"));
        let request = mock.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "https://acme.zendesk.com/api/v2/users.json");
        assert_eq!(request.query, None);
    }

    #[tokio::test]
    async fn test_show_many_joins_ids() {
        let mock = MockTransport::responding(json!({"users": []}));

        users_with(&mock).show_many(&[1, 2, 3]).await.unwrap();

        let request = mock.last_request();
        assert_eq!(request.url, "https://acme.zendesk.com/api/v2/show_many.json");
        assert_eq!(request.query.unwrap().get("ids"), Some("1,2,3"));
    }

    #[tokio::test]
    async fn test_show_many_empty_still_requests() {
        let mock = MockTransport::responding(json!({"users": []}));

        let users = users_with(&mock).show_many(&[]).await.unwrap();

        assert!(users.is_empty());
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_request().query.unwrap().get("ids"), Some(""));
    }

    #[tokio::test]
    async fn test_show() {
        let mock = MockTransport::responding(json!({"user": sample_user(42, "Ada")}));

        let user = users_with(&mock).show(42).await.unwrap();

        assert_eq!(user.id, Some(42));
        assert_eq!(mock.last_request().url, "https://acme.zendesk.com/api/v2/users/42.json");
    }

    #[tokio::test]
    async fn test_related() {
        let mock = MockTransport::responding(json!({"user_related": {"tickets": 3}}));

        let related = users_with(&mock).related(42).await.unwrap();

        assert_eq!(related, UserRelated::from([("tickets".to_string(), 3)]));
        assert_eq!(
            mock.last_request().url,
            "https://acme.zendesk.com/api/v2/users/42/related.json"
        );
    }

    #[tokio::test]
    async fn test_related_missing_key_is_empty() {
        let mock = MockTransport::responding(json!({"something_else": {"tickets": 3}}));

        let related = users_with(&mock).related(42).await.unwrap();

        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn test_related_transport_error_passes_through() {
        let mock = MockTransport::failing(reqwest::StatusCode::NOT_FOUND, "{\"error\":\"RecordNotFound\"}");

        let err = users_with(&mock).related(42).await.unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_create_wraps_body() {
        let mock = MockTransport::responding(json!({"user": sample_user(7, "Sample")}));
        let mut user = User::new("Sample", "sample@acme.com");
        user.user_fields.insert("text_field".to_string(), json!("abc"));

        let created = users_with(&mock).create(&user).await.unwrap();

        assert_eq!(created.id, Some(7));
        let request = mock.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://acme.zendesk.com/api/v2/users.json");
        assert_eq!(
            request.body,
            Some(json!({"user": {
                "name": "Sample",
                "email": "sample@acme.com",
                "user_fields": {"text_field": "abc"}
            }}))
        );
    }

    #[tokio::test]
    async fn test_delete_returns_server_state() {
        let mock = MockTransport::responding(json!({"user": {"id": 9, "active": false}}));

        let deleted = users_with(&mock).delete(9).await.unwrap();

        assert_eq!(deleted.active, Some(false));
        assert!(!deleted.is_active());
        let request = mock.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url, "https://acme.zendesk.com/api/v2/users/9.json");
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_autocomplete_family_query_keys() {
        let mock = MockTransport::responding(json!({"users": [sample_user(1, "Ada")]}));
        let users = users_with(&mock);

        users.search_query("ada lovelace").await.unwrap();
        users.search_external_id("crm-17").await.unwrap();
        users.autocomplete("Ad").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        for request in &requests {
            assert_eq!(request.url, "https://acme.zendesk.com/api/v2/users/autocomplete.json");
        }
        assert_eq!(requests[0].query.as_ref().unwrap().get("query"), Some("ada lovelace"));
        assert_eq!(requests[1].query.as_ref().unwrap().get("external_id"), Some("crm-17"));
        assert_eq!(requests[2].query.as_ref().unwrap().get("name"), Some("Ad"));
    }

    #[tokio::test]
    async fn test_me() {
        let mock = MockTransport::responding(json!({"user": sample_user(1, "Ada")}));

        let me = users_with(&mock).me().await.unwrap();

        assert_eq!(me.display_name(), "Ada");
        assert_eq!(mock.last_request().url, "https://acme.zendesk.com/api/v2/users/me.json");
    }

    #[tokio::test]
    async fn test_stubs_return_not_implemented_without_io() {
        let mock = MockTransport::responding(json!({"user": sample_user(1, "Ada")}));
        let users = users_with(&mock);

        for _ in 0..2 {
            assert!(users.merge("a@acme.com", "pw").await.unwrap_err().is_not_implemented());
            assert!(users.merge_by_admin(1, 2).await.unwrap_err().is_not_implemented());
            assert!(users.create_many(&[User::default()]).await.unwrap_err().is_not_implemented());
            assert!(users.update_user(1).await.unwrap_err().is_not_implemented());
            assert!(users.suspend(1).await.unwrap_err().is_not_implemented());
            assert!(users.set_password(1, "pw").await.unwrap_err().is_not_implemented());
            assert!(users.change_password(1, "pw").await.unwrap_err().is_not_implemented());
        }

        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_with_context_leaves_original_untouched() {
        let mock = MockTransport::responding(json!({"users": []}));
        let users = users_with(&mock);
        let cancelled = Context::background();
        cancelled.cancel();

        let scoped = users.with_context(cancelled);

        assert!(matches!(scoped.list().await, Err(ZendeskError::Cancelled)));
        assert!(users.context().err().is_none());
        assert!(users.list().await.is_ok());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_unrelated_envelope_keys_are_ignored() {
        let mock = MockTransport::responding(json!({"user": sample_user(5, "Ada"), "users": "junk"}));

        let user = users_with(&mock).show(5).await.unwrap();

        assert_eq!(user.id, Some(5));
    }
}
