//! Agenda template service client
//!
//! One method per remote operation. Methods returning [`ApiResponse`] hand
//! back error statuses as-is; the `*_model` methods decode the body into
//! typed resources and map failures to not-found errors.

use super::http::{method_from_verb, ApiResponse, HttpTransport, Transport};
use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::jsonapi::Parser;
use crate::jsonapi::TIMESTAMP_FORMAT;
use crate::remote::{AgendaTemplate, SuggestedGoal};
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Author details merged into template create/update payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub soapbox_user_id: i64,
}

impl Author {
    fn merge_into(&self, data: &mut Map<String, Value>) {
        data.insert("author-name".to_string(), json!(self.name));
        data.insert("author-email".to_string(), json!(self.email));
        data.insert("author-avatar".to_string(), json!(self.avatar));
        data.insert("soapbox-user-id".to_string(), json!(self.soapbox_user_id));
    }
}

/// Append `query` (already encoded, without `?`) to `base`
fn with_query(base: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", base, q),
        _ => base,
    }
}

/// Encode `value` as a single path segment.
/// Empty and dot segments are rejected, since URL joining would resolve them
/// against the base path. Any `%` is escaped, so `%2E%2E` passes through as text.
fn path_segment(value: &str) -> Result<String> {
    if matches!(value, "" | "." | "..") {
        return Err(ClientError::InvalidSlug(value.to_string()));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Client for the agenda template service
#[derive(Clone)]
pub struct AgendaTemplateClient<T = HttpTransport> {
    transport: T,
}

impl AgendaTemplateClient<HttpTransport> {
    /// Create a client over HTTP from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> AgendaTemplateClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the response whatever its status.
    /// Unrecognized verbs are sent as GET, and GET requests carry no body.
    pub async fn request(&self, verb: &str, endpoint: &str, data: Option<Value>) -> Result<ApiResponse> {
        let method = method_from_verb(verb);
        let body = if method == Method::GET { None } else { data };
        self.transport.send(method, endpoint, body.as_ref()).await
    }

    // =========================================================================
    // Agenda templates
    // =========================================================================

    fn template_path(user_id: i64, soapbox_id: i64, slug_or_id: &str) -> Result<String> {
        Ok(format!(
            "custom-templates/{}?soapbox-id={}&soapbox-user-id={}",
            path_segment(slug_or_id)?,
            soapbox_id,
            user_id
        ))
    }

    /// Fetch an agenda template by slug or id and decode it.
    /// Any failure to get a successful response is reported as not found.
    pub async fn get_agenda_template_model(
        &self,
        user_id: i64,
        soapbox_id: i64,
        slug_or_id: &str,
    ) -> Result<AgendaTemplate> {
        let path = Self::template_path(user_id, soapbox_id, slug_or_id).map_err(|e| {
            tracing::debug!("Agenda template lookup refused: {}", e);
            ClientError::AgendaTemplateNotFound
        })?;

        let response = match self.transport.send(Method::GET, &path, None).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                tracing::debug!("Agenda template {} returned {}", slug_or_id, response.status);
                return Err(ClientError::AgendaTemplateNotFound);
            }
            Err(e) => {
                tracing::debug!("Agenda template {} unavailable: {}", slug_or_id, e);
                return Err(ClientError::AgendaTemplateNotFound);
            }
        };

        Ok(Parser::new(&response.body)?.agenda_template())
    }

    pub async fn get_agenda_template(
        &self,
        user_id: i64,
        soapbox_id: i64,
        slug_or_id: &str,
    ) -> Result<ApiResponse> {
        let path = Self::template_path(user_id, soapbox_id, slug_or_id)?;
        self.request("get", &path, None).await
    }

    /// List templates. `query` is an encoded query string such as
    /// `filter[type]=one-on-one`.
    pub async fn get_agenda_templates(
        &self,
        user_id: i64,
        soapbox_id: i64,
        query: Option<&str>,
    ) -> Result<ApiResponse> {
        let scope = format!("soapbox-id={}&soapbox-user-id={}", soapbox_id, user_id);
        let path = match query {
            Some(q) if !q.is_empty() => format!("custom-templates?{}&{}", q, scope),
            _ => format!("custom-templates?{}", scope),
        };
        self.request("get", &path, None).await
    }

    pub async fn create_agenda_template(
        &self,
        author: &Author,
        soapbox_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        author.merge_into(&mut data);
        data.insert("soapbox-id".to_string(), json!(soapbox_id));
        self.request("post", "agenda-templates", Some(Value::Object(data))).await
    }

    pub async fn update_agenda_template(
        &self,
        author: &Author,
        agenda_template_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        author.merge_into(&mut data);
        let path = format!("agenda-templates/{}", agenda_template_id);
        self.request("put", &path, Some(Value::Object(data))).await
    }

    pub async fn delete_agenda_template(&self, user_id: i64, agenda_template_id: i64) -> Result<ApiResponse> {
        let path = format!("agenda-templates/{}", agenda_template_id);
        self.request("delete", &path, Some(json!({ "soapbox-user-id": user_id })))
            .await
    }

    // =========================================================================
    // Items and sections
    // =========================================================================

    pub async fn create_agenda_template_item(
        &self,
        user_id: i64,
        agenda_template_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        data.insert("soapbox-user-id".to_string(), json!(user_id));
        let path = format!("agenda-templates/{}/items", agenda_template_id);
        self.request("post", &path, Some(Value::Object(data))).await
    }

    pub async fn update_agenda_template_item(
        &self,
        user_id: i64,
        item_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        data.insert("soapbox-user-id".to_string(), json!(user_id));
        let path = format!("items/{}", item_id);
        self.request("put", &path, Some(Value::Object(data))).await
    }

    pub async fn delete_agenda_template_item(&self, user_id: i64, item_id: i64) -> Result<ApiResponse> {
        let path = format!("items/{}", item_id);
        self.request("delete", &path, Some(json!({ "soapbox-user-id": user_id })))
            .await
    }

    pub async fn create_agenda_template_section(
        &self,
        user_id: i64,
        agenda_template_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        data.insert("soapbox-user-id".to_string(), json!(user_id));
        let path = format!("agenda-templates/{}/sections", agenda_template_id);
        self.request("post", &path, Some(Value::Object(data))).await
    }

    pub async fn update_agenda_template_section(
        &self,
        user_id: i64,
        section_id: i64,
        mut data: Map<String, Value>,
    ) -> Result<ApiResponse> {
        data.insert("soapbox-user-id".to_string(), json!(user_id));
        let path = format!("sections/{}", section_id);
        self.request("put", &path, Some(Value::Object(data))).await
    }

    pub async fn delete_agenda_template_section(&self, user_id: i64, section_id: i64) -> Result<ApiResponse> {
        let path = format!("sections/{}", section_id);
        self.request("delete", &path, Some(json!({ "soapbox-user-id": user_id })))
            .await
    }

    /// Items added or updated since `since`, as the raw JSON array
    pub async fn get_recently_added_or_updated_items(&self, since: NaiveDateTime) -> Result<Value> {
        let date = since.format(TIMESTAMP_FORMAT).to_string();
        let path = format!("items?date={}", urlencoding::encode(&date));

        match self.transport.send(Method::GET, &path, None).await {
            Ok(response) if response.is_success() => response.json(),
            Ok(_) | Err(_) => Err(ClientError::ItemNotFound),
        }
    }

    // =========================================================================
    // Suggested goals and departments
    // =========================================================================

    /// Fetch a suggested goal and decode it. Pass `include=milestones` in
    /// `query` to resolve milestones.
    pub async fn get_suggested_goal_model(&self, suggested_goal_id: i64, query: Option<&str>) -> Result<SuggestedGoal> {
        let response = self.get_suggested_goal(suggested_goal_id, query).await?;

        if response.status != 200 {
            return Err(ClientError::GoalNotFound);
        }

        Ok(Parser::new(&response.body)?.suggested_goal())
    }

    pub async fn get_suggested_goal(&self, suggested_goal_id: i64, query: Option<&str>) -> Result<ApiResponse> {
        let path = with_query(format!("suggested-goals/{}", suggested_goal_id), query);
        self.request("get", &path, None).await
    }

    pub async fn get_suggested_goals(&self, department_id: i64, query: Option<&str>) -> Result<ApiResponse> {
        let path = with_query(format!("departments/{}/suggested-goals", department_id), query);
        self.request("get", &path, None).await
    }

    pub async fn get_departments(&self, query: Option<&str>) -> Result<ApiResponse> {
        let path = with_query("departments".to_string(), query);
        self.request("get", &path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and replies with a canned response
    struct Recording {
        reply: Option<ApiResponse>,
        seen: Mutex<Vec<(Method, String, Option<Value>)>>,
    }

    impl Recording {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Some(ApiResponse::new(status, body)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for Recording {
        async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
            self.seen
                .lock()
                .unwrap()
                .push((method, path.to_string(), body.cloned()));
            self.reply
                .clone()
                .ok_or_else(|| ClientError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unknown_verb_is_sent_as_get_without_body() {
        let client = AgendaTemplateClient::new(Recording::replying(200, "{}"));
        client.request("fetch", "departments", Some(json!({"a": 1}))).await.unwrap();

        let seen = client.transport().seen.lock().unwrap();
        assert_eq!(seen[0], (Method::GET, "departments".to_string(), None));
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_template_not_found() {
        let client = AgendaTemplateClient::new(Recording::unreachable());
        let err = client.get_agenda_template_model(1, 10, "scrum-meeting").await.unwrap_err();
        assert!(matches!(err, ClientError::AgendaTemplateNotFound));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_for_raw_requests() {
        let client = AgendaTemplateClient::new(Recording::unreachable());
        let err = client.get_departments(None).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_slug_is_path_encoded() {
        let client = AgendaTemplateClient::new(Recording::replying(404, ""));
        let _ = client.get_agenda_template(1, 10, "a b/c").await.unwrap();

        let seen = client.transport().seen.lock().unwrap();
        assert_eq!(seen[0].1, "custom-templates/a%20b%2Fc?soapbox-id=10&soapbox-user-id=1");
    }

    #[tokio::test]
    async fn test_dot_slugs_are_refused_before_sending() {
        let client = AgendaTemplateClient::new(Recording::replying(200, "{}"));

        for slug in [".", "..", ""] {
            let err = client.get_agenda_template(1, 10, slug).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidSlug(_)), "{:?} was accepted", slug);

            let err = client.get_agenda_template_model(1, 10, slug).await.unwrap_err();
            assert!(matches!(err, ClientError::AgendaTemplateNotFound));
        }
        assert!(client.transport().seen.lock().unwrap().is_empty());

        let path = AgendaTemplateClient::<Recording>::template_path(1, 10, "...").unwrap();
        let joined = url::Url::parse("http://agenda.test/api/").unwrap().join(&path).unwrap();
        assert_eq!(joined.path(), "/api/custom-templates/...");

        let path = AgendaTemplateClient::<Recording>::template_path(1, 10, "%2e%2E").unwrap();
        let joined = url::Url::parse("http://agenda.test/api/").unwrap().join(&path).unwrap();
        assert_eq!(joined.path(), "/api/custom-templates/%252e%252E");
    }

    #[tokio::test]
    async fn test_author_fields_are_merged() {
        let client = AgendaTemplateClient::new(Recording::replying(201, "{}"));
        let author = Author {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar: "ada.png".to_string(),
            soapbox_user_id: 1,
        };
        let mut data = Map::new();
        data.insert("name".to_string(), json!("Standup"));

        client.create_agenda_template(&author, 10, data).await.unwrap();

        let seen = client.transport().seen.lock().unwrap();
        let body = seen[0].2.as_ref().unwrap();
        assert_eq!(seen[0].0, Method::POST);
        assert_eq!(body["author-name"], "Ada");
        assert_eq!(body["soapbox-user-id"], 1);
        assert_eq!(body["soapbox-id"], 10);
        assert_eq!(body["name"], "Standup");
    }

    #[tokio::test]
    async fn test_goal_requires_exactly_200() {
        let client = AgendaTemplateClient::new(Recording::replying(204, ""));
        let err = client.get_suggested_goal_model(1, None).await.unwrap_err();
        assert!(matches!(err, ClientError::GoalNotFound));
    }
}
