//! HTTP client for the list API.
//!
//! Mutations are form-encoded POSTs that hand back the raw response; nothing
//! here looks at the status code. The list load parses the body as JSON and
//! returns it untouched.

use log::debug;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config;
use crate::error::ClientError;
use crate::models::form::{AddItemForm, CheckItemForm, RemoveItemForm};
use crate::models::list::GroceryList;

pub const ADD_PATH: &str = "/api/add";
pub const REMOVE_PATH: &str = "/api/remove";
pub const CHECK_PATH: &str = "/api/check";
pub const LIST_PATH: &str = "/api/list";

/// Data handed to the list page on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub list: Value,
}

/// Client for the list API.
///
/// An empty base URL means same-origin: paths are resolved against the page
/// origin given to [`ListClient::with_origin`]. Without one, every request
/// fails with [`ClientError::InvalidBaseUrl`].
#[derive(Debug, Clone)]
pub struct ListClient {
    http: Client,
    base_url: String,
    origin: Option<Url>,
}

impl ListClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            origin: None,
        }
    }

    /// Sets the origin of the page the client runs in. Relative base URLs,
    /// including the empty same-origin one, are resolved against it.
    pub fn with_origin(mut self, origin: &str) -> Result<Self, ClientError> {
        let origin = Url::parse(origin).map_err(|e| ClientError::InvalidBaseUrl {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;
        self.origin = Some(origin);
        Ok(self)
    }

    /// Client whose base URL comes from the execution context and
    /// `PUBLIC_BASE_URL`.
    pub fn from_env() -> Self {
        Self::new(config::base_url_from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let parsed = match &self.origin {
            Some(origin) => origin.join(&url),
            None => Url::parse(&url),
        };
        parsed.map_err(|e| ClientError::InvalidBaseUrl {
            url,
            reason: e.to_string(),
        })
    }

    fn form_request<F: Serialize>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.post(self.url(path)?).form(form))
    }

    async fn post_form<F: Serialize>(
        &self,
        path: &str,
        form: &F,
    ) -> Result<Response, ClientError> {
        debug!("POST {}{}", self.base_url, path);
        Ok(self.form_request(path, form)?.send().await?)
    }

    pub fn add_item_request(&self, name: &str) -> Result<RequestBuilder, ClientError> {
        self.form_request(ADD_PATH, &AddItemForm { item_name: name })
    }

    pub fn remove_item_request(&self, id: &str) -> Result<RequestBuilder, ClientError> {
        self.form_request(REMOVE_PATH, &RemoveItemForm { item_id: id })
    }

    pub fn check_item_request(&self, id: &str, checked: bool) -> Result<RequestBuilder, ClientError> {
        self.form_request(CHECK_PATH, &CheckItemForm { item_id: id, checked })
    }

    pub fn list_request(&self) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.get(self.url(LIST_PATH)?))
    }

    pub async fn add_item(&self, name: &str) -> Result<Response, ClientError> {
        self.post_form(ADD_PATH, &AddItemForm { item_name: name }).await
    }

    pub async fn remove_item(&self, id: &str) -> Result<Response, ClientError> {
        self.post_form(REMOVE_PATH, &RemoveItemForm { item_id: id }).await
    }

    pub async fn check_item(&self, id: &str, checked: bool) -> Result<Response, ClientError> {
        self.post_form(CHECK_PATH, &CheckItemForm { item_id: id, checked })
            .await
    }

    /// Fetches `/api/list` and returns the parsed body verbatim.
    ///
    /// The status code is not checked; a body that is not JSON fails the
    /// decode and comes back as [`ClientError::Http`].
    pub async fn load(&self) -> Result<PageData, ClientError> {
        debug!("GET {}{}", self.base_url, LIST_PATH);
        let list = self.list_request()?.send().await?.json::<Value>().await?;
        Ok(PageData { list })
    }

    /// Like [`ListClient::load`], decoded into the list shape the backend serves.
    pub async fn fetch_list(&self) -> Result<GroceryList, ClientError> {
        debug!("GET {}{}", self.base_url, LIST_PATH);
        Ok(self.list_request()?.send().await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;
    use reqwest::{Method, Request};

    use super::*;
    use crate::config::{resolve_base_url, ExecutionContext};

    fn client() -> ListClient {
        ListClient::new("http://localhost:8080")
    }

    fn body(request: &Request) -> &str {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        std::str::from_utf8(bytes).unwrap()
    }

    fn assert_form_post(request: &Request, url: &str) {
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), url);
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn add_item_posts_item_name() {
        let request = client().add_item_request("milk").unwrap().build().unwrap();
        assert_form_post(&request, "http://localhost:8080/api/add");
        assert_eq!(body(&request), "item_name=milk");
    }

    #[test]
    fn remove_item_posts_item_id() {
        let request = client().remove_item_request("7").unwrap().build().unwrap();
        assert_form_post(&request, "http://localhost:8080/api/remove");
        assert_eq!(body(&request), "item_id=7");
    }

    #[test]
    fn check_item_sends_literal_booleans() {
        let request = client().check_item_request("42", true).unwrap().build().unwrap();
        assert_form_post(&request, "http://localhost:8080/api/check");
        assert_eq!(body(&request), "item_id=42&checked=true");

        let request = client().check_item_request("42", false).unwrap().build().unwrap();
        assert_eq!(body(&request), "item_id=42&checked=false");
    }

    #[test]
    fn form_values_are_url_encoded() {
        let request = client()
            .add_item_request("oat milk & honey")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(body(&request), "item_name=oat+milk+%26+honey");
    }

    #[test]
    fn list_is_a_get_without_body() {
        let request = client().list_request().unwrap().build().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/list");
        assert!(request.body().is_none());
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let client = ListClient::new("http://list.example/");
        assert_eq!(client.base_url(), "http://list.example");
        let request = client.remove_item_request("1").unwrap().build().unwrap();
        assert_eq!(request.url().as_str(), "http://list.example/api/remove");
    }

    #[test]
    fn same_origin_needs_a_page_origin() {
        let client = ListClient::new(resolve_base_url(ExecutionContext::Browser, None));
        assert!(matches!(
            client.add_item_request("milk"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            client.list_request(),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn same_origin_resolves_against_page_origin() {
        let client = ListClient::new(resolve_base_url(ExecutionContext::Browser, None))
            .with_origin("https://list.example/groceries/page")
            .unwrap();
        let request = client.check_item_request("9", true).unwrap().build().unwrap();
        assert_form_post(&request, "https://list.example/api/check");
        assert_eq!(body(&request), "item_id=9&checked=true");
    }

    #[test]
    fn absolute_base_ignores_origin() {
        let client = client().with_origin("https://elsewhere.example").unwrap();
        let request = client.list_request().unwrap().build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:8080/api/list");
    }

    #[test]
    fn bad_origin_is_rejected() {
        assert!(matches!(
            ListClient::new("").with_origin("not a url"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }
}
