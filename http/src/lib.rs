//! # Tasklist HTTP
//!
//! [`HttpTodoApi`]: the production [`TodoApi`], talking to the backend's
//! collection endpoint with `reqwest`.
//!
//! Any response outside `2xx` is a failure; the status code is kept only for
//! the log line. Response bodies of `DELETE` are ignored.
//!
//! ## Example
//!
//! ```no_run
//! use tasklist_core::remote::TodoApi;
//! use tasklist_http::HttpTodoApi;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTodoApi::new("http://localhost:5000/api");
//! for todo in api.list().await? {
//!     println!("{} {}", todo.id, todo.body);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tasklist_core::remote::{Operation, RemoteError, RemoteFuture, TodoApi};
use tasklist_core::todo::{NewTodo, TodoId, TodoItem};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// REST client for the to-do collection
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/api`)
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// The API root, without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    /// Send a request and reject any non-2xx response
    async fn execute(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, RemoteError> {
        tracing::debug!(%operation, "Sending request");

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%operation, status = status.as_u16(), "Request rejected");
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> RemoteFuture<'_, Vec<TodoItem>> {
        Box::pin(async move {
            let request = self.client.get(self.collection_url());
            let response = self.execute(Operation::List, request).await?;
            Self::decode(response).await
        })
    }

    fn create(&self, todo: NewTodo) -> RemoteFuture<'_, TodoItem> {
        Box::pin(async move {
            let request = self.client.post(self.collection_url()).json(&todo);
            let response = self.execute(Operation::Create, request).await?;
            Self::decode(response).await
        })
    }

    fn toggle(&self, id: TodoId) -> RemoteFuture<'_, TodoItem> {
        Box::pin(async move {
            let request = self.client.patch(self.item_url(id));
            let response = self.execute(Operation::Toggle, request).await?;
            Self::decode(response).await
        })
    }

    fn delete(&self, id: TodoId) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            let request = self.client.delete(self.item_url(id));
            self.execute(Operation::Delete, request).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> HttpTodoApi {
        HttpTodoApi::new(format!("{}/api", server.uri()))
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpTodoApi::new("http://localhost:5000/api/");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.item_url(TodoId::new(3)), "http://localhost:5000/api/todos/3");
    }

    #[tokio::test]
    async fn list_decodes_collection_in_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 2,
                    "body": "walk dog",
                    "completed": true,
                    "created_at": "2024-05-01T09:00:00+09:00"
                },
                {"id": 1, "body": "buy milk", "completed": false, "created_at": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let todos = api_for(&server).await.list().await.unwrap();

        let ids: Vec<i64> = todos.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(todos[0].completed);
        assert!(todos[0].created_at.is_some());
        assert_eq!(todos[1].created_at, None);
    }

    #[tokio::test]
    async fn list_of_empty_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        assert!(api_for(&server).await.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_posts_body_and_returns_server_item() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/todos"))
            .and(body_json(json!({"body": "buy milk"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 17,
                "body": "buy milk",
                "completed": false,
                "created_at": "2025-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let item = api_for(&server)
            .await
            .create(NewTodo::new("buy milk"))
            .await
            .unwrap();

        assert_eq!(item.id, TodoId::new(17));
        assert_eq!(item.body, "buy milk");
    }

    #[tokio::test]
    async fn toggle_patches_item_url() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/todos/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 1, "body": "buy milk", "completed": true}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let item = api_for(&server).await.toggle(TodoId::new(1)).await.unwrap();
        assert!(item.completed);
    }

    #[tokio::test]
    async fn delete_ignores_response_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/todos/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/todos/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        assert_eq!(api.delete(TodoId::new(4)).await, Ok(()));
        assert_eq!(api.delete(TodoId::new(5)).await, Ok(()));
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/todos/1"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to update todo"})),
            )
            .mount(&server)
            .await;

        let result = api_for(&server).await.toggle(TodoId::new(1)).await;
        assert_eq!(result, Err(RemoteError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = api_for(&server).await.list().await;
        assert!(matches!(result, Err(RemoteError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpTodoApi::new(format!("http://{addr}/api"));

        let result = api.list().await;
        assert!(matches!(result, Err(RemoteError::Request(_))));
    }
}
