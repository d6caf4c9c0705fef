use std::{sync::Arc, time::Instant};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::{
    domain::common::entities::app_errors::CoreError,
    infrastructure::firestore::{
        codec::{Document, Fields, Value},
        credentials::TokenProvider,
    },
};

/// Thin client for the Firestore REST API, scoped to one database.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    http: Client,
    /// `.../v1/projects/{project}/databases/(default)/documents`
    documents_url: String,
    auth: Option<Arc<TokenProvider>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryResponseItem {
    #[serde(default)]
    document: Option<Document>,
}

#[derive(Debug, Serialize)]
struct WriteBody<'a> {
    fields: &'a Fields,
}

impl FirestoreClient {
    pub fn new(http: Client, documents_url: String, auth: Option<Arc<TokenProvider>>) -> Self {
        Self {
            http,
            documents_url: documents_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn documents_url_for(base_url: &str, project_id: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            base_url.trim_end_matches('/'),
            project_id
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.documents_url,
            collection,
            urlencoding::encode(id)
        )
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, CoreError> {
        match &self.auth {
            Some(provider) => Ok(request.bearer_auth(provider.access_token().await?)),
            None => Ok(request),
        }
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, CoreError> {
        self.authorize(request)
            .await?
            .send()
            .await
            .map_err(|e| {
                error!("Firestore {} request failed: {}", operation, e);
                CoreError::ExternalServiceError(format!("firestore {operation}: {e}"))
            })
    }

    pub async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Fields>, CoreError> {
        let request = self.http.get(self.document_url(collection, id));
        let response = self.send(request, "get").await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Document = parse(ensure_success(response, "get").await?).await?;
        Ok(Some(document.fields))
    }

    /// Creates or fully replaces a document.
    pub async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), CoreError> {
        let request = self
            .http
            .patch(self.document_url(collection, id))
            .json(&WriteBody { fields });
        let response = self.send(request, "set").await?;
        ensure_success(response, "set").await?;
        Ok(())
    }

    /// Creates a document, failing with `AlreadyExists` when the id is taken.
    pub async fn create_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), CoreError> {
        let request = self
            .http
            .post(format!("{}/{}", self.documents_url, collection))
            .query(&[("documentId", id)])
            .json(&WriteBody { fields });
        let response = self.send(request, "create").await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(CoreError::AlreadyExists);
        }
        ensure_success(response, "create").await?;
        Ok(())
    }

    /// Every document of `collection` whose `field` equals `value`.
    pub async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Fields>, CoreError> {
        self.run_query(collection, query_body(collection, field, &value, None))
            .await
    }

    /// Up to `limit` documents matching `field == value`, highest `order_by` first.
    pub async fn query_latest(
        &self,
        collection: &str,
        field: &str,
        value: Value,
        order_by: &str,
        limit: u64,
    ) -> Result<Vec<Fields>, CoreError> {
        let body = query_body(collection, field, &value, Some((order_by, limit)));
        self.run_query(collection, body).await
    }

    async fn run_query(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> Result<Vec<Fields>, CoreError> {
        let request = self
            .http
            .post(format!("{}:runQuery", self.documents_url))
            .json(&body);
        let response = self.send(request, "query").await?;
        let items: Vec<RunQueryResponseItem> = parse(ensure_success(response, "query").await?).await?;

        let documents: Vec<Fields> = items
            .into_iter()
            .filter_map(|item| item.document.map(|d| d.fields))
            .collect();
        debug!(collection, count = documents.len(), "firestore query");
        Ok(documents)
    }

    /// Lists at most one document to prove the database answers; returns elapsed milliseconds.
    pub async fn ping(&self, collection: &str) -> Result<u64, CoreError> {
        let started = Instant::now();
        let request = self
            .http
            .get(format!("{}/{}", self.documents_url, collection))
            .query(&[("pageSize", "1")]);
        let response = self.send(request, "ping").await?;
        ensure_success(response, "ping").await?;
        Ok(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX))
    }
}

/// `runQuery` body with one equality filter and an optional descending order with limit.
fn query_body(
    collection: &str,
    field: &str,
    value: &Value,
    newest_first: Option<(&str, u64)>,
) -> serde_json::Value {
    let mut query = json!({
        "from": [{ "collectionId": collection }],
        "where": {
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": "EQUAL",
                "value": value,
            }
        }
    });
    if let Some((order_by, limit)) = newest_first {
        query["orderBy"] = json!([{
            "field": { "fieldPath": order_by },
            "direction": "DESCENDING",
        }]);
        query["limit"] = json!(limit);
    }

    json!({ "structuredQuery": query })
}

async fn ensure_success(response: Response, operation: &str) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    error!("Firestore {} error: {} - {}", operation, status, error_text);

    Err(
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            CoreError::ExternalServiceError(format!("firestore {operation} returned {status}"))
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            CoreError::Configuration(format!("firestore rejected the credentials ({status})"))
        } else {
            CoreError::InternalServerError
        },
    )
}

async fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, CoreError> {
    response.json().await.map_err(|e| {
        error!("Failed to parse Firestore response: {}", e);
        CoreError::ExternalServiceError(format!("invalid firestore response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_ids_are_path_encoded() {
        let client = FirestoreClient::new(
            Client::new(),
            FirestoreClient::documents_url_for("http://localhost:8080/", "demo"),
            None,
        );
        assert_eq!(
            client.document_url("diet_plans", "a/b c_2025-01-01"),
            "http://localhost:8080/v1/projects/demo/databases/(default)/documents/diet_plans/a%2Fb%20c_2025-01-01"
        );
    }

    #[test]
    fn latest_query_orders_and_limits_on_the_server() {
        let body = query_body(
            "conversations",
            "user_id",
            &Value::StringValue("u-1".to_string()),
            Some(("timestamp", 20)),
        );

        assert_eq!(
            body,
            json!({
                "structuredQuery": {
                    "from": [{ "collectionId": "conversations" }],
                    "where": {
                        "fieldFilter": {
                            "field": { "fieldPath": "user_id" },
                            "op": "EQUAL",
                            "value": { "stringValue": "u-1" },
                        }
                    },
                    "orderBy": [{
                        "field": { "fieldPath": "timestamp" },
                        "direction": "DESCENDING",
                    }],
                    "limit": 20,
                }
            })
        );
    }

    #[test]
    fn equality_query_has_no_order_or_limit() {
        let body = query_body(
            "feedback",
            "user_id",
            &Value::StringValue("u-1".to_string()),
            None,
        );

        let query = &body["structuredQuery"];
        assert!(query.get("orderBy").is_none());
        assert!(query.get("limit").is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_transient() {
        let client = FirestoreClient::new(
            Client::new(),
            FirestoreClient::documents_url_for("http://127.0.0.1:1", "demo"),
            None,
        );
        let err = client.get_document("users", "u-1").await.unwrap_err();
        assert!(err.is_transient(), "{err:?}");
    }
}
