use async_trait::async_trait;
use blogdesk_api_types::{Post, PostFilter, PostId, PostInput, SearchResponse};
use metrics::counter;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::application::ports::{PostsApi, RequestError};

/// reqwest-backed implementation of [`PostsApi`].
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// `base` is the API root, e.g. `http://127.0.0.1:8080/api/v1`.
    pub fn new(base: &str) -> Result<Self, RequestError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(RequestError::from_transport)?;
        Self::with_client(client, base)
    }

    pub fn with_client(client: Client, base: &str) -> Result<Self, RequestError> {
        let mut base = Url::parse(base).map_err(|e| RequestError::Url(e.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("blogdesk/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, RequestError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| RequestError::Url(e.to_string()))?;
        if !query.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<RequestBuilder, RequestError> {
        let url = self.url(path, query)?;
        debug!(method = %method, url = %url, "posts api request");
        Ok(self.client.request(method, url))
    }

    async fn send(
        operation: &'static str,
        req: RequestBuilder,
    ) -> Result<Response, RequestError> {
        counter!("blogdesk_api_requests_total", "operation" => operation).increment(1);

        let outcome = match req.send().await {
            Ok(resp) if resp.status().is_success() => Ok(resp),
            Ok(resp) => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                Err(RequestError::Status { status, body })
            }
            Err(err) => Err(RequestError::from_transport(err)),
        };

        if let Err(err) = &outcome {
            counter!("blogdesk_api_request_failures_total", "operation" => operation)
                .increment(1);
            warn!(operation, error = %err, "posts api request failed");
        }
        outcome
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, RequestError> {
        let bytes = resp.bytes().await.map_err(RequestError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(RequestError::from_decode)
    }
}

#[async_trait]
impl PostsApi for ApiClient {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, RequestError> {
        let req = self.request(Method::GET, "posts", &filter.query_pairs())?;
        let resp = Self::send("list_posts", req).await?;
        let posts: Option<Vec<Post>> = Self::decode(resp).await?;
        Ok(posts.unwrap_or_default())
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>, RequestError> {
        let req = self.request(Method::GET, &format!("posts/{id}"), &[])?;
        let resp = Self::send("get_post", req).await?;
        Self::decode(resp).await
    }

    async fn create_post(&self, input: &PostInput) -> Result<Post, RequestError> {
        let req = self.request(Method::POST, "posts", &[])?.json(input);
        let resp = Self::send("create_post", req).await?;
        Self::decode(resp).await
    }

    async fn update_post(&self, id: PostId, input: &PostInput) -> Result<Post, RequestError> {
        let req = self
            .request(Method::PUT, &format!("posts/{id}"), &[])?
            .json(input);
        let resp = Self::send("update_post", req).await?;
        Self::decode(resp).await
    }

    async fn delete_post(&self, id: PostId) -> Result<(), RequestError> {
        let req = self.request(Method::DELETE, &format!("posts/{id}"), &[])?;
        Self::send("delete_post", req).await?;
        Ok(())
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, RequestError> {
        let req = self.request(Method::GET, "posts/search", &[("q", query.to_string())])?;
        let resp = Self::send("search_posts", req).await?;
        let envelope: SearchResponse = Self::decode(resp).await?;
        Ok(envelope.into_posts())
    }
}
