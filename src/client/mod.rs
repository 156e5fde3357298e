//! Remote API collaborator.
//!
//! A thin reqwest client over the Coolify REST API. It builds URLs, attaches
//! the bearer token and serialises bodies; it does **not** interpret status
//! codes. Every call yields an [`ApiResponse`] and the resource controllers
//! decide what a given status means for their lifecycle transition.

pub mod models;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ResolvedConfig;
use crate::error::ProviderError;
use crate::logging::truncate_body;

const USER_AGENT: &str = concat!("coolify-provider/", env!("CARGO_PKG_VERSION"));

/// A family of endpoints sharing one collection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `/applications`
    Applications,
    /// `/databases`
    Databases,
    /// `/services`
    Services,
    /// `/servers`
    Servers,
    /// `/projects`
    Projects,
    /// `/security/keys`
    PrivateKeys,
}

impl Collection {
    /// Collection path relative to the endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Databases => "databases",
            Self::Services => "services",
            Self::Servers => "servers",
            Self::Projects => "projects",
            Self::PrivateKeys => "security/keys",
        }
    }

    fn item(self, uuid: &str) -> String {
        format!("{}/{}", self.path(), uuid)
    }
}

/// Cleanup flags sent with application, database and service deletes.
///
/// The values are fixed: configurations, volumes and dangling docker
/// artifacts are removed, networks shared with other resources are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOptions {
    delete_configurations: bool,
    delete_volumes: bool,
    docker_cleanup: bool,
    delete_connected_networks: bool,
}

impl DeleteOptions {
    /// The only flag set the provider ever sends.
    pub const CLEANUP: DeleteOptions = DeleteOptions {
        delete_configurations: true,
        delete_volumes: true,
        docker_cleanup: true,
        delete_connected_networks: false,
    };
}

/// Status and raw body of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as received.
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    uuid: Option<String>,
}

impl ApiResponse {
    /// Whether the status equals `status`.
    pub fn is(&self, status: u16) -> bool {
        self.status == status
    }

    /// Whether the remote reported the record missing.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Pass the response through when its status is one of `accepted`.
    ///
    /// Anything else becomes a [`ProviderError::RemoteStatus`] carrying the
    /// status and body.
    pub fn expect(self, operation: &str, accepted: &[u16]) -> Result<Self, ProviderError> {
        if accepted.contains(&self.status) {
            return Ok(self);
        }
        tracing::error!(
            status = self.status,
            body = %truncate_body(&self.body),
            "Unexpected HTTP status code {}",
            operation
        );
        Err(ProviderError::remote_status(operation, self.status, self.body))
    }

    /// Decode the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        serde_json::from_str(&self.body).map_err(|e| {
            ProviderError::Conversion(format!("{} in body {}", e, truncate_body(&self.body)))
        })
    }

    /// The `uuid` assigned by a create call.
    pub fn created_uuid(&self, operation: &str) -> Result<String, ProviderError> {
        let created: CreatedResource = self.json()?;
        created
            .uuid
            .filter(|uuid| !uuid.is_empty())
            .ok_or_else(|| {
                ProviderError::Conversion(format!("response to {} carried no uuid", operation))
            })
    }
}

/// Authenticated client for one Coolify instance.
#[derive(Debug, Clone)]
pub struct CoolifyClient {
    http: Client,
    base: Url,
    token: String,
}

impl CoolifyClient {
    /// Build a client for a resolved configuration.
    pub fn new(config: &ResolvedConfig) -> Result<Self, ProviderError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }

    /// The endpoint every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base.join(path).map_err(|e| {
            ProviderError::Configuration(format!("cannot build URL for '{}': {}", path, e))
        })
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ApiResponse, ProviderError> {
        tracing::debug!("{} {}", method, url);
        let response = request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, body = %truncate_body(&body), "{} {} answered", method, url);
        Ok(ApiResponse { status, body })
    }

    /// `GET <path>`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ProviderError> {
        let url = self.url(path)?;
        let request = self.http.get(url.clone());
        self.execute(Method::GET, url, request).await
    }

    /// `POST <path>` with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ProviderError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self.http.post(url.clone()).json(body);
        self.execute(Method::POST, url, request).await
    }

    /// `PATCH <path>` with a JSON body.
    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ProviderError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self.http.patch(url.clone()).json(body);
        self.execute(Method::PATCH, url, request).await
    }

    /// `DELETE <path>`, with cleanup flags as query parameters when given.
    pub async fn delete(
        &self,
        path: &str,
        options: Option<&DeleteOptions>,
    ) -> Result<ApiResponse, ProviderError> {
        let url = self.url(path)?;
        let mut request = self.http.delete(url.clone());
        if let Some(options) = options {
            request = request.query(options);
        }
        self.execute(Method::DELETE, url, request).await
    }

    /// Report the platform version (`GET /version`).
    pub async fn version(&self) -> Result<String, ProviderError> {
        let response = self.get("version").await?.expect("reading version", &[200])?;
        Ok(response.body.trim().trim_matches('"').to_string())
    }

    /// `POST /<collection>[/<variant>]`.
    pub async fn create<B>(
        &self,
        collection: Collection,
        variant: Option<&str>,
        body: &B,
    ) -> Result<ApiResponse, ProviderError>
    where
        B: Serialize + ?Sized,
    {
        match variant {
            Some(variant) => self.post(&collection.item(variant), body).await,
            None => self.post(collection.path(), body).await,
        }
    }

    /// `GET /<collection>/<uuid>`.
    pub async fn fetch(&self, collection: Collection, uuid: &str) -> Result<ApiResponse, ProviderError> {
        self.get(&collection.item(uuid)).await
    }

    /// `PATCH /<collection>/<uuid>`.
    pub async fn update<B>(
        &self,
        collection: Collection,
        uuid: &str,
        body: &B,
    ) -> Result<ApiResponse, ProviderError>
    where
        B: Serialize + ?Sized,
    {
        self.patch(&collection.item(uuid), body).await
    }

    /// `DELETE /<collection>/<uuid>`.
    pub async fn remove(
        &self,
        collection: Collection,
        uuid: &str,
        options: Option<&DeleteOptions>,
    ) -> Result<ApiResponse, ProviderError> {
        self.delete(&collection.item(uuid), options).await
    }

    /// `GET /<collection>/<uuid>/restart`.
    pub async fn restart(&self, collection: Collection, uuid: &str) -> Result<ApiResponse, ProviderError> {
        self.get(&format!("{}/restart", collection.item(uuid))).await
    }

    /// `GET /<collection>`.
    pub async fn list(&self, collection: Collection) -> Result<ApiResponse, ProviderError> {
        self.get(collection.path()).await
    }
}
