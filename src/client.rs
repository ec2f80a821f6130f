use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use log::debug;
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::api::device::DeviceApi;
use crate::api::settings::SettingsApi;
use crate::api::template::TemplateApi;
use crate::constants::{DATASERVICE, DEFAULT_PORT, LOGIN_PATH, STANDARD_HTTP_TIMEOUT};
use crate::models::auth::LoginRequest;
use crate::normalize::ResponseNormalizer;
use crate::{ApiResponse, Gateway, RawResponse, RequestOptions, VManageError, VManageResult};

/// Builder for vManage client.
///
/// This builder provides a fluent API for creating vManage clients
/// with validation at build time.
pub struct VManageClientBuilder {
    server: Option<String>,
    port: u16,
    controller_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    verify_ssl: bool,
    timeout: Option<Duration>,
    auto_login: bool,
    strict_missing_key: bool,
    user_agent: Option<String>,
    http_client: Option<ReqwestClient>,
}

impl Default for VManageClientBuilder {
    fn default() -> Self {
        Self {
            server: None,
            port: DEFAULT_PORT,
            controller_url: None,
            username: None,
            password: None,
            verify_ssl: false,
            timeout: None,
            auto_login: true,
            strict_missing_key: false,
            user_agent: None,
            http_client: None,
        }
    }
}

impl VManageClientBuilder {
    /// Sets the vManage server IP address or hostname.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the vManage API port. Defaults to 8443.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the full controller root URL, e.g. `https://vmanage:8443`.
    ///
    /// Takes precedence over `server` and `port`.
    pub fn controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = Some(url.into());
        self
    }

    /// Sets the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Sets the password from an environment variable, if it is set.
    pub fn password_from_env(mut self, var_name: &str) -> Self {
        if let Ok(password) = std::env::var(var_name) {
            self.password = Some(SecretString::from(password));
        }
        self
    }

    /// Sets whether to verify SSL certificates.
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Sets the default per-request timeout. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets whether `build()` logs in. Defaults to true.
    pub fn auto_login(mut self, auto_login: bool) -> Self {
        self.auto_login = auto_login;
        self
    }

    /// Fails GET calls whose body has no recognized envelope key instead of
    /// returning an empty result.
    pub fn strict_missing_key(mut self, strict: bool) -> Self {
        self.strict_missing_key = strict;
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for testing or custom middleware).
    ///
    /// The client must keep cookies for the login session to carry over.
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub async fn build(self) -> VManageResult<VManageClient> {
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| VManageError::ConfigurationError("Username is required".into()))?;

        let password = self
            .password
            .filter(|p| !p.expose_secret().trim().is_empty())
            .ok_or_else(|| VManageError::ConfigurationError("Password is required".into()))?;

        let root = match (self.controller_url, self.server) {
            (Some(url), _) => url,
            (None, Some(server)) => format!("https://{}:{}", server, self.port),
            (None, None) => {
                return Err(VManageError::ConfigurationError(
                    "Server or controller URL is required".into(),
                ))
            }
        };
        let root = Url::parse(&root).map_err(|e| {
            VManageError::ConfigurationError(format!("Invalid controller URL: {e}"))
        })?;
        let server = root.host_str().unwrap_or_default().to_string();

        let mut base_url = root.clone();
        base_url.set_path(&format!("{}{}", root.path().trim_end_matches('/'), DATASERVICE));

        let timeout = self.timeout.unwrap_or(STANDARD_HTTP_TIMEOUT);

        let user_agent = self
            .user_agent
            .as_deref()
            .unwrap_or(concat!("vmanage-client/", env!("CARGO_PKG_VERSION")));

        let http_client = if let Some(custom_client) = self.http_client {
            custom_client
        } else {
            ReqwestClient::builder()
                .danger_accept_invalid_certs(!self.verify_ssl)
                .cookie_store(true)
                .user_agent(user_agent)
                .build()
                .map_err(|e| {
                    VManageError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
                })?
        };

        let client = VManageClient {
            server,
            base_url,
            username,
            password,
            verify_ssl: self.verify_ssl,
            timeout,
            normalizer: ResponseNormalizer::new().strict_missing_key(self.strict_missing_key),
            http_client,
        };

        if self.auto_login {
            client.login().await?;
        }

        Ok(client)
    }
}

/// The main client for the vManage REST API.
///
/// Owns the base URL and the HTTP session, implements [`Gateway`] and hands
/// out the typed API objects.
#[derive(Clone)]
pub struct VManageClient {
    server: String,
    base_url: Url,
    username: String,
    password: SecretString,
    verify_ssl: bool,
    timeout: Duration,
    normalizer: ResponseNormalizer,
    http_client: ReqwestClient,
}

impl fmt::Debug for VManageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VManageClient")
            .field("server", &self.server)
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl VManageClient {
    pub fn builder() -> VManageClientBuilder {
        VManageClientBuilder::default()
    }

    /// Opens a session with the controller.
    ///
    /// # Errors
    ///
    /// - [`VManageError::ConnectionError`] if the controller cannot be
    ///   reached or the login times out.
    /// - [`VManageError::LoginCredentialsError`] if the controller answers
    ///   with its HTML login page.
    /// - [`VManageError::AuthenticationError`] for any other non-success
    ///   status.
    pub async fn login(&self) -> VManageResult<()> {
        let login_url = self.url_for(LOGIN_PATH)?;

        let login_data = LoginRequest {
            username: self.username.clone(),
            password: self.password.expose_secret().to_string(),
        };

        debug!("POST {}", login_url);

        let response = self
            .http_client
            .post(login_url)
            .form(&login_data)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    VManageError::ConnectionError(self.server.clone())
                } else {
                    VManageError::HttpError(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if body.trim_start().starts_with("<html>") {
            return Err(VManageError::LoginCredentialsError);
        }

        if !status.is_success() {
            return Err(VManageError::AuthenticationError(format!(
                "Authentication failed with status code: {status}"
            )));
        }

        Ok(())
    }

    /// Gets the dataservice root, e.g. `https://vmanage:8443/dataservice`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Gets the configured server host.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Gets the default per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds an absolute URL for a path relative to the dataservice root.
    pub fn url_for(&self, path: &str) -> VManageResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Ok(Url::parse(&url)?)
    }

    /// Gets the template API interface.
    pub fn templates(&self) -> TemplateApi<'_, Self> {
        TemplateApi::new(self)
    }

    /// Gets the device API interface.
    pub fn devices(&self) -> DeviceApi<'_, Self> {
        DeviceApi::new(self)
    }

    /// Gets the settings API interface.
    pub fn settings(&self) -> SettingsApi<'_, Self> {
        SettingsApi::new(self)
    }
}

#[async_trait]
impl Gateway for VManageClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> VManageResult<ApiResponse> {
        let url = self.url_for(path)?;

        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method.clone(), url)
            .headers(options.effective_headers())
            .timeout(options.timeout_or(self.timeout));

        // Writes always carry a body, an empty object when none is given.
        let payload = match body {
            Some(body) => Some(body),
            None if method != Method::GET => Some(Value::Object(Default::default())),
            None => None,
        };
        if let Some(payload) = payload {
            request = request.body(serde_json::to_string(&payload)?);
        }

        let response = request.send().await?;
        let raw = RawResponse::from_reqwest(method, response).await?;

        self.normalizer.normalize(raw)
    }
}
