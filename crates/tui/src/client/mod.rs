use std::time::Duration;

use api_types::{
    method::{Method, MethodNew},
    month::MonthOption,
    summary::Summary,
    transaction::{Transaction, TransactionEdit, TransactionNew},
};
use reqwest::Url;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};

/// Anti-forgery header the store checks on every mutating request.
const CSRF_HEADER: &str = "X-CSRFToken";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl ClientError {
    /// User-facing message for this failure.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized | Self::Forbidden => {
                "Not signed in or session expired.".to_string()
            }
            Self::NotFound => "Not found on the server.".to_string(),
            Self::Validation(message) => format!("Rejected by the server: {message}"),
            Self::Server(message) => format!("Server error: {message}"),
            Self::Transport(err) => format!("Server unreachable: {err}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Credentials attached to mutating requests.
///
/// Passed explicitly per call so nothing in the client reads ambient global
/// state.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub csrf_token: String,
}

/// Remote-store operations consumed by the app's state machines.
///
/// [`Client`] implements this against the REST store; controller and form
/// tests substitute an in-memory fake.
pub trait Store {
    async fn list_all_transactions(&self) -> std::result::Result<Vec<Transaction>, ClientError>;
    async fn list_months(&self) -> std::result::Result<Vec<MonthOption>, ClientError>;
    async fn list_methods(&self) -> std::result::Result<Vec<Method>, ClientError>;
    async fn summary(&self) -> std::result::Result<Summary, ClientError>;
    async fn edit_transaction(
        &self,
        id: i64,
        payload: &TransactionEdit,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError>;
    async fn register_transaction(
        &self,
        payload: &TransactionNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError>;
    async fn create_method(
        &self,
        payload: &MethodNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError>;
}

#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, ClientError> {
        let res = self
            .http
            .get(self.endpoint(path)?)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
        ctx: &RequestContext,
    ) -> std::result::Result<T, ClientError> {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .header(CSRF_HEADER, ctx.csrf_token.as_str())
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        Self::decode(res).await
    }

    async fn decode<T: DeserializeOwned>(
        res: reqwest::Response,
    ) -> std::result::Result<T, ClientError> {
        if res.status().is_success() {
            // An unparsable body is reported the same way as a failed request.
            return res.json::<T>().await.map_err(ClientError::Transport);
        }

        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        Err(match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            400 | 422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        })
    }

    pub async fn list_all_transactions(
        &self,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.get_json("list_all_transactions").await
    }

    /// Month-scoped listing kept for parity with the store's API; the list
    /// controller filters client-side instead.
    #[allow(dead_code)]
    pub async fn list_month_transactions(
        &self,
        month: u32,
        year: i32,
    ) -> std::result::Result<Vec<Transaction>, ClientError> {
        self.get_json(&format!("list_month_transactions/{month}/{year}"))
            .await
    }

    pub async fn list_months(&self) -> std::result::Result<Vec<MonthOption>, ClientError> {
        self.get_json("list_months").await
    }

    pub async fn list_methods(&self) -> std::result::Result<Vec<Method>, ClientError> {
        self.get_json("list_methods").await
    }

    pub async fn summary(&self) -> std::result::Result<Summary, ClientError> {
        self.get_json("summary").await
    }

    pub async fn edit_transaction(
        &self,
        id: i64,
        payload: &TransactionEdit,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        let _updated: serde_json::Value = self
            .post_json(&format!("edit_transaction/{id}"), payload, ctx)
            .await?;
        Ok(())
    }

    pub async fn register_transaction(
        &self,
        payload: &TransactionNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        let _created: serde_json::Value = self.post_json("register_transaction", payload, ctx).await?;
        Ok(())
    }

    pub async fn create_method(
        &self,
        payload: &MethodNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        let _created: serde_json::Value = self.post_json("method", payload, ctx).await?;
        Ok(())
    }
}

impl Store for Client {
    async fn list_all_transactions(&self) -> std::result::Result<Vec<Transaction>, ClientError> {
        Client::list_all_transactions(self).await
    }

    async fn list_months(&self) -> std::result::Result<Vec<MonthOption>, ClientError> {
        Client::list_months(self).await
    }

    async fn list_methods(&self) -> std::result::Result<Vec<Method>, ClientError> {
        Client::list_methods(self).await
    }

    async fn summary(&self) -> std::result::Result<Summary, ClientError> {
        Client::summary(self).await
    }

    async fn edit_transaction(
        &self,
        id: i64,
        payload: &TransactionEdit,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        Client::edit_transaction(self, id, payload, ctx).await
    }

    async fn register_transaction(
        &self,
        payload: &TransactionNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        Client::register_transaction(self, payload, ctx).await
    }

    async fn create_method(
        &self,
        payload: &MethodNew,
        ctx: &RequestContext,
    ) -> std::result::Result<(), ClientError> {
        Client::create_method(self, payload, ctx).await
    }
}
