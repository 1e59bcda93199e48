use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use dashboard_domain::ports::AnalysisApi;
use dashboard_domain::{
    validate_upload, AlertConfig, AlertId, AlertRequest, AnalysisFilters, AnalysisResult, ApiAck,
    ClientError, HealthStatus, LoginRequest, LoginResponse, PredictionRequest, PredictionResult,
    RegisterAck, RegisterRequest, ReportKind, RuntimeConfig, UpdateStatus, UploadedFile,
};

/// Keys checked, in order, for a human readable error message.
const ERROR_MESSAGE_KEYS: [&str; 4] = ["message", "detalle", "detail", "error"];

/// `AnalysisApi` over HTTP. One request per call, no retries.
pub struct HttpAnalysisClient {
    base_url: String,
    client: Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &RuntimeConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_seconds.max(1)),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `path` with `segment` appended as one percent-encoded path segment.
    fn url_with_segment(&self, path: &str, segment: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|err| ClientError::validation(format!("invalid service URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::validation("service URL cannot take a path"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            warn!(%status, path = %url, "request rejected");
            return Err(error_from_status(status, &body));
        }
        debug!(%status, path = %url, bytes = body.len(), "request completed");
        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let body = self.send(request).await?;
        let value = parse_body(&body)?;
        if let Some(err) = embedded_error(&value) {
            return Err(err);
        }
        serde_json::from_value(value)
            .map_err(|err| ClientError::Transport(format!("unexpected response body: {}", err)))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = authorize(self.client.post(self.url(path)), token).json(body);
        self.send_json(request).await
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze(
        &self,
        file: &UploadedFile,
        filters: Option<&AnalysisFilters>,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ClientError> {
        validate_upload(file)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|err| ClientError::validation(format!("invalid file type: {}", err)))?;
        let mut form = Form::new().part("file", part);
        if let Some(filters) = filters.filter(|filters| !filters.is_empty()) {
            let encoded = serde_json::to_string(filters)
                .map_err(|err| ClientError::validation(format!("invalid filters: {}", err)))?;
            form = form.text("filters", encoded);
        }

        debug!(file = %file.name, bytes = file.size(), "uploading for analysis");
        let request = authorize(self.client.post(self.url("/analizar/")), token).multipart(form);
        self.send_json(request).await
    }

    async fn generate_report(
        &self,
        kind: ReportKind,
        analysis: &AnalysisResult,
        token: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        let request = authorize(self.client.post(self.url(kind.endpoint())), token).json(analysis);
        let body = self.send(request).await?;
        // A 2xx JSON body here is an error envelope, not a document.
        if let Ok(value) = serde_json::from_slice::<Value>(&body) {
            if let Some(err) = embedded_error(&value) {
                return Err(err);
            }
        }
        if body.is_empty() {
            return Err(ClientError::Transport("empty report body".to_string()));
        }
        Ok(body)
    }

    async fn check_health(&self) -> Result<HealthStatus, ClientError> {
        self.send_json(self.client.get(self.url("/health"))).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::validation("email and password are required"));
        }
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        self.post_json("/login", &body, None).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterAck, ClientError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(ClientError::validation("name, email and password are required"));
        }
        self.post_json("/register", request, None).await
    }

    async fn predict(
        &self,
        analysis: &AnalysisResult,
        period: &str,
        vehicle: &str,
        token: Option<&str>,
    ) -> Result<PredictionResult, ClientError> {
        let body = PredictionRequest {
            data: analysis,
            period: period.to_string(),
            vehicle: vehicle.to_string(),
        };
        let value: Value = self.post_json("/predecir/", &body, token).await?;
        // Some deployments wrap the projection in a `prediccion` object.
        let value = match value {
            Value::Object(mut map) => match map.remove("prediccion") {
                Some(Value::Object(inner)) => Value::Object(inner),
                Some(other) => {
                    map.insert("prediccion".to_string(), other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            },
            other => other,
        };
        serde_json::from_value(value)
            .map_err(|err| ClientError::Transport(format!("unexpected response body: {}", err)))
    }

    async fn configure_alert(
        &self,
        request: &AlertRequest,
        token: Option<&str>,
    ) -> Result<AlertConfig, ClientError> {
        if request.tipo.trim().is_empty() {
            return Err(ClientError::validation("alert type is required"));
        }
        if !request.threshold.is_finite() {
            return Err(ClientError::validation("a numeric threshold is required"));
        }
        let value: Value = self.post_json("/configurar-alerta/", request, token).await?;
        alert_from_response(value, request)
    }

    async fn remove_alert(&self, id: &AlertId, token: Option<&str>) -> Result<ApiAck, ClientError> {
        if id.as_str().trim().is_empty() {
            return Err(ClientError::validation("an alert id is required"));
        }
        let url = self.url_with_segment("/eliminar-alerta/", id.as_str())?;
        let request = authorize(self.client.delete(url), token);
        self.send_json(request).await
    }

    async fn check_for_updates(&self, token: Option<&str>) -> Result<UpdateStatus, ClientError> {
        let request = authorize(self.client.get(self.url("/check-updates/")), token);
        self.send_json(request).await
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token.filter(|token| !token.trim().is_empty()) {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Transport("request timed out".to_string())
    } else {
        ClientError::Transport(err.to_string())
    }
}

fn parse_body(body: &[u8]) -> Result<Value, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|err| ClientError::Transport(format!("invalid JSON response: {}", err)))
}

fn error_from_status(status: StatusCode, body: &[u8]) -> ClientError {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| error_message(&value))
        .map(ClientError::Api)
        .unwrap_or_else(|| ClientError::Transport(format!("HTTP {}", status)))
}

/// First present message among the known error keys.
pub fn error_message(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    ERROR_MESSAGE_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.clone()),
        Some(Value::Null) | None => None,
        Some(Value::String(_)) => None,
        Some(other) => Some(other.to_string()),
    })
}

/// A successful status code whose body still reports a failure.
fn embedded_error(value: &Value) -> Option<ClientError> {
    let map = value.as_object()?;
    let status_is_error = map
        .get("status")
        .and_then(Value::as_str)
        .map(|status| status.eq_ignore_ascii_case("error"))
        .unwrap_or(false);
    let has_error_text = matches!(map.get("error"), Some(Value::String(_)));
    if !(status_is_error || has_error_text) {
        return None;
    }
    let message = error_message(value).unwrap_or_else(|| "the service reported an error".to_string());
    Some(ClientError::Api(message))
}

/// Accepts either a flat alert object or `{alert_id, configuracion: {...}}`.
fn alert_from_response(value: Value, request: &AlertRequest) -> Result<AlertConfig, ClientError> {
    let Value::Object(mut map) = value else {
        return Err(ClientError::Transport("unexpected alert response".to_string()));
    };
    let mut alert = match map.remove("configuracion") {
        Some(Value::Object(inner)) => inner,
        _ => map.clone(),
    };
    if !alert.contains_key("id") {
        let id = map
            .get("id")
            .or_else(|| map.get("alert_id"))
            .cloned()
            .ok_or_else(|| ClientError::Transport("alert response without id".to_string()))?;
        alert.insert("id".to_string(), id);
    }
    alert
        .entry("tipo".to_string())
        .or_insert_with(|| json!(request.tipo));
    alert
        .entry("threshold".to_string())
        .or_insert_with(|| json!(request.threshold));
    if let Some(vehicle) = &request.vehiculo {
        alert
            .entry("vehiculo".to_string())
            .or_insert_with(|| json!(vehicle));
    }
    serde_json::from_value(Value::Object(alert))
        .map_err(|err| ClientError::Transport(format!("unexpected alert response: {}", err)))
}
