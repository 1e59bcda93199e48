use async_trait::async_trait;

use crate::entities::{
    AlertConfig, AlertRequest, AnalysisFilters, AnalysisResult, ApiAck, HealthStatus,
    LoginResponse, PredictionResult, RegisterAck, RegisterRequest, ReportKind, UpdateStatus,
    UploadedFile,
};
use crate::error::ClientError;
use crate::value_objects::AlertId;

/// Outbound calls to the external analysis service. One request per call,
/// no retries.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze(
        &self,
        file: &UploadedFile,
        filters: Option<&AnalysisFilters>,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ClientError>;

    async fn generate_report(
        &self,
        kind: ReportKind,
        analysis: &AnalysisResult,
        token: Option<&str>,
    ) -> Result<Vec<u8>, ClientError>;

    async fn check_health(&self) -> Result<HealthStatus, ClientError>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterAck, ClientError>;

    async fn predict(
        &self,
        analysis: &AnalysisResult,
        period: &str,
        vehicle: &str,
        token: Option<&str>,
    ) -> Result<PredictionResult, ClientError>;

    async fn configure_alert(
        &self,
        request: &AlertRequest,
        token: Option<&str>,
    ) -> Result<AlertConfig, ClientError>;

    async fn remove_alert(&self, id: &AlertId, token: Option<&str>) -> Result<ApiAck, ClientError>;

    async fn check_for_updates(&self, token: Option<&str>) -> Result<UpdateStatus, ClientError>;
}
