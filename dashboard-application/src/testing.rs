// Test doubles for the session ports

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use dashboard_domain::ports::{AnalysisApi, ReportSink, SessionStore};
use dashboard_domain::{
    AlertConfig, AlertId, AlertRequest, AnalysisFilters, AnalysisResult, ApiAck, ClientError,
    HealthStatus, HistoryEntry, LoginResponse, PredictionResult, RegisterAck, RegisterRequest,
    ReportKind, RuntimeConfig, UpdateStatus, UploadedFile, User, UserSession,
};

use crate::SessionController;

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: "http://fuel.test".to_string(),
        request_timeout_seconds: 5,
        data_dir: "./data".to_string(),
        report_dir: "./reports".to_string(),
        monitoring_interval_minutes: 5,
        notice_ttl_seconds: 5,
        history_limit: 50,
    }
}

pub fn sample_analysis(anomalies: usize) -> AnalysisResult {
    let records = (0..anomalies)
        .map(|idx| json!({"placa": format!("VEH-{idx}"), "score_anomalia": 0.7}))
        .collect::<Vec<_>>();
    serde_json::from_value(json!({
        "status": "success",
        "estadisticas": {"total_registros": 20, "anomalias_detectadas": anomalies},
        "resultados": records
    }))
    .expect("analysis fixture")
}

pub fn valid_file() -> UploadedFile {
    UploadedFile::new("consumo_enero.xlsx", vec![7u8; 512])
}

#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<&'static str>>,
    pub analyze_results: Mutex<VecDeque<Result<AnalysisResult, ClientError>>>,
    pub report_result: Mutex<Option<Result<Vec<u8>, ClientError>>>,
    pub login_result: Mutex<Option<Result<LoginResponse, ClientError>>>,
    pub update_polls: AtomicUsize,
    pub updates_available: Mutex<bool>,
    pub analyze_delay: Mutex<Option<Duration>>,
    pub last_token: Mutex<Option<String>>,
    pub next_alert_id: AtomicUsize,
}

impl FakeApi {
    fn record(&self, name: &'static str, token: Option<&str>) {
        self.calls.lock().unwrap().push(name);
        *self.last_token.lock().unwrap() = token.map(str::to_string);
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| **call == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn push_analysis(&self, result: Result<AnalysisResult, ClientError>) {
        self.analyze_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl AnalysisApi for FakeApi {
    async fn analyze(
        &self,
        _file: &UploadedFile,
        _filters: Option<&AnalysisFilters>,
        token: Option<&str>,
    ) -> Result<AnalysisResult, ClientError> {
        self.record("analyze", token);
        let delay = *self.analyze_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.analyze_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_analysis(3)))
    }

    async fn generate_report(
        &self,
        kind: ReportKind,
        _analysis: &AnalysisResult,
        token: Option<&str>,
    ) -> Result<Vec<u8>, ClientError> {
        self.record(
            match kind {
                ReportKind::Summary => "report",
                ReportKind::Charts => "chart_report",
            },
            token,
        );
        self.report_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(b"%PDF-1.4 fake".to_vec()))
    }

    async fn check_health(&self) -> Result<HealthStatus, ClientError> {
        self.record("health", None);
        Ok(HealthStatus {
            status: "healthy".to_string(),
            ..HealthStatus::default()
        })
    }

    async fn login(&self, email: &str, _password: &str) -> Result<LoginResponse, ClientError> {
        self.record("login", None);
        self.login_result.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(LoginResponse {
                user: User {
                    email: email.to_string(),
                    name: "Ana".to_string(),
                    role: "supervisor".to_string(),
                },
                token: "token-123".to_string(),
            })
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterAck, ClientError> {
        self.record("register", None);
        Ok(RegisterAck {
            message: Some("registered".to_string()),
            user: Some(User {
                email: request.email.clone(),
                name: request.name.clone(),
                role: request.role.clone(),
            }),
        })
    }

    async fn predict(
        &self,
        _analysis: &AnalysisResult,
        _period: &str,
        _vehicle: &str,
        token: Option<&str>,
    ) -> Result<PredictionResult, ClientError> {
        self.record("predict", token);
        Ok(serde_json::from_value(json!({
            "consumo_proyectado": 150.75, "tendencia": "Creciente", "confianza": 85
        }))
        .expect("prediction fixture"))
    }

    async fn configure_alert(
        &self,
        request: &AlertRequest,
        token: Option<&str>,
    ) -> Result<AlertConfig, ClientError> {
        self.record("configure_alert", token);
        let id = self.next_alert_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AlertConfig {
            id: AlertId(id.to_string()),
            tipo: request.tipo.clone(),
            threshold: Some(request.threshold),
            vehiculo: request.vehiculo.clone(),
        })
    }

    async fn remove_alert(&self, _id: &AlertId, token: Option<&str>) -> Result<ApiAck, ClientError> {
        self.record("remove_alert", token);
        Ok(ApiAck::default())
    }

    async fn check_for_updates(&self, token: Option<&str>) -> Result<UpdateStatus, ClientError> {
        self.record("check_for_updates", token);
        self.update_polls.fetch_add(1, Ordering::SeqCst);
        Ok(UpdateStatus {
            updates_available: *self.updates_available.lock().unwrap(),
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub session: Mutex<Option<UserSession>>,
    pub history: Mutex<Vec<HistoryEntry>>,
    pub fail_clear: AtomicBool,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load_session(&self) -> anyhow::Result<Option<UserSession>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save_session(&self, session: &UserSession) -> anyhow::Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> anyhow::Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            anyhow::bail!("session file is read-only");
        }
        *self.session.lock().unwrap() = None;
        Ok(())
    }

    async fn load_history(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn append_history(&self, entry: HistoryEntry, limit: usize) -> anyhow::Result<()> {
        let mut history = self.history.lock().unwrap();
        history.push(entry);
        if history.len() > limit {
            let overflow = history.len() - limit;
            history.drain(..overflow);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub saved: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl ReportSink for MemorySink {
    async fn save_report(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from("/reports").join(file_name))
    }
}

pub struct Harness {
    pub session: SessionController,
    pub api: Arc<FakeApi>,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<MemorySink>,
}

pub fn harness() -> Harness {
    let api = Arc::new(FakeApi::default());
    let store = Arc::new(MemoryStore::default());
    let sink = Arc::new(MemorySink::default());
    let session = SessionController::new(
        runtime_config(),
        api.clone(),
        store.clone(),
        sink.clone(),
    );
    Harness {
        session,
        api,
        store,
        sink,
    }
}
