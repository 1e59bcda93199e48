use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use dashboard_domain::ports::AnalysisApi;
use dashboard_domain::{
    AlertId, AlertRequest, AnalysisFilters, AnalysisResult, ClientError, RegisterRequest,
    ReportKind, UploadedFile,
};
use dashboard_infrastructure::HttpAnalysisClient;

#[derive(Clone, Default)]
struct Recorded {
    hits: Arc<AtomicUsize>,
    upload: Arc<Mutex<Option<(String, String, Option<String>)>>>,
    report_body: Arc<Mutex<Option<Value>>>,
    auth: Arc<Mutex<Option<String>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn client(base_url: &str) -> HttpAnalysisClient {
    HttpAnalysisClient::new(base_url, Duration::from_secs(5)).expect("client")
}

fn spreadsheet() -> UploadedFile {
    UploadedFile::new("consumo_marzo.xlsx", vec![0x50, 0x4b, 0x03, 0x04])
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

async fn analyze_handler(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Json<Value> {
    recorded.hits.fetch_add(1, Ordering::SeqCst);
    *recorded.auth.lock().unwrap() = bearer(&headers);
    let mut file_name = String::new();
    let mut content_type = String::new();
    let mut filters = None;
    while let Some(field) = multipart.next_field().await.expect("field") {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                content_type = field.content_type().unwrap_or_default().to_string();
                let _ = field.bytes().await.expect("bytes");
            }
            Some("filters") => filters = Some(field.text().await.expect("text")),
            _ => {}
        }
    }
    *recorded.upload.lock().unwrap() = Some((file_name, content_type, filters));
    Json(json!({
        "status": "success",
        "id": "analisis_001",
        "estadisticas": {
            "total_registros": 120,
            "anomalias_detectadas": 2,
            "porcentaje_anomalias": 1.67,
            "vehiculos_unicos": 14
        },
        "resultados": [
            {"fecha": "2024-03-01", "placa": "ABC-123", "galones": "45.5", "tipo_anomalia": "consumo_excesivo", "score_anomalia": 0.91},
            {"fecha": "2024-03-02", "placa": "XYZ-789", "galones": 12.0, "tipo_anomalia": "horario_inusual", "score_anomalia": 0.64, "zona": "norte"}
        ],
        "graficos": {"barras": "base64"}
    }))
}

async fn report_handler(
    State(recorded): State<Recorded>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *recorded.report_body.lock().unwrap() = Some(body);
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        b"%PDF-1.4 fuel report".to_vec(),
    )
}

#[tokio::test]
async fn analyze_uploads_multipart_and_parses_result() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/analizar/", post(analyze_handler))
        .with_state(recorded.clone());
    let base = serve(router).await;

    let filters = AnalysisFilters {
        vehicle: Some("ABC-123".to_string()),
        ..AnalysisFilters::default()
    };
    let result = client(&base)
        .analyze(&spreadsheet(), Some(&filters), Some("token-123"))
        .await
        .expect("analysis");

    assert_eq!(result.status, "success");
    assert_eq!(result.anomaly_count(), 2);
    assert_eq!(result.resultados[0].galones, Some(45.5));
    assert_eq!(result.estadisticas.unique_vehicles(), 14.0);

    let (name, mime, sent_filters) = recorded.upload.lock().unwrap().clone().expect("upload");
    assert_eq!(name, "consumo_marzo.xlsx");
    assert_eq!(
        mime,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let sent_filters: Value = serde_json::from_str(&sent_filters.expect("filters")).expect("json");
    assert_eq!(sent_filters, json!({"vehicle": "ABC-123"}));
    assert_eq!(
        recorded.auth.lock().unwrap().as_deref(),
        Some("Bearer token-123")
    );
}

#[tokio::test]
async fn analyze_rejects_bad_files_before_sending() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/analizar/", post(analyze_handler))
        .with_state(recorded.clone());
    let base = serve(router).await;
    let api = client(&base);

    let csv = UploadedFile::new("consumo.csv", vec![1, 2, 3]);
    let err = api.analyze(&csv, None, None).await.expect_err("csv");
    assert!(err.is_validation());

    let huge = UploadedFile::new("consumo.xls", vec![0; 10 * 1024 * 1024 + 1]);
    let err = api.analyze(&huge, None, None).await.expect_err("too large");
    assert!(err.to_string().contains("10MB"));

    assert_eq!(recorded.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn report_posts_analysis_unchanged_and_returns_pdf() {
    let recorded = Recorded::default();
    let router = Router::new()
        .route("/analizar/", post(analyze_handler))
        .route("/generar-reporte/", post(report_handler))
        .route("/generar-reporte-graficos/", post(report_handler))
        .with_state(recorded.clone());
    let base = serve(router).await;
    let api = client(&base);

    let analysis = api.analyze(&spreadsheet(), None, None).await.expect("analysis");
    let pdf = api
        .generate_report(ReportKind::Summary, &analysis, None)
        .await
        .expect("report");
    assert!(pdf.starts_with(b"%PDF"));

    let body = recorded.report_body.lock().unwrap().clone().expect("body");
    assert_eq!(body["estadisticas"]["total_registros"], json!(120));
    assert_eq!(body["graficos"], json!({"barras": "base64"}));
    assert_eq!(body["resultados"][1]["zona"], json!("norte"));

    let charts = api
        .generate_report(ReportKind::Charts, &analysis, None)
        .await
        .expect("chart report");
    assert!(!charts.is_empty());
}

#[tokio::test]
async fn error_messages_come_from_known_keys() {
    let router = Router::new()
        .route(
            "/predecir/",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "modelo no entrenado"})),
                )
            }),
        )
        .route(
            "/check-updates/",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detalle": "Token inválido"})),
                )
            }),
        )
        .route(
            "/generar-reporte/",
            post(|| async { Json(json!({"status": "error", "message": "sin datos"})) }),
        );
    let base = serve(router).await;
    let api = client(&base);
    let analysis = AnalysisResult::default();

    let err = api
        .predict(&analysis, "mensual", "all", None)
        .await
        .expect_err("predict");
    assert_eq!(err, ClientError::Api("modelo no entrenado".to_string()));

    let err = api.check_for_updates(None).await.expect_err("updates");
    assert_eq!(err, ClientError::Api("Token inválido".to_string()));

    let err = api
        .generate_report(ReportKind::Summary, &analysis, None)
        .await
        .expect_err("report");
    assert_eq!(err, ClientError::Api("sin datos".to_string()));
}

#[tokio::test]
async fn unreadable_error_body_is_a_transport_error() {
    let router = Router::new().route(
        "/health",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let base = serve(router).await;

    let err = client(&base).check_health().await.expect_err("health");
    assert!(matches!(err, ClientError::Transport(ref message) if message.contains("502")));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .check_health()
        .await
        .expect_err("unreachable");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn login_accepts_access_token_and_register_sends_role() {
    let registered = Arc::new(Mutex::new(None::<Value>));
    let seen = registered.clone();
    let router = Router::new()
        .route(
            "/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secreto" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "access_token": "jwt-abc",
                            "token_type": "bearer",
                            "user": {"email": body["email"], "name": "Ana", "role": "supervisor"}
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"detail": "Credenciales inválidas"})),
                    )
                }
            }),
        )
        .route(
            "/register",
            post(move |Json(body): Json<Value>| async move {
                *seen.lock().unwrap() = Some(body);
                Json(json!({"message": "Usuario registrado exitosamente"}))
            }),
        );
    let base = serve(router).await;
    let api = client(&base);

    let login = api.login("ana@example.com", "secreto").await.expect("login");
    assert_eq!(login.token, "jwt-abc");
    assert_eq!(login.user.role, "supervisor");

    let err = api.login("ana@example.com", "wrong").await.expect_err("bad login");
    assert_eq!(err, ClientError::Api("Credenciales inválidas".to_string()));

    let ack = api
        .register(&RegisterRequest {
            name: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            password: "clave".to_string(),
            role: "user".to_string(),
        })
        .await
        .expect("register");
    assert_eq!(ack.message.as_deref(), Some("Usuario registrado exitosamente"));
    assert_eq!(registered.lock().unwrap().clone().expect("body")["role"], "user");
}

#[tokio::test]
async fn alerts_are_created_and_removed() {
    let router = Router::new()
        .route(
            "/configurar-alerta/",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"id": 7, "tipo": body["tipo"], "threshold": body["threshold"], "vehiculo": body["vehiculo"]}))
            }),
        )
        .route(
            "/eliminar-alerta/:id",
            delete(|Path(id): Path<String>| async move {
                Json(json!({"message": format!("alert {} removed", id)}))
            }),
        );
    let base = serve(router).await;
    let api = client(&base);

    let alert = api
        .configure_alert(
            &AlertRequest {
                tipo: "consumo_excesivo".to_string(),
                threshold: 50.0,
                vehiculo: Some("ABC-123".to_string()),
            },
            Some("token-123"),
        )
        .await
        .expect("configure");
    assert_eq!(alert.id, AlertId::from("7"));
    assert_eq!(alert.describe(), "[7] consumo_excesivo: 50 (ABC-123)");

    let ack = api
        .remove_alert(&alert.id, Some("token-123"))
        .await
        .expect("remove");
    assert_eq!(ack.message.as_deref(), Some("alert 7 removed"));

    let ack = api
        .remove_alert(&AlertId::from("zona/norte?x"), None)
        .await
        .expect("remove with reserved characters");
    assert_eq!(ack.message.as_deref(), Some("alert zona/norte?x removed"));
}

#[tokio::test]
async fn update_check_sends_bearer_token() {
    let router = Router::new().route(
        "/check-updates/",
        get(|headers: HeaderMap| async move {
            let authorized = bearer(&headers).as_deref() == Some("Bearer token-123");
            Json(json!({"updates_available": authorized}))
        }),
    );
    let base = serve(router).await;
    let api = client(&base);

    assert!(api.check_for_updates(Some("token-123")).await.expect("poll").updates_available);
    assert!(!api.check_for_updates(None).await.expect("poll").updates_available);
}
