use crate::content::PORTFOLIO;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::{
    cmp::Ordering,
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::time::Instant;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_STATIC_MAX_AGE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const PORT_BOUNDS: (u64, u64) = (1, 65_535);
const STATIC_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    fn parse(value: Option<&str>, default: Self) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("debug") => Self::Debug,
            Some("info") => Self::Info,
            _ => default,
        }
    }
}

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    resume_path: PathBuf,
    resume_download_name: String,
    static_max_age_seconds: u64,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = parse_env_u64_with_bounds("PORT", u64::from(DEFAULT_PORT), PORT_BOUNDS);
        let dist_dir = parse_env_non_empty_string("DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let resume_path = parse_env_non_empty_string("RESUME_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_resume_path(&dist_dir));
        let resume_download_name = parse_env_non_empty_string("RESUME_DOWNLOAD_NAME")
            .unwrap_or_else(|| PORTFOLIO.resume.download_name.to_string());
        let static_max_age_seconds = parse_env_u64_with_bounds(
            "STATIC_MAX_AGE_SECONDS",
            DEFAULT_STATIC_MAX_AGE_SECONDS,
            STATIC_MAX_AGE_SECONDS_BOUNDS,
        );
        let log_level = LogLevel::parse(
            parse_env_non_empty_string("LOG_LEVEL").as_deref(),
            DEFAULT_LOG_LEVEL,
        );

        Self {
            port: u16::try_from(port).unwrap_or(DEFAULT_PORT),
            dist_dir,
            resume_path,
            resume_download_name,
            static_max_age_seconds,
            log_level,
        }
    }
}

fn default_resume_path(dist_dir: &Path) -> PathBuf {
    dist_dir.join(PORTFOLIO.resume.path.trim_start_matches('/'))
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

#[derive(Clone, Debug)]
struct RequestId(String);

#[derive(Serialize)]
struct ErrorPayload {
    ok: bool,
    error: String,
}

impl ErrorPayload {
    fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: message.to_string(),
        }
    }
}

fn build_router(state: AppState) -> Router {
    let dist_dir = &state.config.dist_dir;
    let static_service =
        ServeDir::new(dist_dir).not_found_service(ServeFile::new(dist_dir.join("index.html")));

    Router::new()
        .route(PORTFOLIO.resume.path, get(get_resume))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), track_request))
        .with_state(state)
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        config: Arc::new(config),
    };

    log_event(
        &state.config,
        LogLevel::Info,
        "server_config",
        serde_json::json!({
            "dist_dir": state.config.dist_dir.display().to_string(),
            "resume_path": state.config.resume_path.display().to_string(),
            "static_max_age_seconds": state.config.static_max_age_seconds,
        }),
    );

    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &state.config,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({ "url": format!("http://127.0.0.1:{}", state.config.port) }),
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn track_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> axum::response::Response {
    let started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;
    let status = response.status();

    if !response.headers().contains_key(header::CACHE_CONTROL) {
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let policy = cache_policy(status, content_type, state.config.static_max_age_seconds);
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, header_value(&policy));
    }
    if let Ok(request_id_header) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, request_id_header);
    }

    log_event(
        &state.config,
        LogLevel::Info,
        "request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": path,
            "status": status.as_u16(),
            "status_class": http_status_class(status),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );

    response
}

async fn get_resume(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
) -> axum::response::Response {
    let config = &state.config;

    match tokio::fs::read(&config.resume_path).await {
        Ok(bytes) => {
            log_event(
                config,
                LogLevel::Debug,
                "resume_served",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "bytes": bytes.len(),
                }),
            );

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
            headers.insert(
                header::CONTENT_DISPOSITION,
                header_value(&content_disposition(&config.resume_download_name)),
            );
            headers.insert(
                header::CACHE_CONTROL,
                header_value(&format!("public, max-age={}", config.static_max_age_seconds)),
            );
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(error) => {
            log_event(
                config,
                LogLevel::Info,
                "resume_unavailable",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "error_class": classify_io_error(&error),
                }),
            );

            let mut headers = HeaderMap::new();
            headers.insert(header::CACHE_CONTROL, header_value("no-store"));
            (
                StatusCode::NOT_FOUND,
                headers,
                Json(ErrorPayload::error("resume unavailable")),
            )
                .into_response()
        }
    }
}

fn content_disposition(download_name: &str) -> String {
    let safe_name: String = download_name
        .chars()
        .filter(|ch| !ch.is_control() && *ch != '"' && *ch != '\\')
        .collect();
    format!("attachment; filename=\"{safe_name}\"")
}

fn cache_policy(status: StatusCode, content_type: Option<&str>, max_age_seconds: u64) -> String {
    if !status.is_success() {
        return "no-store".to_string();
    }

    let is_html = content_type
        .map(|value| value.trim_start().starts_with("text/html"))
        .unwrap_or(false);

    if is_html || max_age_seconds == 0 {
        "no-cache".to_string()
    } else {
        format!("public, max-age={max_age_seconds}")
    }
}

fn classify_io_error(error: &io::Error) -> &'static str {
    match error.kind() {
        io::ErrorKind::NotFound => "not_found",
        io::ErrorKind::PermissionDenied => "permission_denied",
        _ => "io",
    }
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    parse_u64_with_bounds(std::env::var(name).ok().as_deref(), default, bounds)
}

fn parse_u64_with_bounds(value: Option<&str>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn http_status_class(status: StatusCode) -> &'static str {
    if status.is_informational() {
        return "1xx";
    }

    if status.is_success() {
        return "2xx";
    }

    if status.is_redirection() {
        return "3xx";
    }

    if status.is_client_error() {
        return "4xx";
    }

    if status.is_server_error() {
        return "5xx";
    }

    "unknown"
}

fn build_log_payload(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    println!("{}", build_log_payload(level, event, fields));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(resume_path: PathBuf) -> ServerConfig {
        ServerConfig {
            port: DEFAULT_PORT,
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            resume_path,
            resume_download_name: PORTFOLIO.resume.download_name.to_string(),
            static_max_age_seconds: DEFAULT_STATIC_MAX_AGE_SECONDS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    fn test_state(resume_path: PathBuf) -> AppState {
        AppState {
            config: Arc::new(test_config(resume_path)),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("portfolio-test-{}-{name}", std::process::id()))
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable")
            .to_vec()
    }

    #[test]
    fn log_level_parsing_is_case_insensitive_with_fallback() {
        assert_eq!(LogLevel::parse(Some("DEBUG"), LogLevel::Info), LogLevel::Debug);
        assert_eq!(LogLevel::parse(Some("info"), LogLevel::Debug), LogLevel::Info);
        assert_eq!(LogLevel::parse(Some("verbose"), LogLevel::Info), LogLevel::Info);
        assert_eq!(LogLevel::parse(None, LogLevel::Debug), LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
    }

    #[test]
    fn bounded_integers_fall_back_when_out_of_range() {
        assert_eq!(parse_u64_with_bounds(Some(" 3000 "), 8080, PORT_BOUNDS), 3000);
        assert_eq!(parse_u64_with_bounds(Some("0"), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(Some("70000"), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(Some("soon"), 8080, PORT_BOUNDS), 8080);
        assert_eq!(parse_u64_with_bounds(None, 8080, PORT_BOUNDS), 8080);
    }

    #[test]
    fn resume_defaults_to_dist_directory() {
        assert_eq!(
            default_resume_path(Path::new("dist")),
            PathBuf::from("dist/resume.pdf")
        );
    }

    #[test]
    fn html_is_revalidated_and_assets_are_cached() {
        assert_eq!(
            cache_policy(StatusCode::OK, Some("text/html; charset=utf-8"), 3_600),
            "no-cache"
        );
        assert_eq!(
            cache_policy(StatusCode::OK, Some("application/wasm"), 3_600),
            "public, max-age=3600"
        );
        assert_eq!(cache_policy(StatusCode::OK, Some("text/css"), 0), "no-cache");
        assert_eq!(cache_policy(StatusCode::NOT_FOUND, None, 3_600), "no-store");
    }

    #[test]
    fn content_disposition_strips_quotes_and_control_chars() {
        assert_eq!(
            content_disposition("Nirvan_Naveen_Resume.pdf"),
            "attachment; filename=\"Nirvan_Naveen_Resume.pdf\""
        );
        assert_eq!(
            content_disposition("bad\"name\n.pdf"),
            "attachment; filename=\"badname.pdf\""
        );
    }

    #[test]
    fn request_id_is_propagated_or_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  upstream-42 "));
        assert_eq!(resolve_request_id(&headers), "upstream-42");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
        assert_ne!(generated, resolve_request_id(&HeaderMap::new()));
    }

    #[test]
    fn status_classes_cover_common_codes() {
        assert_eq!(http_status_class(StatusCode::OK), "2xx");
        assert_eq!(http_status_class(StatusCode::NOT_MODIFIED), "3xx");
        assert_eq!(http_status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(http_status_class(StatusCode::BAD_GATEWAY), "5xx");
    }

    #[test]
    fn log_payload_merges_fields_after_envelope() {
        let payload = build_log_payload(
            LogLevel::Info,
            "request_complete",
            serde_json::json!({ "status": 200, "path": "/" }),
        );

        assert_eq!(payload["level"], "info");
        assert_eq!(payload["event"], "request_complete");
        assert_eq!(payload["status"], 200);
        assert_eq!(payload["path"], "/");
        assert!(payload["ts"].is_u64());
    }

    #[tokio::test]
    async fn resume_is_served_as_attachment() {
        let path = scratch_path("resume.pdf");
        tokio::fs::write(&path, b"%PDF-1.4 test")
            .await
            .expect("scratch resume should be writable");

        let response = get_resume(
            State(test_state(path.clone())),
            Extension(RequestId("req-test".to_string())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/pdf"))
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION),
            Some(&HeaderValue::from_static(
                "attachment; filename=\"Nirvan_Naveen_Resume.pdf\""
            ))
        );
        assert_eq!(body_bytes(response).await, b"%PDF-1.4 test".to_vec());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_resume_returns_not_found_payload() {
        let response = get_resume(
            State(test_state(scratch_path("missing.pdf"))),
            Extension(RequestId("req-test".to_string())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );

        let payload: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json error payload");
        assert_eq!(payload["ok"], false);
        assert_eq!(payload["error"], "resume unavailable");
    }

    #[test]
    fn missing_file_errors_are_classified() {
        let error = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(classify_io_error(&error), "not_found");
        let error = io::Error::new(io::ErrorKind::Other, "disk");
        assert_eq!(classify_io_error(&error), "io");
    }

    #[test]
    fn router_builds_with_default_config() {
        let _router = build_router(test_state(PathBuf::from("dist/resume.pdf")));
    }
}
