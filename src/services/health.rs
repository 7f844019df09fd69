use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub bookings: BookingHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingHealth {
    pub admin_count: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub admin_count: usize,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(admin_count: usize) -> Self {
        let state = AppState {
            admin_count,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state);

        Self { router }
    }
}

/// Without administrators requests are still accepted but reach nobody.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let status = if state.admin_count == 0 { "degraded" } else { "healthy" };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        bookings: BookingHealth {
            admin_count: state.admin_count,
        },
        uptime_seconds: uptime,
    })
}

async fn readiness_check(State(state): State<AppState>) -> Result<Json<&'static str>, StatusCode> {
    if state.admin_count == 0 {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json("ready"))
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_endpoint_reports_admins() {
        let server = TestServer::new(HealthService::new(2).router)
            .expect("Failed to create test server");

        let response = server.get("/health").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let health: HealthResponse = response.json();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(health.bookings.admin_count, 2);
    }

    #[tokio::test]
    async fn test_health_is_degraded_without_admins() {
        let server = TestServer::new(HealthService::new(0).router)
            .expect("Failed to create test server");

        let health: HealthResponse = server.get("/health").await.json();
        assert_eq!(health.status, "degraded");

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readiness_endpoint() {
        let server = TestServer::new(HealthService::new(1).router)
            .expect("Failed to create test server");

        let response = server.get("/health/ready").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let ready: String = response.json();
        assert_eq!(ready, "ready");
    }

    #[tokio::test]
    async fn test_liveness_endpoint() {
        let server = TestServer::new(HealthService::new(0).router)
            .expect("Failed to create test server");

        let response = server.get("/health/live").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let alive: String = response.json();
        assert_eq!(alive, "alive");
    }
}
