#[macro_use]
mod utils;
mod config;
mod logger;
mod models;
mod server;
mod state;
use axum::http::{header, Method};
use axum::Router;
use logger::Logger;
use state::init::AppStateTraitInitializer;
use state::AppState;
use state::WithState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use tower_http::cors::{self, CorsLayer};
use tower_http::services::ServeDir;

lazy_static::lazy_static! {
    pub static ref ROUTE_REGISTRY: Mutex<Vec<Box<dyn WithState>>> = Mutex::new(Vec::new());
}

/// Registered api routes, the static site as fallback and an open CORS policy.
pub fn build_app(shared_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    let routes = match ROUTE_REGISTRY.lock() {
        Ok(registry) => registry.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };

    routes
        .into_iter()
        .fold(Router::new(), |acc, r| {
            acc.merge(r.to_router(shared_state.clone()))
        })
        .fallback_service(ServeDir::new(&shared_state.conf.public_dir))
        .layer(cors)
}

#[tokio::main]
async fn main() {
    let shared_state: Arc<AppState> = match AppState::load() {
        Ok(state) => state,
        Err(err) => {
            Logger::new().severe(format!("{:#}", err));
            std::process::exit(1);
        }
    };
    shared_state
        .logger
        .async_info("starting strk tip server")
        .await;

    let server_port = shared_state.conf.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    let app = build_app(shared_state.clone());

    // spawn the server task
    let server_task = tokio::spawn(async move {
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await
    });
    shared_state
        .logger
        .async_info(format!(
            "server: listening on http://0.0.0.0:{}",
            server_port
        ))
        .await;

    // wait for server to stop the program
    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            shared_state
                .logger
                .async_severe(format!("server error: {}", err))
                .await
        }
        Err(err) => {
            shared_state
                .logger
                .async_severe(format!("server task failed: {}", err))
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use super::*;
    use crate::server::test_utils::{body_string, test_state};

    async fn send(request: Request<Body>) -> axum::response::Response {
        build_app(test_state()).oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_tip_routes() {
        let response = send(
            Request::get("/api/tip")
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["links"]["actions"].as_array().unwrap().len(), 4);

        let response = send(
            Request::get("/api/tip/50")
                .header(header::ACCEPT, "text/html")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<title>Tip 50 STRK</title>"));
    }

    #[tokio::test]
    async fn test_post_tip_route() {
        let response = send(
            Request::post("/api/tip?amount=10")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(body["transaction"].as_str().unwrap().contains("\"transfer\""));

        let response = send(
            Request::post("/api/tip?amount=-5")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_landing_page() {
        let response = send(Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("Buy Me a Coffee"));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = send(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/tip")
                .header(header::ORIGIN, "https://x.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
