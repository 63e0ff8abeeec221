//! HTTP surface for the outline pipeline.
//!
//! A single `GET /outline?country=<topic>` route, built once at startup.

mod routes;

use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use glean_outline::OutlineClient;
use glean_shared::{GleanError, Result};

pub use routes::{ErrorBody, OutlineQuery};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub outline: OutlineClient,
}

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/outline", get(routes::outline_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| GleanError::Network(format!("failed to bind {addr}: {e}")))?;

    let local: SocketAddr = listener
        .local_addr()
        .map_err(|e| GleanError::Network(format!("failed to read bound address: {e}")))?;
    info!(%local, "outline server listening");

    axum::serve(listener, build_app(state))
        .await
        .map_err(|e| GleanError::Network(format!("server error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn spawn_app(reference_base: &str) -> String {
        let outline = OutlineClient::new(reqwest::Client::new(), reference_base).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, build_app(AppState { outline }))
                .await
                .unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn outline_returns_plain_text() {
        let wiki = wiremock::MockServer::start().await;

        let page = r#"<html><body>
            <h1>Norway</h1>
            <h2>History<span class="mw-editsection">[edit]</span></h2>
            <h3>Viking Age</h3>
        </body></html>"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/wiki/Norway"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(page))
            .mount(&wiki)
            .await;

        let base = spawn_app(&format!("{}/wiki", wiki.uri())).await;
        let resp = reqwest::get(format!("{base}/outline?country=Norway"))
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        assert_eq!(content_type, "text/plain; charset=utf-8");
        assert_eq!(
            resp.text().await.unwrap(),
            "# Norway\n## History\n### Viking Age"
        );
    }

    #[tokio::test]
    async fn topic_alias_and_spaces() {
        let wiki = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/wiki/South_Korea"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string("<h1>South Korea</h1>"),
            )
            .mount(&wiki)
            .await;

        let base = spawn_app(&format!("{}/wiki", wiki.uri())).await;
        let resp = reqwest::get(format!("{base}/outline?topic=South%20Korea"))
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "# South Korea");
    }

    #[tokio::test]
    async fn missing_parameter_is_400() {
        let base = spawn_app("https://en.wikipedia.org/wiki").await;

        for query in ["", "?country=", "?country=%20%20"] {
            let resp = reqwest::get(format!("{base}/outline{query}")).await.unwrap();
            assert_eq!(resp.status(), 400);

            let body: serde_json::Value = resp.json().await.unwrap();
            assert_eq!(body["error"], "country parameter is required");
        }
    }

    #[tokio::test]
    async fn repeated_and_aliased_parameters() {
        let wiki = wiremock::MockServer::start().await;

        for topic in ["Chile", "Peru"] {
            wiremock::Mock::given(wiremock::matchers::path(format!("/wiki/{topic}")))
                .respond_with(
                    wiremock::ResponseTemplate::new(200)
                        .set_body_string(format!("<h1>{topic}</h1>")),
                )
                .mount(&wiki)
                .await;
        }

        let base = spawn_app(&format!("{}/wiki", wiki.uri())).await;

        let resp = reqwest::get(format!("{base}/outline?country=Chile&country=Peru"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "# Chile");

        let resp = reqwest::get(format!("{base}/outline?country=&topic=Peru"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "# Peru");
    }

    #[tokio::test]
    async fn failed_fetch_is_500() {
        let wiki = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::path("/wiki/Nowhere"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&wiki)
            .await;

        let base = spawn_app(&format!("{}/wiki", wiki.uri())).await;
        let resp = reqwest::get(format!("{base}/outline?country=Nowhere"))
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "failed to fetch reference page for Nowhere");
    }

    #[tokio::test]
    async fn unreachable_site_is_500() {
        let base = spawn_app("http://127.0.0.1:1/wiki").await;
        let resp = reqwest::get(format!("{base}/outline?country=Peru"))
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Peru"));
    }
}
