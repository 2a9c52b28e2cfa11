//! Frontend bundle serving — router fallback.
//!
//! Paths without a `.` are client-side routes (`/`, `/master`, `/player`) and
//! all get `index.html`. Anything else is looked up in the bundle directory.

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::{path::Path, sync::Arc};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::app::AppState;

pub async fn frontend_handler(State(state): State<Arc<AppState>>, req: Request) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::NOT_FOUND.into_response();
    }

    let dist = Path::new(&state.config.frontend.dist_dir);
    let res = if is_spa_route(req.uri().path()) {
        ServeFile::new(dist.join("index.html")).oneshot(req).await
    } else {
        ServeDir::new(dist).oneshot(req).await
    };

    match res {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

fn is_spa_route(path: &str) -> bool {
    !path.trim_start_matches('/').contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{build_router, testing::StubTts, AppState};
    use axum::body::{to_bytes, Body};
    use bingo_core::config::BingoConfig;

    fn app_with_dist(dir: &Path) -> axum::Router {
        let mut config = BingoConfig::default();
        config.session.secret_id = "s".into();
        config.frontend.dist_dir = dir.to_string_lossy().into_owned();
        build_router(Arc::new(AppState::new(config, Arc::new(StubTts))))
    }

    async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
        let res = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    fn bundle() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>bingo</html>").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/main.js"), "console.log(1)").unwrap();
        dir
    }

    #[test]
    fn spa_route_detection() {
        assert!(is_spa_route("/"));
        assert!(is_spa_route("/player"));
        assert!(is_spa_route("/master/board"));
        assert!(!is_spa_route("/assets/main.js"));
        assert!(!is_spa_route("/favicon.ico"));
    }

    #[tokio::test]
    async fn root_and_client_routes_serve_index() {
        let dir = bundle();
        for uri in ["/", "/player", "/master"] {
            let (status, body) = get(app_with_dist(dir.path()), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, "<html>bingo</html>");
        }
    }

    #[tokio::test]
    async fn assets_are_served_from_bundle() {
        let dir = bundle();
        let (status, body) = get(app_with_dist(dir.path()), "/assets/main.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1)");
    }

    #[tokio::test]
    async fn missing_asset_is_404() {
        let dir = bundle();
        let (status, _) = get(app_with_dist(dir.path()), "/assets/nope.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_get_fallback_is_404() {
        let dir = bundle();
        let res = app_with_dist(dir.path())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/player")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
