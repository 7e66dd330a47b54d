use std::path::{Path, PathBuf};

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState, static_dir: PathBuf) -> Router {
    let static_assets = Router::new()
        .fallback_service(
            ServeDir::new(static_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    Router::new()
        .route("/api/health", axum::routing::get(routes::api::health))
        .layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    // Monastery photos and 360° scene images.
    if path.starts_with("/assets/") {
        return Some("public, max-age=86400");
    }

    None
}

/// Trunk names bundles like `monastery360-client-0f3a9c1d2b4e6f70_bg.wasm`.
fn is_hashed_bundle_asset(path: &str) -> bool {
    let path = Path::new(path);
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    const BUNDLE_WASM: &str = "monastery360-client-71578f6b278221f3_bg.wasm";

    fn static_fixture() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("monastery360-static-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("assets/images")).expect("create fixture dirs");
        std::fs::write(dir.join("index.html"), "<!DOCTYPE html><div id=\"app\"></div>")
            .expect("write index");
        std::fs::write(dir.join(BUNDLE_WASM), b"\0asm").expect("write wasm");
        std::fs::write(dir.join("assets/images/rumtek.jpg"), b"jpg").expect("write image");
        dir
    }

    async fn cache_header_for(uri: &str) -> (StatusCode, Option<String>) {
        let app = build_app(AppState::new(), static_fixture());
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("static response");
        let header = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        (response.status(), header)
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path(&format!("/{BUNDLE_WASM}")),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/style-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn unhashed_bundles_get_no_override() {
        assert_eq!(cache_control_for_path("/monastery360-client.js"), None);
        assert_eq!(cache_control_for_path("/style.css"), None);
    }

    #[test]
    fn day_cache_for_images() {
        assert_eq!(
            cache_control_for_path("/assets/360-images/rumtek-main.jpg"),
            Some("public, max-age=86400")
        );
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
    }

    #[tokio::test]
    async fn served_files_carry_cache_headers() {
        let (status, header) = cache_header_for(&format!("/{BUNDLE_WASM}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header.as_deref(), Some("public, max-age=31536000, immutable"));

        let (status, header) = cache_header_for("/assets/images/rumtek.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header.as_deref(), Some("public, max-age=86400"));

        let (status, header) = cache_header_for("/index.html").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(header, None);
    }

    #[tokio::test]
    async fn missing_files_get_no_cache_header() {
        let (status, header) = cache_header_for("/assets/images/unknown.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(header, None);
    }
}
