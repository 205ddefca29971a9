use http::Method;
use http::HeaderValue;
use http::header::{CONTENT_TYPE, HeaderName};
use remix_config::{AllowList, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer for browser clients of the proxy
///
/// Only POST (and the OPTIONS preflight) is ever allowed since the proxy
/// serves a single POST route.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new().allow_methods([Method::POST, Method::OPTIONS]);

    layer = match &config.origins {
        AllowList::Any => layer.allow_origin(AllowOrigin::any()),
        AllowList::Only(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| {
                    origin
                        .parse::<HeaderValue>()
                        .inspect_err(|e| tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin"))
                        .ok()
                })
                .collect();
            layer.allow_origin(origins)
        }
    };

    layer = match &config.headers {
        AllowList::Any => layer.allow_headers(AllowHeaders::any()),
        AllowList::Only(headers) => {
            let mut headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            if !headers.contains(&CONTENT_TYPE) {
                headers.push(CONTENT_TYPE);
            }
            layer.allow_headers(headers)
        }
    };

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
