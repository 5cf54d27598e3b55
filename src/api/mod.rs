// API module entry
// Request dispatch for the factorial microservice

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};
use crate::routing;

/// Main entry point for HTTP request handling.
///
/// Gates the method, guards the declared body size, dispatches to the
/// endpoint handlers, and emits one access-log entry per request.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());
    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    if state.show_headers {
        logger::log_headers_count(req.headers().len());
    }

    let response = if let Some(resp) = check_http_method(&method, state.config.http.enable_cors) {
        resp
    } else if let Some(resp) = check_body_size(req.headers(), state.config.http.max_body_size) {
        resp
    } else {
        route_request(&path)
    };

    if state.access_log {
        let mut entry =
            AccessLogEntry::new(remote_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.http_version = http_version;
        entry.status = response.status().as_u16();
        entry.body_bytes =
            usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
        entry.referer = referer;
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, state.access_log_format);
    }

    Ok(response)
}

/// Route request based on path.
///
/// Handlers are pure functions of the path parameter; anything without a
/// matching route falls through to the 404 response.
fn route_request(path: &str) -> Response<Full<Bytes>> {
    match path {
        "/" => handlers::handle_welcome(),
        _ => match routing::match_factorial_path(path) {
            Some(numero) => handlers::handle_factorial(numero),
            None => response::not_found(),
        },
    }
}

/// Check HTTP method and return the appropriate response for non-GET/HEAD
/// methods. The body for HEAD responses is elided by hyper itself.
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(response::options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(response::method_not_allowed())
        }
    }
}

/// Validate the Content-Length header and return 413 if exceeded.
fn check_body_size(
    headers: &hyper::HeaderMap,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Extract a request header as an owned string, if present and valid UTF-8.
fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// HTTP version as it appears in an access-log request line.
fn version_label(version: Version) -> String {
    let label = if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "1.1"
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("body is valid JSON")
    }

    #[tokio::test]
    async fn test_route_root_serves_welcome() {
        let response = route_request("/");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["mensaje"], "Microservicio de Factorial");
    }

    #[tokio::test]
    async fn test_route_factorial_serves_computation() {
        let response = route_request("/factorial/5");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({"numero": 5, "factorial": 120, "tipo": "impar"})
        );
    }

    #[tokio::test]
    async fn test_route_negative_input_maps_to_400() {
        let response = route_request("/factorial/-3");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "El número debe ser mayor o igual a 0");
    }

    #[tokio::test]
    async fn test_route_non_integer_segment_is_404() {
        assert_eq!(route_request("/factorial/abc").status(), StatusCode::NOT_FOUND);
        assert_eq!(route_request("/factorial/").status(), StatusCode::NOT_FOUND);
        assert_eq!(route_request("/unknown").status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_root_is_stateless_across_requests() {
        let first = body_json(route_request("/")).await;
        route_request("/factorial/10");
        let second = body_json(route_request("/")).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_method_gate() {
        assert!(check_http_method(&Method::GET, false).is_none());
        assert!(check_http_method(&Method::HEAD, false).is_none());

        let options = check_http_method(&Method::OPTIONS, false).expect("options handled");
        assert_eq!(options.status(), StatusCode::NO_CONTENT);

        let post = check_http_method(&Method::POST, false).expect("post rejected");
        assert_eq!(post.status(), StatusCode::METHOD_NOT_ALLOWED);

        let delete = check_http_method(&Method::DELETE, false).expect("delete rejected");
        assert_eq!(delete.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_body_size_guard_passes_small_or_absent() {
        let empty = hyper::HeaderMap::new();
        assert!(check_body_size(&empty, 1024).is_none());

        let mut under = hyper::HeaderMap::new();
        under.insert("content-length", "512".parse().unwrap());
        assert!(check_body_size(&under, 1024).is_none());

        // The limit itself is still acceptable
        let mut at_limit = hyper::HeaderMap::new();
        at_limit.insert("content-length", "1024".parse().unwrap());
        assert!(check_body_size(&at_limit, 1024).is_none());
    }

    #[tokio::test]
    async fn test_body_size_guard_rejects_oversized_declaration() {
        let mut over = hyper::HeaderMap::new();
        over.insert("content-length", "2048".parse().unwrap());

        let response = check_body_size(&over, 1024).expect("oversized body rejected");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_body_size_guard_skips_unparsable_values() {
        let mut garbage = hyper::HeaderMap::new();
        garbage.insert("content-length", "not-a-number".parse().unwrap());
        assert!(check_body_size(&garbage, 1024).is_none());
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
