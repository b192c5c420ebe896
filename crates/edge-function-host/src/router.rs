//! Function router - forwards every HTTP request to the hosted handler
//!
//! There is no route table: `/` and every other path, under every method,
//! reach the same function.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::invoke::FunctionHost;

/// Shared router state
#[derive(Clone)]
pub struct HostState {
    pub host: FunctionHost,
    pub max_body_bytes: usize,
}

/// Create the router that hands all incoming requests to the function
pub fn create_function_router(state: HostState) -> Router {
    Router::new()
        .route("/", any(handle_function_request))
        .route("/{*path}", any(handle_function_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle an incoming request by invoking the hosted function
async fn handle_function_request(
    State(state): State<HostState>,
    request: Request<Body>,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let query: HashMap<String, String> = request
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let client_ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string());

    let body_bytes = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(request_id = %request_id, "Failed to read body: {}", e);
            return into_axum_response(edge_function_sdk::Response::bad_request(
                "Failed to read body",
            ));
        }
    };

    let body = if body_bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body_bytes).to_string())
    };

    let sdk_request = edge_function_sdk::Request {
        method,
        path,
        query,
        headers,
        body,
        client_ip,
        request_id: request_id.clone(),
    };

    match state.host.invoke(sdk_request).await {
        Ok(sdk_response) => into_axum_response(sdk_response),
        Err(e) => {
            tracing::error!(request_id = %request_id, "Handler error: {}", e);
            into_axum_response(e.into_response())
        }
    }
}

fn into_axum_response(sdk_response: edge_function_sdk::Response) -> Response {
    let mut builder = Response::builder().status(
        StatusCode::from_u16(sdk_response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    );

    for (key, value) in sdk_response.headers {
        builder = builder.header(&key, &value);
    }

    match builder.body(Body::from(sdk_response.body.unwrap_or_default())) {
        Ok(response) => response,
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{self, header};
    use edge_function_sdk::HandlerError;
    use http_body_util::BodyExt; // for `collect`
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt; // for `oneshot`

    fn echo(req: edge_function_sdk::Request) -> Result<edge_function_sdk::Response, HandlerError> {
        edge_function_sdk::Response::ok(json!({
            "method": req.method,
            "path": req.path,
            "query": req.query,
            "body": req.body,
            "client_ip": req.client_ip,
            "has_request_id": !req.request_id.is_empty(),
        }))
    }

    fn app(max_body_bytes: usize) -> Router {
        create_function_router(HostState {
            host: FunctionHost::new(echo, Duration::from_secs(5)),
            max_body_bytes,
        })
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_request_fields_reach_handler() {
        let response = app(1024)
            .oneshot(
                Request::builder()
                    .method(http::Method::PUT)
                    .uri("/a/b?x=1&name=hello%20world")
                    .header("x-forwarded-for", "10.0.0.1, 10.0.0.2")
                    .body(Body::from("payload"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            json!({
                "method": "PUT",
                "path": "/a/b",
                "query": { "x": "1", "name": "hello world" },
                "body": "payload",
                "client_ip": "10.0.0.1",
                "has_request_id": true,
            })
        );
    }

    #[tokio::test]
    async fn test_root_path_is_routed() {
        let response = app(1024)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["path"], "/");
        assert_eq!(body["body"], Value::Null);
    }

    #[tokio::test]
    async fn test_oversize_body_is_rejected() {
        let response = app(4)
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri("/")
                    .body(Body::from("far more than four bytes"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_handler_fault_becomes_500() {
        let app = create_function_router(HostState {
            host: FunctionHost::new(
                |_req: edge_function_sdk::Request| -> Result<edge_function_sdk::Response, HandlerError> {
                    Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed").into())
                },
                Duration::from_secs(5),
            ),
            max_body_bytes: 1024,
        });

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("stdout closed"));
    }

    async fn status_for(host: FunctionHost) -> StatusCode {
        let app = create_function_router(HostState {
            host,
            max_body_bytes: 1024,
        });

        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_500() {
        let host = FunctionHost::new(
            |_req: edge_function_sdk::Request| -> Result<edge_function_sdk::Response, HandlerError> {
                panic!("handler blew up")
            },
            Duration::from_secs(5),
        );

        assert_eq!(status_for(host).await, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_slow_handler_becomes_504() {
        let host = FunctionHost::new(
            |_req: edge_function_sdk::Request| -> Result<edge_function_sdk::Response, HandlerError> {
                std::thread::sleep(Duration::from_millis(500));
                Ok(edge_function_sdk::Response::new(204))
            },
            Duration::from_millis(20),
        );

        assert_eq!(status_for(host).await, StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_invalid_status_maps_to_500() {
        let response = into_axum_response(edge_function_sdk::Response::new(42));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
