//! Catch-all error rendering. Every failure leaves the service as a JSON body;
//! diagnostic detail is included outside production only.

use crate::error::ErrorReport;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;

/// Keeps a status already chosen by the handler unless it is the default `200`.
pub fn effective_status(status: StatusCode) -> StatusCode {
    if status == StatusCode::OK {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        status
    }
}

pub async fn render_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };
    let status = effective_status(response.status());
    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), error = %report.diagnostic, "request failed");
    } else {
        tracing::debug!(%method, %uri, status = status.as_u16(), error = %report.message, "request rejected");
    }
    let body = report.body(state.environment.exposes_error_details());
    let mut rendered = (status, Json(body)).into_response();
    rendered.extensions_mut().insert(report);
    rendered
}

/// Handler for `CatchPanicLayer`: a panicking handler still gets a JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let diagnostic = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    let report = ErrorReport {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal_error",
        message: "internal server error".into(),
        diagnostic,
    };
    let mut response = (report.status, Json(report.body(false))).into_response();
    response.extensions_mut().insert(report);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ok_becomes_server_error() {
        assert_eq!(effective_status(StatusCode::OK), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(effective_status(StatusCode::NOT_FOUND), StatusCode::NOT_FOUND);
        assert_eq!(effective_status(StatusCode::BAD_REQUEST), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn panic_payload_becomes_report() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.diagnostic, "boom");
        assert_eq!(report.code, "internal_error");
    }
}
