//! HTTP routing glue
//!
//! Thin hyper service around the summarization pipeline: one page, one form
//! handler. All real work happens in `certsight_summary`; this module only
//! decodes the form body, maps classified errors onto HTTP statuses, and
//! hands summaries to the template renderer.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use hyper::body;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tracing::{info, warn};

use certsight_summary::{summarize, SummaryError};

use crate::templates::Templates;

const INDEX_URI: &str = "/";
const PROCESS_URI: &str = "/process";

/// Run the server until ctrl-c.
pub async fn serve(addr: SocketAddr, templates: Templates) -> Result<()> {
    let templates = Arc::new(templates);

    let make_svc = make_service_fn(move |_conn| {
        let templates = Arc::clone(&templates);
        async move {
            Ok::<_, anyhow::Error>(service_fn(move |req| {
                handle_request(req, Arc::clone(&templates))
            }))
        }
    });

    info!("server started at {addr}");
    Server::bind(&addr)
        .serve(make_svc)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to install ctrl-c handler; running until killed");
        std::future::pending::<()>().await;
    }
}

/// Route one request, converting glue-level failures into a 500.
async fn handle_request(
    req: Request<Body>,
    templates: Arc<Templates>,
) -> Result<Response<Body>> {
    info!(method = %req.method(), uri = %req.uri().path(), "request");

    match (req.method(), req.uri().path()) {
        (&Method::GET, INDEX_URI) => index_handler(&templates),
        (&Method::POST, PROCESS_URI) => process_handler(req, &templates).await,
        (_, PROCESS_URI) => redirect_to_index(),
        _ => not_found(),
    }
    .map_or_else(
        |e| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::from(format!("{e:?}\n")))
                .map_err(|e| anyhow!("failed to build response: {e:?}"))
        },
        Ok,
    )
}

fn index_handler(templates: &Templates) -> Result<Response<Body>> {
    html_response(StatusCode::OK, templates.render_index())
}

/// Decode the submitted form, run the pipeline, render the outcome.
async fn process_handler(
    req: Request<Body>,
    templates: &Templates,
) -> Result<Response<Body>> {
    let form_bytes = body::to_bytes(req.into_body()).await?;
    let cert_text = url::form_urlencoded::parse(&form_bytes)
        .find(|(key, _)| key == "cert")
        .map(|(_, value)| value.into_owned());

    let Some(cert_text) = cert_text else {
        return plain_response(StatusCode::BAD_REQUEST, "Invalid certificate\n");
    };

    match summarize(&cert_text) {
        Ok(summary) => html_response(StatusCode::OK, templates.render_summary(&summary)),
        Err(err) => error_response(&err),
    }
}

/// Map pipeline errors onto HTTP statuses.
///
/// Parse failures are client errors: the bytes came from the submitter, not
/// from this process. An unsupported key type is presented identically but
/// logged distinctly for diagnostics.
fn error_response(err: &SummaryError) -> Result<Response<Body>> {
    match err {
        SummaryError::InvalidEnvelope => {
            plain_response(StatusCode::BAD_REQUEST, "Invalid certificate\n")
        }
        SummaryError::ParseFailure => {
            plain_response(StatusCode::BAD_REQUEST, "Failed to parse certificate\n")
        }
        SummaryError::UnsupportedKeyType(algorithm) => {
            warn!(%algorithm, "unsupported public key algorithm submitted");
            plain_response(StatusCode::BAD_REQUEST, "Failed to parse certificate\n")
        }
    }
}

fn redirect_to_index() -> Result<Response<Body>> {
    Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(hyper::header::LOCATION, INDEX_URI)
        .body(Body::empty())
        .map_err(|e| anyhow!("failed to build response: {e:?}"))
}

fn not_found() -> Result<Response<Body>> {
    plain_response(StatusCode::NOT_FOUND, "Not found\n")
}

fn html_response(status: StatusCode, page: String) -> Result<Response<Body>> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Body::from(page))
        .map_err(|e| anyhow!("failed to build response: {e:?}"))
}

fn plain_response(status: StatusCode, message: &'static str) -> Result<Response<Body>> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(message))
        .map_err(|e| anyhow!("failed to build response: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const RSA_FULL_PEM: &str = include_str!("../../summary/tests/fixtures/rsa_full.pem");

    fn templates() -> Arc<Templates> {
        Arc::new(Templates::load(Path::new("templates")).expect("templates directory"))
    }

    fn form_body(cert: &str) -> Body {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("cert", cert)
            .finish();
        Body::from(encoded)
    }

    #[tokio::test]
    async fn get_index_serves_the_form() {
        let resp = handle_request(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn post_process_renders_a_summary() {
        let resp = handle_request(
            Request::builder()
                .method("POST")
                .uri("/process")
                .body(form_body(RSA_FULL_PEM))
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let page = body::to_bytes(resp.into_body()).await.unwrap();
        let page = String::from_utf8(page.to_vec()).unwrap();
        assert!(page.contains("example.test"));
        assert!(page.contains("2048 bits"));
    }

    #[tokio::test]
    async fn post_process_rejects_invalid_input() {
        let resp = handle_request(
            Request::builder()
                .method("POST")
                .uri("/process")
                .body(form_body("definitely not a certificate"))
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_process_without_cert_field_is_a_client_error() {
        let resp = handle_request(
            Request::builder()
                .method("POST")
                .uri("/process")
                .body(Body::from("unrelated=1"))
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_process_redirects_to_index() {
        let resp = handle_request(
            Request::builder()
                .method("GET")
                .uri("/process")
                .body(Body::empty())
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[hyper::header::LOCATION], "/");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let resp = handle_request(
            Request::builder()
                .method("GET")
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
            templates(),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
