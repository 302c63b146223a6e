//! Gateway responses.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::Response;
use http_body_util::Full;
use serde::Serialize;
use std::net::IpAddr;

/// Body type for every response the gateway writes.
pub type Body = Full<Bytes>;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Resolved addresses as a JSON array of strings.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AddressList<'a>(pub &'a [IpAddr]);

/// Plain-text response with `status` and `message` as the body.
pub fn text(status: u16, message: impl Into<String>) -> Result<Response<Body>, http::Error> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Full::new(Bytes::from(message.into())))
}

/// `200 OK` with the addresses in resolver order.
pub fn addresses(addrs: &[IpAddr]) -> Result<Response<Body>, http::Error> {
    let body = match serde_json::to_vec(&AddressList(addrs)) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode addresses");
            return text(500, e.to_string());
        }
    };

    Response::builder()
        .status(200)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(Full::new(Bytes::from(body)))
}

/// Maps a request-ending error to its status and text.
pub fn error(err: &NetError) -> Result<Response<Body>, http::Error> {
    text(err.http_status(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::net::{Ipv4Addr, Ipv6Addr};

    async fn body_string(resp: Response<Body>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_addresses_json() {
        let addrs = [
            IpAddr::V4(Ipv4Addr::new(93, 184, 215, 14)),
            IpAddr::V6(Ipv6Addr::new(0x2606, 0x2800, 0x21f, 0xcb07, 0x6820, 0x80da, 0xaf6b, 0x8b2c)),
        ];
        let resp = addresses(&addrs).unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_string(resp).await,
            r#"["93.184.215.14","2606:2800:21f:cb07:6820:80da:af6b:8b2c"]"#
        );
    }

    #[tokio::test]
    async fn test_throttled_is_420() {
        let resp = error(&NetError::Throttled).unwrap();
        assert_eq!(resp.status().as_u16(), 420);
        assert_eq!(resp.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(body_string(resp).await, "Throttled");
    }

    #[tokio::test]
    async fn test_timeout_body() {
        let resp = error(&NetError::TimedOut).unwrap();
        assert_eq!(resp.status(), 500);
        assert_eq!(body_string(resp).await, "timeout");
    }
}
