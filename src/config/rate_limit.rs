//! Rate limiting keyed by the client address.

use actix_governor::{KeyExtractor, SimpleKeyExtractionError};
use actix_web::{
    dev::ServiceRequest,
    http::{header::ContentType, StatusCode},
    HttpResponse, HttpResponseBuilder,
};
use governor::clock::{Clock, DefaultClock};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub struct ClientIpRateLimit;

impl KeyExtractor for ClientIpRateLimit {
    type Key = IpAddr;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        req.peer_addr().map(|addr| addr.ip()).ok_or_else(|| {
            Self::KeyExtractionError::new(r#"{"error":"Could not determine client address"}"#)
                .set_content_type(ContentType::json())
                .set_status_code(StatusCode::BAD_REQUEST)
        })
    }

    fn exceed_rate_limit_response(
        &self,
        negative: &governor::NotUntil<governor::clock::QuantaInstant>,
        mut response: HttpResponseBuilder,
    ) -> HttpResponse {
        let wait_time = negative
            .wait_time_from(DefaultClock::default().now())
            .as_secs();
        response
            .content_type(ContentType::json())
            .body(format!(r#"{{"error":"Too many requests","after":{wait_time}}}"#))
    }
}
