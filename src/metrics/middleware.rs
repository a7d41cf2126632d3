//! Middleware recording request counts and latency per endpoint.
//!
//! Handler errors reach this layer as regular responses carrying the error,
//! so a response counts as an error when it carries one or when its status is
//! 4xx/5xx.

use crate::metrics::{ERROR_COUNTER, RAW_REQUEST_COUNTER, REQUEST_COUNTER, REQUEST_LATENCY};
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{LocalBoxFuture, Ready};
use std::{
    task::{Context, Poll},
    time::Instant,
};

pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        futures::future::ready(Ok(MetricsMiddlewareService { service }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Unmatched paths (404 pages) fall back to the raw path.
        let endpoint = req
            .match_pattern()
            .unwrap_or_else(|| req.path().to_string());
        let method = req.method().to_string();
        let raw_path = req.path().to_string();
        let start_time = Instant::now();

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await;
            let elapsed = start_time.elapsed().as_secs_f64();

            let (status, failed) = match &res {
                Ok(response) => {
                    let status = response.response().status();
                    let failed = response.response().error().is_some()
                        || status.is_client_error()
                        || status.is_server_error();
                    (status.as_u16().to_string(), failed)
                }
                Err(e) => (
                    e.as_response_error().status_code().as_u16().to_string(),
                    true,
                ),
            };

            let labels = [endpoint.as_str(), method.as_str(), status.as_str()];
            REQUEST_LATENCY.with_label_values(&labels).observe(elapsed);
            REQUEST_COUNTER.with_label_values(&labels).inc();
            if failed {
                ERROR_COUNTER.with_label_values(&labels).inc();
            }
            RAW_REQUEST_COUNTER
                .with_label_values(&[raw_path.as_str(), method.as_str(), status.as_str()])
                .inc();

            res
        })
    }
}
