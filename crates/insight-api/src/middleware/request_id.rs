// Request correlation middleware
//
// Resolves the correlation identifier at ingress (inbound header or a fresh
// UUID), installs the per-request logging context around the downstream
// call, and echoes the identifier on the response. The context scope is
// dropped with the wrapped future, so no binding survives into the next
// request handled by a reused worker, whatever the exit path.

use crate::logging::{LogContext, REQUEST_ID_HEADER, REQUEST_ID_KEY};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use std::collections::BTreeMap;
use std::future::{ready, Ready};
use std::str::FromStr;

/// Request-id middleware factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestId;

impl RequestId {
    pub fn new() -> Self {
        Self
    }
}

/// Resolve the correlation identifier for one request.
///
/// A header that is absent, empty, or not valid ASCII counts as missing and
/// gets a generated UUID instead.
fn resolve_request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

pub struct RequestIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = resolve_request_id(&req);
        let method = req.method().to_string();
        let path = req.path().to_string();
        // Kept so an error escaping downstream can still be rendered into a
        // response that carries the correlation header.
        let http_req = req.request().clone();

        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), request_id.clone());
        context.insert("method".to_string(), method);
        context.insert("path".to_string(), path);

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = LogContext::scope(context, fut).await;

            let header_name = HeaderName::from_str(REQUEST_ID_HEADER)
                .expect("static header name is valid");
            let header_value = HeaderValue::from_str(&request_id).ok();

            match result {
                Ok(mut res) => {
                    if let Some(value) = header_value {
                        res.headers_mut().insert(header_name, value);
                    }
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let mut response = actix_web::HttpResponse::from_error(err);
                    if let Some(value) = header_value {
                        response.headers_mut().insert(header_name, value);
                    }
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}
