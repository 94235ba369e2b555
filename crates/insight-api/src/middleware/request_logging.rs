// Request completion logging middleware
//
// Emits one completion event per request carrying elapsed processing time
// and the final status code. An error escaping the handler stack is logged
// here before it propagates outward to be rendered.

use crate::logging::Logger;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::time::Instant;

/// Request-logging middleware factory.
pub struct RequestLogging {
    logger: Arc<dyn Logger>,
}

impl RequestLogging {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingMiddleware {
            service,
            logger: self.logger.clone(),
        }))
    }
}

pub struct RequestLoggingMiddleware<S> {
    service: S,
    logger: Arc<dyn Logger>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let logger = self.logger.clone();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let start = Instant::now();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let elapsed_ms = start.elapsed().as_millis();

            match &result {
                Ok(res) => {
                    let status = res.status().as_u16();
                    logger.info(
                        &format!("{} {} {}", method, path, status),
                        &[
                            ("status", status.to_string()),
                            ("elapsed_ms", elapsed_ms.to_string()),
                        ],
                    );
                }
                Err(err) => {
                    let status = err.as_response_error().status_code().as_u16();
                    logger.error(
                        "unhandled_error",
                        &[
                            ("error", err.to_string()),
                            ("status", status.to_string()),
                            ("elapsed_ms", elapsed_ms.to_string()),
                        ],
                    );
                }
            }

            result
        })
    }
}
