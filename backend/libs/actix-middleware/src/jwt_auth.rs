use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, HttpResponse,
};
use crypto_core::JwtKeys;
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use uuid::Uuid;

/// User ID extracted from JWT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

/// JWT Authentication Middleware
///
/// Requires a `web::Data<JwtKeys>` in app data. Requests without a valid
/// `Authorization: Bearer <token>` header are answered with 401 and never
/// reach the wrapped service.
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

enum Rejection {
    Unauthorized(&'static str),
    Misconfigured,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // Resolve the principal before touching extensions_mut so no
            // header borrow is alive at that point.
            let outcome = authenticate(&req);

            match outcome {
                Ok(user_id) => {
                    req.extensions_mut().insert(UserId(user_id));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(Rejection::Unauthorized(message)) => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "UNAUTHORIZED",
                        "message": message,
                    }));
                    Ok(req.into_response(response).map_into_right_body())
                }
                Err(Rejection::Misconfigured) => {
                    tracing::error!("JwtAuthMiddleware used without web::Data<JwtKeys> in app data");
                    let response = HttpResponse::InternalServerError().json(serde_json::json!({
                        "error": "INTERNAL_ERROR",
                        "message": "Authentication unavailable",
                    }));
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Uuid, Rejection> {
    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or(Rejection::Misconfigured)?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(Rejection::Unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| Rejection::Unauthorized("Invalid Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(Rejection::Unauthorized(
            "Invalid Authorization header format",
        ))?;

    keys.user_id_from_token(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        Rejection::Unauthorized("Invalid or expired token")
    })
}

/// FromRequest implementation for UserId
impl actix_web::FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<UserId>() {
            Some(user_id) => ready(Ok(*user_id)),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}
