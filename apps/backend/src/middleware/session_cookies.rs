//! Writes a session rotated during request handling back to the client.
//!
//! `CurrentUser` stores a [`RotatedSession`] in the request extensions when it
//! had to fall back to the refresh token; this middleware turns it into
//! `Set-Cookie` headers on whatever response the handler produced.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::extractors::current_user::RotatedSession;
use crate::http::cookies::pair_cookies;
use crate::state::app_state::AppState;

pub struct SessionCookies;

impl<S, B> Transform<S, ServiceRequest> for SessionCookies
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = SessionCookiesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionCookiesMiddleware { service }))
    }
}

pub struct SessionCookiesMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionCookiesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            let rotated = res.request().extensions().get::<RotatedSession>().cloned();
            let Some(RotatedSession(pair)) = rotated else {
                return Ok(res);
            };
            let Some(state) = res.request().app_data::<web::Data<AppState>>().cloned() else {
                return Ok(res);
            };

            for cookie in pair_cookies(&state.tokens, &pair) {
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    warn!(error = %e, "failed to attach rotated session cookie");
                }
            }
            Ok(res)
        })
    }
}
