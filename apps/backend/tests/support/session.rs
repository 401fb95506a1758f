//! Sign-in and cookie helpers shared by the HTTP tests.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend_test_support::telegram::{signed_init_data, unix_now};
use serde_json::json;

/// Bot token used by `SecurityConfig::for_tests()`.
pub const BOT_TOKEN: &str = "T";

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Session cookies captured from a response.
#[derive(Debug, Clone)]
pub struct SessionCookieJar {
    pub access: String,
    pub refresh: String,
}

impl SessionCookieJar {
    pub fn access_cookie(&self) -> Cookie<'static> {
        Cookie::new(ACCESS_COOKIE, self.access.clone())
    }

    pub fn refresh_cookie(&self) -> Cookie<'static> {
        Cookie::new(REFRESH_COOKIE, self.refresh.clone())
    }
}

pub fn user_json(telegram_id: i64, username: &str) -> String {
    json!({
        "id": telegram_id,
        "first_name": "Test",
        "username": username,
    })
    .to_string()
}

/// Fresh Mini App `initData` for the given Telegram user.
pub fn init_data_for(telegram_id: i64, username: &str) -> String {
    signed_init_data(BOT_TOKEN, &user_json(telegram_id, username), unix_now())
}

/// Value of the named `Set-Cookie` on a response, if present.
pub fn response_cookie(resp: &ServiceResponse<BoxBody>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn session_from(resp: &ServiceResponse<BoxBody>) -> Option<SessionCookieJar> {
    Some(SessionCookieJar {
        access: response_cookie(resp, ACCESS_COOKIE)?.value().to_string(),
        refresh: response_cookie(resp, REFRESH_COOKIE)?.value().to_string(),
    })
}

/// Sign in through `/api/auth/signin` and return the user id plus cookies.
pub async fn sign_in<S>(app: &S, telegram_id: i64, username: &str) -> (i64, SessionCookieJar)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({ "initData": init_data_for(telegram_id, username) }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "sign-in should succeed");

    let jar = session_from(&resp).expect("sign-in sets both session cookies");
    let body: serde_json::Value = test::read_body_json(resp).await;
    let user_id = body["user_id"].as_i64().expect("user_id in body");
    (user_id, jar)
}
