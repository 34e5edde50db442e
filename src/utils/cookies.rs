use axum::http::{header, HeaderMap, HeaderValue};
use url::form_urlencoded;

pub const ACCESS_TOKEN: &str = "access_token";
pub const RECRUITER_ID: &str = "id_recrutador";
pub const USER_NAME: &str = "nome";
pub const USER_ID: &str = "id_usuario";

pub const SESSION_COOKIES: [&str; 4] = [ACCESS_TOKEN, RECRUITER_ID, USER_NAME, USER_ID];

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn decode_value(raw: &str) -> String {
    // Encoded values never contain '=' or '&', so the whole value parses as one key.
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

/// Reads a cookie from every `Cookie` header on the request.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_value(value))
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(name: &str, value: &str, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        name,
        encode_value(value)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

pub fn expired_cookie(name: &str, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", name);
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}
