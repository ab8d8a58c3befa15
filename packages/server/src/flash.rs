//! One-shot status messages carried across a redirect.
//!
//! Messages live in a signed cookie so a client can neither forge nor
//! tamper with them. Rendering a page takes (and clears) every pending
//! message, so each one is shown exactly once.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};

pub const FLASH_COOKIE: &str = "flash";

/// Derive the cookie signing key from the configured session secret.
///
/// `Key` needs 64 bytes of material; a SHA-512 digest of the secret gives
/// exactly that for secrets of any length.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Queue `message` for the next rendered page.
pub fn push(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = pending(&jar);
    messages.push(message.into());
    jar.add(flash_cookie(encode(&messages)))
}

/// Remove and return all pending messages, oldest first.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    let messages = pending(&jar);
    if messages.is_empty() && jar.get(FLASH_COOKIE).is_none() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

fn pending(jar: &SignedCookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .map(|c| decode(c.value()))
        .unwrap_or_default()
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Hex-encoded JSON keeps the cookie value within the allowed charset.
fn encode(messages: &[String]) -> String {
    hex::encode(serde_json::to_vec(messages).unwrap_or_default())
}

fn decode(value: &str) -> Vec<String> {
    hex::decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}
