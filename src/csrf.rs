use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::forms::FieldErrors;

pub const COOKIE_NAME: &str = "movieboxd_csrf";
pub const FIELD: &str = "csrf_token";

/// Returns the jar's token, minting and storing a new one when absent.
pub fn ensure_token(jar: SignedCookieJar, ttl_secs: i64) -> (SignedCookieJar, String) {
    if let Some(token) = jar.get(COOKIE_NAME).map(|c| c.value().to_string()) {
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_secs))
        .build();
    (jar.add(cookie), token)
}

pub fn check(jar: &SignedCookieJar, submitted: &str, errors: &mut FieldErrors) {
    match jar.get(COOKIE_NAME) {
        None => errors.push(FIELD, "The CSRF session token is missing."),
        Some(_) if submitted.is_empty() => errors.push(FIELD, "The CSRF token is missing."),
        Some(cookie) if cookie.value() != submitted => {
            errors.push(FIELD, "The CSRF tokens do not match.")
        },
        Some(_) => {},
    }
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Key;

    use super::*;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::derive_from(&[7u8; 32]))
    }

    #[test]
    fn token_is_minted_once() {
        let (jar, first) = ensure_token(jar(), 60);
        assert_eq!(first.len(), 32);

        let (_, second) = ensure_token(jar, 60);
        assert_eq!(first, second);
    }

    #[test]
    fn matching_token_passes() {
        let (jar, token) = ensure_token(jar(), 60);
        let mut errors = FieldErrors::default();
        check(&jar, &token, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn missing_cookie_or_token_fails() {
        let mut errors = FieldErrors::default();
        check(&jar(), "anything", &mut errors);
        assert_eq!(errors.fields(), vec![FIELD]);

        let (jar, _) = ensure_token(jar(), 60);
        let mut errors = FieldErrors::default();
        check(&jar, "", &mut errors);
        assert_eq!(errors.fields(), vec![FIELD]);
    }

    #[test]
    fn mismatched_token_fails() {
        let (jar, _) = ensure_token(jar(), 60);
        let mut errors = FieldErrors::default();
        check(&jar, "forged", &mut errors);
        assert_eq!(errors.for_field(FIELD).collect::<Vec<_>>(), vec![
            "The CSRF tokens do not match."
        ]);
    }
}
