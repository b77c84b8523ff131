//! Session cookie construction.
//!
//! Production deployments serve the browser client from a different
//! origin, so the cookie must be `Secure` + `SameSite=None` there;
//! everywhere else it stays non-secure + `SameSite=Strict`. Clearing
//! uses the same attributes so browsers match the original cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the session cookie carrying the signed token.
pub const SESSION_COOKIE: &str = "token";

/// HTTP-only session cookie holding `token`.
pub fn session_cookie(token: String, production: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_secure(production);
    cookie.set_same_site(if production {
        SameSite::None
    } else {
        SameSite::Strict
    });
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_cookie_is_strict_and_not_secure() {
        let cookie = session_cookie("abc".into(), false);
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn production_cookie_is_secure_and_cross_site() {
        let cookie = session_cookie("abc".into(), true);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }
}
