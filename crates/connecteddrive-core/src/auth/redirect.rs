//! Interpretation of the authentication redirect.
//!
//! The provider never answers with a body. The outcome of a login is
//! encoded in the `Location` it redirects to, e.g.
//! `https://www.bmw-connecteddrive.com/app/default/static/external-dispatch.html#access_token=...&token_type=Bearer&expires_in=7199`
//! or `...external-dispatch.html?error=access_denied`.

use std::collections::HashMap;

use url::form_urlencoded;

use super::AuthError;

/// Marker the provider puts in the redirect when credentials are rejected
pub const ACCESS_DENIED_MARKER: &str = "error=access_denied";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Denied,
    Granted(Grant),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Collect the parameters of the query and the fragment of a redirect target.
///
/// Both parts are searched since the provider has used either one. A key that
/// appears more than once keeps its last value.
fn redirect_params(location: &str) -> HashMap<String, String> {
    location
        .split(['?', '#'])
        .skip(1)
        .flat_map(|part| form_urlencoded::parse(part.as_bytes()).into_owned())
        .collect()
}

fn required<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, AuthError> {
    params
        .get(key)
        .map(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AuthError::MalformedRedirect(format!("missing {}", key)))
}

/// Decide the login outcome from a redirect target.
///
/// A target that is neither a denial nor carries token, type and a
/// digits-only lifetime is `MalformedRedirect`, never `Denied`.
pub fn parse_redirect(location: &str) -> Result<LoginResult, AuthError> {
    if location.contains(ACCESS_DENIED_MARKER) {
        return Ok(LoginResult::Denied);
    }

    let params = redirect_params(location);
    let access_token = required(&params, "access_token")?;
    let token_type = required(&params, "token_type")?;
    let expires_in = required(&params, "expires_in")?;

    if !expires_in.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthError::MalformedRedirect(format!(
            "expires_in is not a number of seconds: {}",
            expires_in
        )));
    }
    let expires_in = expires_in
        .parse()
        .map_err(|_| AuthError::MalformedRedirect(format!("expires_in out of range: {}", expires_in)))?;

    Ok(LoginResult::Granted(Grant {
        access_token: access_token.to_string(),
        token_type: token_type.to_string(),
        expires_in,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPATCH: &str = "https://www.bmw-connecteddrive.com/app/default/static/external-dispatch.html";

    fn granted(location: &str) -> Grant {
        match parse_redirect(location) {
            Ok(LoginResult::Granted(grant)) => grant,
            other => panic!("expected a grant, got {:?}", other),
        }
    }

    #[test]
    fn test_denied() {
        let location = format!("{}?error=access_denied", DISPATCH);
        assert_eq!(parse_redirect(&location).unwrap(), LoginResult::Denied);
    }

    #[test]
    fn test_grant_in_fragment() {
        let grant = granted(&format!(
            "{}#state=eyJtYXJrZXQiOiJkZSJ9&access_token=abc123&token_type=Bearer&expires_in=3600",
            DISPATCH
        ));
        assert_eq!(grant.access_token, "abc123");
        assert_eq!(grant.token_type, "Bearer");
        assert_eq!(grant.expires_in, 3600);
    }

    #[test]
    fn test_grant_with_intervening_params() {
        let grant = granted(&format!(
            "{}?access_token=abc123&scope=authenticate_user+fupo&token_type=Bearer&state=xyz&expires_in=3600&locale=DE-de",
            DISPATCH
        ));
        assert_eq!(grant.access_token, "abc123");
        assert_eq!(grant.token_type, "Bearer");
        assert_eq!(grant.expires_in, 3600);
    }

    #[test]
    fn test_grant_in_any_order() {
        let grant = granted(&format!(
            "{}#expires_in=7199&token_type=Bearer&access_token=Zx9k",
            DISPATCH
        ));
        assert_eq!(grant.access_token, "Zx9k");
        assert_eq!(grant.expires_in, 7199);
    }

    #[test]
    fn test_missing_token_is_malformed() {
        let result = parse_redirect(&format!("{}#token_type=Bearer&expires_in=3600", DISPATCH));
        assert!(matches!(result, Err(AuthError::MalformedRedirect(ref m)) if m.contains("access_token")));

        assert!(matches!(
            parse_redirect(DISPATCH),
            Err(AuthError::MalformedRedirect(_))
        ));
    }

    #[test]
    fn test_non_numeric_lifetime_is_malformed() {
        for expires_in in ["-5", "1h", "3600.0", "+3600"] {
            let location = format!(
                "{}#access_token=abc123&token_type=Bearer&expires_in={}",
                DISPATCH, expires_in
            );
            assert!(
                matches!(parse_redirect(&location), Err(AuthError::MalformedRedirect(_))),
                "{} should be rejected",
                expires_in
            );
        }
    }
}
