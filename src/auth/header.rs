// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer credential extraction from request headers.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::AuthError;

/// Pull the raw bearer credential out of the `Authorization` header.
///
/// The header must split on single spaces into exactly two parts, the
/// first of which is `bearer` in any letter case.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers_with("bearer tok")), Ok("tok"));
        assert_eq!(bearer_token(&headers_with("BEARER tok")), Ok("tok"));
    }

    #[test]
    fn missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingHeader));
    }

    #[test]
    fn wrong_scheme() {
        assert_eq!(
            bearer_token(&headers_with("Basic dXNlcjpwYXNz")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn wrong_part_count() {
        assert_eq!(bearer_token(&headers_with("Bearer")), Err(AuthError::MalformedHeader));
        assert_eq!(
            bearer_token(&headers_with("Bearer a b")),
            Err(AuthError::MalformedHeader)
        );
        // A doubled space yields an empty middle part.
        assert_eq!(
            bearer_token(&headers_with("Bearer  tok")),
            Err(AuthError::MalformedHeader)
        );
    }

    #[test]
    fn empty_credential() {
        assert_eq!(bearer_token(&headers_with("Bearer ")), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn non_ascii_header_is_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(bearer_token(&headers), Err(AuthError::MalformedHeader));
    }
}
