//! Locating the token in a request.

/// Authorization scheme prefix, including the separating space
pub const BEARER_PREFIX: &str = "Bearer ";

/// Why an `Authorization` header did not yield a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    /// No header, or a scheme other than `Bearer`
    MissingOrMalformed,
    /// `Bearer` scheme with nothing after it
    EmptyToken,
}

/// Strict parse of an `Authorization: Bearer <token>` header value
///
/// A bare `Bearer` counts as an empty token, since HTTP parsers strip the
/// trailing space of `Bearer `.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.ok_or(BearerError::MissingOrMalformed)?;
    if header.trim_end() == BEARER_PREFIX.trim_end() {
        return Err(BearerError::EmptyToken);
    }

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::MissingOrMalformed)?
        .trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }
    Ok(token)
}

/// Raw places a token may arrive in
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCandidates<'a> {
    pub authorization: Option<&'a str>,
    pub body_token: Option<&'a str>,
}

/// One way of pulling a token out of [`TokenCandidates`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    AuthorizationHeader,
    RequestBody,
}

impl TokenSource {
    pub fn extract<'a>(&self, candidates: &TokenCandidates<'a>) -> Option<&'a str> {
        match self {
            TokenSource::AuthorizationHeader => parse_bearer(candidates.authorization).ok(),
            TokenSource::RequestBody => candidates
                .body_token
                .map(str::trim)
                .filter(|token| !token.is_empty()),
        }
    }
}

/// Refresh accepts the header first and the JSON body second
pub const REFRESH_TOKEN_SOURCES: [TokenSource; 2] =
    [TokenSource::AuthorizationHeader, TokenSource::RequestBody];

/// First non-empty token from `sources`, tried in order
pub fn extract_token<'a>(
    sources: &[TokenSource],
    candidates: &TokenCandidates<'a>,
) -> Option<&'a str> {
    sources.iter().find_map(|source| source.extract(candidates))
}
