//! Query parameters for the redirect endpoint.

use serde::Deserialize;

/// Query string of `GET /links/{token}`.
///
/// The secret travels as `?password=...`; `?secret=...` is accepted too.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
}
