use http::HeaderMap;

use crate::utils::header_set_cookie;

use super::config::{AUTH_DATA_COOKIE_NAME, JOB_ID_COOKIE_NAME, SESSION_COOKIE_MAX_AGE};
use super::errors::SessionError;

/// Headers delivering a freshly issued session token as a hardened cookie.
pub fn prepare_auth_data_cookie_header(token: &str) -> Result<HeaderMap, SessionError> {
    cookie_header(AUTH_DATA_COOKIE_NAME.as_str(), token)
}

/// Headers handing a new job's pre-authentication token to the browser.
pub fn prepare_job_id_cookie_header(token: &str) -> Result<HeaderMap, SessionError> {
    cookie_header(JOB_ID_COOKIE_NAME.as_str(), token)
}

fn cookie_header(name: &str, token: &str) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, name, token, *SESSION_COOKIE_MAX_AGE as i64)
        .map_err(|e| SessionError::Cookie(e.to_string()))?;
    Ok(headers)
}
