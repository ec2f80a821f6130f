//! Static tables shared by the client and the response normalizer.

use std::collections::BTreeMap;
use std::time::Duration;

use once_cell::sync::Lazy;

/// Status codes treated as success, with their fixed reason phrase.
pub const HTTP_SUCCESS_CODES: &[(u16, &str)] = &[(200, "Success")];

/// Status codes treated as errors, with their fixed reason phrase.
pub const HTTP_ERROR_CODES: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (403, "Forbidden"),
    (404, "API Not found"),
    (406, "Not Acceptable Response"),
    (415, "Unsupported Media Type"),
    (500, "Internal Server Error"),
];

/// Every classified status code mapped to its reason phrase.
pub static HTTP_RESPONSE_CODES: Lazy<BTreeMap<u16, &'static str>> = Lazy::new(|| {
    HTTP_SUCCESS_CODES
        .iter()
        .chain(HTTP_ERROR_CODES.iter())
        .copied()
        .collect()
});

/// Reason phrase reported when a GET succeeds without a payload.
pub const NO_DATA_RECEIVED: &str = "No data received from device";

/// Timeout applied to a request when the caller does not supply one.
pub const STANDARD_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Headers applied to a request when the caller does not supply any.
pub const STANDARD_JSON_HEADERS: &[(&str, &str)] = &[
    ("connection", "keep-alive"),
    ("content-type", "application/json"),
];

pub const DEFAULT_PORT: u16 = 8443;

pub(crate) const DATASERVICE: &str = "/dataservice";
pub(crate) const LOGIN_PATH: &str = "/j_security_check";

// Template endpoints, relative to the dataservice root.
pub const FEATURE_PATH: &str = "/template/feature";
pub const FEATURE_OBJECT_PATH: &str = "/template/feature/object";
pub const DEVICE_PATH: &str = "/template/device/";
pub const DEVICE_FEATURE_PATH: &str = "/template/device/feature/";
pub const VEDGE_POLICY_PATH: &str = "/template/policy/vedge/";
pub const VSMART_POLICY_PATH: &str = "/template/policy/vsmart";
pub const BANNER_PATH: &str = "/settings/configuration/banner";

/// Returns the fixed reason phrase for a classified status code.
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    HTTP_RESPONSE_CODES.get(&status).copied()
}

pub fn is_success_code(status: u16) -> bool {
    HTTP_SUCCESS_CODES.iter().any(|(code, _)| *code == status)
}

pub fn is_error_code(status: u16) -> bool {
    HTTP_ERROR_CODES.iter().any(|(code, _)| *code == status)
}
