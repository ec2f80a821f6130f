use serde::Serialize;

/// Form body of the controller's session login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// The username to authenticate with.
    #[serde(rename = "j_username")]
    pub username: String,

    /// The password to authenticate with.
    #[serde(rename = "j_password")]
    pub password: String,
}
