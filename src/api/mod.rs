// Export submodules
pub mod device;
pub mod settings;
pub mod template;

use crate::{ApiResponse, VManageError, VManageResult};

/// Turns a failed read into an error.
///
/// Reads feed existence checks, so a failed listing must never look like an
/// empty one.
pub(crate) fn require_ok(response: ApiResponse) -> VManageResult<ApiResponse> {
    if response.ok {
        return Ok(response);
    }

    Err(VManageError::ApiError(format!(
        "{} (status {}): {}",
        response.reason, response.status_code, response.error
    )))
}
