use serde_json::json;

use crate::constants::BANNER_PATH;
use crate::{ApiResponse, Gateway, VManageResult};

/// Controller-wide settings.
pub struct SettingsApi<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: Gateway + ?Sized> SettingsApi<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Retrieves the login banner.
    pub async fn banner(&self) -> VManageResult<ApiResponse> {
        self.gateway.get(BANNER_PATH).await
    }

    /// Enables the login banner with the given text.
    pub async fn set_banner(&self, banner: &str) -> VManageResult<ApiResponse> {
        let body = json!({
            "mode": "on",
            "bannerDetail": banner,
        });
        self.gateway.put(BANNER_PATH, Some(body)).await
    }
}
