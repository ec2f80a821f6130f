use url::form_urlencoded;

use crate::models::device::{DeviceCategory, DeviceStatistic};
use crate::{ApiResponse, Gateway, VManageResult};

/// Read-only access to device inventory and per-device operational data.
pub struct DeviceApi<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: Gateway + ?Sized> DeviceApi<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Lists vEdges or controllers.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use vmanage_client::DeviceCategory;
    /// # async fn example(client: &vmanage_client::VManageClient) -> vmanage_client::VManageResult<()> {
    /// let category: DeviceCategory = "vedges".parse()?;
    /// let vedges = client.devices().by_category(category).await?;
    /// println!("{}", vedges.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn by_category(&self, category: DeviceCategory) -> VManageResult<ApiResponse> {
        let endpoint = format!("/system/device/{category}");
        self.gateway.get(&endpoint).await
    }

    /// Lists every device known to the controller.
    pub async fn all(&self) -> VManageResult<ApiResponse> {
        self.gateway.get("/device").await
    }

    /// Retrieves device geolocation data.
    pub async fn maps(&self) -> VManageResult<ApiResponse> {
        self.gateway.get("/group/map/devices").await
    }

    /// Retrieves a device's running configuration, or the configuration
    /// attached to it from its template when `attached` is set.
    pub async fn running_config(&self, device_id: &str, attached: bool) -> VManageResult<ApiResponse> {
        let kind = if attached { "attached" } else { "running" };
        let endpoint = format!("/template/config/{kind}/{device_id}");
        self.gateway.get(&endpoint).await
    }

    /// Retrieves one kind of operational data for a device.
    pub async fn statistic(
        &self,
        device_id: &str,
        statistic: DeviceStatistic,
    ) -> VManageResult<ApiResponse> {
        let device_id: String = form_urlencoded::byte_serialize(device_id.as_bytes()).collect();
        let endpoint = format!("{}?deviceId={}", statistic.path(), device_id);
        self.gateway.get(&endpoint).await
    }
}
