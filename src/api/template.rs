use serde_json::Value;

use super::require_ok;
use crate::constants::{
    DEVICE_FEATURE_PATH, DEVICE_PATH, FEATURE_OBJECT_PATH, FEATURE_PATH, VEDGE_POLICY_PATH,
    VSMART_POLICY_PATH,
};
use crate::models::template::{
    DeviceTemplate, FeatureTemplate, PolicySummary, PolicyTemplate, TemplateSummary,
};
use crate::{ApiResponse, Gateway, VManageError, VManageResult};

/// Provides methods for managing feature templates, device templates and
/// policies.
///
/// Listing methods fail on a non-success response. Create and delete
/// methods return the normalized response so callers can decide how to treat
/// a failed write.
pub struct TemplateApi<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: Gateway + ?Sized> TemplateApi<'a, G> {
    /// Creates a template API over any gateway.
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Retrieves all feature templates.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &vmanage_client::VManageClient) -> vmanage_client::VManageResult<()> {
    /// for template in client.templates().list_feature_templates().await? {
    ///     println!("{} ({})", template.template_name, template.template_id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_feature_templates(&self) -> VManageResult<Vec<TemplateSummary>> {
        let response = require_ok(self.gateway.get(FEATURE_PATH).await?)?;
        response.list_of()
    }

    /// Retrieves a single feature template definition.
    pub async fn feature_template(&self, template_id: &str) -> VManageResult<ApiResponse> {
        let endpoint = format!("{FEATURE_OBJECT_PATH}/{template_id}");
        self.gateway.get(&endpoint).await
    }

    /// Finds a feature template by name.
    pub async fn find_feature_template(&self, name: &str) -> VManageResult<Option<TemplateSummary>> {
        let templates = self.list_feature_templates().await?;
        Ok(templates.into_iter().find(|t| t.template_name == name))
    }

    /// Creates a feature template. On success the response data carries the
    /// new `templateId`.
    pub async fn create_feature_template(
        &self,
        template: &FeatureTemplate,
    ) -> VManageResult<ApiResponse> {
        self.gateway
            .post(FEATURE_PATH, serde_json::to_value(template)?)
            .await
    }

    /// Deletes a feature template by ID, or by name when no ID is given.
    ///
    /// # Errors
    ///
    /// Returns [`VManageError::InvalidArgument`] when neither is given, and
    /// [`VManageError::ApiError`] when the name matches no template.
    pub async fn delete_feature_template(
        &self,
        template_name: Option<&str>,
        template_id: Option<&str>,
    ) -> VManageResult<ApiResponse> {
        let template_id = match (template_id, template_name) {
            (Some(id), _) => id.to_string(),
            (None, Some(name)) => self
                .find_feature_template(name)
                .await?
                .map(|t| t.template_id)
                .ok_or_else(|| {
                    VManageError::ApiError(format!("Feature template not found: {name}"))
                })?,
            (None, None) => {
                return Err(VManageError::InvalidArgument(
                    "Either template_name or template_id is required".into(),
                ))
            }
        };

        let endpoint = format!("{FEATURE_PATH}/{template_id}");
        self.gateway.delete(&endpoint, None).await
    }

    /// Retrieves all device templates.
    pub async fn list_device_templates(&self) -> VManageResult<Vec<TemplateSummary>> {
        let response = require_ok(self.gateway.get(DEVICE_PATH).await?)?;
        response.list_of()
    }

    /// Finds a device template by name.
    pub async fn find_device_template(&self, name: &str) -> VManageResult<Option<TemplateSummary>> {
        let templates = self.list_device_templates().await?;
        Ok(templates.into_iter().find(|t| t.template_name == name))
    }

    /// Creates a device template from feature templates.
    pub async fn create_device_template(
        &self,
        template: &DeviceTemplate,
    ) -> VManageResult<ApiResponse> {
        self.gateway
            .post(DEVICE_FEATURE_PATH, serde_json::to_value(template)?)
            .await
    }

    /// Retrieves all vEdge policies.
    pub async fn list_vedge_policies(&self) -> VManageResult<Vec<PolicySummary>> {
        let response = require_ok(self.gateway.get(VEDGE_POLICY_PATH).await?)?;
        response.list_of()
    }

    /// Finds the ID of a vEdge policy by name.
    pub async fn find_vedge_policy(&self, name: &str) -> VManageResult<Option<String>> {
        let policies = self.list_vedge_policies().await?;
        Ok(policies
            .into_iter()
            .find(|p| p.policy_name == name)
            .map(|p| p.policy_id))
    }

    /// Creates a vEdge policy. The controller does not return the new ID;
    /// resolve it with [`TemplateApi::find_vedge_policy`].
    pub async fn create_vedge_policy(&self, policy: &PolicyTemplate) -> VManageResult<ApiResponse> {
        self.gateway
            .post(VEDGE_POLICY_PATH, serde_json::to_value(policy)?)
            .await
    }

    /// Creates a vSmart policy.
    pub async fn create_vsmart_policy(
        &self,
        policy: &PolicyTemplate,
    ) -> VManageResult<ApiResponse> {
        self.gateway
            .post(VSMART_POLICY_PATH, serde_json::to_value(policy)?)
            .await
    }
}

/// Reads the `templateId` a create call returned.
pub(crate) fn created_template_id(response: &ApiResponse) -> Option<String> {
    match response.data.get("templateId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
