//! Bulk import of exported templates onto a live controller.
//!
//! Each device template is replicated together with the feature templates
//! and the policy it references. The target assigns fresh IDs, so every
//! feature is resolved first (found by name or created), the exported IDs are
//! mapped to the target's IDs, and only then is the device template created
//! with its references rewritten.
//!
//! Every create is preceded by a lookup by name, so running an import again
//! after a partial failure picks up where the first run stopped without
//! creating duplicates. Template names must be unique within their kind for
//! this to hold.

pub mod mapping;
pub mod template_set;

use log::{debug, error, info, warn};

use crate::api::template::{created_template_id, TemplateApi};
use crate::models::template::{DeviceTemplate, FeatureTemplate};
use crate::{check_post_response, Gateway, VManageError, VManageResult};

pub use mapping::IdMapping;
pub use template_set::TemplateSet;

/// Import behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Abort on the first failed write instead of logging it and moving on
    /// to the next device template.
    pub raise_on_error: bool,
}

/// What happened to one device template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutcome {
    Created,
    /// A device template with the same name already exists on the target.
    AlreadyExists,
    /// The template set holds no feature bundle for this device template.
    SkippedNoFeatures,
    Failed(String),
}

/// Per-device-template outcomes of an import, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub outcomes: Vec<(String, TemplateOutcome)>,
}

impl ImportReport {
    pub fn outcome(&self, template_name: &str) -> Option<&TemplateOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == template_name)
            .map(|(_, outcome)| outcome)
    }

    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == TemplateOutcome::Created)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            TemplateOutcome::Failed(reason) => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Replicates device templates and their dependencies onto a controller.
///
/// # Examples
///
/// ```no_run
/// # use vmanage_client::{TemplateImporter, TemplateSet, VManageClient};
/// # async fn example(client: &VManageClient) -> vmanage_client::VManageResult<()> {
/// let set = TemplateSet::from_dir("./backup")?;
/// let report = TemplateImporter::new(client).import(&set).await?;
/// for (name, outcome) in &report.outcomes {
///     println!("{name}: {outcome:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct TemplateImporter<'a, G: Gateway + ?Sized> {
    templates: TemplateApi<'a, G>,
    options: ImportOptions,
}

impl<'a, G: Gateway + ?Sized> TemplateImporter<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self::with_options(gateway, ImportOptions::default())
    }

    pub fn with_options(gateway: &'a G, options: ImportOptions) -> Self {
        Self {
            templates: TemplateApi::new(gateway),
            options,
        }
    }

    /// Imports every device template of the set, one after the other.
    ///
    /// A failing device template, including one that cannot be parsed, is
    /// recorded in the report and the import continues with the next one,
    /// unless `raise_on_error` is set, in which case the first error is
    /// returned. Objects created before a failure stay on the target.
    pub async fn import(&self, set: &TemplateSet) -> VManageResult<ImportReport> {
        let mut report = ImportReport::default();

        for (name, parsed) in set.device_template_entries()? {
            let result = match parsed {
                Ok(device_template) => self.import_device_template(set, &device_template).await,
                Err(e) => Self::skip_unparsed(set, &name, e),
            };
            match result {
                Ok(outcome) => report.outcomes.push((name, outcome)),
                Err(e) if !self.options.raise_on_error => {
                    error!("Import of device template {name} failed: {e}");
                    report.outcomes.push((name, TemplateOutcome::Failed(e.to_string())));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    /// Imports one device template and the objects it depends on.
    ///
    /// # Errors
    ///
    /// Returns [`VManageError::MissingTemplateMapping`] when the device
    /// template references a feature absent from its bundle, and any
    /// transport or API error raised while talking to the target.
    pub async fn import_device_template(
        &self,
        set: &TemplateSet,
        device_template: &DeviceTemplate,
    ) -> VManageResult<TemplateOutcome> {
        let name = device_template.template_name.as_str();

        let features = match set.feature_bundle(name)? {
            Some(features) if !features.is_empty() => features,
            _ => {
                info!("No feature templates for {name}, skipping");
                return Ok(TemplateOutcome::SkippedNoFeatures);
            }
        };

        let mut mapping = IdMapping::new();
        for (old_id, feature) in &features {
            let new_id = self.resolve_feature(feature).await?;
            debug!("Feature {} mapped {old_id} -> {new_id}", feature.template_name);
            mapping.insert(old_id.as_str(), new_id);
        }

        let mut new_template = device_template.clone();
        mapping.rewrite_device_template(&mut new_template)?;

        if let Some(policy_id) = device_template.policy() {
            new_template.policy_id = self.resolve_policy(set, name, policy_id).await?;
        }

        if self.templates.find_device_template(name).await?.is_some() {
            info!("Skipping {name}: device template already exists");
            return Ok(TemplateOutcome::AlreadyExists);
        }

        let response = check_post_response(
            self.templates.create_device_template(&new_template).await?,
            self.options.raise_on_error,
        )?;
        if response.has_error() {
            return Ok(TemplateOutcome::Failed(response.reason));
        }

        info!("Created device template {name}");
        Ok(TemplateOutcome::Created)
    }

    /// An entry that cannot be parsed is only an error when there is
    /// something to import for it.
    fn skip_unparsed(
        set: &TemplateSet,
        name: &str,
        parse_error: VManageError,
    ) -> VManageResult<TemplateOutcome> {
        match set.feature_bundle(name) {
            Ok(Some(features)) if !features.is_empty() => Err(parse_error),
            Ok(_) => {
                info!("No feature templates for {name}, skipping");
                Ok(TemplateOutcome::SkippedNoFeatures)
            }
            Err(_) => Err(parse_error),
        }
    }

    /// Finds a feature template by name on the target, creating it if absent.
    async fn resolve_feature(&self, feature: &FeatureTemplate) -> VManageResult<String> {
        if let Some(existing) = self
            .templates
            .find_feature_template(&feature.template_name)
            .await?
        {
            return Ok(existing.template_id);
        }

        let response = check_post_response(
            self.templates.create_feature_template(feature).await?,
            self.options.raise_on_error,
        )?;

        created_template_id(&response).ok_or_else(|| {
            VManageError::ApiError(format!(
                "Feature template {} was not created: {}",
                feature.template_name, response.reason
            ))
        })
    }

    /// Resolves the target ID of a device template's policy.
    ///
    /// Returns `None` when the policy is missing from the template set; the
    /// device template is then created without a policy.
    async fn resolve_policy(
        &self,
        set: &TemplateSet,
        template_name: &str,
        policy_id: &str,
    ) -> VManageResult<Option<String>> {
        let policy = set
            .policy_bundle(template_name)?
            .and_then(|mut bundle| bundle.remove(policy_id));
        let Some(policy) = policy else {
            warn!("Policy {policy_id} of {template_name} is missing from the template set");
            return Ok(None);
        };

        if let Some(existing) = self.templates.find_vedge_policy(&policy.policy_name).await? {
            return Ok(Some(existing));
        }

        check_post_response(
            self.templates.create_vedge_policy(&policy).await?,
            self.options.raise_on_error,
        )?;

        // The create call does not return the ID, so look it up again.
        self.templates
            .find_vedge_policy(&policy.policy_name)
            .await?
            .map(Some)
            .ok_or_else(|| {
                VManageError::ApiError(format!(
                    "Policy {} was not found after creation",
                    policy.policy_name
                ))
            })
    }
}
