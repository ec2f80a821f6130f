use std::collections::HashMap;

use crate::models::template::{DeviceTemplate, TemplateReference};
use crate::{VManageError, VManageResult};

/// Exported template ID to the ID the target controller assigned.
///
/// Built while the feature bundle of one device template is resolved and
/// used only for that device template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMapping {
    ids: HashMap<String, String>,
}

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, old_id: impl Into<String>, new_id: impl Into<String>) {
        self.ids.insert(old_id.into(), new_id.into());
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Looks up the target ID for an exported ID.
    ///
    /// # Errors
    ///
    /// Returns [`VManageError::MissingTemplateMapping`] when the exported ID
    /// was not part of the feature bundle.
    pub fn resolve(&self, old_id: &str) -> VManageResult<&str> {
        self.ids
            .get(old_id)
            .map(String::as_str)
            .ok_or_else(|| VManageError::MissingTemplateMapping(old_id.to_string()))
    }

    /// Rewrites the IDs of `references` and of all their nested references.
    pub fn rewrite(&self, references: &mut [TemplateReference]) -> VManageResult<()> {
        for reference in references {
            reference.template_id = self.resolve(&reference.template_id)?.to_string();
            self.rewrite(&mut reference.sub_templates)?;
        }
        Ok(())
    }

    /// Rewrites every feature reference of a device template, including its
    /// UID range.
    pub fn rewrite_device_template(&self, template: &mut DeviceTemplate) -> VManageResult<()> {
        self.rewrite(&mut template.general_templates)?;
        self.rewrite(&mut template.feature_template_uid_range)
    }
}
