use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The fields of a feature template that the controller accepts on creation.
///
/// Deserializing an exported feature entry into this struct drops the
/// export's bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureTemplate {
    pub template_name: String,

    #[serde(default)]
    pub template_description: String,

    /// Feature kind, e.g. `logging`, `ntp`, `omp-vedge`.
    pub template_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_min_version: Option<String>,

    /// Device models the template applies to.
    #[serde(default)]
    pub device_type: Vec<String>,

    #[serde(default)]
    pub factory_default: bool,

    #[serde(default)]
    pub template_definition: Value,
}

/// The fields of a vEdge policy that the controller accepts on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTemplate {
    pub policy_name: String,

    #[serde(default)]
    pub policy_description: String,

    #[serde(default)]
    pub policy_definition: Value,
}

/// A reference from a device template to a feature template.
///
/// Only `templateId` and the nested references are interpreted; every other
/// field travels through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReference {
    pub template_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_templates: Vec<TemplateReference>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl TemplateReference {
    /// Visits this reference and every nested reference, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TemplateReference)) {
        visit(self);
        for sub in &self.sub_templates {
            sub.walk(visit);
        }
    }
}

/// A device template as created on the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTemplate {
    pub template_name: String,

    #[serde(default)]
    pub template_description: String,

    /// Device model, e.g. `vedge-cloud`.
    pub device_type: String,

    #[serde(default = "default_config_type")]
    pub config_type: String,

    #[serde(default)]
    pub factory_default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_template_uid_range: Vec<TemplateReference>,

    #[serde(default)]
    pub general_templates: Vec<TemplateReference>,
}

fn default_config_type() -> String {
    "template".to_string()
}

impl DeviceTemplate {
    /// The referenced policy, if any. Exports use an empty string for none.
    pub fn policy(&self) -> Option<&str> {
        self.policy_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Every template ID referenced anywhere in this template.
    pub fn referenced_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for reference in self
            .general_templates
            .iter()
            .chain(self.feature_template_uid_range.iter())
        {
            reference.walk(&mut |r| ids.push(r.template_id.as_str()));
        }
        ids
    }
}

/// A feature or device template as listed by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub template_id: String,

    pub template_name: String,

    /// Additional attributes for this template.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A policy as listed by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    pub policy_id: String,

    pub policy_name: String,

    /// Additional attributes for this policy.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}
