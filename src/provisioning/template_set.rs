use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::template::{DeviceTemplate, FeatureTemplate, PolicyTemplate};
use crate::{VManageError, VManageResult};

const DEVICE_TEMPLATE_SET: &str = "device_template";
const FEATURES_SUFFIX: &str = "_features";
const POLICY_SUFFIX: &str = "_policy";

#[derive(Deserialize)]
struct DeviceTemplateFile {
    templates: Vec<Value>,
}

/// Exported templates keyed by template-set name.
///
/// A set holds `device_template` (with a `templates` list) and, per device
/// template, `{name}_features` mapping exported feature IDs to feature
/// templates and optionally `{name}_policy` mapping policy IDs to policies.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    entries: BTreeMap<String, Value>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every `*.json` file in `dir`, keyed by file stem.
    pub fn from_dir(dir: impl AsRef<Path>) -> VManageResult<Self> {
        let dir = dir.as_ref();
        let io_error = |path: &Path, source: std::io::Error| VManageError::IoError {
            path: path.display().to_string(),
            source,
        };

        let mut set = Self::new();
        for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
            let path = entry.map_err(|e| io_error(dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw = fs::read_to_string(&path).map_err(|e| io_error(path.as_path(), e))?;
            let content = serde_json::from_str(&raw).map_err(|source| {
                VManageError::InvalidTemplateFile {
                    path: path.display().to_string(),
                    source,
                }
            })?;

            debug!("Loaded template set {} from {}", name, path.display());
            set.insert(name, content);
        }

        Ok(set)
    }

    pub fn insert(&mut self, name: impl Into<String>, content: Value) {
        self.entries.insert(name.into(), content);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The device templates to import, in file order.
    ///
    /// Fails if any entry is malformed; see
    /// [`TemplateSet::device_template_entries`] to parse entries one by one.
    pub fn device_templates(&self) -> VManageResult<Vec<DeviceTemplate>> {
        self.device_template_entries()?
            .into_iter()
            .map(|(_, template)| template)
            .collect()
    }

    /// Each device template entry with its name and its own parse result.
    ///
    /// Only a `device_template` entry without a `templates` list is an error
    /// for the whole set. An entry without a `templateName` is named by its
    /// position, e.g. `device_template[2]`.
    pub fn device_template_entries(
        &self,
    ) -> VManageResult<Vec<(String, VManageResult<DeviceTemplate>)>> {
        let Some(file) = self.typed::<DeviceTemplateFile>(DEVICE_TEMPLATE_SET)? else {
            warn!("Template set has no {DEVICE_TEMPLATE_SET} entry");
            return Ok(Vec::new());
        };

        let entries = file
            .templates
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let position = format!("{DEVICE_TEMPLATE_SET}[{index}]");
                let name = entry
                    .get("templateName")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| position.clone());
                let template = serde_json::from_value(entry).map_err(|source| {
                    VManageError::InvalidTemplateFile {
                        path: position,
                        source,
                    }
                });
                (name, template)
            })
            .collect();

        Ok(entries)
    }

    /// Feature templates referenced by a device template, keyed by their
    /// exported ID.
    pub fn feature_bundle(
        &self,
        template_name: &str,
    ) -> VManageResult<Option<BTreeMap<String, FeatureTemplate>>> {
        self.typed(&format!("{template_name}{FEATURES_SUFFIX}"))
    }

    /// Policies referenced by a device template, keyed by their exported ID.
    pub fn policy_bundle(
        &self,
        template_name: &str,
    ) -> VManageResult<Option<BTreeMap<String, PolicyTemplate>>> {
        self.typed(&format!("{template_name}{POLICY_SUFFIX}"))
    }

    fn typed<T: DeserializeOwned>(&self, name: &str) -> VManageResult<Option<T>> {
        let Some(content) = self.entries.get(name) else {
            return Ok(None);
        };

        serde_json::from_value(content.clone())
            .map(Some)
            .map_err(|source| VManageError::InvalidTemplateFile {
                path: name.to_string(),
                source,
            })
    }
}

impl FromIterator<(String, Value)> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
