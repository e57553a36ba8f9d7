use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

pub const RESOURCES_URL_PREFIX: &str = "/Resources";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub String);

impl ModelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn descriptor_file_name(&self) -> String {
        format!("{}.model3.json", self.0)
    }

    pub fn descriptor_url(&self) -> String {
        format!("{RESOURCES_URL_PREFIX}/{}/{}", self.0, self.descriptor_file_name())
    }

    /// URL of an asset given by a path relative to the model directory,
    /// e.g. `sounds/haru_talk_01.wav`.
    pub fn asset_url(&self, relative_path: &str) -> String {
        format!(
            "{RESOURCES_URL_PREFIX}/{}/{}",
            self.0,
            relative_path.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motion {
    pub group: String,
    /// `<group>_<index>`; only stable within one scan.
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub name: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelActions {
    pub motions: Vec<Motion>,
    pub expressions: Vec<Expression>,
    /// Paths relative to the model directory, always `sounds/<file>`.
    pub sounds: Vec<String>,
}

impl ModelActions {
    /// Motions bucketed by trigger group, groups in first-appearance order.
    pub fn motions_by_group(&self) -> Vec<(&str, Vec<&Motion>)> {
        let mut groups: Vec<(&str, Vec<&Motion>)> = Vec::new();
        for motion in &self.motions {
            match groups.iter_mut().find(|(group, _)| *group == motion.group) {
                Some((_, members)) => members.push(motion),
                None => groups.push((motion.group.as_str(), vec![motion])),
            }
        }
        groups
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<ModelId>,
    pub actions: BTreeMap<ModelId, ModelActions>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.actions.is_empty()
    }

    pub fn actions_for(&self, model: &ModelId) -> Option<&ModelActions> {
        self.actions.get(model)
    }
}

pub fn sound_display_name(path: &str) -> &str {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
