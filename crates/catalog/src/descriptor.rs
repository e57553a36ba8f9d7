//! Reader for `<model>.model3.json` descriptors.
//!
//! Only `FileReferences.Motions` and `FileReferences.Expressions` are read.
//! The format belongs to the asset authoring tools, so every field is
//! optional and unknown fields are ignored.

use std::{fs, io, path::Path};

use indexmap::IndexMap;
use serde::{de::IgnoredAny, Deserialize, Deserializer};
use serde_json::Value;
use shared::domain::{Expression, Motion};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct RawDescriptor {
    #[serde(rename = "FileReferences", default, deserialize_with = "lenient")]
    file_references: Option<RawFileReferences>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFileReferences {
    /// Group name to motion list, in descriptor order.
    #[serde(rename = "Motions", default, deserialize_with = "lenient")]
    motions: Option<IndexMap<String, Value>>,
    #[serde(rename = "Expressions", default, deserialize_with = "lenient")]
    expressions: Option<Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Expected(T),
    Other(IgnoredAny),
}

// A section of the wrong JSON type reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Expected(value) => Some(value),
        Lenient::Other(_) => None,
    })
}

/// Motions and expressions declared by one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub motions: Vec<Motion>,
    pub expressions: Vec<Expression>,
}

impl Descriptor {
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let raw = fs::read(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &[u8]) -> Result<Self, DescriptorError> {
        let descriptor: RawDescriptor = serde_json::from_slice(raw)?;
        let references = descriptor.file_references.unwrap_or_default();

        let mut motions = Vec::new();
        for (group, entries) in references.motions.unwrap_or_default() {
            // Non-list groups are skipped rather than failing the model.
            let Value::Array(entries) = entries else {
                continue;
            };
            for (index, entry) in entries.iter().enumerate() {
                motions.push(Motion {
                    group: group.clone(),
                    name: format!("{group}_{index}"),
                    file: string_field(entry, "File").unwrap_or_default(),
                    sound: string_field(entry, "Sound"),
                });
            }
        }

        let expressions = references
            .expressions
            .unwrap_or_default()
            .into_iter()
            .map(|entry| Expression {
                name: string_field(&entry, "Name").unwrap_or_default(),
                file: string_field(&entry, "File").unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            motions,
            expressions,
        })
    }
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
#[path = "tests/descriptor_tests.rs"]
mod tests;
