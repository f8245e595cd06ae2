//! Descriptor decoding and projection.
//!
//! Descriptor files are decoded into an untyped [`serde_json::Value`] and
//! projected into typed descriptors right away, so untyped trees never travel
//! past the reader.

use crate::types::Bridge;
use serde::Deserialize;
use serde_json::Value;

/// Descriptor file name inside a domain directory.
pub const DOMAIN_DESCRIPTOR: &str = "domain.json";

/// Descriptor file name inside a skill directory.
pub const SKILL_DESCRIPTOR: &str = "skill.json";

/// Error type for descriptor decoding and projection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("invalid descriptor: {0}")]
    Invalid(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("unknown bridge: {0}")]
    UnknownBridge(String),
}

/// Projection of `domain.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDescriptor {
    pub name: String,
}

/// Projection of `skill.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDescriptor {
    pub name: String,
    pub bridge: Bridge,
}

/// Raw descriptor fields as decoded; other fields are ignored.
#[derive(Debug, Deserialize)]
struct RawDescriptor {
    name: Option<String>,
    bridge: Option<String>,
}

/// Decodes descriptor text into an untyped JSON tree.
pub fn decode(content: &str) -> Result<Value, DescriptorError> {
    serde_json::from_str(content).map_err(|e| DescriptorError::InvalidJson(e.to_string()))
}

fn raw(value: &Value) -> Result<RawDescriptor, DescriptorError> {
    if !value.is_object() {
        return Err(DescriptorError::Invalid("expected a JSON object".to_string()));
    }
    RawDescriptor::deserialize(value).map_err(|e| DescriptorError::Invalid(e.to_string()))
}

/// Projects a decoded `domain.json` into a [`DomainDescriptor`].
pub fn parse_domain_descriptor(value: &Value) -> Result<DomainDescriptor, DescriptorError> {
    let raw = raw(value)?;
    let name = raw.name.ok_or(DescriptorError::MissingField("name"))?;
    Ok(DomainDescriptor { name })
}

/// Projects a decoded `skill.json` into a [`SkillDescriptor`].
///
/// Both `name` and `bridge` are required; `bridge` must be a known backend.
pub fn parse_skill_descriptor(value: &Value) -> Result<SkillDescriptor, DescriptorError> {
    let raw = raw(value)?;
    let name = raw.name.ok_or(DescriptorError::MissingField("name"))?;
    let bridge: Bridge = raw
        .bridge
        .ok_or(DescriptorError::MissingField("bridge"))?
        .parse()?;
    Ok(SkillDescriptor { name, bridge })
}
