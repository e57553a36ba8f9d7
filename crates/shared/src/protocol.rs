use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Catalog;

pub const ACTIONS_ROUTE: &str = "/api/live2d/actions";
pub const PLAY_ROUTE: &str = "/api/live2d/play";
pub const EXPRESSION_ROUTE: &str = "/api/live2d/expression";
pub const SOUND_ROUTE: &str = "/api/live2d/sound";
pub const SESSION_ROUTE: &str = "/api/live2d/session";

/// Body of `POST /api/live2d/play`. `action` is a motion trigger group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionRequest {
    pub action: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sound: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundRequest {
    pub sound: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Catalog>,
}

impl ActionsResponse {
    pub fn ok(data: Catalog) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AckResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum RenderCommand {
    PlayMotion {
        group: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sound: Option<String>,
    },
    PlayExpression {
        name: String,
    },
    PlaySound {
        path: String,
    },
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}
