//! A receipt means "dispatched", not "played". A request with no registered
//! session is still accepted.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    error::DispatchError,
    protocol::{ExpressionRequest, MotionRequest, SoundRequest},
};
use tracing::{debug, warn};

use crate::registry::{CallbackRegistry, Invocation};

/// Legacy group spelling separator, e.g. `Tap@Body` for `TapBody`.
const GROUP_SEPARATOR: char = '@';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Always true for a well-formed request.
    pub accepted: bool,
    pub dispatched: bool,
    pub detail: String,
}

impl DispatchReceipt {
    fn from_invocation(invocation: Invocation, detail: String) -> Self {
        Self {
            accepted: true,
            dispatched: invocation.was_dispatched(),
            detail,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchBridge {
    registry: Arc<CallbackRegistry>,
}

impl DispatchBridge {
    pub fn new(registry: Arc<CallbackRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<CallbackRegistry> {
        &self.registry
    }

    pub fn request_motion(&self, request: &MotionRequest) -> DispatchReceipt {
        let group = normalize_motion_group(&request.action);
        let invocation = self
            .registry
            .invoke_motion(&group, request.sound.as_deref());
        log_invocation("motion", &group, invocation);
        DispatchReceipt::from_invocation(invocation, format!("Playing: {}", request.action))
    }

    pub fn request_expression(&self, request: &ExpressionRequest) -> DispatchReceipt {
        let invocation = self.registry.invoke_expression(&request.expression);
        log_invocation("expression", &request.expression, invocation);
        DispatchReceipt::from_invocation(
            invocation,
            format!("Playing expression: {}", request.expression),
        )
    }

    pub fn request_sound(&self, request: &SoundRequest) -> DispatchReceipt {
        let invocation = self.registry.invoke_sound(&request.sound);
        log_invocation("sound", &request.sound, invocation);
        DispatchReceipt::from_invocation(invocation, format!("Playing sound: {}", request.sound))
    }

    pub fn request_motion_json(&self, body: &[u8]) -> Result<DispatchReceipt, DispatchError> {
        let request = parse_motion_request(body)?;
        Ok(self.request_motion(&request))
    }

    pub fn request_expression_json(&self, body: &[u8]) -> Result<DispatchReceipt, DispatchError> {
        let request = parse_expression_request(body)?;
        Ok(self.request_expression(&request))
    }

    pub fn request_sound_json(&self, body: &[u8]) -> Result<DispatchReceipt, DispatchError> {
        let request = parse_sound_request(body)?;
        Ok(self.request_sound(&request))
    }
}

/// Drops the first `@` so both historical spellings of a group resolve to
/// the one the model descriptor uses. Other aliases are not handled.
pub fn normalize_motion_group(action: &str) -> String {
    action.replacen(GROUP_SEPARATOR, "", 1)
}

pub fn parse_motion_request(body: &[u8]) -> Result<MotionRequest, DispatchError> {
    parse_request(body)
}

pub fn parse_expression_request(body: &[u8]) -> Result<ExpressionRequest, DispatchError> {
    parse_request(body)
}

pub fn parse_sound_request(body: &[u8]) -> Result<SoundRequest, DispatchError> {
    parse_request(body)
}

// Derived struct impls also accept JSON arrays, so the object check comes first.
fn parse_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, DispatchError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(DispatchError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

fn log_invocation(kind: &'static str, subject: &str, invocation: Invocation) {
    match invocation {
        Invocation::Dispatched => debug!(kind, subject, "dispatched to render session"),
        Invocation::NotReady => warn!(kind, subject, "render session not ready; request dropped"),
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
