//! In-process control surface: the callback registry a render session binds
//! into, and the bridge that routes external action requests to it.

pub mod dispatch;
pub mod registry;

pub use dispatch::{normalize_motion_group, DispatchBridge, DispatchReceipt};
pub use registry::{
    CallbackRegistry, ExpressionHandler, Invocation, MotionHandler, RegistrationId, RenderSession,
    SoundHandler,
};
pub use shared::error::DispatchError;
