use std::{fmt, sync::Arc};

use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

pub type MotionHandler = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;
pub type ExpressionHandler = Arc<dyn Fn(&str) + Send + Sync>;
pub type SoundHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Calls are fire-and-forget: implementations must return promptly and
/// report their own playback failures.
pub trait RenderSession: Send + Sync {
    fn play_motion(&self, group: &str, sound: Option<&str>);
    fn play_expression(&self, name: &str);
    fn play_sound(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(pub Uuid);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Dispatched,
    NotReady,
}

impl Invocation {
    pub fn was_dispatched(self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

struct Bindings {
    id: RegistrationId,
    on_motion: Option<MotionHandler>,
    on_expression: Option<ExpressionHandler>,
    on_sound: Option<SoundHandler>,
}

#[derive(Default)]
pub struct CallbackRegistry {
    current: RwLock<Option<Arc<Bindings>>>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("registration", &self.current_registration())
            .finish()
    }
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole slot set in one swap; readers never see a mix of
    /// old and new handlers.
    pub fn register(
        &self,
        on_motion: Option<MotionHandler>,
        on_expression: Option<ExpressionHandler>,
        on_sound: Option<SoundHandler>,
    ) -> RegistrationId {
        let id = RegistrationId(Uuid::new_v4());
        let bindings = Arc::new(Bindings {
            id,
            on_motion,
            on_expression,
            on_sound,
        });
        let replaced = self.current.write().replace(bindings);
        info!(
            registration = %id,
            replaced = replaced.is_some(),
            "render session registered"
        );
        id
    }

    pub fn register_session(&self, session: Arc<dyn RenderSession>) -> RegistrationId {
        let motion = Arc::clone(&session);
        let expression = Arc::clone(&session);
        self.register(
            Some(Arc::new(move |group: &str, sound: Option<&str>| {
                motion.play_motion(group, sound)
            })),
            Some(Arc::new(move |name: &str| expression.play_expression(name))),
            Some(Arc::new(move |path: &str| session.play_sound(path))),
        )
    }

    /// Clears the slots if `id` is still the current registration.
    /// Returns false when a later registration has already taken over.
    pub fn release(&self, id: RegistrationId) -> bool {
        let mut current = self.current.write();
        if current.as_ref().is_some_and(|bindings| bindings.id == id) {
            *current = None;
            info!(registration = %id, "render session released");
            true
        } else {
            false
        }
    }

    pub fn current_registration(&self) -> Option<RegistrationId> {
        self.current.read().as_ref().map(|bindings| bindings.id)
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn invoke_motion(&self, group: &str, sound: Option<&str>) -> Invocation {
        match self.snapshot().and_then(|b| b.on_motion.clone()) {
            Some(handler) => {
                handler(group, sound);
                Invocation::Dispatched
            }
            None => Invocation::NotReady,
        }
    }

    pub fn invoke_expression(&self, name: &str) -> Invocation {
        match self.snapshot().and_then(|b| b.on_expression.clone()) {
            Some(handler) => {
                handler(name);
                Invocation::Dispatched
            }
            None => Invocation::NotReady,
        }
    }

    pub fn invoke_sound(&self, path: &str) -> Invocation {
        match self.snapshot().and_then(|b| b.on_sound.clone()) {
            Some(handler) => {
                handler(path);
                Invocation::Dispatched
            }
            None => Invocation::NotReady,
        }
    }

    // Handlers run after the read guard is dropped, so a handler may
    // re-register without deadlocking.
    fn snapshot(&self) -> Option<Arc<Bindings>> {
        self.current.read().clone()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
