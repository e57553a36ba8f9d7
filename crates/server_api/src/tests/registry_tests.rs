use super::*;
use parking_lot::Mutex;

#[derive(Default)]
struct RecordingSession {
    calls: Mutex<Vec<String>>,
}

impl RenderSession for RecordingSession {
    fn play_motion(&self, group: &str, sound: Option<&str>) {
        self.calls
            .lock()
            .push(format!("motion:{group}:{}", sound.unwrap_or("-")));
    }

    fn play_expression(&self, name: &str) {
        self.calls.lock().push(format!("expression:{name}"));
    }

    fn play_sound(&self, path: &str) {
        self.calls.lock().push(format!("sound:{path}"));
    }
}

#[test]
fn unbound_slots_report_not_ready() {
    let registry = CallbackRegistry::new();
    assert!(!registry.is_ready());
    assert_eq!(registry.invoke_motion("Idle", None), Invocation::NotReady);
    assert_eq!(registry.invoke_expression("Smile"), Invocation::NotReady);
    assert_eq!(registry.invoke_sound("sounds/a.wav"), Invocation::NotReady);
}

#[test]
fn session_receives_exact_arguments() {
    let registry = CallbackRegistry::new();
    let session = Arc::new(RecordingSession::default());
    registry.register_session(session.clone());

    assert_eq!(
        registry.invoke_motion("TapBody", Some("sounds/tap.wav")),
        Invocation::Dispatched
    );
    assert_eq!(registry.invoke_expression("exp_02"), Invocation::Dispatched);
    assert_eq!(registry.invoke_sound("sounds/a.wav"), Invocation::Dispatched);

    assert_eq!(
        *session.calls.lock(),
        vec![
            "motion:TapBody:sounds/tap.wav",
            "expression:exp_02",
            "sound:sounds/a.wav",
        ]
    );
}

#[test]
fn later_registration_replaces_earlier_one() {
    let registry = CallbackRegistry::new();
    let first = Arc::new(RecordingSession::default());
    let second = Arc::new(RecordingSession::default());

    let first_id = registry.register_session(first.clone());
    let second_id = registry.register_session(second.clone());
    assert_ne!(first_id, second_id);
    assert_eq!(registry.current_registration(), Some(second_id));

    registry.invoke_expression("Smile");
    assert!(first.calls.lock().is_empty());
    assert_eq!(second.calls.lock().len(), 1);
}

#[test]
fn release_only_clears_the_current_registration() {
    let registry = CallbackRegistry::new();
    let first_id = registry.register_session(Arc::new(RecordingSession::default()));
    let second_id = registry.register_session(Arc::new(RecordingSession::default()));

    assert!(!registry.release(first_id));
    assert!(registry.is_ready());

    assert!(registry.release(second_id));
    assert!(!registry.is_ready());
    assert_eq!(registry.invoke_sound("sounds/a.wav"), Invocation::NotReady);
}

#[test]
fn partially_bound_registration_leaves_other_slots_not_ready() {
    let registry = CallbackRegistry::new();
    let sounds = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = sounds.clone();
    registry.register(
        None,
        None,
        Some(Arc::new(move |path: &str| sink.lock().push(path.to_string()))),
    );

    assert_eq!(registry.invoke_motion("Idle", None), Invocation::NotReady);
    assert_eq!(registry.invoke_sound("sounds/b.ogg"), Invocation::Dispatched);
    assert_eq!(*sounds.lock(), vec!["sounds/b.ogg"]);
}

#[test]
fn handler_may_reregister_while_running() {
    let registry = Arc::new(CallbackRegistry::new());
    let inner = registry.clone();
    registry.register(
        None,
        Some(Arc::new(move |_name: &str| {
            inner.register(None, None, None);
        })),
        None,
    );

    assert_eq!(registry.invoke_expression("Smile"), Invocation::Dispatched);
    assert_eq!(registry.invoke_expression("Smile"), Invocation::NotReady);
}
