//! Debug events emitted by the slide driver and the keyboard observer.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slidealert_core::animation::{AnimationDriver, AnimationTarget, Easing};
use slidealert_core::keyboard::{KeyboardEvent, KeyboardEvents, KeyboardObserver};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().expect("capture lock").clone()).expect("utf8")
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture_debug(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.text()
}

#[test]
fn superseding_a_run_is_logged() {
    let logs = capture_debug(|| {
        let mut driver = AnimationDriver::new(Easing::Linear);
        driver.animate_to(AnimationTarget::Shown, Duration::from_millis(250));
        driver.tick(Duration::from_millis(50));
        driver.animate_to(AnimationTarget::Hidden, Duration::from_millis(250));
    });
    assert!(logs.contains("slide run superseded"), "{logs}");
    assert!(logs.contains("superseded=0"), "{logs}");
    assert!(logs.contains("by=1"), "{logs}");
}

#[test]
fn completed_run_is_not_reported_as_superseded() {
    let logs = capture_debug(|| {
        let mut driver = AnimationDriver::default();
        driver.animate_to(AnimationTarget::Shown, Duration::from_millis(100));
        driver.tick(Duration::from_millis(100));
        driver.animate_to(AnimationTarget::Hidden, Duration::from_millis(100));
    });
    assert!(!logs.contains("slide run superseded"), "{logs}");
}

#[test]
fn keyboard_events_and_detach_are_logged() {
    let logs = capture_debug(|| {
        let events = KeyboardEvents::new();
        let mut observer = KeyboardObserver::attach(&events);
        events.emit(&KeyboardEvent::DidShow {
            end_height: Some(240.0),
        });
        events.emit(&KeyboardEvent::DidShow { end_height: None });
        events.emit(&KeyboardEvent::DidHide);
        observer.detach();
        observer.detach();
    });
    assert!(logs.contains("keyboard shown"), "{logs}");
    assert!(logs.contains("keyboard shown without end coordinates, ignored"), "{logs}");
    assert!(logs.contains("keyboard hidden"), "{logs}");
    assert_eq!(logs.matches("keyboard observer detached").count(), 1, "{logs}");
}
