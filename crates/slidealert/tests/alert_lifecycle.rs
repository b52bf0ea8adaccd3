//! End-to-end lifecycle tests for `SlideAlert`.

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slidealert::{AlertConfig, AlertProps, SlideAlert, VisibilityPhase};
use slidealert_core::keyboard::{KeyboardEvent, KeyboardEvents};
use slidealert_core::position::{Platform, REST_TOP_OFFSET};

const VIEWPORT: f64 = 800.0;
const FRAME: Duration = Duration::from_millis(16);

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, move || c.set(c.get() + 1))
}

fn mount(
    cancellable: bool,
    keyboard: &KeyboardEvents,
) -> (SlideAlert, Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let (hides, on_hide) = counter();
    let (closes, on_close) = counter();
    let props = AlertProps::builder()
        .config(AlertConfig::new().platform(Platform::Ios))
        .cancellable(cancellable)
        .on_hide(on_hide)
        .on_request_close(on_close)
        .build()
        .expect("valid props");
    (SlideAlert::mount(props, keyboard, VIEWPORT), hides, closes)
}

fn settle(alert: &mut SlideAlert) {
    for _ in 0..64 {
        alert.tick(FRAME);
        if !alert.phase().is_animating() {
            return;
        }
    }
    panic!("alert never settled: {:?}", alert.phase());
}

#[test]
fn show_then_hide_end_to_end() {
    let keyboard = KeyboardEvents::new();
    let (mut alert, hides, _) = mount(true, &keyboard);

    let frame = alert.frame();
    assert!(!frame.visible);
    assert!(!frame.scrim.tap_active);

    alert.set_show(true);
    assert!(alert.state().shown, "present for the whole slide-in");
    assert!(alert.frame().scrim.tap_active);
    assert_eq!(alert.frame().content.translate_y, VIEWPORT);

    alert.tick(Duration::from_millis(100));
    let mid = alert.frame().content.translate_y;
    assert!(mid < VIEWPORT && mid > -VIEWPORT / 5.0);

    settle(&mut alert);
    assert_eq!(alert.phase(), VisibilityPhase::Shown);
    assert_eq!(alert.frame().content.translate_y, -VIEWPORT / 5.0);
    assert_eq!(alert.frame().content.top, REST_TOP_OFFSET);

    alert.set_show(false);
    alert.tick(Duration::from_millis(200));
    assert!(alert.state().shown, "stays mounted while sliding out");
    assert!(alert.frame().visible);
    assert_eq!(hides.get(), 0);

    settle(&mut alert);
    assert!(!alert.state().shown);
    assert!(!alert.frame().visible);
    assert_eq!(alert.frame().content.translate_y, VIEWPORT);
    assert_eq!(hides.get(), 1);
}

#[test]
fn scrim_inactive_when_not_cancellable() {
    let keyboard = KeyboardEvents::new();
    let (mut alert, _, closes) = mount(false, &keyboard);
    alert.set_show(true);

    assert!(alert.state().shown);
    assert!(!alert.frame().scrim.tap_active);
    assert!(!alert.scrim_tapped());
    assert!(!alert.back_requested());
    assert_eq!(closes.get(), 0);
}

#[test]
fn keyboard_repositions_open_alert() {
    let keyboard = KeyboardEvents::new();
    let (mut alert, _, _) = mount(true, &keyboard);
    alert.set_show(true);
    settle(&mut alert);

    keyboard.emit(&KeyboardEvent::DidShow {
        end_height: Some(120.0),
    });
    assert_eq!(alert.frame().content.top, 170.0 - 120.0);

    keyboard.emit(&KeyboardEvent::DidShow { end_height: None });
    assert_eq!(alert.state().keyboard_space, 120.0);

    keyboard.emit(&KeyboardEvent::DidHide);
    assert_eq!(alert.frame().content.top, REST_TOP_OFFSET);
}

#[test]
fn drop_mid_animation_releases_everything() {
    let keyboard = KeyboardEvents::new();
    let (mut alert, hides, _) = mount(true, &keyboard);
    alert.set_show(true);
    settle(&mut alert);
    alert.set_show(false);
    alert.tick(FRAME);

    drop(alert);
    assert_eq!(keyboard.listener_count(), 0);
    assert_eq!(keyboard.emit(&KeyboardEvent::DidHide), 0);
    assert_eq!(hides.get(), 0, "suppressed completion must not notify");
}

#[test]
fn unmount_mid_animation_freezes_alert() {
    let keyboard = KeyboardEvents::new();
    let (mut alert, hides, _) = mount(true, &keyboard);
    alert.set_show(true);
    alert.tick(Duration::from_millis(50));
    alert.unmount();

    let state = alert.state();
    let progress = alert.progress();
    for _ in 0..30 {
        alert.tick(FRAME);
    }
    alert.set_show(false);
    keyboard.emit(&KeyboardEvent::DidShow {
        end_height: Some(300.0),
    });

    assert_eq!(alert.state(), state);
    assert_eq!(alert.progress(), progress);
    assert_eq!(alert.phase(), VisibilityPhase::Showing);
    assert_eq!(hides.get(), 0);
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("capture lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn unmount_logs_suppressed_completion() {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let keyboard = KeyboardEvents::new();
        let (mut alert, _, _) = mount(true, &keyboard);
        alert.set_show(true);
        alert.unmount();
    });

    let logs = String::from_utf8(capture.0.lock().expect("capture lock").clone()).expect("utf8");
    assert!(logs.contains("slide started"), "{logs}");
    assert!(logs.contains("pending slide completion suppressed by unmount"), "{logs}");
    assert!(logs.contains("keyboard observer detached"), "{logs}");
}
