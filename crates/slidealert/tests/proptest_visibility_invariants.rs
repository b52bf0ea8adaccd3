//! Property tests for the visibility state machine.

use std::time::Duration;

use proptest::prelude::*;
use slidealert::{AlertConfig, VisibilityController, VisibilityPhase, VisibilityTransition};
use slidealert_core::keyboard::{KeyboardEvent, KeyboardEvents};

#[derive(Debug, Clone)]
enum Step {
    Intent(bool),
    Tick(u64),
    KeyboardShown(Option<f64>),
    KeyboardHidden,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<bool>().prop_map(Step::Intent),
        4 => (0u64..200).prop_map(Step::Tick),
        1 => prop::option::of(0.0f64..600.0).prop_map(Step::KeyboardShown),
        1 => Just(Step::KeyboardHidden),
    ]
}

fn apply(
    ctl: &mut VisibilityController,
    keyboard: &KeyboardEvents,
    step: &Step,
) -> Option<VisibilityTransition> {
    match *step {
        Step::Intent(show) => ctl.set_intent(show),
        Step::Tick(ms) => ctl.tick(Duration::from_millis(ms)),
        Step::KeyboardShown(end_height) => {
            keyboard.emit(&KeyboardEvent::DidShow { end_height });
            None
        }
        Step::KeyboardHidden => {
            keyboard.emit(&KeyboardEvent::DidHide);
            None
        }
    }
}

proptest! {
    #[test]
    fn hidden_fires_once_per_shown_edge(
        duration_ms in 0u64..300,
        steps in prop::collection::vec(step(), 0..80),
    ) {
        let keyboard = KeyboardEvents::new();
        let config = AlertConfig::new().slide_animation_duration(Duration::from_millis(duration_ms));
        let mut ctl = VisibilityController::new(&config, &keyboard);

        for step in &steps {
            let was_shown = ctl.shown();
            let transition = apply(&mut ctl, &keyboard, step);
            let edge = was_shown && !ctl.shown();

            prop_assert_eq!(transition == Some(VisibilityTransition::Hidden), edge);
            if !was_shown && ctl.shown() {
                prop_assert!(matches!(step, Step::Intent(true)));
            }

            // shown is consistent with the run in flight.
            match ctl.phase() {
                VisibilityPhase::Hidden => prop_assert!(!ctl.shown()),
                _ => prop_assert!(ctl.shown()),
            }
            // The phase always heads toward the intent.
            let heading_in = matches!(ctl.phase(), VisibilityPhase::Showing | VisibilityPhase::Shown);
            prop_assert_eq!(heading_in, ctl.intent());
            let p = ctl.progress();
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn show_then_immediate_hide_never_sticks(pre_ticks in prop::collection::vec(0u64..40, 0..4)) {
        let keyboard = KeyboardEvents::new();
        let mut ctl = VisibilityController::new(&AlertConfig::default(), &keyboard);

        ctl.set_intent(true);
        for ms in pre_ticks {
            prop_assert_eq!(ctl.tick(Duration::from_millis(ms)), None);
        }
        ctl.set_intent(false);

        let mut transitions = Vec::new();
        for _ in 0..40 {
            transitions.extend(ctl.tick(Duration::from_millis(16)));
        }
        prop_assert_eq!(transitions, vec![VisibilityTransition::Hidden]);
        prop_assert_eq!(ctl.phase(), VisibilityPhase::Hidden);
        prop_assert!(!ctl.shown());
        prop_assert_eq!(ctl.progress(), 0.0);
    }

    #[test]
    fn unmount_freezes_everything(
        before in prop::collection::vec(step(), 0..30),
        after in prop::collection::vec(step(), 0..30),
    ) {
        let keyboard = KeyboardEvents::new();
        let mut ctl = VisibilityController::new(&AlertConfig::default(), &keyboard);
        for step in &before {
            apply(&mut ctl, &keyboard, step);
        }

        ctl.unmount();
        prop_assert_eq!(keyboard.listener_count(), 0);
        let snapshot = (ctl.phase(), ctl.state(), ctl.progress(), ctl.intent());

        for step in &after {
            prop_assert_eq!(apply(&mut ctl, &keyboard, step), None);
        }
        prop_assert_eq!((ctl.phase(), ctl.state(), ctl.progress(), ctl.intent()), snapshot);
    }
}
