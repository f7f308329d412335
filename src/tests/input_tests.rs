#[cfg(test)]
mod binding_tests {
    use crossterm::event::KeyCode;

    use crate::components::{Direction, Rotation};
    use crate::config::KeyConfig;
    use crate::input::{Action, KeyBindings};

    #[test]
    fn test_default_bindings() {
        let bindings = KeyConfig::default().resolve().unwrap();

        assert_eq!(
            bindings.action_for(KeyCode::Left),
            Some(Action::Shift(Direction::Left))
        );
        assert_eq!(
            bindings.action_for(KeyCode::Right),
            Some(Action::Shift(Direction::Right))
        );
        assert_eq!(
            bindings.action_for(KeyCode::Down),
            Some(Action::Shift(Direction::Down))
        );
        assert_eq!(
            bindings.action_for(KeyCode::Char('d')),
            Some(Action::Rotate(Rotation::Clockwise))
        );
        assert_eq!(
            bindings.action_for(KeyCode::Char('a')),
            Some(Action::Rotate(Rotation::CounterClockwise))
        );
        assert_eq!(bindings.action_for(KeyCode::Char('c')), Some(Action::Hold));
        assert_eq!(bindings.action_for(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(bindings.action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(bindings.action_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Up, Action::Hold);
        bindings.bind(KeyCode::Up, Action::Rotate(Rotation::Clockwise));

        assert_eq!(
            bindings.action_for(KeyCode::Up),
            Some(Action::Rotate(Rotation::Clockwise))
        );
    }

    #[test]
    fn test_only_movement_repeats() {
        assert!(Action::Shift(Direction::Down).repeats());
        assert!(Action::Rotate(Rotation::CounterClockwise).repeats());
        assert!(!Action::Hold.repeats());
        assert!(!Action::Quit.repeats());
    }
}

#[cfg(test)]
mod repeat_tests {
    use std::time::{Duration, Instant};

    use crossterm::event::KeyCode;

    use crate::components::{Direction, Rotation};
    use crate::input::{Action, KeyRepeat};

    fn repeat() -> KeyRepeat {
        KeyRepeat::new(Duration::from_millis(200), Duration::from_millis(80))
    }

    const LEFT: Action = Action::Shift(Direction::Left);

    #[test]
    fn test_fires_after_delay_then_interval() {
        let start = Instant::now();
        let mut repeat = repeat();
        repeat.press(KeyCode::Left, LEFT, start);

        assert_eq!(repeat.deadline(), Some(start + Duration::from_millis(200)));
        assert!(!repeat.is_due(start + Duration::from_millis(199)));
        assert_eq!(repeat.fire(start + Duration::from_millis(199)), None);

        assert_eq!(repeat.fire(start + Duration::from_millis(200)), Some(LEFT));
        assert_eq!(repeat.deadline(), Some(start + Duration::from_millis(280)));
        assert_eq!(repeat.fire(start + Duration::from_millis(250)), None);
        assert_eq!(repeat.fire(start + Duration::from_millis(280)), Some(LEFT));
    }

    #[test]
    fn test_late_fire_does_not_burst() {
        let start = Instant::now();
        let mut repeat = repeat();
        repeat.press(KeyCode::Left, LEFT, start);

        let late = start + Duration::from_millis(1000);
        assert_eq!(repeat.fire(late), Some(LEFT));
        assert_eq!(repeat.fire(late), None);
        assert_eq!(repeat.deadline(), Some(late + Duration::from_millis(80)));
    }

    #[test]
    fn test_release_cancels() {
        let start = Instant::now();
        let mut repeat = repeat();
        repeat.press(KeyCode::Left, LEFT, start);

        repeat.release(KeyCode::Right);
        assert!(repeat.deadline().is_some());

        repeat.release(KeyCode::Left);
        assert_eq!(repeat.deadline(), None);
        assert_eq!(repeat.fire(start + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_new_press_replaces_held_key() {
        let start = Instant::now();
        let mut repeat = repeat();
        let rotate = Action::Rotate(Rotation::Clockwise);
        repeat.press(KeyCode::Left, LEFT, start);
        repeat.press(KeyCode::Char('d'), rotate, start + Duration::from_millis(50));

        repeat.release(KeyCode::Left);
        assert_eq!(
            repeat.fire(start + Duration::from_millis(250)),
            Some(rotate)
        );
    }

    #[test]
    fn test_hold_never_repeats() {
        let start = Instant::now();
        let mut repeat = repeat();
        repeat.press(KeyCode::Char('c'), Action::Hold, start);
        assert_eq!(repeat.deadline(), None);
    }

    #[test]
    fn test_disabled_repeat() {
        let start = Instant::now();
        let mut repeat = repeat();
        repeat.press(KeyCode::Left, LEFT, start);

        repeat.set_enabled(false);
        assert!(!repeat.is_enabled());
        assert_eq!(repeat.deadline(), None);

        repeat.press(KeyCode::Left, LEFT, start);
        assert_eq!(repeat.deadline(), None);
    }
}

#[cfg(test)]
mod translate_tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::input::{GameEvent, translate};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    #[test]
    fn test_press_and_release() {
        assert_eq!(
            translate(&key(KeyCode::Left, KeyEventKind::Press)),
            Some(GameEvent::KeyDown(KeyCode::Left))
        );
        assert_eq!(
            translate(&key(KeyCode::Left, KeyEventKind::Release)),
            Some(GameEvent::KeyUp(KeyCode::Left))
        );
    }

    #[test]
    fn test_terminal_repeat_is_dropped() {
        assert_eq!(translate(&key(KeyCode::Left, KeyEventKind::Repeat)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&event), Some(GameEvent::Quit));
    }

    #[test]
    fn test_non_key_events_are_ignored() {
        assert_eq!(translate(&Event::Resize(80, 24)), None);
        assert_eq!(translate(&Event::FocusLost), None);
    }
}

#[cfg(test)]
mod clock_tests {
    use std::time::{Duration, Instant};

    use crate::clock::GravityClock;

    #[test]
    fn test_gravity_fires_on_interval() {
        let start = Instant::now();
        let mut clock = GravityClock::new(Duration::from_millis(1000), start);

        assert_eq!(clock.interval(), Duration::from_millis(1000));
        assert!(!clock.fire(start + Duration::from_millis(999)));
        assert!(clock.fire(start + Duration::from_millis(1000)));
        assert_eq!(clock.deadline(), start + Duration::from_millis(2000));
    }

    #[test]
    fn test_gravity_does_not_burst_after_stall() {
        let start = Instant::now();
        let mut clock = GravityClock::new(Duration::from_millis(100), start);

        let late = start + Duration::from_millis(550);
        assert!(clock.fire(late));
        assert!(!clock.fire(late));
        assert_eq!(clock.deadline(), late + Duration::from_millis(100));
    }
}
