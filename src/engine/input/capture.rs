// Capture of the next newly pressed input, used while rebinding

use super::axis::AxisId;
use super::code::{InputCode, PhysicalCode, GAMEPAD_BUTTONS, KEYBOARD_KEYS};
use super::frame::InputFrameState;

/// Something that advances input by one tick and hands back the new snapshot
///
/// Implementors run the host's per-frame work (present a frame, pump events,
/// refresh input) inside `next_frame`.
pub trait FramePump {
    fn next_frame(&mut self) -> &InputFrameState;
}

/// First input that went down this tick
///
/// Scans the keyboard table, then gamepad buttons and axes when a gamepad is
/// connected, each in table order. Held inputs are ignored.
pub fn scan(frame: &InputFrameState) -> Option<PhysicalCode> {
    let triggered = |code: PhysicalCode| {
        frame
            .state(code)
            .is_some_and(|state| state.just_pressed)
    };

    let keyboard = KEYBOARD_KEYS
        .iter()
        .map(|&(_, key)| InputCode::Keyboard(key).code())
        .find(|&code| triggered(code));
    if keyboard.is_some() {
        return keyboard;
    }

    if !frame.has_gamepad() {
        return None;
    }

    let buttons = GAMEPAD_BUTTONS
        .iter()
        .map(|&(_, button)| InputCode::Button(button).code());
    let axes = AxisId::ALL.iter().map(|&axis| InputCode::Axis(axis).code());
    buttons.chain(axes).find(|&code| triggered(code))
}

/// Pump frames until some input is newly pressed, then return its code
///
/// Yields to the pump once per tick; there is no timeout.
pub fn wait_for_input<P: FramePump + ?Sized>(pump: &mut P) -> PhysicalCode {
    loop {
        if let Some(code) = scan(pump.next_frame()) {
            log::debug!("Captured {}", code);
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::axis::RawAxis;
    use crate::engine::input::code::name_to_code;
    use crate::engine::input::testing::ScriptedInput;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Replays a fixed list of device states, one per tick
    struct ScriptedPump {
        script: VecDeque<ScriptedInput>,
        frame: InputFrameState,
        now: Duration,
        ticks: usize,
    }

    impl ScriptedPump {
        fn new(script: Vec<ScriptedInput>) -> Self {
            Self {
                script: script.into(),
                frame: InputFrameState::default(),
                now: Duration::ZERO,
                ticks: 0,
            }
        }
    }

    impl FramePump for ScriptedPump {
        fn next_frame(&mut self) -> &InputFrameState {
            let input = self
                .script
                .pop_front()
                .expect("script ran out before an input was captured");
            self.now += Duration::from_millis(16);
            self.ticks += 1;
            self.frame.update(&input, self.now);
            &self.frame
        }
    }

    fn frame_for(input: &ScriptedInput) -> InputFrameState {
        let mut frame = InputFrameState::default();
        frame.update(input, Duration::ZERO);
        frame
    }

    #[test]
    fn test_scan_nothing_pressed() {
        assert_eq!(scan(&frame_for(&ScriptedInput::new())), None);
    }

    #[test]
    fn test_keyboard_beats_gamepad() {
        let input = ScriptedInput::new()
            .with_button(0)
            .with_axis(RawAxis::LeftTrigger, 1.0)
            .with_key(0x5A);
        assert_eq!(scan(&frame_for(&input)), Some(name_to_code("Z").unwrap()));
    }

    #[test]
    fn test_button_beats_axis() {
        let input = ScriptedInput::new()
            .with_axis(RawAxis::LeftStickX, 1.0)
            .with_button(0x0A);
        assert_eq!(
            scan(&frame_for(&input)),
            Some(name_to_code("Right Shoulder").unwrap())
        );
    }

    #[test]
    fn test_table_order_within_keyboard() {
        // Enter (0x0D) is listed before A (0x41)
        let input = ScriptedInput::new().with_key(0x41).with_key(0x0D);
        assert_eq!(scan(&frame_for(&input)), Some(name_to_code("Enter").unwrap()));
    }

    #[test]
    fn test_axis_capture() {
        let input = ScriptedInput::new().with_axis(RawAxis::RightStickY, -1.0);
        assert_eq!(
            scan(&frame_for(&input)),
            Some(name_to_code("R-Stick Up").unwrap())
        );
    }

    #[test]
    fn test_gamepad_skipped_without_gamepad() {
        let input = ScriptedInput::new().with_button(0).without_gamepad();
        assert_eq!(scan(&frame_for(&input)), None);
    }

    #[test]
    fn test_unlisted_key_not_captured() {
        // 0x07 is not a bindable key
        let input = ScriptedInput::new().with_key(0x07);
        assert_eq!(scan(&frame_for(&input)), None);
    }

    #[test]
    fn test_wait_ignores_held_input() {
        let held = ScriptedInput::new().with_key(0x58);
        let mut pump = ScriptedPump::new(vec![
            held.clone(),
            held.clone(),
            held.clone().with_key(0x43),
        ]);

        // The first tick triggers X; start waiting from the second
        pump.next_frame();
        let code = wait_for_input(&mut pump);

        assert_eq!(code, name_to_code("C").unwrap());
        assert_eq!(pump.ticks, 3);
    }

    #[test]
    fn test_wait_spans_idle_ticks() {
        let mut pump = ScriptedPump::new(vec![
            ScriptedInput::new(),
            ScriptedInput::new(),
            ScriptedInput::new(),
            ScriptedInput::new().with_button(0x0B),
        ]);

        assert_eq!(
            wait_for_input(&mut pump),
            name_to_code("D-Pad Up").unwrap()
        );
        assert_eq!(pump.ticks, 4);
    }
}
