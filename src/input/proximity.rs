use serde::{Deserialize, Serialize};

use crate::core::contracts::{ProtocolEvent, PRIMARY_BUTTON, PROXIMITY_BUTTON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityState {
    #[default]
    OutOfRange,
    InRange,
    /// Contact without a preceding hover; the enter marker was synthesized.
    FakeInRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityInput {
    HoverEnter,
    HoverExit,
    Down,
    /// Contact lifted or the gesture was cancelled.
    Release,
}

/// Tracks whether the pen is in range and brackets contacts with
/// synthetic enter/leave markers on hardware that cannot report hover.
///
/// One machine per surface: proximity is tracked for a single contact no
/// matter how many pointers a batch carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityMachine {
    state: ProximityState,
}

impl ProximityMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProximityState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ProximityState::OutOfRange;
    }

    /// Apply one input and append the resulting events to `out`, in wire order.
    pub fn handle(
        &mut self,
        input: ProximityInput,
        x: i16,
        y: i16,
        pressure: i16,
        out: &mut Vec<ProtocolEvent>,
    ) {
        match input {
            ProximityInput::HoverEnter => {
                self.state = ProximityState::InRange;
                out.push(ProtocolEvent::button(x, y, pressure, PROXIMITY_BUTTON, true));
            }
            ProximityInput::HoverExit => {
                self.state = ProximityState::OutOfRange;
                out.push(ProtocolEvent::button(x, y, pressure, PROXIMITY_BUTTON, false));
            }
            ProximityInput::Down => {
                if self.state == ProximityState::OutOfRange {
                    self.state = ProximityState::FakeInRange;
                    out.push(ProtocolEvent::button(x, y, 0, PROXIMITY_BUTTON, true));
                }
                out.push(ProtocolEvent::button(x, y, pressure, PRIMARY_BUTTON, true));
            }
            ProximityInput::Release => {
                out.push(ProtocolEvent::button(x, y, pressure, PRIMARY_BUTTON, false));
                if self.state == ProximityState::FakeInRange {
                    self.state = ProximityState::OutOfRange;
                    out.push(ProtocolEvent::button(x, y, 0, PROXIMITY_BUTTON, false));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transitions(events: &[ProtocolEvent]) -> Vec<(i32, bool)> {
        events
            .iter()
            .filter_map(|e| e.button_id().zip(e.pressed()))
            .collect()
    }

    #[test]
    fn hover_bracketed_contact_emits_no_synthetic_markers() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();

        machine.handle(ProximityInput::HoverEnter, 1, 1, 0, &mut out);
        assert_eq!(machine.state(), ProximityState::InRange);
        machine.handle(ProximityInput::Down, 1, 1, 100, &mut out);
        machine.handle(ProximityInput::Release, 1, 1, 50, &mut out);
        assert_eq!(machine.state(), ProximityState::InRange);
        machine.handle(ProximityInput::HoverExit, 1, 1, 0, &mut out);

        assert_eq!(
            transitions(&out),
            vec![(-1, true), (0, true), (0, false), (-1, false)]
        );
        assert_eq!(machine.state(), ProximityState::OutOfRange);
    }

    #[test]
    fn contact_without_hover_is_bracketed_with_zero_pressure_markers() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();

        machine.handle(ProximityInput::Down, 7, 8, 900, &mut out);
        assert_eq!(machine.state(), ProximityState::FakeInRange);
        machine.handle(ProximityInput::Release, 9, 10, 400, &mut out);
        assert_eq!(machine.state(), ProximityState::OutOfRange);

        assert_eq!(
            transitions(&out),
            vec![(-1, true), (0, true), (0, false), (-1, false)]
        );
        assert_eq!(out[0].pressure, 0);
        assert_eq!((out[0].x, out[0].y), (7, 8));
        assert_eq!(out[1].pressure, 900);
        assert_eq!(out[2].pressure, 400);
        assert_eq!(out[3].pressure, 0);
        assert_eq!((out[3].x, out[3].y), (9, 10));
    }

    #[test]
    fn second_down_while_fake_in_range_emits_only_contact() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();

        machine.handle(ProximityInput::Down, 0, 0, 10, &mut out);
        out.clear();
        machine.handle(ProximityInput::Down, 0, 0, 10, &mut out);

        assert_eq!(transitions(&out), vec![(0, true)]);
        assert_eq!(machine.state(), ProximityState::FakeInRange);
    }

    #[test]
    fn release_without_down_is_tolerated() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();

        machine.handle(ProximityInput::Release, 3, 4, 0, &mut out);

        assert_eq!(transitions(&out), vec![(0, false)]);
        assert_eq!(machine.state(), ProximityState::OutOfRange);
    }

    #[test]
    fn hover_exit_during_fake_session_resets_state() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();

        machine.handle(ProximityInput::Down, 0, 0, 10, &mut out);
        machine.handle(ProximityInput::HoverExit, 0, 0, 0, &mut out);
        assert_eq!(machine.state(), ProximityState::OutOfRange);

        out.clear();
        machine.handle(ProximityInput::Release, 0, 0, 0, &mut out);
        assert_eq!(transitions(&out), vec![(0, false)]);
    }

    #[test]
    fn reset_returns_to_out_of_range() {
        let mut machine = ProximityMachine::new();
        let mut out = Vec::new();
        machine.handle(ProximityInput::HoverEnter, 0, 0, 0, &mut out);

        machine.reset();

        assert_eq!(machine.state(), ProximityState::OutOfRange);
    }
}
