use wgpufun_engine::input::KeyState;

/// Messages from the render thread to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Left(KeyState),
    Right(KeyState),
    Reset,
}

/// Steering keys as last reported to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub left: KeyState,
    pub right: KeyState,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            left: KeyState::Released,
            right: KeyState::Released,
        }
    }
}

impl Controls {
    pub fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Left(state) => self.left = state,
            GameEvent::Right(state) => self.right = state,
            GameEvent::Reset => {}
        }
    }
}

/// Turns per-frame "is held" samples into edge events, so the simulation
/// only hears about changes.
#[derive(Debug, Default)]
pub struct ControlTracker {
    sent: Controls,
}

impl ControlTracker {
    pub fn update(&mut self, left_down: bool, right_down: bool) -> Vec<GameEvent> {
        let next = Controls {
            left: held(left_down),
            right: held(right_down),
        };

        let mut events = Vec::new();
        if next.left != self.sent.left {
            events.push(GameEvent::Left(next.left));
        }
        if next.right != self.sent.right {
            events.push(GameEvent::Right(next.right));
        }

        self.sent = next;
        events
    }
}

fn held(down: bool) -> KeyState {
    if down { KeyState::Pressed } else { KeyState::Released }
}
