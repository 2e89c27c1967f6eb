//! Input handling
//!
//! Window callbacks push intents into an [`InputQueue`]; the game drains it
//! once at the start of every tick.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    ZoomIn,
    ZoomOut,
}

/// Something the player did since the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputIntent {
    Key { key: Key, pressed: bool },
    MouseMove { dx: f32, dy: f32 },
    Scroll { dy: f32 },
    /// Start a new round (only honored once a round is over)
    Restart,
}

/// Held direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Forward => self.forward = pressed,
            Key::Backward => self.backward = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
            Key::ZoomIn => self.zoom_in = pressed,
            Key::ZoomOut => self.zoom_out = pressed,
        }
    }

    /// Forward/backward axis: +1, -1 or 0
    pub fn forward_axis(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Strafe axis: +1 right, -1 left
    pub fn strafe_axis(&self) -> f32 {
        axis(self.right, self.left)
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Mouse motion and scroll accumulated over one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDelta {
    pub dx: f32,
    pub dy: f32,
    pub scroll: f32,
    /// Whether any motion event arrived
    pub moved: bool,
}

/// Pending intents, drained once per tick
#[derive(Debug, Default, Clone)]
pub struct InputQueue {
    intents: Vec<InputIntent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: InputIntent) {
        self.intents.push(intent);
    }

    pub fn press(&mut self, key: Key) {
        self.push(InputIntent::Key { key, pressed: true });
    }

    pub fn release(&mut self, key: Key) {
        self.push(InputIntent::Key { key, pressed: false });
    }

    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.push(InputIntent::MouseMove { dx, dy });
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Fold pending intents into `keys`; each mouse delta is clamped to
    /// `max_mouse_delta` per axis before it is summed. Returns the pointer
    /// motion and whether a restart was requested.
    pub fn drain_into(&mut self, keys: &mut KeyState, max_mouse_delta: f32) -> (PointerDelta, bool) {
        let mut pointer = PointerDelta::default();
        let mut restart = false;

        for intent in self.intents.drain(..) {
            match intent {
                InputIntent::Key { key, pressed } => keys.set(key, pressed),
                InputIntent::MouseMove { dx, dy } => {
                    pointer.dx += dx.clamp(-max_mouse_delta, max_mouse_delta);
                    pointer.dy += dy.clamp(-max_mouse_delta, max_mouse_delta);
                    pointer.moved = true;
                }
                InputIntent::Scroll { dy } => pointer.scroll += dy,
                InputIntent::Restart => restart = true,
            }
        }

        (pointer, restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_track_press_and_release() {
        let mut queue = InputQueue::new();
        let mut keys = KeyState::default();
        queue.press(Key::Forward);
        queue.press(Key::Left);
        queue.release(Key::Left);
        queue.drain_into(&mut keys, 50.0);
        assert!(queue.is_empty());
        assert_eq!(keys.forward_axis(), 1.0);
        assert_eq!(keys.strafe_axis(), 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut keys = KeyState::default();
        keys.set(Key::Forward, true);
        keys.set(Key::Backward, true);
        assert_eq!(keys.forward_axis(), 0.0);
    }

    #[test]
    fn mouse_deltas_are_clamped_per_event() {
        let mut queue = InputQueue::new();
        queue.mouse_move(500.0, -3.0);
        queue.mouse_move(10.0, -80.0);
        queue.push(InputIntent::Scroll { dy: 1.5 });
        queue.push(InputIntent::Restart);
        let (pointer, restart) = queue.drain_into(&mut KeyState::default(), 50.0);
        assert_eq!(pointer.dx, 60.0);
        assert_eq!(pointer.dy, -53.0);
        assert_eq!(pointer.scroll, 1.5);
        assert!(pointer.moved);
        assert!(restart);
    }
}
