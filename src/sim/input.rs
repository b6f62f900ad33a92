//! Input aggregation
//!
//! Physical sources (keyboard keys, touch surfaces) are folded into three
//! logical controls. Each control remembers *which* sources hold it, so a
//! release from one source never drops a hold another source still has.

/// Logical controls the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Flap,
}

/// Keyboard keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Touch targets: the play surface and the three on-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchTarget {
    Surface,
    LeftButton,
    RightButton,
    FlyButton,
}

/// A physical input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Key(Key),
    Touch(TouchTarget),
}

impl Source {
    /// Every source, in bit order
    pub const ALL: [Source; 8] = [
        Source::Key(Key::ArrowLeft),
        Source::Key(Key::ArrowRight),
        Source::Key(Key::ArrowUp),
        Source::Key(Key::Space),
        Source::Touch(TouchTarget::Surface),
        Source::Touch(TouchTarget::LeftButton),
        Source::Touch(TouchTarget::RightButton),
        Source::Touch(TouchTarget::FlyButton),
    ];

    /// The logical control this source drives
    pub fn control(self) -> Control {
        match self {
            Source::Key(Key::ArrowLeft) | Source::Touch(TouchTarget::LeftButton) => Control::Left,
            Source::Key(Key::ArrowRight) | Source::Touch(TouchTarget::RightButton) => {
                Control::Right
            }
            Source::Key(Key::ArrowUp | Key::Space)
            | Source::Touch(TouchTarget::Surface | TouchTarget::FlyButton) => Control::Flap,
        }
    }

    fn bit(self) -> u8 {
        let index = Source::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or_default();
        1 << index
    }
}

/// A raw input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key-down or touch-start
    Press(Source),
    /// Key-up or touch-end/cancel
    Release(Source),
    /// Drop every hold (window blur, restart)
    ReleaseAll,
}

impl InputEvent {
    /// Translate a touch start or end on one element. `remaining` is the
    /// number of touches still on that element after the event, so lifting
    /// one of two fingers keeps the hold.
    pub fn from_touch(target: TouchTarget, started: bool, remaining: u32) -> Option<Self> {
        let source = Source::Touch(target);
        match (started, remaining) {
            (true, _) => Some(InputEvent::Press(source)),
            (false, 0) => Some(InputEvent::Release(source)),
            (false, _) => None,
        }
    }
}

/// Controls held during one tick (polled, not consumed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub flap: bool,
}

/// Collects host events and exposes the held state once per frame
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    /// One bit per [`Source`] currently held
    held: u8,
    /// Events received since the last [`apply_pending`](Self::apply_pending)
    pending: Vec<InputEvent>,
    interacted: bool,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next frame.
    ///
    /// Returns `true` for the first press ever queued, so the caller can
    /// perform gesture-gated work (audio unlock) inside the event handler.
    /// Releases are not gestures and never count.
    pub fn queue(&mut self, event: InputEvent) -> bool {
        self.pending.push(event);
        matches!(event, InputEvent::Press(_)) && !std::mem::replace(&mut self.interacted, true)
    }

    /// Fold all queued events into the held state
    pub fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for event in pending {
            self.apply(event);
        }
    }

    /// Apply one event immediately
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(source) => self.held |= source.bit(),
            InputEvent::Release(source) => self.held &= !source.bit(),
            InputEvent::ReleaseAll => self.held = 0,
        }
    }

    /// Drop all holds and anything still queued
    pub fn release_all(&mut self) {
        self.pending.clear();
        self.held = 0;
    }

    pub fn is_held(&self, control: Control) -> bool {
        Source::ALL
            .iter()
            .any(|s| s.control() == control && self.held & s.bit() != 0)
    }

    /// Whether a press has ever been queued
    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(Control::Left),
            right: self.is_held(Control::Right),
            flap: self.is_held(Control::Flap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(s: Source) -> InputEvent {
        InputEvent::Press(s)
    }

    fn release(s: Source) -> InputEvent {
        InputEvent::Release(s)
    }

    const SPACE: Source = Source::Key(Key::Space);
    const FLY_BUTTON: Source = Source::Touch(TouchTarget::FlyButton);

    #[test]
    fn test_press_and_release() {
        let mut input = InputAggregator::new();
        input.apply(press(Source::Key(Key::ArrowRight)));
        assert_eq!(input.snapshot(), TickInput { right: true, ..Default::default() });

        input.apply(release(Source::Key(Key::ArrowRight)));
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_release_from_one_source_keeps_other_hold() {
        let mut input = InputAggregator::new();
        input.apply(press(SPACE));
        input.apply(press(FLY_BUTTON));
        input.apply(release(SPACE));
        assert!(input.is_held(Control::Flap));

        input.apply(release(FLY_BUTTON));
        assert!(!input.is_held(Control::Flap));
    }

    #[test]
    fn test_key_repeat_is_idempotent() {
        let mut input = InputAggregator::new();
        input.apply(press(SPACE));
        input.apply(press(SPACE));
        input.apply(press(SPACE));
        input.apply(release(SPACE));
        assert!(!input.is_held(Control::Flap));
    }

    #[test]
    fn test_up_arrow_and_surface_flap() {
        assert_eq!(Source::Key(Key::ArrowUp).control(), Control::Flap);
        assert_eq!(Source::Touch(TouchTarget::Surface).control(), Control::Flap);
        assert_eq!(Source::Touch(TouchTarget::LeftButton).control(), Control::Left);
    }

    #[test]
    fn test_queued_events_apply_on_frame() {
        let mut input = InputAggregator::new();
        assert!(input.queue(press(Source::Key(Key::ArrowLeft))));
        assert!(!input.queue(press(SPACE)));
        assert_eq!(input.snapshot(), TickInput::default());

        input.apply_pending();
        assert_eq!(
            input.snapshot(),
            TickInput { left: true, right: false, flap: true }
        );
        assert!(input.has_interacted());
    }

    #[test]
    fn test_releases_are_not_interaction() {
        let mut input = InputAggregator::new();
        assert!(!input.queue(InputEvent::ReleaseAll));
        assert!(!input.queue(release(SPACE)));
        assert!(!input.has_interacted());

        assert!(input.queue(press(SPACE)));
        assert!(input.has_interacted());
    }

    #[test]
    fn test_release_all() {
        let mut input = InputAggregator::new();
        input.apply(press(SPACE));
        input.apply(press(Source::Key(Key::ArrowLeft)));
        input.queue(press(Source::Key(Key::ArrowRight)));
        input.release_all();
        input.apply_pending();
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_second_finger_keeps_surface_hold() {
        let surface = TouchTarget::Surface;
        let mut input = InputAggregator::new();
        for (started, remaining) in [(true, 1), (true, 2), (false, 1)] {
            if let Some(event) = InputEvent::from_touch(surface, started, remaining) {
                input.apply(event);
            }
        }
        assert!(input.is_held(Control::Flap));

        let last = InputEvent::from_touch(surface, false, 0);
        assert_eq!(last, Some(InputEvent::Release(Source::Touch(surface))));
        input.apply(last.unwrap());
        assert!(!input.is_held(Control::Flap));
    }

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom(" "), Some(Key::Space));
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::ArrowUp));
        assert_eq!(Key::from_dom("a"), None);
    }
}
