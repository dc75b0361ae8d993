/// Keys the game listens to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Escape,
    F1,
    /// Right mouse button; held to steer the camera with the mouse.
    MouseLook,
}

/// A high-level action produced from input.
///
/// Movement actions are continuous (applied every frame while held); the rest
/// fire once per press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Quit,
    ToggleHud,
    Look,
}

impl Action {
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::MoveForward
                | Self::MoveBack
                | Self::MoveLeft
                | Self::MoveRight
                | Self::Jump
                | Self::Look
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_is_continuous() {
        assert!(Action::MoveForward.is_continuous());
        assert!(Action::Jump.is_continuous());
        assert!(Action::Look.is_continuous());
        assert!(!Action::Quit.is_continuous());
        assert!(!Action::ToggleHud.is_continuous());
    }
}
