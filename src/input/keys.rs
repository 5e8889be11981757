use std::collections::HashSet;

/// Outbound commands bound to keys or buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Split,
    Eject,
    MinionSwitch,
    Extra(ExtraKey),
}

/// Server-defined extra actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtraKey {
    E,
    R,
    T,
    P,
}

pub fn command_for(code: &str) -> Option<Command> {
    Some(match code {
        "Space" => Command::Split,
        "KeyW" => Command::Eject,
        "KeyQ" => Command::MinionSwitch,
        "KeyE" => Command::Extra(ExtraKey::E),
        "KeyR" => Command::Extra(ExtraKey::R),
        "KeyT" => Command::Extra(ExtraKey::T),
        "KeyP" => Command::Extra(ExtraKey::P),
        _ => return None,
    })
}

/// What the caller should do with the eject repeat timer after a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Start,
    Stop,
    Keep,
}

/// Held keys; `W` ejects once on press and keeps ejecting while held.
#[derive(Debug, Default)]
pub struct Keyboard {
    pressed: HashSet<String>,
    repeating: bool,
}

impl Keyboard {
    /// Returns the command to send now and what to do with the repeat timer.
    pub fn key_down(&mut self, code: &str) -> (Option<Command>, Repeat) {
        self.pressed.insert(code.to_string());
        match command_for(code) {
            Some(Command::Eject) => {
                if self.repeating {
                    // auto-repeat keydown; the timer already covers it
                    (None, Repeat::Keep)
                } else {
                    self.repeating = true;
                    (Some(Command::Eject), Repeat::Start)
                }
            }
            other => (other, Repeat::Keep),
        }
    }

    pub fn key_up(&mut self, code: &str) -> Repeat {
        self.pressed.remove(code);
        if code == "KeyW" && self.repeating {
            self.repeating = false;
            return Repeat::Stop;
        }
        Repeat::Keep
    }

    /// Called by the repeat timer; false means the timer should stop.
    pub fn repeat_tick(&mut self) -> bool {
        if self.is_pressed("KeyW") {
            true
        } else {
            self.repeating = false;
            false
        }
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings() {
        assert_eq!(command_for("Space"), Some(Command::Split));
        assert_eq!(command_for("KeyP"), Some(Command::Extra(ExtraKey::P)));
        assert_eq!(command_for("KeyZ"), None);
    }

    #[test]
    fn eject_repeats_while_held() {
        let mut k = Keyboard::default();
        assert_eq!(k.key_down("KeyW"), (Some(Command::Eject), Repeat::Start));
        assert_eq!(k.key_down("KeyW"), (None, Repeat::Keep));
        assert!(k.repeat_tick());
        assert_eq!(k.key_up("KeyW"), Repeat::Stop);
        assert!(!k.repeat_tick());
        assert_eq!(k.key_down("KeyW"), (Some(Command::Eject), Repeat::Start));
    }

    #[test]
    fn other_keys_do_not_touch_repeat() {
        let mut k = Keyboard::default();
        assert_eq!(k.key_down("Space"), (Some(Command::Split), Repeat::Keep));
        assert_eq!(k.key_up("Space"), Repeat::Keep);
        assert!(!k.is_pressed("Space"));
    }
}
