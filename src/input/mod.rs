pub mod buttons;
pub mod joystick;
pub mod keys;
pub mod pointer;
pub mod quantizer;

pub use buttons::ActionButton;
pub use joystick::{Joystick, JoystickCallbacks, JoystickChange};
pub use keys::{Command, ExtraKey, Keyboard, Repeat};
pub use pointer::{InputMode, Steering};
