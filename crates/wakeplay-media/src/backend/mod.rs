//! Command-line platform backends for media control.

mod opener;
mod playerctl;
mod pulse;
mod xdotool;

pub use opener::SystemOpener;
pub use playerctl::PlayerCtl;
pub use pulse::{PulseAudio, DEFAULT_SOUND_FILE};
pub use xdotool::XdoTool;
