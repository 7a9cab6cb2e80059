//! Playback infrastructure adapters

mod command;
mod noop;
mod rodio;

pub use command::CommandChimePlayer;
pub use noop::NoopChimePlayer;
pub use rodio::RodioChimePlayer;

use crate::application::ports::ChimePlayer;

/// Pick a player adapter from the `player` config value: "rodio" for
/// in-process playback, "none" to stay silent, anything else is taken as a
/// path to an external player binary (e.g. /usr/bin/afplay).
pub fn create_player(player: &str) -> Box<dyn ChimePlayer> {
    match player {
        "rodio" => Box::new(RodioChimePlayer::new()),
        "none" => Box::new(NoopChimePlayer::new()),
        binary => Box::new(CommandChimePlayer::new(binary)),
    }
}
