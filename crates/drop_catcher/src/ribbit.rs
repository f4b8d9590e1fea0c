use core::time::Duration;

use bevy::log::{debug, info};
use bevy::prelude::{EventReader, World};
use bits_helpers::{RibbitMessageHandler, send_bit_message};
use ribbit_bits::{BitDuration, BitMessage, BitResult};

use crate::core::RoundEnded;
use crate::session::Session;

#[derive(Default, Clone, Copy)]
pub struct DropCatcher;

impl RibbitMessageHandler for DropCatcher {
    fn restart(world: &mut World) {
        info!("Restarting DropCatcher");
        world.resource_mut::<Session>().reset();
    }

    fn end(world: &mut World) -> BitResult {
        info!("Ending DropCatcher");

        let mut session = world.resource_mut::<Session>();
        if let Err(err) = session.end() {
            debug!("Nothing to end: {err}");
        }

        BitResult::HighestScore(session.score().into())
    }

    fn duration(world: &mut World) -> BitDuration {
        let seconds = world.resource::<Session>().profile().round_duration_secs();
        BitDuration::new(Duration::from_secs(seconds.into()))
    }

    fn start(world: &mut World) {
        if let Err(err) = world.resource_mut::<Session>().start() {
            debug!("Ribbit start ignored: {err}");
        }
    }
}

/// Rounds that run out of time report their score to Ribbit on their own.
/// Rounds ended by Ribbit already answered its End message.
pub fn report_round_end(mut round_ended: EventReader<RoundEnded>) {
    for ended in round_ended.read().filter(|ended| ended.timed_out) {
        send_bit_message(BitMessage::End(BitResult::HighestScore(
            ended.final_score.into(),
        )));
    }
}
