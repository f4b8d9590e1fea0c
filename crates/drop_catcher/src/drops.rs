use core::fmt;
use core::time::Duration;

use bevy::math::{Rect, Vec2};
use bevy::time::{Timer, TimerMode};

use crate::collision::overlaps;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DropId(u64);

impl fmt::Display for DropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropState {
    Falling,
    Caught,
    Missed,
}

/// Periodic fall updates of one drop. Dropping the subscription cancels it.
#[derive(Debug)]
pub struct FallSubscription(Timer);

impl FallSubscription {
    fn new(period: Duration) -> Self {
        Self(Timer::new(period, TimerMode::Repeating))
    }

    fn until_due(&self) -> Duration {
        self.0.remaining()
    }

    /// Returns true when a fall update is due.
    fn tick(&mut self, delta: Duration) -> bool {
        self.0.tick(delta).just_finished()
    }
}

#[derive(Debug)]
pub struct FallingDrop {
    id: DropId,
    /// Top-left corner in play-area space
    position: Vec2,
    size: Vec2,
    /// Units per fall update, fixed by the profile active at spawn
    speed: f32,
    state: DropState,
    subscription: FallSubscription,
}

impl FallingDrop {
    pub const fn id(&self) -> DropId {
        self.id
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn speed(&self) -> f32 {
        self.speed
    }

    pub const fn state(&self) -> DropState {
        self.state
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }
}

/// The set of drops still falling. Drops leave the set the tick they are caught or missed.
#[derive(Debug, Default)]
pub struct DropField {
    drops: Vec<FallingDrop>,
    next_id: u64,
}

impl DropField {
    pub fn spawn(
        &mut self,
        position: Vec2,
        size: Vec2,
        speed: f32,
        fall_tick: Duration,
    ) -> DropId {
        let id = DropId(self.next_id);
        self.next_id += 1;

        self.drops.push(FallingDrop {
            id,
            position,
            size,
            speed,
            state: DropState::Falling,
            subscription: FallSubscription::new(fall_tick),
        });

        id
    }

    pub fn get(&self, id: DropId) -> Option<&FallingDrop> {
        self.drops.iter().find(|drop| drop.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingDrop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Removes every drop, cancelling their subscriptions. Returns how many were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.drops.len();
        self.drops.clear();
        discarded
    }

    /// Time until the earliest fall update among all drops.
    pub fn until_next_fall(&self) -> Option<Duration> {
        self.drops
            .iter()
            .map(|drop| drop.subscription.until_due())
            .min()
    }

    /// Advances every subscription and returns the drops due for a fall update, oldest first.
    pub fn tick_subscriptions(&mut self, delta: Duration) -> Vec<DropId> {
        self.drops
            .iter_mut()
            .filter_map(|drop| drop.subscription.tick(delta).then_some(drop.id))
            .collect()
    }

    /// Moves one drop down by its own speed, then resolves it against the catcher and the miss
    /// line.
    ///
    /// A catch wins over a miss when both apply on the same tick. Resolved drops are removed.
    /// Returns `None` when the drop is not in the field anymore.
    pub fn fall(&mut self, id: DropId, catcher: Rect, miss_line: f32) -> Option<DropState> {
        let index = self.drops.iter().position(|drop| drop.id == id)?;
        let drop = self.drops.get_mut(index)?;

        drop.position.y += drop.speed;
        drop.state = if overlaps(drop.bounds(), catcher) {
            DropState::Caught
        } else if drop.position.y > miss_line {
            DropState::Missed
        } else {
            DropState::Falling
        };

        let state = drop.state;
        if state != DropState::Falling {
            self.drops.remove(index);
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DROP_SIZE, FALL_TICK};

    const MISS_LINE: f32 = 620.0;

    fn catcher() -> Rect {
        Rect::from_corners(Vec2::new(100.0, 590.0), Vec2::new(180.0, 630.0))
    }

    #[test]
    fn fall_moves_by_speed() {
        let mut field = DropField::default();
        let id = field.spawn(Vec2::new(0.0, -30.0), DROP_SIZE, 5.0, FALL_TICK);

        assert_eq!(
            field.fall(id, catcher(), MISS_LINE),
            Some(DropState::Falling),
            "a drop far from the catcher keeps falling"
        );
        let drop = field.get(id).expect("drop is still falling");
        assert_eq!(drop.position().y, -25.0, "moved down by its speed");
        assert_eq!(drop.state(), DropState::Falling, "state is falling");
    }

    #[test]
    fn each_drop_keeps_its_spawn_speed() {
        let mut field = DropField::default();
        let slow = field.spawn(Vec2::new(0.0, -30.0), DROP_SIZE, 3.0, FALL_TICK);
        let fast = field.spawn(Vec2::new(40.0, -30.0), DROP_SIZE, 10.0, FALL_TICK);

        field.fall(slow, catcher(), MISS_LINE);
        field.fall(fast, catcher(), MISS_LINE);

        let y = |id| field.get(id).expect("drop is falling").position().y;
        assert_eq!(y(slow), -27.0, "slow drop moved 3 units");
        assert_eq!(y(fast), -20.0, "fast drop moved 10 units");
    }

    #[test]
    fn catch_wins_over_miss() {
        let mut field = DropField::default();
        let id = field.spawn(Vec2::new(120.0, 615.0), DROP_SIZE, 10.0, FALL_TICK);

        assert_eq!(
            field.fall(id, catcher(), MISS_LINE),
            Some(DropState::Caught),
            "past the miss line but inside the catcher counts as caught"
        );
        assert!(field.is_empty(), "caught drops leave the field");
    }

    #[test]
    fn drop_past_the_miss_line_is_missed() {
        let mut field = DropField::default();
        let id = field.spawn(Vec2::new(300.0, 618.0), DROP_SIZE, 5.0, FALL_TICK);

        assert_eq!(
            field.fall(id, catcher(), MISS_LINE),
            Some(DropState::Missed),
            "drop beside the catcher falls past the line"
        );
        assert!(field.get(id).is_none(), "missed drops leave the field");
    }

    #[test]
    fn removed_drop_is_a_no_op() {
        let mut field = DropField::default();
        let id = field.spawn(Vec2::new(120.0, 615.0), DROP_SIZE, 10.0, FALL_TICK);
        field.fall(id, catcher(), MISS_LINE);

        assert_eq!(
            field.fall(id, catcher(), MISS_LINE),
            None,
            "a stale fall update does nothing"
        );
    }

    #[test]
    fn subscriptions_fire_on_their_own_cadence() {
        let mut field = DropField::default();
        let first = field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);
        assert!(
            field
                .tick_subscriptions(Duration::from_millis(10))
                .is_empty(),
            "nothing due after 10ms"
        );

        let second = field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);
        assert_eq!(
            field.tick_subscriptions(Duration::from_millis(10)),
            vec![first],
            "only the older drop is due"
        );
        assert_eq!(
            field.until_next_fall(),
            Some(Duration::from_millis(10)),
            "the younger drop is due next"
        );
        assert_eq!(
            field.tick_subscriptions(Duration::from_millis(10)),
            vec![second],
            "the younger drop follows 10ms later"
        );
    }

    #[test]
    fn clear_discards_everything() {
        let mut field = DropField::default();
        field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);
        field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);

        assert_eq!(field.clear(), 2, "both drops discarded");
        assert_eq!(field.until_next_fall(), None, "no subscription left");
    }

    #[test]
    fn ids_are_never_reused() {
        let mut field = DropField::default();
        let first = field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);
        field.clear();
        let second = field.spawn(Vec2::ZERO, DROP_SIZE, 5.0, FALL_TICK);

        assert_ne!(first, second, "a cleared id is not handed out again");
    }
}
