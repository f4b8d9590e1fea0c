pub mod controls;
pub mod inputs;

use bevy::math::{Rect, Vec2};

use crate::core::config::CATCHER_FLOOR_GAP;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Player controlled catcher sliding along the bottom of the play area.
#[derive(Clone, Debug, PartialEq)]
pub struct Catcher {
    /// Left edge in play-area space, always within `[0, max_x]`
    x: f32,
    size: Vec2,
    play_area: Vec2,
}

impl Catcher {
    /// Creates a catcher centred at the bottom of the play area.
    pub fn new(size: Vec2, play_area: Vec2) -> Self {
        let mut catcher = Self {
            x: 0.0,
            size,
            play_area,
        };
        catcher.set_x((play_area.x - size.x) / 2.0);
        catcher
    }

    pub const fn x(&self) -> f32 {
        self.x
    }

    pub fn max_x(&self) -> f32 {
        (self.play_area.x - self.size.x).max(0.0)
    }

    pub fn bounds(&self) -> Rect {
        let top = self.play_area.y - CATCHER_FLOOR_GAP - self.size.y;
        let min = Vec2::new(self.x, top);
        Rect::from_corners(min, min + self.size)
    }

    /// Moves by a fixed distance, stopping at the play-area edges.
    pub fn step(&mut self, direction: Direction, distance: f32) {
        let offset = match direction {
            Direction::Left => -distance,
            Direction::Right => distance,
        };
        self.set_x(self.x + offset);
    }

    /// Centres the catcher on a pointer, stopping at the play-area edges.
    pub fn follow_pointer(&mut self, pointer_x: f32) {
        self.set_x(pointer_x - self.size.x / 2.0);
    }

    fn set_x(&mut self, x: f32) {
        self.x = x.clamp(0.0, self.max_x());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CATCHER_SIZE, KEYBOARD_STEP};

    const PLAY_AREA: Vec2 = Vec2::new(360.0, 640.0);

    #[test]
    fn starts_centred_at_the_bottom() {
        let catcher = Catcher::new(CATCHER_SIZE, PLAY_AREA);
        let bounds = catcher.bounds();

        assert_eq!(catcher.x(), 140.0, "centred horizontally");
        assert_eq!(bounds.max.y, 630.0, "bottom edge sits above the floor gap");
        assert_eq!(bounds.min.y, 590.0, "top edge is one catcher height higher");
    }

    #[test]
    fn keyboard_steps_are_clamped() {
        let mut catcher = Catcher::new(CATCHER_SIZE, PLAY_AREA);

        catcher.step(Direction::Left, KEYBOARD_STEP);
        assert_eq!(catcher.x(), 110.0, "one step to the left");

        for _ in 0..10 {
            catcher.step(Direction::Left, KEYBOARD_STEP);
        }
        assert_eq!(catcher.x(), 0.0, "stops at the left edge");

        for _ in 0..20 {
            catcher.step(Direction::Right, KEYBOARD_STEP);
        }
        assert_eq!(catcher.x(), 280.0, "stops at the right edge");
    }

    #[test]
    fn pointer_centres_the_catcher() {
        let mut catcher = Catcher::new(CATCHER_SIZE, PLAY_AREA);

        catcher.follow_pointer(200.0);
        assert_eq!(catcher.x(), 160.0, "centre follows the pointer");

        catcher.follow_pointer(5.0);
        assert_eq!(catcher.x(), 0.0, "clamped at the left edge");

        catcher.follow_pointer(1000.0);
        assert_eq!(catcher.x(), 280.0, "clamped at the right edge");
    }

    #[test]
    fn oversized_catcher_stays_at_origin() {
        let mut catcher = Catcher::new(Vec2::new(400.0, 40.0), PLAY_AREA);
        catcher.step(Direction::Right, KEYBOARD_STEP);

        assert_eq!(catcher.x(), 0.0, "no room to move");
    }
}
