//! Play-area space mirrors the page a bit is embedded in: origin at the top-left corner of the
//! window and y growing downward. Bevy's 2D world is centred on the window with y growing upward.

use bevy::math::{Rect, Vec2};

use crate::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Size of the play area, matching the bit window.
pub const PLAY_AREA: Vec2 = Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT);

/// Converts a play-area point into a world position.
pub fn play_area_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - PLAY_AREA.x / 2.0, PLAY_AREA.y / 2.0 - point.y)
}

/// Converts a world position into a play-area point.
pub fn world_to_play_area(point: Vec2) -> Vec2 {
    Vec2::new(point.x + PLAY_AREA.x / 2.0, PLAY_AREA.y / 2.0 - point.y)
}

/// World position of the centre of a play-area rect. Sprites are anchored on their centre.
pub fn rect_center_in_world(rect: Rect) -> Vec2 {
    play_area_to_world(rect.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_corner_maps_to_world_corner() {
        let world = play_area_to_world(Vec2::ZERO);
        assert_eq!(
            world,
            Vec2::new(-WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
            "play-area origin is the top-left corner of the window"
        );
    }

    #[test]
    fn conversions_are_inverse() {
        let point = Vec2::new(42.0, 600.0);
        assert_eq!(
            world_to_play_area(play_area_to_world(point)),
            point,
            "converting back and forth keeps the point"
        );
    }

    #[test]
    fn rect_center_lands_on_window_centre() {
        let rect = Rect::from_corners(Vec2::ZERO, PLAY_AREA);
        assert_eq!(
            rect_center_in_world(rect),
            Vec2::ZERO,
            "a rect covering the play area is centred on the world origin"
        );
    }
}
