use bevy::math::Rect;

/// Axis-aligned overlap test between a drop and the catcher, in play-area space (y down).
///
/// Rects that only share an edge are apart: a drop has to reach into the catcher by some amount
/// to count as caught.
pub fn overlaps(drop: Rect, catcher: Rect) -> bool {
    let apart = drop.max.y <= catcher.min.y
        || drop.min.y >= catcher.max.y
        || drop.max.x <= catcher.min.x
        || drop.min.x >= catcher.max.x;

    !apart
}
