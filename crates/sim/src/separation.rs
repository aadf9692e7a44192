use crate::math::{Aabb, Vec2};

/// Pairs whose centers are at least this far apart skip the overlap test.
pub const SEPARATION_PREFILTER_DISTANCE: f32 = 64.0;

/// Each of the two actors in a player-vs-enemy pair absorbs half of the
/// minimum overlap.
pub const PLAYER_ENEMY_SEPARATION_SHARE: f32 = 0.5;

/// Enemy crowds resolve softer: a quarter of the overlap per enemy, so
/// packed groups give visibly instead of popping apart.
pub const ENEMY_ENEMY_SEPARATION_SHARE: f32 = 0.25;

pub fn within_prefilter_distance(a: Vec2, b: Vec2) -> bool {
    a.distance_sq_to(b) < SEPARATION_PREFILTER_DISTANCE * SEPARATION_PREFILTER_DISTANCE
}

/// Displacements that push two overlapping boxes apart along the single
/// axis of least penetration. Each actor moves `share × overlap` in
/// opposite directions; velocities are untouched and no iteration is
/// performed, so heavy crowding may leave a small residual overlap.
///
/// The caller is responsible for having confirmed the boxes intersect.
pub fn separation_deltas(a: Aabb, b: Aabb, share: f32) -> (Vec2, Vec2) {
    let overlap_left = a.right - b.left;
    let overlap_right = b.right - a.left;
    let overlap_top = a.bottom - b.top;
    let overlap_bottom = b.bottom - a.top;

    let min_overlap = overlap_left
        .min(overlap_right)
        .min(overlap_top)
        .min(overlap_bottom);
    let amount = min_overlap * share;

    if min_overlap == overlap_left {
        (Vec2::new(-amount, 0.0), Vec2::new(amount, 0.0))
    } else if min_overlap == overlap_right {
        (Vec2::new(amount, 0.0), Vec2::new(-amount, 0.0))
    } else if min_overlap == overlap_top {
        (Vec2::new(0.0, -amount), Vec2::new(0.0, amount))
    } else {
        (Vec2::new(0.0, amount), Vec2::new(0.0, -amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_at(x: f32, y: f32) -> Aabb {
        Aabb {
            left: x - 8.0,
            right: x + 8.0,
            top: y - 8.0,
            bottom: y + 8.0,
        }
    }

    fn shifted(rect: Aabb, delta: Vec2) -> Aabb {
        Aabb {
            left: rect.left + delta.x,
            right: rect.right + delta.x,
            top: rect.top + delta.y,
            bottom: rect.bottom + delta.y,
        }
    }

    #[test]
    fn half_share_removes_the_overlap_in_one_pass() {
        // b sits 12 to the right of a: horizontal overlap of 4.
        let a = box_at(0.0, 0.0);
        let b = box_at(12.0, 0.0);
        let (da, db) = separation_deltas(a, b, PLAYER_ENEMY_SEPARATION_SHARE);
        assert_eq!(da, Vec2::new(-2.0, 0.0));
        assert_eq!(db, Vec2::new(2.0, 0.0));

        let a_after = shifted(a, da);
        let b_after = shifted(b, db);
        assert!(a_after.right <= b_after.left);
    }

    #[test]
    fn quarter_share_moves_each_enemy_a_quarter_of_the_overlap() {
        let a = box_at(0.0, 0.0);
        let b = box_at(12.0, 0.0);
        let (da, db) = separation_deltas(a, b, ENEMY_ENEMY_SEPARATION_SHARE);
        assert_eq!(da, Vec2::new(-1.0, 0.0));
        assert_eq!(db, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn separation_picks_the_axis_of_least_penetration() {
        // Deep horizontal overlap, shallow vertical overlap: resolve on y.
        let a = box_at(0.0, 0.0);
        let b = box_at(2.0, 13.0);
        let (da, db) = separation_deltas(a, b, PLAYER_ENEMY_SEPARATION_SHARE);
        assert_eq!(da.x, 0.0);
        assert_eq!(db.x, 0.0);
        assert!(da.y < 0.0);
        assert!(db.y > 0.0);

        let a_after = shifted(a, da);
        let b_after = shifted(b, db);
        assert!(a_after.bottom <= b_after.top);
    }

    #[test]
    fn separation_direction_flips_when_b_is_on_the_other_side() {
        let a = box_at(12.0, 0.0);
        let b = box_at(0.0, 0.0);
        let (da, db) = separation_deltas(a, b, PLAYER_ENEMY_SEPARATION_SHARE);
        assert!(da.x > 0.0);
        assert!(db.x < 0.0);
    }

    #[test]
    fn no_over_correction_beyond_adjacency() {
        let a = box_at(0.0, 0.0);
        let b = box_at(15.0, 0.0);
        let (da, db) = separation_deltas(a, b, PLAYER_ENEMY_SEPARATION_SHARE);
        let a_after = shifted(a, da);
        let b_after = shifted(b, db);
        // Exactly adjacent, not pushed past each other.
        assert!((b_after.left - a_after.right).abs() < 1e-5);
    }

    #[test]
    fn prefilter_accepts_near_and_rejects_far_pairs() {
        assert!(within_prefilter_distance(
            Vec2::ZERO,
            Vec2::new(30.0, 30.0)
        ));
        assert!(!within_prefilter_distance(
            Vec2::ZERO,
            Vec2::new(64.0, 0.0)
        ));
    }
}
