//! Collision detection between the player and obstacle hitboxes
//!
//! Hitboxes are plain rectangles, so grazing an obstacle's corner would feel
//! unfair. Leniency forgives contact that only clips an edge.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{HORIZONTAL_LENIENCY, VERTICAL_LENIENCY};

/// How leniency is applied to an intersecting pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionModel {
    /// Hit only if the overlap is deeper than the leniency on both axes
    #[default]
    Strict,
    /// Hit if the rectangles intersect and any opposing pair of edges lies
    /// within the leniency of each other. Looser; kept for old tunings.
    LegacyEdgeProximity,
}

/// Per-axis forgiveness margin (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leniency {
    pub horizontal: f32,
    pub vertical: f32,
    pub model: CollisionModel,
}

impl Default for Leniency {
    fn default() -> Self {
        Self {
            horizontal: HORIZONTAL_LENIENCY,
            vertical: VERTICAL_LENIENCY,
            model: CollisionModel::Strict,
        }
    }
}

impl Leniency {
    /// No forgiveness: plain AABB test
    pub fn exact() -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            model: CollisionModel::Strict,
        }
    }
}

/// Decide whether two hitboxes collide. Symmetric in `a` and `b`.
pub fn intersects(a: &Rect, b: &Rect, leniency: &Leniency) -> bool {
    if !a.intersects(b) {
        return false;
    }

    match leniency.model {
        CollisionModel::Strict => {
            let overlap = a.overlap(b);
            overlap.x > leniency.horizontal && overlap.y > leniency.vertical
        }
        CollisionModel::LegacyEdgeProximity => {
            let vertical = (a.bottom() - b.top()).abs() < leniency.vertical
                || (b.bottom() - a.top()).abs() < leniency.vertical;
            let horizontal = (a.right() - b.left()).abs() < leniency.horizontal
                || (b.right() - a.left()).abs() < leniency.horizontal;
            vertical || horizontal
        }
    }
}

/// Run-ending check; debug mode never reports a hit
#[inline]
pub fn player_hit(player: &Rect, obstacle: &Rect, leniency: &Leniency, debug_mode: bool) -> bool {
    !debug_mode && intersects(player, obstacle, leniency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lenient(h: f32, v: f32) -> Leniency {
        Leniency {
            horizontal: h,
            vertical: v,
            model: CollisionModel::Strict,
        }
    }

    #[test]
    fn test_exact_matches_aabb() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(99.0, 99.0, 50.0, 50.0);
        assert!(intersects(&a, &b, &Leniency::exact()));
        assert!(!intersects(&a, &b.with_x(100.0), &Leniency::exact()));
    }

    #[test]
    fn test_grazing_contact_forgiven() {
        let player = Rect::new(0.0, 0.0, 180.0, 180.0);
        // Clips the player's right edge by 20px
        let obstacle = Rect::new(160.0, 0.0, 60.0, 200.0);
        assert!(player.intersects(&obstacle));
        assert!(!intersects(&player, &obstacle, &lenient(30.0, 30.0)));
        assert!(intersects(&player, &obstacle, &lenient(10.0, 30.0)));
    }

    #[test]
    fn test_vertical_leniency_forgives_clearing_the_top() {
        let player = Rect::new(0.0, 190.0, 180.0, 180.0);
        let obstacle = Rect::new(50.0, 0.0, 60.0, 200.0);
        assert!(!intersects(&player, &obstacle, &lenient(0.0, 15.0)));
        assert!(intersects(&player, &obstacle, &lenient(0.0, 5.0)));
    }

    #[test]
    fn test_legacy_model_needs_true_intersection() {
        let legacy = Leniency {
            horizontal: 60.0,
            vertical: 60.0,
            model: CollisionModel::LegacyEdgeProximity,
        };
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Near but apart: never a hit
        assert!(!intersects(&a, &Rect::new(110.0, 0.0, 50.0, 50.0), &legacy));
        // Shallow clip: edges close, counts in legacy mode
        assert!(intersects(&a, &Rect::new(90.0, 0.0, 50.0, 50.0), &legacy));
    }

    #[test]
    fn test_legacy_is_looser_than_strict() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(90.0, 0.0, 50.0, 50.0);
        let strict = lenient(60.0, 60.0);
        let legacy = Leniency {
            model: CollisionModel::LegacyEdgeProximity,
            ..strict
        };
        assert!(!intersects(&a, &b, &strict));
        assert!(intersects(&a, &b, &legacy));
    }

    #[test]
    fn test_debug_mode_bypasses_hits() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(player_hit(&a, &a, &Leniency::exact(), false));
        assert!(!player_hit(&a, &a, &Leniency::exact(), true));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..300.0, 0.0f32..300.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    fn model_strategy() -> impl Strategy<Value = CollisionModel> {
        prop_oneof![
            Just(CollisionModel::Strict),
            Just(CollisionModel::LegacyEdgeProximity)
        ]
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            a in rect_strategy(),
            b in rect_strategy(),
            h in 0.0f32..100.0,
            v in 0.0f32..100.0,
            model in model_strategy(),
        ) {
            let leniency = Leniency { horizontal: h, vertical: v, model };
            prop_assert_eq!(intersects(&a, &b, &leniency), intersects(&b, &a, &leniency));
        }

        #[test]
        fn prop_debug_never_hits(
            a in rect_strategy(),
            b in rect_strategy(),
            model in model_strategy(),
        ) {
            let leniency = Leniency { horizontal: 0.0, vertical: 0.0, model };
            prop_assert!(!player_hit(&a, &b, &leniency, true));
        }

        #[test]
        fn prop_hit_implies_geometric_overlap(
            a in rect_strategy(),
            b in rect_strategy(),
            h in 0.0f32..100.0,
            v in 0.0f32..100.0,
            model in model_strategy(),
        ) {
            let leniency = Leniency { horizontal: h, vertical: v, model };
            if intersects(&a, &b, &leniency) {
                prop_assert!(a.intersects(&b));
            }
        }
    }
}
