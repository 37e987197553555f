//! Obstacle spawning, motion and retirement
//!
//! Live obstacles sit in an id-keyed arena. Spawn and retire are the only
//! places the arena changes, and both happen inside [`ObstacleTracker::tick`],
//! before the session runs its collision pass.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{self, Color, Lane};
use super::rect::Rect;
use super::state::GameEvent;
use crate::tuning::SpawnTuning;
use crate::{Millis, lerp_over};

/// Stable per-spawn identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// A live obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lane: Lane,
    pub color: Color,
    /// Drawn rectangle at spawn
    pub rect: Rect,
    /// Collidable rectangle at spawn
    pub hitbox: Rect,
    pub spawned_at: Millis,
    pub traversal_ms: Millis,
    start_x: f32,
    end_x: f32,
    hitbox_dx: f32,
}

impl Obstacle {
    /// Left edge of the drawn rectangle at `now`
    pub fn x_at(&self, now: Millis) -> f32 {
        lerp_over(
            self.start_x,
            self.end_x,
            now.saturating_sub(self.spawned_at),
            self.traversal_ms,
        )
    }

    pub fn rect_at(&self, now: Millis) -> Rect {
        self.rect.with_x(self.x_at(now))
    }

    pub fn hitbox_at(&self, now: Millis) -> Rect {
        self.hitbox.with_x(self.x_at(now) + self.hitbox_dx)
    }

    /// Traversal finished; the single retirement trigger
    pub fn is_expired(&self, now: Millis) -> bool {
        now.saturating_sub(self.spawned_at) >= self.traversal_ms
    }
}

/// Owns the set of live obstacles
#[derive(Debug, Clone)]
pub struct ObstacleTracker {
    tuning: SpawnTuning,
    live: BTreeMap<ObstacleId, Obstacle>,
    next_id: u32,
    /// `None` while spawning is stopped
    next_spawn_at: Option<Millis>,
}

impl ObstacleTracker {
    pub fn new(tuning: SpawnTuning) -> Self {
        Self {
            tuning,
            live: BTreeMap::new(),
            next_id: 1,
            next_spawn_at: None,
        }
    }

    /// Start spawning; the first obstacle appears at `now`
    pub fn arm(&mut self, now: Millis) {
        self.next_spawn_at = Some(now);
    }

    /// Stop spawning. Obstacles already in flight keep moving.
    pub fn disarm(&mut self) {
        self.next_spawn_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_spawn_at.is_some()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.live.get(&id)
    }

    /// Live obstacles in spawn order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.live.values()
    }

    /// Retire expired obstacles, move the rest, then spawn if one is due
    pub fn tick(
        &mut self,
        now: Millis,
        playfield_width: f32,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        self.live.retain(|id, obstacle| {
            if obstacle.is_expired(now) {
                log::debug!("obstacle {} retired", id.0);
                events.push(GameEvent::ObstacleRemoved { id: *id });
                false
            } else {
                true
            }
        });

        for obstacle in self.live.values() {
            events.push(GameEvent::ObstacleMoved {
                id: obstacle.id,
                x: obstacle.x_at(now),
            });
        }

        if self.next_spawn_at.is_some_and(|due| now >= due) {
            let obstacle = self.spawn(now, playfield_width, rng);
            events.push(GameEvent::ObstacleSpawned {
                id: obstacle.id,
                rect: obstacle.rect,
                hitbox: obstacle.hitbox,
                lane: obstacle.lane,
                color: obstacle.color,
            });
            // Missed deadlines never burst-spawn; the next one counts from now
            self.next_spawn_at = Some(now + geometry::random_interval(rng, self.tuning.interval_ms));
        }
    }

    /// Drop every obstacle (session reset), reporting each removal once
    pub fn clear(&mut self, events: &mut Vec<GameEvent>) {
        for id in std::mem::take(&mut self.live).into_keys() {
            events.push(GameEvent::ObstacleRemoved { id });
        }
        self.next_spawn_at = None;
    }

    fn spawn(&mut self, now: Millis, playfield_width: f32, rng: &mut impl Rng) -> Obstacle {
        let shape = geometry::random_shape(rng, &self.tuning);
        let inset = &self.tuning.hitbox;

        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        let start_x = playfield_width;
        let rect = Rect::new(start_x, shape.elevation, shape.width, shape.height);
        let hitbox = Rect::new(
            start_x + inset.x_offset,
            shape.elevation,
            shape.width * inset.width_scale,
            shape.height - inset.height_trim,
        );

        let obstacle = Obstacle {
            id,
            lane: shape.lane,
            color: shape.color,
            rect,
            hitbox,
            spawned_at: now,
            traversal_ms: self.tuning.traversal_ms,
            start_x,
            end_x: -playfield_width,
            hitbox_dx: inset.x_offset,
        };
        log::debug!(
            "obstacle {} spawned: {:?} {:.0}x{:.0} at elevation {:.0}",
            id.0,
            shape.lane,
            shape.width,
            shape.height,
            shape.elevation
        );
        self.live.insert(id, obstacle.clone());
        obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    const WIDTH: f32 = 1000.0;

    fn removed(events: &[GameEvent]) -> Vec<ObstacleId> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ObstacleRemoved { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_spawns_immediately_when_armed() {
        let mut tracker = ObstacleTracker::new(SpawnTuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();

        tracker.tick(0, WIDTH, &mut rng, &mut events);
        assert!(tracker.is_empty());

        tracker.arm(100);
        tracker.tick(100, WIDTH, &mut rng, &mut events);
        assert_eq!(tracker.len(), 1);
        assert!(matches!(events.last(), Some(GameEvent::ObstacleSpawned { .. })));
    }

    #[test]
    fn test_obstacle_gone_after_traversal() {
        let mut tracker = ObstacleTracker::new(SpawnTuning::default());
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();

        tracker.arm(0);
        tracker.tick(0, WIDTH, &mut rng, &mut events);
        tracker.disarm();
        let id = tracker.iter().next().map(|o| o.id).unwrap();

        tracker.tick(3999, WIDTH, &mut rng, &mut events);
        assert!(tracker.get(id).is_some());

        tracker.tick(4000, WIDTH, &mut rng, &mut events);
        assert!(tracker.get(id).is_none());
        assert_eq!(removed(&events), vec![id]);
    }

    #[test]
    fn test_moves_leftward_across_playfield() {
        let mut tracker = ObstacleTracker::new(SpawnTuning::default());
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();
        tracker.arm(0);
        tracker.tick(0, WIDTH, &mut rng, &mut events);

        let obstacle = tracker.iter().next().unwrap();
        assert_eq!(obstacle.x_at(0), WIDTH);
        assert_eq!(obstacle.x_at(2000), 0.0);
        assert_eq!(obstacle.x_at(4000), -WIDTH);
        assert!(obstacle.x_at(1000) > obstacle.x_at(1001));
    }

    #[test]
    fn test_hitbox_follows_inset() {
        let tuning = SpawnTuning::default();
        let mut tracker = ObstacleTracker::new(tuning);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        tracker.arm(0);
        tracker.tick(0, WIDTH, &mut rng, &mut events);

        let obstacle = tracker.iter().next().unwrap();
        let rect = obstacle.rect_at(1000);
        let hitbox = obstacle.hitbox_at(1000);
        assert_eq!(hitbox.left(), rect.left() + tuning.hitbox.x_offset);
        assert_eq!(hitbox.size.x, rect.size.x * tuning.hitbox.width_scale);
        assert_eq!(hitbox.size.y, rect.size.y - tuning.hitbox.height_trim);
        assert_eq!(hitbox.bottom(), rect.bottom());
    }

    #[test]
    fn test_clear_reports_each_removal_once() {
        let mut tracker = ObstacleTracker::new(SpawnTuning::default());
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();
        tracker.arm(0);
        for now in (0..5000).step_by(16) {
            tracker.tick(now, WIDTH, &mut rng, &mut events);
        }
        let live: Vec<ObstacleId> = tracker.iter().map(|o| o.id).collect();
        assert!(!live.is_empty());

        events.clear();
        tracker.clear(&mut events);
        assert!(tracker.is_empty());
        assert!(!tracker.is_armed());
        assert_eq!(removed(&events), live);
    }

    #[test]
    fn test_late_tick_spawns_only_one() {
        let mut tracker = ObstacleTracker::new(SpawnTuning::default());
        let mut rng = Pcg32::seed_from_u64(6);
        let mut events = Vec::new();
        tracker.arm(0);
        tracker.tick(0, WIDTH, &mut rng, &mut events);
        // Long stall: earlier obstacle expired, exactly one new spawn
        tracker.tick(10_000, WIDTH, &mut rng, &mut events);
        assert_eq!(tracker.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_every_spawn_retired_exactly_once(
            seed in any::<u64>(),
            steps in proptest::collection::vec(1u64..120, 50..400),
        ) {
            let mut tracker = ObstacleTracker::new(SpawnTuning::default());
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut events = Vec::new();
            let mut now = 0;
            tracker.arm(now);
            for step in steps {
                now += step;
                tracker.tick(now, WIDTH, &mut rng, &mut events);
                // 4000ms traversal over an interval of at least 1800ms
                prop_assert!(tracker.len() <= 3);
            }
            tracker.disarm();
            tracker.tick(now + 4000, WIDTH, &mut rng, &mut events);
            prop_assert!(tracker.is_empty());

            let mut counts: HashMap<ObstacleId, (u32, u32)> = HashMap::new();
            for event in &events {
                match event {
                    GameEvent::ObstacleSpawned { id, .. } => counts.entry(*id).or_default().0 += 1,
                    GameEvent::ObstacleRemoved { id } => counts.entry(*id).or_default().1 += 1,
                    _ => {}
                }
            }
            for (spawned, retired) in counts.values() {
                prop_assert_eq!(*spawned, 1);
                prop_assert_eq!(*retired, 1);
            }
        }
    }
}
