//! Random obstacle geometry
//!
//! Stateless draws from the session's shared RNG. Callers must pass a
//! validated [`SpawnTuning`]; empty spans panic inside `rand`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Millis;
use crate::tuning::{Span, SpawnTuning};

/// Which band an obstacle occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    Ground,
    Floating,
}

/// Obstacle fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Everything random about one obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleShape {
    pub width: f32,
    pub height: f32,
    pub lane: Lane,
    /// Height of the obstacle's bottom edge above the ground
    pub elevation: f32,
    pub color: Color,
}

#[inline]
fn draw(rng: &mut impl Rng, span: Span<f32>) -> f32 {
    rng.random_range(span.min..span.max)
}

pub fn random_width(rng: &mut impl Rng, tuning: &SpawnTuning) -> f32 {
    draw(rng, tuning.width)
}

pub fn random_height(rng: &mut impl Rng, tuning: &SpawnTuning) -> f32 {
    draw(rng, tuning.height)
}

/// Weighted lane pick: `floating_weight` in `lane_weight_total`
pub fn random_lane(rng: &mut impl Rng, tuning: &SpawnTuning) -> Lane {
    if rng.random_range(0..tuning.lane_weight_total) < tuning.floating_weight {
        Lane::Floating
    } else {
        Lane::Ground
    }
}

/// Upper bound on the elevation of a floating obstacle `height` tall.
/// Taller obstacles get more headroom, up to `float_offset.max`.
pub fn float_ceiling(tuning: &SpawnTuning, height: f32) -> f32 {
    let band = tuning.float_offset;
    (band.min + height * tuning.float_reach).min(band.max)
}

/// Elevation for a floating obstacle, drawn from
/// `[float_offset.min, float_ceiling(height))`
pub fn random_float_offset(rng: &mut impl Rng, tuning: &SpawnTuning, height: f32) -> f32 {
    let span = Span::new(tuning.float_offset.min, float_ceiling(tuning, height));
    draw(rng, span)
}

pub fn random_color(rng: &mut impl Rng) -> Color {
    Color {
        r: rng.random(),
        g: rng.random(),
        b: rng.random(),
    }
}

/// Delay until the next spawn
pub fn random_interval(rng: &mut impl Rng, span: Span<Millis>) -> Millis {
    rng.random_range(span.min..span.max)
}

/// Draw a complete obstacle shape
pub fn random_shape(rng: &mut impl Rng, tuning: &SpawnTuning) -> ObstacleShape {
    let height = random_height(rng, tuning);
    let width = random_width(rng, tuning);
    let lane = random_lane(rng, tuning);
    // Drawn for every spawn so the RNG stream does not depend on the lane
    let offset = random_float_offset(rng, tuning, height);
    let elevation = match lane {
        Lane::Ground => 0.0,
        Lane::Floating => offset,
    };
    ObstacleShape {
        width,
        height,
        lane,
        elevation,
        color: random_color(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FLOAT_OFFSET_MAX, FLOAT_OFFSET_MIN, LANE_WEIGHT_TOTAL, OBSTACLE_HEIGHT_MAX};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_shapes_stay_in_bands() {
        let tuning = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let shape = random_shape(&mut rng, &tuning);
            assert!(shape.width >= tuning.width.min && shape.width < tuning.width.max);
            assert!(shape.height >= tuning.height.min && shape.height < tuning.height.max);
            match shape.lane {
                Lane::Ground => assert_eq!(shape.elevation, 0.0),
                Lane::Floating => {
                    assert!(shape.elevation >= tuning.float_offset.min);
                    assert!(shape.elevation < float_ceiling(&tuning, shape.height));
                    assert!(shape.elevation <= tuning.float_offset.max);
                }
            }
        }
    }

    #[test]
    fn test_taller_obstacles_float_higher() {
        let floating = SpawnTuning {
            floating_weight: LANE_WEIGHT_TOTAL,
            ..SpawnTuning::default()
        };
        let short = SpawnTuning {
            height: Span::new(100.0, 101.0),
            ..floating
        };
        let tall = SpawnTuning {
            height: Span::new(290.0, 300.0),
            ..floating
        };
        let highest = |tuning: &SpawnTuning| {
            let mut rng = Pcg32::seed_from_u64(99);
            (0..1000)
                .map(|_| random_shape(&mut rng, tuning))
                .inspect(|shape| assert_eq!(shape.lane, Lane::Floating))
                .map(|shape| shape.elevation)
                .fold(0.0f32, f32::max)
        };

        let short_max = highest(&short);
        let tall_max = highest(&tall);
        // 180 + 101 * 1.2 and 180 + 290 * 1.2
        assert!(short_max < 302.0, "short {short_max}");
        assert!(tall_max > 480.0, "tall {tall_max}");
        assert!(tall_max < FLOAT_OFFSET_MAX);
    }

    #[test]
    fn test_float_ceiling_caps_at_band_max() {
        let tuning = SpawnTuning::default();
        assert_eq!(float_ceiling(&tuning, 0.0), FLOAT_OFFSET_MIN);
        assert_eq!(float_ceiling(&tuning, OBSTACLE_HEIGHT_MAX), FLOAT_OFFSET_MAX);
        assert_eq!(float_ceiling(&tuning, 1000.0), FLOAT_OFFSET_MAX);
    }

    #[test]
    fn test_floating_ratio_roughly_matches_weights() {
        let tuning = SpawnTuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let draws = 15_000;
        let floating = (0..draws)
            .filter(|_| random_lane(&mut rng, &tuning) == Lane::Floating)
            .count();
        // 3 in 15 = 20%
        let ratio = floating as f64 / draws as f64;
        assert!((0.17..0.23).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn test_zero_floating_weight_is_all_ground() {
        let tuning = SpawnTuning {
            floating_weight: 0,
            ..SpawnTuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        assert!((0..500).all(|_| random_lane(&mut rng, &tuning) == Lane::Ground));
    }

    #[test]
    fn test_intervals_not_periodic() {
        let span = SpawnTuning::default().interval_ms;
        let mut rng = Pcg32::seed_from_u64(3);
        let draws: Vec<Millis> = (0..50).map(|_| random_interval(&mut rng, span)).collect();
        assert!(draws.iter().all(|d| *d >= span.min && *d < span.max));
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }
}
