//! Gear-train step conversion
//!
//! Both joints are driven through the same compound gear train. `A` is the
//! product of the large wheel tooth counts, `B` the product of the pinions, so
//! one joint turn takes `steps_per_motor_revolution * A / B` motor steps.
//!
//! The "angle fraction" operations work in half-turns (1.0 = π radians), the
//! unit the gear formulas are expressed in. [`AngleStepConverter::steps_to_angle`]
//! and [`AngleStepConverter::angle_to_steps`] wrap them with an explicit
//! [`Angle`].

use plotarm_core::{Angle, KinematicsError, Result};
use serde::{Deserialize, Serialize};

/// Default large-wheel train tooth counts
pub const DEFAULT_A_TRAIN: [u32; 4] = [32, 22, 26, 31];

/// Default pinion train tooth counts
pub const DEFAULT_B_TRAIN: [u32; 4] = [9, 11, 9, 10];

/// Default motor steps per motor shaft revolution
pub const DEFAULT_STEPS_PER_MOTOR_REVOLUTION: u64 = 64;

/// Relative distance from a whole step below which a value counts as that step
const SNAP_TOLERANCE: f64 = 1e-9;

/// Gear train parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearRatio {
    /// Product of the large wheel tooth counts
    pub a_gear_teeth: u64,
    /// Product of the pinion tooth counts
    pub b_gear_teeth: u64,
    /// Motor steps per motor shaft revolution
    pub steps_per_motor_revolution: u64,
}

impl GearRatio {
    /// Create a gear ratio from tooth products
    pub fn new(
        a_gear_teeth: u64,
        b_gear_teeth: u64,
        steps_per_motor_revolution: u64,
    ) -> Result<Self> {
        if a_gear_teeth == 0 || b_gear_teeth == 0 || steps_per_motor_revolution == 0 {
            return Err(KinematicsError::InvalidGeometry {
                reason: format!(
                    "gear teeth and steps per revolution must be non-zero (A={}, B={}, steps={})",
                    a_gear_teeth, b_gear_teeth, steps_per_motor_revolution
                ),
            }
            .into());
        }
        if steps_per_motor_revolution.checked_mul(a_gear_teeth).is_none()
            || b_gear_teeth.checked_mul(2).is_none()
        {
            return Err(KinematicsError::InvalidGeometry {
                reason: format!(
                    "gear ratio too large (A={}, B={}, steps={})",
                    a_gear_teeth, b_gear_teeth, steps_per_motor_revolution
                ),
            }
            .into());
        }
        Ok(Self {
            a_gear_teeth,
            b_gear_teeth,
            steps_per_motor_revolution,
        })
    }

    /// Create a gear ratio from the individual tooth counts of both trains
    pub fn from_trains(
        a_train: &[u32],
        b_train: &[u32],
        steps_per_motor_revolution: u64,
    ) -> Result<Self> {
        let a = train_product(a_train, "A")?;
        let b = train_product(b_train, "B")?;
        Self::new(a, b, steps_per_motor_revolution)
    }

    /// Motor steps for one full joint turn
    pub fn steps_per_turn(&self) -> f64 {
        self.steps_per_motor_revolution as f64 * self.a_gear_teeth as f64
            / self.b_gear_teeth as f64
    }
}

impl Default for GearRatio {
    fn default() -> Self {
        Self {
            a_gear_teeth: DEFAULT_A_TRAIN.iter().map(|&t| t as u64).product(),
            b_gear_teeth: DEFAULT_B_TRAIN.iter().map(|&t| t as u64).product(),
            steps_per_motor_revolution: DEFAULT_STEPS_PER_MOTOR_REVOLUTION,
        }
    }
}

fn train_product(train: &[u32], name: &str) -> Result<u64> {
    if train.is_empty() {
        return Err(KinematicsError::InvalidGeometry {
            reason: format!("gear train {} has no gears", name),
        }
        .into());
    }
    train
        .iter()
        .try_fold(1u64, |acc, &teeth| acc.checked_mul(teeth as u64))
        .ok_or_else(|| {
            KinematicsError::InvalidGeometry {
                reason: format!("gear train {} tooth product overflows", name),
            }
            .into()
        })
}

/// Truncate toward zero, snapping values within floating-point noise of a
/// whole step onto that step
fn truncate_steps(raw: f64) -> i64 {
    let nearest = raw.round();
    if (raw - nearest).abs() <= SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest as i64
    } else {
        raw.trunc() as i64
    }
}

/// Stateless converter between motor steps and joint angle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleStepConverter {
    ratio: GearRatio,
}

impl AngleStepConverter {
    /// Create a converter for a gear ratio
    pub fn new(ratio: GearRatio) -> Self {
        Self { ratio }
    }

    /// The gear ratio in use
    pub fn ratio(&self) -> GearRatio {
        self.ratio
    }

    /// Motor steps for one full joint turn
    pub fn steps_per_turn(&self) -> f64 {
        self.ratio.steps_per_turn()
    }

    /// Joint angle in half-turns for a step count
    pub fn steps_to_angle_fraction(&self, steps: i64) -> f64 {
        let r = &self.ratio;
        steps as f64 * 2.0 * r.b_gear_teeth as f64
            / (r.steps_per_motor_revolution as f64 * r.a_gear_teeth as f64)
    }

    /// Step count for a joint angle in half-turns, truncated toward zero
    pub fn angle_fraction_to_steps(&self, fraction: f64) -> i64 {
        let r = &self.ratio;
        truncate_steps(
            fraction * r.steps_per_motor_revolution as f64 * r.a_gear_teeth as f64
                / (2.0 * r.b_gear_teeth as f64),
        )
    }

    /// Degrees for a joint angle in half-turns
    pub fn to_degrees(&self, fraction: f64) -> f64 {
        fraction * 180.0
    }

    /// Joint angle for a step count
    pub fn steps_to_angle(&self, steps: i64) -> Angle {
        Angle::from_half_turns(self.steps_to_angle_fraction(steps))
    }

    /// Step count for a joint angle, truncated toward zero
    pub fn angle_to_steps(&self, angle: Angle) -> i64 {
        self.angle_fraction_to_steps(angle.half_turns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratio() {
        let ratio = GearRatio::default();
        assert_eq!(ratio.a_gear_teeth, 32 * 22 * 26 * 31);
        assert_eq!(ratio.b_gear_teeth, 9 * 11 * 9 * 10);
        assert_eq!(ratio.steps_per_motor_revolution, 64);
        assert!((ratio.steps_per_turn() - 4075.772_839_506_172_7).abs() < 1e-6);
    }

    #[test]
    fn test_from_trains() {
        let ratio = GearRatio::from_trains(&[32, 22, 26, 31], &[9, 11, 9, 10], 64).unwrap();
        assert_eq!(ratio, GearRatio::default());

        assert!(GearRatio::from_trains(&[], &[9], 64).is_err());
        assert!(GearRatio::from_trains(&[10, 0], &[9], 64).is_err());
        assert!(GearRatio::from_trains(&[u32::MAX, u32::MAX, u32::MAX], &[9], 64).is_err());
        assert!(GearRatio::new(1, 1, 0).is_err());
    }

    #[test]
    fn test_rejects_ratio_beyond_step_range() {
        let err = GearRatio::from_trains(&[u32::MAX, u32::MAX], &[9, 11, 9, 10], 64).unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(GearRatio::new(1, u64::MAX, 1).is_err());
        assert!(GearRatio::new(u64::MAX / 64, 1, 64).is_ok());
    }

    #[test]
    fn test_huge_ratio_does_not_panic() {
        // Fields are public, so a ratio can skip validation
        let ratio = GearRatio {
            a_gear_teeth: u64::MAX,
            b_gear_teeth: u64::MAX,
            steps_per_motor_revolution: u64::MAX,
        };
        let converter = AngleStepConverter::new(ratio);
        assert!(converter.steps_per_turn().is_finite());
        assert!(converter.steps_to_angle_fraction(1000).is_finite());
        assert!(converter.angle_fraction_to_steps(0.5) > 0);
    }

    #[test]
    fn test_half_turn_conversion() {
        let converter = AngleStepConverter::default();
        // Half a joint turn: 64 * 567424 / 17820 = 2037.886 steps
        assert_eq!(converter.angle_fraction_to_steps(1.0), 2037);
        assert_eq!(converter.angle_fraction_to_steps(0.5), 1018);
        assert_eq!(converter.angle_fraction_to_steps(0.0), 0);
    }

    #[test]
    fn test_truncates_toward_zero() {
        let converter = AngleStepConverter::default();
        assert_eq!(converter.angle_fraction_to_steps(-1.0), -2037);
        assert_eq!(converter.angle_fraction_to_steps(-0.5), -1018);
    }

    #[test]
    fn test_simple_ratio_is_exact() {
        let converter = AngleStepConverter::new(GearRatio::new(2, 1, 100).unwrap());
        assert_eq!(converter.steps_per_turn(), 200.0);
        assert_eq!(converter.steps_to_angle_fraction(100), 1.0);
        assert_eq!(converter.to_degrees(converter.steps_to_angle_fraction(50)), 90.0);
        assert_eq!(converter.steps_to_angle(200).degrees(), 360.0);
        assert_eq!(converter.angle_to_steps(Angle::from_degrees(45.0)), 25);
        assert_eq!(converter.angle_to_steps(Angle::from_degrees(44.0)), 24);
    }

    #[test]
    fn test_snap_only_within_noise() {
        assert_eq!(truncate_steps(4.999_999_999_999_9), 5);
        assert_eq!(truncate_steps(4.999), 4);
        assert_eq!(truncate_steps(-4.999), -4);
        assert_eq!(truncate_steps(-5.000_000_000_000_1), -5);
    }
}
