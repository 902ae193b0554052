//! Sinusoidal waves and damped rotation.

use crate::error::PhysicsError;
use crate::float::Float;

/// A travelling sine wave: `sin(phase + 2πx / period) * amplitude`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wave<F: Float> {
    pub amplitude: F,
    period: F,
    pub phase: F,
    /// Phase advance per [`update`](Wave::update).
    pub phase_velocity: F,
}

impl<F: Float> Wave<F> {
    pub fn new(amplitude: F, period: F, phase: F, phase_velocity: F) -> Result<Self, PhysicsError> {
        if period.is_near_zero(F::from_f32(1e-10)) || !period.is_finite() {
            return Err(PhysicsError::InvalidPeriod);
        }
        Ok(Wave { amplitude, period, phase, phase_velocity })
    }

    pub fn period(&self) -> F { self.period }

    pub fn evaluate(&self, x: F) -> F {
        let two_pi = F::two() * F::pi();
        (self.phase + two_pi * x / self.period).sin() * self.amplitude
    }

    pub fn update(&mut self) {
        self.phase = self.phase + self.phase_velocity;
    }
}

/// Sum of several waves at `x`, the way overlapping waves are drawn.
pub fn superpose<F: Float>(waves: &[Wave<F>], x: F) -> F {
    waves.iter().fold(F::zero(), |sum, w| sum + w.evaluate(x))
}

/// Rotation driven by angular forces, with a spin cap and per-step damping.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularMotion<F: Float> {
    pub angle: F,
    pub angular_velocity: F,
    pub angular_acceleration: F,
    pub max_angular_velocity: F,
    /// Multiplier applied to the angular velocity every update. Default: 0.99.
    pub damping: F,
}

impl<F: Float> AngularMotion<F> {
    pub fn new(angle: F) -> Self {
        AngularMotion {
            angle,
            angular_velocity: F::zero(),
            angular_acceleration: F::zero(),
            max_angular_velocity: F::from_f32(0.1),
            damping: F::from_f32(0.99),
        }
    }

    pub fn with_max_angular_velocity(mut self, max: F) -> Self {
        self.max_angular_velocity = max;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn apply_torque(&mut self, torque: F) {
        self.angular_acceleration = self.angular_acceleration + torque;
    }

    /// The cap applies in both directions.
    pub fn update(&mut self) {
        let max = self.max_angular_velocity;
        let omega = (self.angular_velocity + self.angular_acceleration).clamp(-max, max);
        self.angular_velocity = omega * self.damping;
        self.angle = self.angle + self.angular_velocity;
        self.angular_acceleration = F::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_quarter_period_peaks() {
        let wave = Wave::new(100.0f64, 400.0, 0.0, 0.0).unwrap();
        assert!((wave.evaluate(100.0) - 100.0).abs() < 1e-9);
        assert!(wave.evaluate(0.0).abs() < 1e-9);
    }

    #[test]
    fn phase_drifts() {
        let mut wave = Wave::new(1.0f32, 10.0, 0.0, 0.25).unwrap();
        wave.update();
        wave.update();
        assert!((wave.phase - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_period_rejected() {
        assert_eq!(Wave::new(1.0f32, 0.0, 0.0, 0.0), Err(PhysicsError::InvalidPeriod));
    }

    #[test]
    fn spin_is_capped() {
        let mut baton = AngularMotion::new(0.0f32).with_damping(1.0);
        baton.apply_torque(5.0);
        baton.update();
        assert!((baton.angular_velocity - 0.1).abs() < 1e-6);
        baton.apply_torque(-5.0);
        baton.update();
        assert!((baton.angular_velocity + 0.1).abs() < 1e-6);
    }

    #[test]
    fn superposition_adds() {
        let a = Wave::new(1.0f64, 4.0, 0.0, 0.0).unwrap();
        let b = Wave::new(2.0f64, 4.0, 0.0, 0.0).unwrap();
        assert!((superpose(&[a, b], 1.0) - 3.0).abs() < 1e-9);
    }
}
