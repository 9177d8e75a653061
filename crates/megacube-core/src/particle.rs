use glam::Vec3;

/// A point mass advanced under constant acceleration.
///
/// Brightness and lifetime are plain scalars owned by the client effect;
/// `advance` never touches them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Palette hue tag.
    pub hue: u8,
    /// 1.0 = full brightness, 0.0 = spent.
    pub brightness: f32,
    /// Lifetime in seconds.
    pub seconds: f32,
}

impl Particle {
    pub fn new(position: Vec3, velocity: Vec3, hue: u8, brightness: f32, seconds: f32) -> Self {
        Self {
            position,
            velocity,
            hue,
            brightness,
            seconds,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity.
    pub fn advance(&mut self, dt: f32, acceleration: Vec3) {
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Whether the client has faded this particle out completely.
    pub fn is_spent(&self) -> bool {
        self.brightness <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semi_implicit_step() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0, 1.0, 1.0);
        p.advance(0.5, Vec3::new(0.0, -2.0, 0.0));
        assert_eq!(p.velocity, Vec3::new(1.0, -1.0, 0.0));
        // Position uses the updated velocity.
        assert_eq!(p.position, Vec3::new(0.5, -0.5, 0.0));
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let start = Particle::new(Vec3::ONE, Vec3::X, 3, 0.5, 2.0);
        let mut p = start;
        p.advance(0.0, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(p, start);
    }

    #[test]
    fn test_leaves_brightness_and_lifetime() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::ZERO, 9, 0.25, 1.5);
        for _ in 0..10 {
            p.advance(0.1, Vec3::Y);
        }
        assert_eq!(p.brightness, 0.25);
        assert_eq!(p.seconds, 1.5);
        assert_eq!(p.hue, 9);
    }

    #[test]
    fn test_huge_dt_does_not_panic() {
        let mut p = Particle::new(Vec3::ZERO, Vec3::ONE, 0, 1.0, 1.0);
        p.advance(f32::MAX, Vec3::new(0.0, -1.0, 0.0));
        assert!(!p.position.is_finite() || p.position.length() > 1e6);
    }

    #[test]
    fn test_spent() {
        let mut p = Particle::default();
        assert!(p.is_spent());
        p.brightness = 0.1;
        assert!(!p.is_spent());
    }
}
