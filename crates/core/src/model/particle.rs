use vitae_protocol::{Point, Size};

use crate::config::ParticlesConfig;

/// One dot of the hero background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Pixels per frame.
    pub velocity: Point,
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn random(rng: &mut fastrand::Rng, surface: Size, config: &ParticlesConfig) -> Self {
        let mut between = |lo: f64, hi: f64| lo + rng.f64() * (hi - lo);
        Self {
            position: Point::new(
                between(0.0, surface.width),
                between(0.0, surface.height),
            ),
            velocity: Point::new(
                between(-config.max_speed, config.max_speed),
                between(-config.max_speed, config.max_speed),
            ),
            radius: between(config.min_radius, config.max_radius),
            opacity: between(config.min_opacity, config.max_opacity),
        }
    }

    /// Advance one frame and bounce off the surface edges.
    ///
    /// A particle on or past an edge always ends up heading back inside,
    /// so one left outside by a shrinking surface drifts home.
    pub fn step(&mut self, surface: Size) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        if self.position.x <= 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x >= surface.width {
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y <= 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y >= surface.height {
            self.velocity.y = -self.velocity.y.abs();
        }
    }

    /// Push away from `pointer` when closer than `radius`.
    pub fn repel(&mut self, pointer: Point, radius: f64, strength: f64) {
        let dx = pointer.x - self.position.x;
        let dy = pointer.y - self.position.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < radius {
            let force = (radius - distance) / radius;
            self.position.x -= dx * force * strength;
            self.position.y -= dy * force * strength;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            position: Point::new(x, y),
            velocity: Point::new(vx, vy),
            radius: 2.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn random_particles_respect_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);
        let config = ParticlesConfig::default();
        let surface = Size::new(400.0, 300.0);
        for _ in 0..200 {
            let p = Particle::random(&mut rng, surface, &config);
            assert!((0.0..=400.0).contains(&p.position.x));
            assert!((0.0..=300.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!((1.0..=3.0).contains(&p.radius));
            assert!((0.2..=0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn bounces_inward() {
        let mut p = particle(0.1, 50.0, -0.25, 0.0);
        p.step(Size::new(100.0, 100.0));
        assert!(p.velocity.x > 0.0);

        // Outside a surface that shrank: heads back in instead of flipping
        // back and forth.
        let mut stray = particle(150.0, 50.0, -0.2, 0.0);
        stray.step(Size::new(100.0, 100.0));
        assert!(stray.velocity.x < 0.0);
        stray.step(Size::new(100.0, 100.0));
        assert!(stray.velocity.x < 0.0);
    }

    #[test]
    fn repelled_by_nearby_pointer() {
        let mut p = particle(50.0, 50.0, 0.0, 0.0);
        p.repel(Point::new(60.0, 50.0), 100.0, 0.01);
        // dx = 10, force = 0.9, shift = 10 * 0.9 * 0.01
        assert!((p.position.x - (50.0 - 0.09)).abs() < 1e-9);
        assert_eq!(p.position.y, 50.0);

        let mut far = particle(0.0, 0.0, 0.0, 0.0);
        far.repel(Point::new(300.0, 0.0), 100.0, 0.01);
        assert_eq!(far.position, Point::new(0.0, 0.0));
    }
}
