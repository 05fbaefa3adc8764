// Simple particle struct to keep track of individual position, velocity, size and color

use crate::color::Color;
use crate::config::FieldConfig;
use crate::field::{SimContext, Viewport};
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        radius: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * viewport.width as f64;
        let pos_y = rng.gen::<f64>() * viewport.height as f64;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let radius = rng.gen::<f64>() * (config.max_radius - config.min_radius) + config.min_radius;
        let color = if rng.gen_bool(0.5) {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, color)
    }

    // One tick of motion. Reflection flips velocity but never pulls the particle
    // back inside, so it can sit past the edge for a frame.
    pub fn advance(&mut self, ctx: &SimContext) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];

        let width = ctx.viewport.width as f64;
        let height = ctx.viewport.height as f64;
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }

        // Offset only, the velocity is left alone
        if let Some(pull) = ctx.pointer.pull_at(self.pos) {
            self.pos[0] -= pull[0];
            self.pos[1] -= pull[1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx(width: u32, height: u32) -> SimContext {
        SimContext {
            viewport: Viewport { width, height },
            pointer: PointerState::default(),
        }
    }

    #[test]
    fn integrates_velocity() {
        let mut p = Particle::new(10.0, 10.0, 0.2, -0.1, 1.0, Color::CYAN);
        p.advance(&ctx(800, 600));
        assert!((p.pos[0] - 10.2).abs() < 1e-12);
        assert!((p.pos[1] - 9.9).abs() < 1e-12);
        assert_eq!(p.vel, [0.2, -0.1]);
    }

    #[test]
    fn reflects_without_clamping() {
        let mut p = Particle::new(801.0, 300.0, 0.4, 0.0, 1.0, Color::CYAN);
        p.advance(&ctx(800, 600));
        assert_eq!(p.vel[0], -0.4);
        // Still outside after the flip
        assert!((p.pos[0] - 801.4).abs() < 1e-12);

        p.advance(&ctx(800, 600));
        assert_eq!(p.vel[0], 0.4);
    }

    #[test]
    fn reflects_axes_independently() {
        let mut p = Particle::new(5.0, -0.05, 0.1, -0.1, 1.0, Color::VIOLET);
        p.advance(&ctx(800, 600));
        assert_eq!(p.vel, [0.1, 0.1]);
    }

    #[test]
    fn edge_itself_is_inside() {
        let mut p = Particle::new(799.75, 599.75, 0.25, 0.25, 1.0, Color::VIOLET);
        p.advance(&ctx(800, 600));
        assert_eq!(p.vel, [0.25, 0.25]);
    }

    #[test]
    fn pointer_on_top_applies_only_integration() {
        let mut c = ctx(800, 600);
        c.pointer.move_to(100.0, 100.0);
        let mut p = Particle::new(100.0, 100.0, 0.0, 0.0, 1.0, Color::CYAN);
        p.advance(&c);
        assert_eq!(p.pos, [100.0, 100.0]);
    }

    #[test]
    fn pointer_displaces_away() {
        let mut c = ctx(800, 600);
        c.pointer.move_to(100.0, 100.0);
        let mut p = Particle::new(200.0, 100.0, 0.0, 0.0, 1.0, Color::CYAN);
        p.advance(&c);
        assert!((p.pos[0] - 200.25).abs() < 1e-12);
        assert_eq!(p.pos[1], 100.0);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn random_stays_in_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FieldConfig::default();
        let viewport = Viewport {
            width: 320,
            height: 240,
        };
        for _ in 0..500 {
            let p = Particle::random(&mut rng, viewport, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.radius >= 0.5 && p.radius <= 2.5);
            assert!(config.palette.contains(&p.color));
        }
    }
}
