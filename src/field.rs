// Particle field, a fixed-size set of particles drifting across the viewport,
// pushed by the pointer and joined by fading lines when close.
// Knows nothing about the browser: the host feeds it resize and pointer events
// and calls `tick` once per display refresh.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::{self, PointerState};
use crate::surface::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    // Inclusive on both edges.
    pub fn contains(&self, pos: [f64; 2]) -> bool {
        pos[0] >= 0.0
            && pos[0] <= self.width as f64
            && pos[1] >= 0.0
            && pos[1] <= self.height as f64
    }
}

// Everything a particle reads while advancing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimContext {
    pub viewport: Viewport,
    pub pointer: PointerState,
}

// A line to draw between two particles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub alpha: f64,
}

// Opacity of a connection at `distance`, fading from 1 at zero to nothing at
// `threshold`.
pub fn link_alpha(distance: f64, threshold: f64) -> Option<f64> {
    if distance < threshold {
        Some(1.0 - distance / threshold)
    } else {
        None
    }
}

pub struct ParticleField {
    config: FieldConfig,
    ctx: SimContext,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: FieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        let mut field = ParticleField {
            config,
            ctx: SimContext {
                viewport,
                pointer: PointerState::new(config.pointer_radius, config.pointer_strength),
            },
            particles: Vec::with_capacity(config.particle_count),
        };
        field.reseed(viewport, rng);
        field
    }

    // Throws away every particle and scatters a fresh set over `viewport`.
    pub fn reseed<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.ctx.viewport = viewport;
        let config = self.config;
        self.particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut *rng, viewport, &config))
            .collect();
        log::debug!(
            "reseeded {} particles over {}x{}",
            self.particles.len(),
            viewport.width,
            viewport.height
        );
    }

    pub fn on_resize<R: Rng + ?Sized>(&mut self, width: u32, height: u32, rng: &mut R) {
        self.reseed(Viewport::new(width, height), rng);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.ctx.pointer.move_to(x, y);
    }

    pub fn advance(&mut self) {
        let ctx = self.ctx;
        for particle in &mut self.particles {
            particle.advance(&ctx);
        }
    }

    // Every unordered pair closer than the connection distance, each once.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        let particles = &self.particles;
        particles.iter().enumerate().flat_map(move |(i, a)| {
            particles[i + 1..].iter().filter_map(move |b| {
                link_alpha(pointer::distance(a.pos, b.pos), threshold).map(|alpha| Connection {
                    from: a.pos,
                    to: b.pos,
                    alpha,
                })
            })
        })
    }

    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let viewport = self.ctx.viewport;
        surface.clear(viewport.width as f64, viewport.height as f64)?;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color)?;
        }
        for link in self.connections() {
            surface.stroke_line(
                link.from,
                link.to,
                self.config.link_color,
                link.alpha,
                self.config.link_width,
            )?;
        }
        Ok(())
    }

    // One frame: move everything, then draw it.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.advance();
        self.render(surface)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // Slice, not Vec, so the count can only change through reseed
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(width: u32, height: u32) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(42);
        ParticleField::new(FieldConfig::default(), Viewport::new(width, height), &mut rng)
    }

    fn place(field: &mut ParticleField, positions: &[[f64; 2]]) {
        for (p, pos) in field.particles_mut().iter_mut().zip(positions) {
            p.pos = *pos;
            p.vel = [0.0, 0.0];
        }
    }

    #[test]
    fn reseed_fills_viewport() {
        let f = field(800, 600);
        assert_eq!(f.particles().len(), 80);
        assert!(f.particles().iter().all(|p| f.context().viewport.contains(p.pos)));
    }

    #[test]
    fn count_is_stable_across_ticks() {
        let mut f = field(800, 600);
        let mut surface = RecordingSurface::default();
        for _ in 0..50 {
            f.tick(&mut surface).unwrap();
            assert_eq!(f.particles().len(), 80);
        }
    }

    #[test]
    fn resize_replaces_particles() {
        let mut f = field(800, 600);
        let before = f.particles().to_vec();
        let mut rng = StdRng::seed_from_u64(3);
        f.on_resize(200, 100, &mut rng);
        assert_eq!(f.context().viewport, Viewport::new(200, 100));
        assert_eq!(f.particles().len(), 80);
        assert_ne!(f.particles(), &before[..]);
        assert!(f.particles().iter().all(|p| p.pos[0] <= 200.0 && p.pos[1] <= 100.0));
    }

    #[test]
    fn resize_keeps_pointer() {
        let mut f = field(800, 600);
        f.on_pointer_move(5.0, 6.0);
        f.on_resize(300, 300, &mut StdRng::seed_from_u64(1));
        assert_eq!(f.context().pointer.pos, Some([5.0, 6.0]));
    }

    #[test]
    fn alpha_fades_linearly() {
        assert_eq!(link_alpha(75.0, 150.0), Some(0.5));
        assert_eq!(link_alpha(0.0, 150.0), Some(1.0));
        assert_eq!(link_alpha(150.0, 150.0), None);
        assert_eq!(link_alpha(151.0, 150.0), None);
    }

    #[test]
    fn each_pair_linked_once() {
        let config = FieldConfig {
            particle_count: 3,
            ..FieldConfig::default()
        };
        let mut f = ParticleField::new(config, Viewport::new(800, 600), &mut StdRng::seed_from_u64(9));
        place(&mut f, &[[0.0, 0.0], [75.0, 0.0], [700.0, 500.0]]);

        let links: Vec<Connection> = f.connections().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, [0.0, 0.0]);
        assert_eq!(links[0].to, [75.0, 0.0]);
        assert_eq!(links[0].alpha, 0.5);
    }

    #[test]
    fn render_draws_circles_then_lines() {
        let config = FieldConfig {
            particle_count: 2,
            ..FieldConfig::default()
        };
        let mut f = ParticleField::new(config, Viewport::new(400, 300), &mut StdRng::seed_from_u64(5));
        place(&mut f, &[[10.0, 10.0], [10.0, 85.0]]);

        let mut surface = RecordingSurface::default();
        f.render(&mut surface).unwrap();

        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 400.0,
                height: 300.0
            }
        );
        assert_eq!(surface.circles().count(), 2);
        match surface.commands.last() {
            Some(DrawCommand::Line {
                color,
                alpha,
                width,
                ..
            }) => {
                assert_eq!(*color, Color::VIOLET);
                assert_eq!(*alpha, 0.5);
                assert_eq!(*width, 0.5);
            }
            other => panic!("expected a line last, got {:?}", other),
        }
    }

    #[test]
    fn tick_advances_before_drawing() {
        let config = FieldConfig {
            particle_count: 1,
            ..FieldConfig::default()
        };
        let mut f = ParticleField::new(config, Viewport::new(400, 300), &mut StdRng::seed_from_u64(5));
        f.particles_mut()[0].pos = [50.0, 50.0];
        f.particles_mut()[0].vel = [1.0, 0.0];

        let mut surface = RecordingSurface::default();
        f.tick(&mut surface).unwrap();
        let first = surface.circles().next().cloned();
        match first {
            Some(DrawCommand::Circle { center, .. }) => assert_eq!(center, [51.0, 50.0]),
            other => panic!("expected a circle, got {:?}", other),
        }
    }

    #[test]
    fn inactive_pointer_leaves_positions_alone() {
        let mut f = field(800, 600);
        let expected: Vec<[f64; 2]> = f
            .particles()
            .iter()
            .map(|p| [p.pos[0] + p.vel[0], p.pos[1] + p.vel[1]])
            .collect();
        f.advance();
        for (p, pos) in f.particles().iter().zip(expected) {
            assert_eq!(p.pos, pos);
        }
    }
}
