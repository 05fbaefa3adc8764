// Tunables for the particle field.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    // Pairs closer than this are joined by a line.
    pub connection_distance: f64,
    pub pointer_radius: f64,
    // Scale applied to the linear pointer falloff before it moves a particle.
    pub pointer_strength: f64,
    // Initial velocity is uniform in `[-max_speed, max_speed]` on each axis.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub palette: [Color; 2],
    pub link_color: Color,
    pub link_width: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            connection_distance: 150.0,
            pointer_radius: 200.0,
            pointer_strength: 0.5,
            max_speed: 0.25,
            min_radius: 0.5,
            max_radius: 2.5,
            palette: [Color::VIOLET, Color::CYAN],
            link_color: Color::VIOLET,
            link_width: 0.5,
        }
    }
}
