// Pointer state, keeps track of the last known pointer position and the radius
// inside which particles get pushed around

extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    pub pos: Option<[f64; 2]>,
    pub radius: f64,
    pub strength: f64,
}

impl PointerState {
    pub const RADIUS: f64 = 200.0;
    pub const STRENGTH: f64 = 0.5;

    pub fn new(radius: f64, strength: f64) -> Self {
        PointerState {
            pos: None,
            radius,
            strength,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = Some([x, y]);
    }

    pub fn is_active(&self) -> bool {
        self.pos.is_some()
    }

    // Vector pointing from `pos` towards the pointer, scaled by the linear falloff
    // (1 at the pointer, 0 at the radius) and by `strength`.
    // None when inactive, out of reach, or sitting exactly on the pointer.
    pub fn pull_at(&self, pos: [f64; 2]) -> Option<[f64; 2]> {
        let pointer = self.pos?;
        let to_pointer = glm::vec2(pointer[0] - pos[0], pointer[1] - pos[1]);
        let dist = glm::length(&to_pointer);
        if dist == 0.0 || dist >= self.radius {
            return None;
        }
        let force = (self.radius - dist) / self.radius;
        let pull = to_pointer / dist * (force * self.strength);
        Some([pull.x, pull.y])
    }
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState::new(PointerState::RADIUS, PointerState::STRENGTH)
    }
}

pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    glm::distance(&glm::vec2(a[0], a[1]), &glm::vec2(b[0], b[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_moved() {
        let mut pointer = PointerState::default();
        assert!(!pointer.is_active());
        assert_eq!(pointer.pull_at([0.0, 0.0]), None);

        pointer.move_to(10.0, 20.0);
        assert!(pointer.is_active());
        assert!(pointer.pull_at([10.0, 120.0]).is_some());
        assert_eq!(pointer.pull_at([10.0, 220.0]), None);
    }

    #[test]
    fn no_pull_exactly_on_pointer() {
        let mut pointer = PointerState::default();
        pointer.move_to(100.0, 100.0);
        assert_eq!(pointer.pull_at([100.0, 100.0]), None);
    }

    #[test]
    fn linear_falloff() {
        let mut pointer = PointerState::default();
        pointer.move_to(100.0, 100.0);

        let pull = pointer.pull_at([0.0, 100.0]).unwrap();
        assert!((pull[0] - 0.25).abs() < 1e-12);
        assert_eq!(pull[1], 0.0);

        let near = pointer.pull_at([100.0, 50.0]).unwrap();
        assert!((near[1] - 0.375).abs() < 1e-12);

        assert_eq!(pointer.pull_at([100.0, 300.0]), None);
        assert_eq!(pointer.pull_at([400.0, 100.0]), None);
    }
}
