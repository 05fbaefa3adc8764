// Page-interaction math: the trailing cursor, stat counters, typewriter, card
// tilt and the scroll-driven bits. Plain state and arithmetic; `host` (or the
// page) applies the results to the DOM.

use wasm_bindgen::prelude::*;

// Outline dot trailing the pointer. The inner dot snaps straight to the
// pointer; the outline closes a fixed fraction of the gap every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CursorFollower {
    target: [f64; 2],
    outline: [f64; 2],
    visible: bool,
}

impl CursorFollower {
    pub const LERP: f64 = 0.15;

    pub fn new() -> Self {
        CursorFollower {
            target: [0.0, 0.0],
            outline: [0.0, 0.0],
            visible: true,
        }
    }

    pub fn point_to(&mut self, x: f64, y: f64) {
        self.target = [x, y];
    }

    // Advances the outline one frame and returns its new position.
    pub fn step(&mut self) -> [f64; 2] {
        self.outline[0] += (self.target[0] - self.outline[0]) * Self::LERP;
        self.outline[1] += (self.target[1] - self.outline[1]) * Self::LERP;
        self.outline
    }

    pub fn dot(&self) -> [f64; 2] {
        self.target
    }

    pub fn outline(&self) -> [f64; 2] {
        self.outline
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn opacity(&self) -> &'static str {
        if self.visible {
            "1"
        } else {
            "0"
        }
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        CursorFollower::new()
    }
}

// Counts a stat up from zero, one step per animation frame.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StatCounter {
    target: u32,
    step: f64,
    current: f64,
    done: bool,
}

impl StatCounter {
    pub const DURATION_MS: f64 = 2000.0;
    pub const FRAME_MS: f64 = 16.0;
}

#[wasm_bindgen]
impl StatCounter {
    pub fn new(target: u32) -> StatCounter {
        StatCounter {
            target,
            step: target as f64 / (Self::DURATION_MS / Self::FRAME_MS),
            current: 0.0,
            done: false,
        }
    }

    // Advances one frame and returns the number to display. Once the count
    // reaches the target it reports the target exactly and stays there.
    pub fn step(&mut self) -> u32 {
        if self.done {
            return self.target;
        }
        self.current += self.step;
        if self.current < self.target as f64 {
            self.current.floor() as u32
        } else {
            self.done = true;
            self.target
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

// Reveals text one character at a time.
#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    text: String,
    shown: usize,
}

impl Typewriter {
    pub const START_DELAY_MS: u32 = 1000;
    pub const STEP_MS: u32 = 30;
}

#[wasm_bindgen]
impl Typewriter {
    pub fn new(text: &str) -> Typewriter {
        Typewriter {
            text: text.to_owned(),
            shown: 0,
        }
    }

    // Shows one more character. Returns false once everything is visible.
    pub fn step(&mut self) -> bool {
        match self.text[self.shown..].chars().next() {
            Some(c) => {
                self.shown += c.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn visible(&self) -> String {
        self.text[..self.shown].to_owned()
    }

    pub fn is_done(&self) -> bool {
        self.shown == self.text.len()
    }

    // Milliseconds to wait before the next `step`: the start delay before the
    // first character, then one step interval per character, None when done.
    pub fn next_delay_ms(&self) -> Option<u32> {
        if self.is_done() {
            None
        } else if self.shown == 0 {
            Some(Self::START_DELAY_MS)
        } else {
            Some(Self::STEP_MS)
        }
    }
}

// Rotation in degrees (around x, around y) for a card with the pointer at
// (`x`, `y`) relative to its top-left corner. Zero at the centre.
pub fn card_tilt(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    let rotate_x = (y - height / 2.0) / 20.0;
    let rotate_y = (width / 2.0 - x) / 20.0;
    (rotate_x, rotate_y)
}

#[wasm_bindgen]
pub fn card_tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    let (rotate_x, rotate_y) = card_tilt(x, y, width, height);
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-5px)",
        rotate_x, rotate_y
    )
}

pub const CARD_TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

// Offset that drags a button a tenth of the way toward the pointer, given the
// pointer relative to the button's top-left corner.
pub fn magnetic_offset(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    ((x - width / 2.0) * 0.1, (y - height / 2.0) * 0.1)
}

#[wasm_bindgen]
pub fn magnetic_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    let (dx, dy) = magnetic_offset(x, y, width, height);
    format!("translate({}px, {}px) scale(1.02)", dx, dy)
}

pub const MAGNETIC_RESET: &str = "translate(0, 0) scale(1)";

// Pointer position as percentages of the card box, for the glow gradient.
pub fn glow_position(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    (x / width * 100.0, y / height * 100.0)
}

#[wasm_bindgen]
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > 50.0
}

// Index of the section under the nav bar. Sections are given as parallel
// lists of offset tops and heights; a later match wins.
#[wasm_bindgen]
pub fn active_section(scroll_y: f64, tops: &[f64], heights: &[f64]) -> Option<u32> {
    let probe = scroll_y + 100.0;
    tops.iter()
        .zip(heights)
        .enumerate()
        .filter(|(_, (top, height))| probe >= **top && probe < **top + **height)
        .map(|(i, _)| i as u32)
        .last()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Parallax {
    pub translate_y: f64,
    pub opacity: f64,
}

// Hero drift while it is still on screen; `None` once scrolled past.
pub fn hero_parallax(scroll_y: f64, inner_height: f64) -> Option<Parallax> {
    if scroll_y < inner_height {
        Some(Parallax {
            translate_y: scroll_y * 0.3,
            opacity: 1.0 - (scroll_y / inner_height) * 0.5,
        })
    } else {
        None
    }
}

#[wasm_bindgen]
pub fn hero_parallax_transform(scroll_y: f64, inner_height: f64) -> Option<String> {
    hero_parallax(scroll_y, inner_height).map(|p| format!("translateY({}px)", p.translate_y))
}

#[wasm_bindgen]
pub fn hero_parallax_opacity(scroll_y: f64, inner_height: f64) -> Option<f64> {
    hero_parallax(scroll_y, inner_height).map(|p| p.opacity)
}

#[wasm_bindgen]
pub fn reveal_delay_ms(index: u32) -> u32 {
    (index % 5) * 80
}

// Scroll position that leaves room for the fixed nav bar.
#[wasm_bindgen]
pub fn scroll_target(offset_top: f64) -> f64 {
    offset_top - 80.0
}
