// Drawing surface the field renders onto. The browser build draws straight into a
// 2d canvas context; tests record the calls instead.

use crate::color::Color;
use std::convert::Infallible;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    type Error;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color)
        -> Result<(), Self::Error>;

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Self::Error>;
}

pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface { ctx }
    }
}

impl<'a> Surface for CanvasSurface<'a> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.ctx.fill();
        Ok(())
    }

    #[allow(deprecated)]
    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx
            .set_stroke_style(&JsValue::from_str(&color.to_rgba(alpha)));
        self.ctx.set_line_width(width);
        self.ctx.move_to(from[0], from[1]);
        self.ctx.line_to(to[0], to[1]);
        self.ctx.stroke();
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Color,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    },
}

// Keeps every draw call in order, for headless runs
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    ) -> Result<(), Infallible> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
        Ok(())
    }
}
