// Browser side: the handle a page drives by hand, and `start`, which wires the
// canvas, the window events and the requestAnimationFrame loop itself.

use crate::config::FieldConfig;
use crate::effects::{self, CursorFollower, Typewriter};
use crate::field::{ParticleField, Viewport};
use crate::surface::CanvasSurface;
#[cfg(feature = "profile")]
use crate::utils::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
    MouseEvent, Window,
};

#[wasm_bindgen]
pub struct ParticleCanvas {
    field: ParticleField,
}

#[wasm_bindgen]
impl ParticleCanvas {
    pub fn new(width: u32, height: u32) -> ParticleCanvas {
        ParticleCanvas::with_config(FieldConfig::default(), width, height)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.field.on_resize(width, height, &mut rand::thread_rng());
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.field.on_pointer_move(x, y);
    }

    pub fn tick(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        #[cfg(feature = "profile")]
        let _timer = Timer::new("ParticleCanvas::tick");
        self.field.tick(&mut CanvasSurface::new(ctx))
    }

    pub fn particle_count(&self) -> usize {
        self.field.particles().len()
    }
}

impl ParticleCanvas {
    pub fn with_config(config: FieldConfig, width: u32, height: u32) -> ParticleCanvas {
        let field = ParticleField::new(config, Viewport::new(width, height), &mut rand::thread_rng());
        ParticleCanvas { field }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width as u32, height as u32))
}

fn request_animation_frame(window: &Window, f: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(f.as_ref().unchecked_ref())
}

fn set_timeout(window: &Window, f: &Closure<dyn FnMut()>, delay_ms: u32) -> Result<i32, JsValue> {
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        f.as_ref().unchecked_ref(),
        delay_ms as i32,
    )
}

// Listeners live as long as the page, so the closure is leaked on purpose
fn listen<E, F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            elements.push(el);
        }
    }
    Ok(elements)
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn set_style(el: &HtmlElement, name: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(name, value)
}

// Pointer relative to the element's box, plus the box size
fn local_pointer(el: &HtmlElement, e: &MouseEvent) -> (f64, f64, f64, f64) {
    let rect = el.get_bounding_client_rect();
    (
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("{:?}", err);
    }
}

struct CursorView {
    dot: HtmlElement,
    outline: HtmlElement,
    follower: CursorFollower,
}

impl CursorView {
    fn find(document: &Document) -> Option<CursorView> {
        Some(CursorView {
            dot: html_by_id(document, "cursor-dot")?,
            outline: html_by_id(document, "cursor-outline")?,
            follower: CursorFollower::new(),
        })
    }

    fn point_to(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.follower.point_to(x, y);
        set_style(&self.dot, "left", &format!("{}px", x))?;
        set_style(&self.dot, "top", &format!("{}px", y))
    }

    fn frame(&mut self) -> Result<(), JsValue> {
        let [x, y] = self.follower.step();
        set_style(&self.outline, "left", &format!("{}px", x))?;
        set_style(&self.outline, "top", &format!("{}px", y))
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), JsValue> {
        self.follower.set_visible(visible);
        let opacity = self.follower.opacity();
        set_style(&self.dot, "opacity", opacity)?;
        set_style(&self.outline, "opacity", opacity)
    }

    fn set_hover(&self, hover: bool) -> Result<(), JsValue> {
        for el in [&self.dot, &self.outline].iter() {
            if hover {
                el.class_list().add_1("hover")?;
            } else {
                el.class_list().remove_1("hover")?;
            }
        }
        Ok(())
    }
}

// Takes over the canvas with id `canvas_id`: sizes it to the window, reseeds
// on resize, follows the mouse, and runs one tick per animation frame for as
// long as the page lives. Also drives the custom cursor, the hero typewriter
// and the card/button hover effects when the page has them.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let (width, height) = viewport_size(&window)?;
    canvas.set_width(width);
    canvas.set_height(height);
    let particles = Rc::new(RefCell::new(ParticleCanvas::new(width, height)));
    log::info!("particle field started at {}x{}", width, height);

    {
        let particles = particles.clone();
        let window_ref = window.clone();
        listen(&window, "resize", move |_: Event| {
            match viewport_size(&window_ref) {
                Ok((width, height)) => {
                    canvas.set_width(width);
                    canvas.set_height(height);
                    particles.borrow_mut().on_resize(width, height);
                }
                Err(err) => log::warn!("could not read viewport size: {:?}", err),
            }
        })?;
    }
    {
        let particles = particles.clone();
        listen(&window, "mousemove", move |e: MouseEvent| {
            particles
                .borrow_mut()
                .on_pointer_move(e.client_x() as f64, e.client_y() as f64);
        })?;
    }

    let cursor = CursorView::find(&document).map(|view| Rc::new(RefCell::new(view)));
    if let Some(cursor) = &cursor {
        wire_cursor(&document, cursor)?;
    }
    wire_hover_effects(&document)?;
    wire_scroll(&window, &document)?;
    wire_typewriter(&window, &document)?;

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(err) = particles.borrow_mut().tick(&ctx) {
            log::error!("particle frame failed: {:?}", err);
        }
        if let Some(cursor) = &cursor {
            report(cursor.borrow_mut().frame());
        }
        // Always ask for the next frame
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = request_animation_frame(&frame_window, next) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        request_animation_frame(&window, first)?;
    }
    Ok(())
}

// Types the hero tagline back in one character at a time
fn wire_typewriter(window: &Window, document: &Document) -> Result<(), JsValue> {
    let tagline = match document
        .query_selector(".hero > p")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        Some(el) => el,
        None => return Ok(()),
    };
    let mut typewriter = Typewriter::new(&tagline.text_content().unwrap_or_default());
    tagline.set_text_content(None);
    let first_delay = match typewriter.next_delay_ms() {
        Some(delay) => delay,
        None => return Ok(()),
    };

    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let timer_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        typewriter.step();
        tagline.set_text_content(Some(&typewriter.visible()));
        if let Some(delay) = typewriter.next_delay_ms() {
            if let Some(next) = f.borrow().as_ref() {
                if let Err(err) = set_timeout(&timer_window, next, delay) {
                    log::warn!("typewriter timeout failed: {:?}", err);
                }
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        set_timeout(window, first, first_delay)?;
    }
    Ok(())
}

fn wire_cursor(document: &Document, cursor: &Rc<RefCell<CursorView>>) -> Result<(), JsValue> {
    {
        let cursor = cursor.clone();
        listen(document, "mousemove", move |e: MouseEvent| {
            report(
                cursor
                    .borrow_mut()
                    .point_to(e.client_x() as f64, e.client_y() as f64),
            );
        })?;
    }
    {
        let cursor = cursor.clone();
        listen(document, "mouseleave", move |_: Event| {
            report(cursor.borrow_mut().set_visible(false));
        })?;
    }
    {
        let cursor = cursor.clone();
        listen(document, "mouseenter", move |_: Event| {
            report(cursor.borrow_mut().set_visible(true));
        })?;
    }

    for el in query_all(document, "a, button, .glass-panel, .skill-card, .social-link")? {
        let enter = cursor.clone();
        listen(&el, "mouseenter", move |_: Event| {
            report(enter.borrow().set_hover(true));
        })?;
        let leave = cursor.clone();
        listen(&el, "mouseleave", move |_: Event| {
            report(leave.borrow().set_hover(false));
        })?;
    }
    Ok(())
}

fn wire_hover_effects(document: &Document) -> Result<(), JsValue> {
    for card in query_all(document, ".project-card")? {
        let target = card.clone();
        listen(&card, "mousemove", move |e: MouseEvent| {
            let (x, y, w, h) = local_pointer(&target, &e);
            report(set_style(
                &target,
                "transform",
                &effects::card_tilt_transform(x, y, w, h),
            ));
        })?;
        let target = card.clone();
        listen(&card, "mouseleave", move |_: Event| {
            report(set_style(&target, "transform", effects::CARD_TILT_RESET));
        })?;
    }

    for button in query_all(document, ".btn-primary, .btn-secondary")? {
        let target = button.clone();
        listen(&button, "mousemove", move |e: MouseEvent| {
            let (x, y, w, h) = local_pointer(&target, &e);
            report(set_style(
                &target,
                "transform",
                &effects::magnetic_transform(x, y, w, h),
            ));
        })?;
        let target = button.clone();
        listen(&button, "mouseleave", move |_: Event| {
            report(set_style(&target, "transform", effects::MAGNETIC_RESET));
        })?;
    }

    for panel in query_all(document, ".glass-panel")? {
        let target = panel.clone();
        listen(&panel, "mousemove", move |e: MouseEvent| {
            let (x, y, w, h) = local_pointer(&target, &e);
            let (gx, gy) = effects::glow_position(x, y, w, h);
            report(
                set_style(&target, "--mouse-x", &format!("{}%", gx))
                    .and_then(|_| set_style(&target, "--mouse-y", &format!("{}%", gy))),
            );
        })?;
    }
    Ok(())
}

fn on_scroll(window: &Window, document: &Document) -> Result<(), JsValue> {
    let scroll_y = window.scroll_y()?;

    if let Some(nav) = document
        .query_selector("nav")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        if effects::navbar_scrolled(scroll_y) {
            set_style(&nav, "background", "rgba(5, 5, 5, 0.95)")?;
            set_style(&nav, "box-shadow", "0 4px 20px rgba(0,0,0,0.5)")?;
            set_style(&nav, "border-bottom", "1px solid rgba(138, 43, 226, 0.3)")?;
        } else {
            set_style(&nav, "background", "rgba(5, 5, 5, 0.8)")?;
            set_style(&nav, "box-shadow", "none")?;
            set_style(&nav, "border-bottom", "none")?;
        }
    }

    let sections = query_all(document, "section[id]")?;
    let tops: Vec<f64> = sections.iter().map(|s| s.offset_top() as f64).collect();
    let heights: Vec<f64> = sections.iter().map(|s| s.offset_height() as f64).collect();
    if let Some(active) = effects::active_section(scroll_y, &tops, &heights) {
        let href = format!("#{}", sections[active as usize].id());
        for link in query_all(document, ".nav-links a")? {
            link.class_list().remove_1("active")?;
            if link.get_attribute("href").as_deref() == Some(href.as_str()) {
                link.class_list().add_1("active")?;
            }
        }
    }

    if let Some(hero) = document
        .query_selector(".hero")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let inner_height = window.inner_height()?.as_f64().unwrap_or(0.0);
        if let Some(p) = effects::hero_parallax(scroll_y, inner_height) {
            set_style(&hero, "transform", &format!("translateY({}px)", p.translate_y))?;
            set_style(&hero, "opacity", &p.opacity.to_string())?;
        }
    }
    Ok(())
}

fn wire_scroll(window: &Window, document: &Document) -> Result<(), JsValue> {
    on_scroll(window, document)?;
    let window_ref = window.clone();
    let document_ref = document.clone();
    listen(window, "scroll", move |_: Event| {
        report(on_scroll(&window_ref, &document_ref));
    })
}
