//! Browser host: draws a field onto a `<canvas>` through its 2D context.
//!
//! ```js
//! import init, { ParticleBackground } from "./plexus.js";
//!
//! await init();
//! const background = ParticleBackground.attach("background");
//! background.start();
//! ```

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::color::Hsl;
use crate::config::{Config, FieldConfig};
use crate::error::SurfaceError;
use crate::field::Field;
use crate::surface::Surface;
use crate::time::FrameClock;
use crate::Vec2;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// A [`Surface`] over a canvas' 2D rendering context.
pub struct Context2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Context2d {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| SurfaceError::Unavailable("canvas has no 2d context".into()))?;
        Ok(Self { canvas, ctx })
    }

    /// Set the canvas' backing size in pixels.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for Context2d {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsl, alpha: f32) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("arc with radius {} failed: {:?}", radius, e);
            return;
        }
        self.ctx.set_global_alpha(alpha as f64);
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Hsl, alpha: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_line_width(1.0);
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
        self.ctx.stroke();
    }
}

/// A particle field running behind a page.
#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    surface: Rc<RefCell<Context2d>>,
    field: Rc<RefCell<Field>>,
    started: bool,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Attach to the `<canvas>` with id `canvas_id` using default settings.
    pub fn attach(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        Self::build(canvas_id, FieldConfig::default())
    }

    /// Attach with a JSON configuration (same schema as the native binary).
    #[wasm_bindgen(js_name = attachWithConfig)]
    pub fn attach_with_config(canvas_id: &str, json: &str) -> Result<ParticleBackground, JsValue> {
        let config = Config::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::build(canvas_id, config.field)
    }

    /// Start listening for resize and pointer events and begin animating.
    /// Calling it again has no effect.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.started {
            return Ok(());
        }

        self.listen_resize()?;
        self.listen_pointer()?;
        self.animate()?;

        self.started = true;
        log::info!(
            "particle background started with {} particles",
            self.field.borrow().particles().len()
        );
        Ok(())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }
}

impl ParticleBackground {
    fn build(canvas_id: &str, config: FieldConfig) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| unavailable("no window"))?;
        let document = window.document().ok_or_else(|| unavailable("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| unavailable(&format!("missing #{}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable(&format!("#{} is not a canvas", canvas_id)))?;

        let surface = Context2d::new(canvas).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let (width, height) = inner_size(&window);
        surface.set_size(width as u32, height as u32);

        let field = Field::with_config(width, height, config);

        Ok(ParticleBackground {
            window,
            surface: Rc::new(RefCell::new(surface)),
            field: Rc::new(RefCell::new(field)),
            started: false,
        })
    }

    fn listen_resize(&self) -> Result<(), JsValue> {
        let window = self.window.clone();
        let surface = self.surface.clone();
        let field = self.field.clone();

        let closure = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = inner_size(&window);
            surface.borrow().set_size(width as u32, height as u32);
            field.borrow_mut().on_resize(width, height);
        });
        self.window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn listen_pointer(&self) -> Result<(), JsValue> {
        let field = self.field.clone();

        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            field
                .borrow_mut()
                .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
        });
        self.window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn animate(&self) -> Result<(), JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let reschedule = callback.clone();

        let window = self.window.clone();
        let surface = self.surface.clone();
        let field = self.field.clone();
        let mut clock = FrameClock::new();

        *callback.borrow_mut() = Some(Closure::new(move || {
            field.borrow_mut().tick(&mut *surface.borrow_mut());

            if let Some(fps) = clock.update() {
                log::debug!("{:.1} fps", fps);
            }

            if let Some(next) = reschedule.borrow().as_ref() {
                if let Err(e) = request_frame(&window, next) {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                }
            }
        }));

        if let Some(first) = callback.borrow().as_ref() {
            request_frame(&self.window, first)?;
        }
        Ok(())
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

fn inner_size(window: &Window) -> (f32, f32) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width as f32, height as f32)
}

fn unavailable(what: &str) -> JsValue {
    JsValue::from_str(&SurfaceError::Unavailable(what.to_string()).to_string())
}
