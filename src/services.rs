//! Bindings to the page's JavaScript libraries: Lenis for smooth scrolling
//! and Lucide for icons. Both are loaded by the host page as globals.

use crate::dom::js_err;
use crate::page::IconService;
use crate::scroll::{ScrollOptions, ScrollService};
use js_sys::{Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    type Lenis;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &Object) -> Result<Lenis, JsValue>;

    #[wasm_bindgen(method)]
    fn raf(this: &Lenis, time: f64);

    #[wasm_bindgen(method, js_name = scrollTo)]
    fn scroll_to(this: &Lenis, target: &web::Element);

    #[wasm_bindgen(catch, js_namespace = lucide, js_name = createIcons)]
    fn create_icons() -> Result<(), JsValue>;
}

/// Lenis instance plus the easing callback it holds on to.
pub struct SmoothScroll {
    lenis: Lenis,
    _easing: Closure<dyn Fn(f64) -> f64>,
}

impl SmoothScroll {
    pub fn new(options: &ScrollOptions) -> anyhow::Result<Self> {
        let easing = Closure::wrap(Box::new(options.easing) as Box<dyn Fn(f64) -> f64>);
        let js_options = lenis_options(options, &easing).map_err(js_err)?;
        let lenis = Lenis::new(&js_options).map_err(js_err)?;
        Ok(Self {
            lenis,
            _easing: easing,
        })
    }
}

fn lenis_options(
    options: &ScrollOptions,
    easing: &Closure<dyn Fn(f64) -> f64>,
) -> Result<Object, JsValue> {
    let obj = Object::new();
    let set = |key: &str, value: &JsValue| Reflect::set(&obj, &JsValue::from_str(key), value);
    set("duration", &JsValue::from_f64(options.duration))?;
    set("easing", easing.as_ref())?;
    set("direction", &JsValue::from_str(options.direction.as_str()))?;
    set(
        "gestureDirection",
        &JsValue::from_str(options.gesture_direction.as_str()),
    )?;
    set("smooth", &JsValue::from_bool(options.smooth))?;
    set("mouseMultiplier", &JsValue::from_f64(options.mouse_multiplier))?;
    set("smoothTouch", &JsValue::from_bool(options.smooth_touch))?;
    set("touchMultiplier", &JsValue::from_f64(options.touch_multiplier))?;
    Ok(obj)
}

impl ScrollService for SmoothScroll {
    type Target = web::Element;

    fn advance(&self, timestamp_ms: f64) {
        self.lenis.raf(timestamp_ms);
    }

    fn scroll_to(&self, target: &web::Element) {
        self.lenis.scroll_to(target);
    }
}

#[derive(Clone, Copy, Default)]
pub struct Lucide;

impl IconService for Lucide {
    fn render_icons(&self) {
        if let Err(e) = create_icons() {
            log::warn!("[nav] icon refresh failed: {:?}", e);
        }
    }
}
