#![cfg(target_arch = "wasm32")]
use crate::constants::CANVAS_ID;
use crate::frame::RafScheduler;
use crate::particles::{FieldConfig, ParticleField};
use crate::render::FieldLoop;
use crate::reveal::RevealPolicy;
use crate::scroll::ScrollOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod frame;
mod nav;
mod page;
mod particles;
mod render;
mod reveal;
mod schedule;
mod scroll;
mod services;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-fx starting");

    let Some(document) = dom::window_document() else {
        log::error!("init error: no document");
        return Ok(());
    };
    if document.ready_state() == "loading" {
        let closure = Closure::once(run);
        _ = document
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        run();
    }
    Ok(())
}

fn run() {
    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
}

fn init() -> anyhow::Result<()> {
    let page = Rc::new(dom::WebPage::new()?);
    let scheduler = RafScheduler;

    nav::wire(&page, Rc::new(services::Lucide));

    match services::SmoothScroll::new(&ScrollOptions::default()) {
        Ok(smooth) => {
            scroll::wire(&page, &scheduler, Rc::new(smooth));
        }
        Err(e) => log::warn!("[scroll] smooth scrolling unavailable: {:?}", e),
    }

    if let Err(e) = reveal::wire(&page, RevealPolicy::default()) {
        log::error!("[reveal] init error: {:?}", e);
    }

    if let Some(canvas) = page.canvas_by_id(CANVAS_ID) {
        init_particles(&page, &scheduler, canvas)?;
    }
    Ok(())
}

fn init_particles(
    page: &Rc<dom::WebPage>,
    scheduler: &RafScheduler,
    canvas: web::HtmlCanvasElement,
) -> anyhow::Result<()> {
    let surface = canvas::CanvasSurface::new(canvas)?;
    let field = ParticleField::new(FieldConfig::default(), StdRng::from_entropy());
    render::wire_field(page, scheduler, FieldLoop::new(field, surface));
    Ok(())
}
