use crate::schedule::{FrameTask, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame`-driven scheduler.
#[derive(Clone, Copy, Default)]
pub struct RafScheduler;

impl Scheduler for RafScheduler {
    fn arm(&self, task: Rc<RefCell<dyn FrameTask>>) {
        start_loop(task);
    }
}

pub fn start_loop(task: Rc<RefCell<dyn FrameTask>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        task.borrow_mut().tick(timestamp_ms);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
