use std::cell::RefCell;
use std::rc::Rc;

/// Work that runs once per animation frame.
///
/// `timestamp_ms` is the high-resolution frame time handed out by the
/// scheduler (`requestAnimationFrame` in the browser).
pub trait FrameTask {
    fn tick(&mut self, timestamp_ms: f64);
}

impl<F: FnMut(f64)> FrameTask for F {
    fn tick(&mut self, timestamp_ms: f64) {
        self(timestamp_ms)
    }
}

/// Re-arms a task every frame for the lifetime of the page.
///
/// There is no cancel: once armed, a task ticks until the page goes away.
pub trait Scheduler {
    fn arm(&self, task: Rc<RefCell<dyn FrameTask>>);
}
