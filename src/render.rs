use crate::constants::{LINK_WIDTH, PARTICLE_RGB};
use crate::page::{NativeAction, Page};
use crate::particles::ParticleField;
use crate::schedule::{FrameTask, Scheduler};
use glam::DVec2;
use rand::Rng;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: f64,
}

impl Rgba {
    #[inline]
    pub fn particle(alpha: f64) -> Self {
        Self {
            rgb: PARTICLE_RGB,
            alpha,
        }
    }
}

/// CSS `rgba(...)` form, as accepted by canvas fill/stroke styles.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "rgba({}, {}, {}, {})", r, g, b, self.alpha)
    }
}

/// A 2D drawing target sized to the viewport.
pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);
}

/// Clears the surface, then draws every particle followed by the links.
pub fn draw_field<R: Rng>(field: &ParticleField<R>, surface: &mut impl Surface) {
    surface.clear();
    for p in field.particles() {
        surface.fill_circle(p.position, p.size, Rgba::particle(p.alpha()));
    }
    for link in field.links() {
        surface.stroke_line(link.from, link.to, LINK_WIDTH, Rgba::particle(link.alpha));
    }
}

/// The per-frame particle pass: step the simulation, then redraw.
pub struct FieldLoop<S: Surface, R: Rng> {
    pub field: ParticleField<R>,
    pub surface: S,
}

impl<S: Surface, R: Rng> FieldLoop<S, R> {
    pub fn new(field: ParticleField<R>, surface: S) -> Self {
        Self { field, surface }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.resize(width, height);
        self.field.resize(width, height);
    }
}

impl<S: Surface, R: Rng> FrameTask for FieldLoop<S, R> {
    fn tick(&mut self, _timestamp_ms: f64) {
        self.field.step();
        draw_field(&self.field, &mut self.surface);
    }
}

/// Sizes the field to the viewport, hooks resize and window clicks, and arms
/// the frame loop.
pub fn wire_field<P, S, R>(
    page: &Rc<P>,
    scheduler: &impl Scheduler,
    mut field_loop: FieldLoop<S, R>,
) -> Rc<RefCell<FieldLoop<S, R>>>
where
    P: Page + 'static,
    S: Surface + 'static,
    R: Rng + 'static,
{
    let vp = page.viewport();
    field_loop.resize(vp.width, vp.height);
    let field_loop = Rc::new(RefCell::new(field_loop));

    let on_resize = field_loop.clone();
    page.on_resize(Box::new(move |vp| {
        on_resize.borrow_mut().resize(vp.width, vp.height);
    }));

    let on_click = field_loop.clone();
    page.on_window_click(Box::new(move |click| {
        on_click.borrow_mut().field.burst(click.position);
        NativeAction::Keep
    }));

    scheduler.arm(field_loop.clone());
    log::info!(
        "[particles] field running ({} ambient)",
        field_loop.borrow().field.ambient_count()
    );
    field_loop
}
