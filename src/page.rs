// The slice of the host page the behaviors need.
//
// Everything that touches the document goes through [`Page`], so the same
// wiring runs against the browser DOM and against a test harness.

use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// A click as seen by a handler: the pointer position in viewport (client)
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub position: DVec2,
}

/// What the browser should do with the click after the handler ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeAction {
    Keep,
    Suppress,
}

/// One intersection report for a watched element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub intersecting: bool,
    /// Visible fraction of the element inside the (margin-adjusted) viewport.
    pub ratio: f64,
}

/// Whether a watched element should keep being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    Continue,
    Stop,
}

pub type ClickHandler = Box<dyn FnMut(&Click) -> NativeAction>;
pub type ResizeHandler = Box<dyn FnMut(Viewport)>;
/// Receives the index of the element (in the slice passed to
/// [`Page::watch_intersections`]) and its latest intersection.
pub type IntersectionHandler = Box<dyn FnMut(usize, Intersection) -> Watch>;

/// Intersection watching parameters, in observer terms.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub trait Page {
    type Element: Clone;

    fn viewport(&self) -> Viewport;

    /// First element matching `selector`; invalid selectors match nothing.
    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    /// Flips `class` and returns whether it is present afterwards.
    fn toggle_class(&self, el: &Self::Element, class: &str) -> bool;

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn set_style(&self, el: &Self::Element, property: &str, value: &str);

    /// Appends a stylesheet to the document head.
    fn inject_style(&self, css: &str);

    fn on_click(&self, el: &Self::Element, handler: ClickHandler);
    fn on_window_click(&self, handler: ClickHandler);
    fn on_resize(&self, handler: ResizeHandler);

    fn watch_intersections(
        &self,
        elements: &[Self::Element],
        options: &WatchOptions,
        handler: IntersectionHandler,
    ) -> anyhow::Result<()>;
}

/// Re-renders icon placeholders to match the current markup.
pub trait IconService {
    fn render_icons(&self);
}
