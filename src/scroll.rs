// Anchor links routed through an eased scroll service.

use crate::constants::*;
use crate::nav;
use crate::page::{NativeAction, Page};
use crate::schedule::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Vertical,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
        }
    }
}

/// Construction options for the scroll service.
#[derive(Clone, Copy, Debug)]
pub struct ScrollOptions {
    pub duration: f64,
    pub easing: fn(f64) -> f64,
    pub direction: Axis,
    pub gesture_direction: Axis,
    pub smooth: bool,
    pub smooth_touch: bool,
    pub mouse_multiplier: f64,
    pub touch_multiplier: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration: SCROLL_DURATION,
            easing: ease_out_expo,
            direction: Axis::Vertical,
            gesture_direction: Axis::Vertical,
            smooth: true,
            smooth_touch: false,
            mouse_multiplier: SCROLL_MOUSE_MULTIPLIER,
            touch_multiplier: SCROLL_TOUCH_MULTIPLIER,
        }
    }
}

/// Exponential ease-out over `t` in [0, 1], capped at 1.
#[inline]
pub fn ease_out_expo(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

/// Eased, interruptible scrolling driven by an external clock.
pub trait ScrollService {
    type Target;

    /// Advances the service's animation to `timestamp_ms`.
    fn advance(&self, timestamp_ms: f64);
    fn scroll_to(&self, target: &Self::Target);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// `href="#"`: nothing to scroll to.
    Placeholder,
    /// The fragment did not resolve to an element.
    Missing,
    Scrolled,
}

/// Handles a click on an in-page anchor: closes the menu, then scrolls to
/// the fragment target if there is one.
pub fn follow_anchor<P, S>(
    page: &P,
    anchor: &P::Element,
    panel: Option<&P::Element>,
    scroll: &S,
) -> AnchorOutcome
where
    P: Page,
    S: ScrollService<Target = P::Element>,
{
    if let Some(panel) = panel {
        nav::close_menu(page, panel);
    }
    let Some(href) = page.attribute(anchor, "href") else {
        return AnchorOutcome::Missing;
    };
    if href == PLACEHOLDER_HREF {
        return AnchorOutcome::Placeholder;
    }
    match page.query(&href) {
        Some(target) => {
            scroll.scroll_to(&target);
            AnchorOutcome::Scrolled
        }
        None => {
            log::debug!("[scroll] no element for {}", href);
            AnchorOutcome::Missing
        }
    }
}

/// Starts the scroll clock and routes every in-page anchor through the
/// service. Returns the number of anchors wired.
pub fn wire<P, S>(page: &Rc<P>, scheduler: &impl Scheduler, scroll: Rc<S>) -> usize
where
    P: Page + 'static,
    S: ScrollService<Target = P::Element> + 'static,
{
    let clock = scroll.clone();
    scheduler.arm(Rc::new(RefCell::new(move |t: f64| clock.advance(t))));

    let panel = page.query(NAV_PANEL_SELECTOR);
    let anchors = page.query_all(ANCHOR_SELECTOR);
    for anchor in &anchors {
        let page_cb = page.clone();
        let anchor_cb = anchor.clone();
        let panel_cb = panel.clone();
        let scroll_cb = scroll.clone();
        page.on_click(
            anchor,
            Box::new(move |_| {
                follow_anchor(&*page_cb, &anchor_cb, panel_cb.as_ref(), &*scroll_cb);
                NativeAction::Suppress
            }),
        );
    }
    log::info!("[scroll] {} anchors wired", anchors.len());
    anchors.len()
}
