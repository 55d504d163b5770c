// Fade-in of page sections the first time they scroll into view.

use crate::constants::*;
use crate::page::{Intersection, Page, Watch, WatchOptions};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPolicy {
    pub threshold: f64,
    pub bottom_margin_px: f64,
    pub offset_px: f64,
    pub transition_sec: f64,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            bottom_margin_px: REVEAL_BOTTOM_MARGIN_PX,
            offset_px: REVEAL_OFFSET_PX,
            transition_sec: REVEAL_TRANSITION_SEC,
        }
    }
}

impl RevealPolicy {
    /// Viewport shrunk on the bottom edge so elements reveal a little early.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            threshold: self.threshold,
            root_margin: self.root_margin(),
        }
    }

    /// The observer already reports only at the threshold crossing, so any
    /// intersecting report counts. A very tall element may never reach the
    /// threshold ratio itself.
    pub fn qualifies(&self, hit: Intersection) -> bool {
        hit.intersecting
    }

    pub fn hidden_transform(&self) -> String {
        format!("translateY({}px)", self.offset_px)
    }

    pub fn transition(&self) -> String {
        let s = self.transition_sec;
        format!("opacity {s}s ease-out, transform {s}s ease-out")
    }

    /// Stylesheet for the revealed state; it overrides the inline hidden
    /// styles set by [`prepare`].
    pub fn visible_rule(&self) -> String {
        format!(
            ".{VISIBLE_CLASS} {{\n    opacity: 1 !important;\n    transform: translateY(0) !important;\n}}\n"
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPhase {
    Pending,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Still pending; keep watching.
    Waiting,
    /// Just became visible.
    Revealed,
    /// Was already visible; nothing changes.
    Settled,
}

/// One-shot reveal state for each tracked element.
#[derive(Clone, Debug)]
pub struct RevealBoard {
    phases: Vec<RevealPhase>,
    policy: RevealPolicy,
}

impl RevealBoard {
    pub fn new(len: usize, policy: RevealPolicy) -> Self {
        Self {
            phases: vec![RevealPhase::Pending; len],
            policy,
        }
    }

    /// Feeds an intersection report for element `index`. Unknown indices
    /// are treated as settled.
    pub fn observe(&mut self, index: usize, hit: Intersection) -> Transition {
        let qualifies = self.policy.qualifies(hit);
        match self.phases.get_mut(index) {
            Some(phase) if *phase == RevealPhase::Pending => {
                if !qualifies {
                    return Transition::Waiting;
                }
                *phase = RevealPhase::Visible;
                Transition::Revealed
            }
            _ => Transition::Settled,
        }
    }
}

/// Hides `el` with inline styles so the reveal transition has somewhere to
/// start from.
pub fn prepare<P: Page>(page: &P, el: &P::Element, policy: &RevealPolicy) {
    page.set_style(el, "opacity", "0");
    page.set_style(el, "transform", &policy.hidden_transform());
    page.set_style(el, "transition", &policy.transition());
}

/// Hides every tracked element, installs the visible rule and starts
/// watching. Returns the number of tracked elements.
pub fn wire<P: Page + 'static>(page: &Rc<P>, policy: RevealPolicy) -> anyhow::Result<usize> {
    let elements = page.query_all(REVEAL_SELECTOR);
    for el in &elements {
        prepare(&**page, el, &policy);
    }
    page.inject_style(&policy.visible_rule());

    let mut board = RevealBoard::new(elements.len(), policy);
    let targets = elements.clone();
    let page_cb = page.clone();
    page.watch_intersections(
        &elements,
        &policy.watch_options(),
        Box::new(move |index, hit| match board.observe(index, hit) {
            Transition::Revealed => {
                page_cb.add_class(&targets[index], VISIBLE_CLASS);
                log::debug!("[reveal] element {} visible", index);
                Watch::Stop
            }
            Transition::Waiting => Watch::Continue,
            Transition::Settled => Watch::Stop,
        }),
    )?;
    log::info!("[reveal] watching {} elements", elements.len());
    Ok(elements.len())
}
