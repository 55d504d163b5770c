// Host-side stand-ins for the browser: a fake document, a recording canvas,
// recording scroll/icon services and a manual frame clock.
//
// Test crates that use this must include the pure modules at their root
// (`page`, `schedule`, `render`, `scroll`, ...).

#![allow(dead_code)]

use crate::page::*;
use crate::render::{Rgba, Surface};
use crate::schedule::{FrameTask, Scheduler};
use crate::scroll::ScrollService;
use glam::DVec2;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

pub type NodeId = usize;

#[derive(Default, Debug, Clone)]
pub struct Node {
    /// Selectors this node answers to, e.g. `.nav-links` or `#about`.
    pub selectors: Vec<String>,
    pub parent: Option<NodeId>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

struct Watcher {
    elements: Vec<NodeId>,
    watching: Vec<bool>,
    options: WatchOptions,
    handler: IntersectionHandler,
}

#[derive(Default)]
pub struct FakePage {
    nodes: RefCell<Vec<Node>>,
    viewport: Cell<(f64, f64)>,
    element_clicks: RefCell<Vec<(NodeId, ClickHandler)>>,
    window_clicks: RefCell<Vec<ClickHandler>>,
    resizes: RefCell<Vec<ResizeHandler>>,
    watcher: RefCell<Option<Watcher>>,
    pub styles: RefCell<Vec<String>>,
}

impl FakePage {
    pub fn new(width: f64, height: f64) -> Self {
        let page = Self::default();
        page.viewport.set((width, height));
        page
    }

    pub fn add(&self, selectors: &[&str]) -> NodeId {
        self.add_node(selectors, None)
    }

    pub fn add_child(&self, parent: NodeId, selectors: &[&str]) -> NodeId {
        self.add_node(selectors, Some(parent))
    }

    fn add_node(&self, selectors: &[&str], parent: Option<NodeId>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            parent,
            ..Default::default()
        });
        nodes.len() - 1
    }

    /// In-page link `<a href="{href}">`.
    pub fn add_anchor(&self, href: &str) -> NodeId {
        let id = self.add(&["a[href^=\"#\"]"]);
        self.nodes.borrow_mut()[id]
            .attrs
            .insert("href".into(), href.into());
        id
    }

    pub fn node(&self, id: NodeId) -> Node {
        self.nodes.borrow()[id].clone()
    }

    pub fn classes(&self, id: NodeId) -> BTreeSet<String> {
        self.nodes.borrow()[id].classes.clone()
    }

    /// Dispatches a click on `id`, then lets it bubble to the window.
    /// Returns the actions the element handlers asked for.
    pub fn click(&self, id: NodeId, x: f64, y: f64) -> Vec<NativeAction> {
        let click = Click {
            position: DVec2::new(x, y),
        };
        let mut actions = Vec::new();
        for (target, handler) in self.element_clicks.borrow_mut().iter_mut() {
            if *target == id {
                actions.push(handler(&click));
            }
        }
        self.fire_window_click(&click);
        actions
    }

    pub fn click_window(&self, x: f64, y: f64) {
        self.fire_window_click(&Click {
            position: DVec2::new(x, y),
        });
    }

    fn fire_window_click(&self, click: &Click) {
        for handler in self.window_clicks.borrow_mut().iter_mut() {
            handler(click);
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.viewport.set((width, height));
        let vp = self.viewport();
        for handler in self.resizes.borrow_mut().iter_mut() {
            handler(vp);
        }
    }

    pub fn watch_options(&self) -> Option<WatchOptions> {
        self.watcher.borrow().as_ref().map(|w| w.options.clone())
    }

    pub fn is_watching(&self, id: NodeId) -> bool {
        self.watcher.borrow().as_ref().map_or(false, |w| {
            w.elements
                .iter()
                .zip(&w.watching)
                .any(|(el, on)| *el == id && *on)
        })
    }

    /// Reports an intersection for `id` the way an observer would: only
    /// while the element is still being watched.
    pub fn intersect(&self, id: NodeId, ratio: f64) -> Option<Watch> {
        self.deliver(id, ratio, false)
    }

    /// Reports an intersection even after the element was unwatched.
    pub fn intersect_unchecked(&self, id: NodeId, ratio: f64) -> Option<Watch> {
        self.deliver(id, ratio, true)
    }

    fn deliver(&self, id: NodeId, ratio: f64, force: bool) -> Option<Watch> {
        let mut guard = self.watcher.borrow_mut();
        let w = guard.as_mut()?;
        let index = w.elements.iter().position(|el| *el == id)?;
        if !w.watching[index] && !force {
            return None;
        }
        let hit = Intersection {
            intersecting: ratio > 0.0,
            ratio,
        };
        let watch = (w.handler)(index, hit);
        if watch == Watch::Stop {
            w.watching[index] = false;
        }
        Some(watch)
    }

    fn find(&self, selector: &str, parent: Option<NodeId>) -> Option<NodeId> {
        self.nodes.borrow().iter().position(|n| {
            n.selectors.iter().any(|s| s == selector) && (parent.is_none() || n.parent == parent)
        })
    }
}

impl Page for FakePage {
    type Element = NodeId;

    fn viewport(&self) -> Viewport {
        let (width, height) = self.viewport.get();
        Viewport { width, height }
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.find(selector, None)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        // Comma lists match any of their parts, in document order.
        let parts: Vec<&str> = selector.split(',').map(str::trim).collect();
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.selectors.iter().any(|s| parts.contains(&s.as_str())))
            .map(|(i, _)| i)
            .collect()
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Option<NodeId> {
        self.find(selector, Some(*parent))
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        self.nodes.borrow_mut()[*el].classes.insert(class.into());
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        self.nodes.borrow_mut()[*el].classes.remove(class);
    }

    fn toggle_class(&self, el: &NodeId, class: &str) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[*el].classes;
        if !classes.remove(class) {
            classes.insert(class.into());
            true
        } else {
            false
        }
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[*el].attrs.get(name).cloned()
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[*el]
            .attrs
            .insert(name.into(), value.into());
    }

    fn set_style(&self, el: &NodeId, property: &str, value: &str) {
        self.nodes.borrow_mut()[*el]
            .style
            .insert(property.into(), value.into());
    }

    fn inject_style(&self, css: &str) {
        self.styles.borrow_mut().push(css.into());
    }

    fn on_click(&self, el: &NodeId, handler: ClickHandler) {
        self.element_clicks.borrow_mut().push((*el, handler));
    }

    fn on_window_click(&self, handler: ClickHandler) {
        self.window_clicks.borrow_mut().push(handler);
    }

    fn on_resize(&self, handler: ResizeHandler) {
        self.resizes.borrow_mut().push(handler);
    }

    fn watch_intersections(
        &self,
        elements: &[NodeId],
        options: &WatchOptions,
        handler: IntersectionHandler,
    ) -> anyhow::Result<()> {
        *self.watcher.borrow_mut() = Some(Watcher {
            elements: elements.to_vec(),
            watching: vec![true; elements.len()],
            options: options.clone(),
            handler,
        });
        Ok(())
    }
}

/// Drawing commands captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Draw {
    Clear,
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Rgba,
    },
}

#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub size: (f64, f64),
    pub resizes: usize,
    pub commands: Vec<Draw>,
}

impl RecordingSurface {
    pub fn circles(&self) -> impl Iterator<Item = &Draw> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Draw::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &Draw> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Draw::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
        self.resizes += 1;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(Draw::Clear);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(Draw::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.commands.push(Draw::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[derive(Default)]
pub struct RecordingScroll {
    pub ticks: RefCell<Vec<f64>>,
    pub requests: RefCell<Vec<NodeId>>,
}

impl ScrollService for RecordingScroll {
    type Target = NodeId;

    fn advance(&self, timestamp_ms: f64) {
        self.ticks.borrow_mut().push(timestamp_ms);
    }

    fn scroll_to(&self, target: &NodeId) {
        self.requests.borrow_mut().push(*target);
    }
}

#[derive(Default)]
pub struct CountingIcons {
    pub renders: Cell<usize>,
}

impl IconService for CountingIcons {
    fn render_icons(&self) {
        self.renders.set(self.renders.get() + 1);
    }
}

/// Steps armed tasks one frame at a time in place of the display refresh.
pub struct ManualClock {
    now_ms: Cell<f64>,
    frame_ms: f64,
    tasks: RefCell<Vec<Rc<RefCell<dyn FrameTask>>>>,
}

impl ManualClock {
    pub fn new(frame_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(0.0),
            frame_ms,
            tasks: RefCell::new(Vec::new()),
        }
    }

    pub fn armed(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    pub fn step(&self) {
        let now = self.now_ms.get() + self.frame_ms;
        self.now_ms.set(now);
        let tasks = self.tasks.borrow().clone();
        for task in tasks {
            task.borrow_mut().tick(now);
        }
    }

    pub fn run(&self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }
}

impl Scheduler for ManualClock {
    fn arm(&self, task: Rc<RefCell<dyn FrameTask>>) {
        self.tasks.borrow_mut().push(task);
    }
}
