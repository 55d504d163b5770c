use crate::page::{
    Click, ClickHandler, Intersection, IntersectionHandler, NativeAction, Page, ResizeHandler,
    Viewport, Watch, WatchOptions,
};
use glam::DVec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn click_closure(mut handler: ClickHandler) -> Closure<dyn FnMut(web::MouseEvent)> {
    Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let click = Click {
            position: DVec2::new(ev.client_x() as f64, ev.client_y() as f64),
        };
        if handler(&click) == NativeAction::Suppress {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>)
}

/// The live browser document.
#[derive(Clone)]
pub struct WebPage {
    window: web::Window,
    document: web::Document,
}

impl WebPage {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        Ok(Self { window, document })
    }

    pub fn canvas_by_id(&self, id: &str) -> Option<web::HtmlCanvasElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()
    }
}

impl Page for WebPage {
    type Element = web::Element;

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport {
            width: dim(self.window.inner_width()),
            height: dim(self.window.inner_height()),
        }
    }

    fn query(&self, selector: &str) -> Option<web::Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<web::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web::Element>().ok())
            .collect()
    }

    fn query_within(&self, parent: &web::Element, selector: &str) -> Option<web::Element> {
        parent.query_selector(selector).ok().flatten()
    }

    fn add_class(&self, el: &web::Element, class: &str) {
        _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &web::Element, class: &str) {
        _ = el.class_list().remove_1(class);
    }

    fn toggle_class(&self, el: &web::Element, class: &str) -> bool {
        el.class_list()
            .toggle(class)
            .unwrap_or_else(|_| el.class_list().contains(class))
    }

    fn attribute(&self, el: &web::Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &web::Element, name: &str, value: &str) {
        _ = el.set_attribute(name, value);
    }

    fn set_style(&self, el: &web::Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            _ = html.style().set_property(property, value);
        }
    }

    fn inject_style(&self, css: &str) {
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(css));
        if let Some(head) = self.document.head() {
            _ = head.append_child(&style);
        }
    }

    fn on_click(&self, el: &web::Element, handler: ClickHandler) {
        let closure = click_closure(handler);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_window_click(&self, handler: ClickHandler) {
        let closure = click_closure(handler);
        _ = self
            .window
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_resize(&self, mut handler: ResizeHandler) {
        let page = self.clone();
        let closure = Closure::wrap(Box::new(move || {
            handler(page.viewport());
        }) as Box<dyn FnMut()>);
        _ = self
            .window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn watch_intersections(
        &self,
        elements: &[web::Element],
        options: &WatchOptions,
        mut handler: IntersectionHandler,
    ) -> anyhow::Result<()> {
        let targets = elements.to_vec();
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(index) = targets.iter().position(|t| *t == target) else {
                        continue;
                    };
                    let hit = Intersection {
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    };
                    if handler(index, hit) == Watch::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(js_err)?;
        closure.forget();
        for el in elements {
            observer.observe(el);
        }
        Ok(())
    }
}
