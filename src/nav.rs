use crate::constants::*;
use crate::page::{IconService, NativeAction, Page};
use std::rc::Rc;

#[inline]
pub fn icon_for(open: bool) -> &'static str {
    if open {
        ICON_CLOSE
    } else {
        ICON_MENU
    }
}

/// Flips the panel's open class, swaps the toggle's icon to match and asks
/// the icon service to redraw. Returns whether the panel is now open.
pub fn toggle_menu<P: Page>(
    page: &P,
    toggle: &P::Element,
    panel: &P::Element,
    icons: &impl IconService,
) -> bool {
    let open = page.toggle_class(panel, NAV_OPEN_CLASS);
    if let Some(icon) = page.query_within(toggle, NAV_ICON_SELECTOR) {
        page.set_attribute(&icon, ICON_ATTR, icon_for(open));
    }
    icons.render_icons();
    log::debug!("[nav] menu {}", if open { "opened" } else { "closed" });
    open
}

/// Closes the panel; a no-op when it is already closed.
#[inline]
pub fn close_menu<P: Page>(page: &P, panel: &P::Element) {
    page.remove_class(panel, NAV_OPEN_CLASS);
}

/// Hooks the mobile menu toggle. Returns `false` when the toggle or the
/// panel is missing from the page, in which case nothing is wired.
pub fn wire<P, I>(page: &Rc<P>, icons: Rc<I>) -> bool
where
    P: Page + 'static,
    I: IconService + 'static,
{
    let (Some(toggle), Some(panel)) = (
        page.query(NAV_TOGGLE_SELECTOR),
        page.query(NAV_PANEL_SELECTOR),
    ) else {
        return false;
    };
    let page_cb = page.clone();
    let toggle_cb = toggle.clone();
    page.on_click(
        &toggle,
        Box::new(move |_| {
            toggle_menu(&*page_cb, &toggle_cb, &panel, &*icons);
            NativeAction::Keep
        }),
    );
    log::info!("[nav] mobile toggle wired");
    true
}
