/// Page tuning constants.
///
/// These express the fixed visual policy of the page (densities, decay rates,
/// selectors) and keep magic numbers out of the behavior modules.

// Particle field
pub const AREA_PER_PARTICLE: f64 = 12_000.0; // px² of viewport per ambient particle
pub const BURST_COUNT: usize = 8;
pub const BURST_LIFE_DECAY: f64 = 0.02; // per frame
pub const BURST_SHRINK: f64 = 0.95; // size multiplier per frame
pub const AMBIENT_SPEED: f64 = 0.2; // velocity span per axis, px/frame
pub const BURST_SPEED: f64 = 2.0;
pub const SIZE_MIN: f64 = 1.0;
pub const SIZE_SPAN: f64 = 2.0;

// Particle look
pub const PARTICLE_RGB: [u8; 3] = [99, 102, 241];
pub const AMBIENT_ALPHA: f64 = 0.3;
pub const LINK_DISTANCE: f64 = 100.0;
pub const LINK_MAX_ALPHA: f64 = 0.2;
pub const LINK_WIDTH: f64 = 0.5;

pub const CANVAS_ID: &str = "particle-canvas";

// Navigation
pub const NAV_TOGGLE_SELECTOR: &str = ".mobile-toggle";
pub const NAV_PANEL_SELECTOR: &str = ".nav-links";
pub const NAV_ICON_SELECTOR: &str = "i";
pub const NAV_OPEN_CLASS: &str = "active";
pub const ICON_ATTR: &str = "data-lucide";
pub const ICON_MENU: &str = "menu";
pub const ICON_CLOSE: &str = "x";

// Smooth scroll
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const PLACEHOLDER_HREF: &str = "#";
pub const SCROLL_DURATION: f64 = 1.2;
pub const SCROLL_MOUSE_MULTIPLIER: f64 = 1.0;
pub const SCROLL_TOUCH_MULTIPLIER: f64 = 2.0;

// Reveal on scroll
pub const REVEAL_SELECTOR: &str = "section, .project-card, .about-card, .timeline-item";
pub const REVEAL_THRESHOLD: f64 = 0.1; // fraction of the element that must be visible
pub const REVEAL_BOTTOM_MARGIN_PX: f64 = 50.0;
pub const REVEAL_OFFSET_PX: f64 = 20.0;
pub const REVEAL_TRANSITION_SEC: f64 = 0.6;
pub const VISIBLE_CLASS: &str = "visible";
