//! Mount API - Page lifecycle and the event loop.
//!
//! [`Portfolio`] owns every piece of runtime state the page has: the clock
//! driven timers, the typewriter, one [`HolographicCard`] per card slot, the
//! presences of animated nodes, scroll and pointer routing.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::{Content, Settings};
//! use spark_folio::pipeline::mount;
//!
//! // Interactive: takes over the terminal until `q`.
//! mount::run(Content::embedded()?, Settings::default())?;
//!
//! // Headless: one frame as text.
//! let text = mount::render_snapshot(Content::embedded()?, Settings::default(), 100, 30, 2_000)?;
//! ```
//!
//! # Loop
//!
//! ```text
//! advance timers → paint → update in-view presences → hit map → diff render → poll
//! ```

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::content::Content;
use crate::error::{FolioError, Result};
use crate::layout::LayoutRect;
use crate::motion::{Presence, Trigger};
use crate::primitives::Node;
use crate::renderer::{DiffRenderer, to_plain_text};
use crate::state::hologram::{CellMetrics, HolographicCard};
use crate::state::input::{InputEvent, poll_event};
use crate::state::keyboard::{KeyAction, resolve};
use crate::state::mouse::{
    HitMap, MouseAction, MouseButton, MouseEvent, PointerEvent, PointerRouter, ScrollDirection,
};
use crate::state::scroll::{LINE_SCROLL, PageScroll, WHEEL_SCROLL};
use crate::state::timers::TimerQueue;
use crate::state::typewriter::Typewriter;
use crate::theme::Theme;
use crate::views::background::Grid;

use super::frame::{FrameInputs, FrameResult, paint_frame};
use super::layout_derived::{LayoutResult, PageLayout, create_layout_derived};
use super::terminal::{TerminalGuard, TerminalSize};

/// Redraw period when only the pulse (caret, status dot) is moving.
const IDLE_FRAME_MS: u64 = 100;

// =============================================================================
// Portfolio
// =============================================================================

/// The mounted page.
pub struct Portfolio {
    settings: Settings,
    theme: Rc<Theme>,
    metrics: CellMetrics,
    size: TerminalSize,
    layout: Box<dyn Fn() -> LayoutResult>,
    timers: TimerQueue,
    typewriter: Option<Typewriter>,
    cards: Vec<HolographicCard>,
    card_rects: Vec<Option<LayoutRect>>,
    page_motion: Vec<Option<Presence>>,
    nav_motion: Vec<Option<Presence>>,
    scroll: PageScroll,
    router: PointerRouter,
    hits: HitMap,
    /// Last pointer cell, re-routed after every frame so cards follow scrolling.
    pointer: Option<(u16, u16)>,
    status: Option<String>,
    running: bool,
}

impl Portfolio {
    /// Mount the page at clock 0 for a `width` x `height` terminal.
    ///
    /// Starts the typewriter and every on-mount animation.
    pub fn new(content: Content, settings: Settings, width: u16, height: u16) -> Result<Self> {
        let theme = Rc::new(settings.theme()?);
        let size = TerminalSize::new(width, height);
        let derived = create_layout_derived(Rc::new(content), theme.clone(), &size);
        let layout: Box<dyn Fn() -> LayoutResult> = Box::new(move || derived.get());

        let initial = layout().map_err(FolioError::Layout)?;
        let reduced = settings.motion.reduced;
        let timers = TimerQueue::new();
        let typewriter = Typewriter::start(
            &timers,
            initial.page.typewriter_text.clone(),
            settings.motion.typing_interval_ms,
        );
        let glow = settings.glow_style(&theme);
        let cards = (0..initial.page.hologram_count)
            .map(|_| HolographicCard::new(glow))
            .collect();

        let mut page_motion = presences(&initial.page.root, reduced);
        let mut nav_motion = presences(&initial.page.overlay, reduced);
        for presence in page_motion.iter_mut().chain(nav_motion.iter_mut()).flatten() {
            // Mount triggers enter now; scroll triggers wait for a frame.
            if presence.descriptor().trigger == Trigger::Mount {
                presence.enter(0);
            }
        }

        info!(
            width,
            height,
            cards = initial.page.hologram_count,
            reduced_motion = reduced,
            "portfolio mounted"
        );

        Ok(Self {
            metrics: settings.cell_metrics(),
            scroll: PageScroll::new(initial.root.content_height, height),
            card_rects: vec![None; initial.page.hologram_count],
            settings,
            theme,
            size,
            layout,
            timers,
            typewriter: Some(typewriter),
            cards,
            page_motion,
            nav_motion,
            router: PointerRouter::default(),
            hits: HitMap::default(),
            pointer: None,
            status: None,
            running: true,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll.offset()
    }

    /// Text the typewriter shows right now.
    pub fn typed(&self) -> String {
        self.typewriter
            .as_ref()
            .map(Typewriter::displayed)
            .unwrap_or_default()
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    pub fn cards(&self) -> &[HolographicCard] {
        &self.cards
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Current page layout.
    pub fn page_layout(&self) -> Result<Rc<PageLayout>> {
        (self.layout)().map_err(FolioError::Layout)
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance the clock to `now` and paint a frame.
    pub fn frame(&mut self, now: u64) -> Result<FrameResult> {
        self.timers.advance_to(now);

        let layout = self.page_layout()?;
        let (width, height) = (self.size.width(), self.size.height());
        self.scroll.set_bounds(layout.root.content_height, height);

        let typed = self.typed();
        let result = paint_frame(
            &FrameInputs {
                layout: &layout,
                theme: &self.theme,
                grid: Grid {
                    cols: self.settings.render.grid_cols,
                    rows: self.settings.render.grid_rows,
                },
                metrics: self.metrics,
                scroll: self.scroll.offset(),
                now,
                typed: &typed,
                cards: &self.cards,
                page_motion: &self.page_motion,
                nav_motion: &self.nav_motion,
                status: self.status.as_deref(),
            },
            width,
            height,
        );

        self.observe_in_view(&result.page_bounds, height, now);
        self.hits.rebuild(width, height, result.hit_regions.clone());
        self.card_rects.clone_from(&result.card_rects);
        if let Some((x, y)) = self.pointer {
            self.route_pointer(x, y, now);
        }
        Ok(result)
    }

    /// Feed scroll-triggered presences the rows their nodes were painted on.
    fn observe_in_view(&mut self, bounds: &[Option<(i32, i32)>], height: u16, now: u64) {
        for (presence, rows) in self.page_motion.iter_mut().zip(bounds) {
            let (Some(presence), Some((top, bottom))) = (presence, rows) else {
                continue;
            };
            let in_view = presence.descriptor().trigger.in_view(*top, *bottom, height);
            presence.observe(in_view, now);
        }
    }

    /// Whether anything besides the pulse is moving at `now`.
    pub fn is_animating(&self, now: u64) -> bool {
        self.page_motion
            .iter()
            .chain(&self.nav_motion)
            .flatten()
            .any(|p| p.is_animating(now))
            || self.cards.iter().any(|c| c.is_fading(now))
    }

    /// When the next frame is due.
    pub fn next_wake(&self, now: u64) -> u64 {
        let frame = if self.is_animating(now) {
            self.settings.frame_interval_ms()
        } else {
            IDLE_FRAME_MS
        };
        let wake = now + frame;
        self.timers
            .next_deadline()
            .map_or(wake, |deadline| wake.min(deadline.max(now)))
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn handle_event(&mut self, event: InputEvent, now: u64) -> Result<()> {
        match event {
            InputEvent::Key(key) => {
                if let Some(action) = resolve(&key) {
                    self.apply(action)?;
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(&mouse, now)?,
            InputEvent::Resize(width, height) => {
                info!(width, height, "terminal resized");
                self.size.set(width, height);
                self.leave_all(now);
            }
            InputEvent::FocusLost => self.leave_all(now),
            InputEvent::None => {}
        }
        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Quit => {
                debug!("quit requested");
                self.running = false;
            }
            KeyAction::ScrollBy(rows) => {
                self.scroll.scroll_by(rows * LINE_SCROLL);
            }
            KeyAction::PageUp => {
                self.scroll.page_up();
            }
            KeyAction::PageDown => {
                self.scroll.page_down();
            }
            KeyAction::Top => {
                self.scroll.scroll_to_top();
            }
            KeyAction::Bottom => {
                self.scroll.scroll_to_bottom();
            }
            KeyAction::Jump(anchor) => self.jump(anchor)?,
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: u64) -> Result<()> {
        match mouse.action {
            MouseAction::Move | MouseAction::Drag => {
                self.pointer = Some((mouse.x, mouse.y));
                self.route_pointer(mouse.x, mouse.y, now);
            }
            MouseAction::Scroll => {
                let delta = match mouse.scroll {
                    Some(ScrollDirection::Up) => -WHEEL_SCROLL,
                    Some(ScrollDirection::Down) => WHEEL_SCROLL,
                    None => 0,
                };
                self.scroll.scroll_by(delta);
            }
            MouseAction::Down if mouse.button == MouseButton::Left => {
                if let Some(href) = self.hits.link_at(mouse.x, mouse.y).map(str::to_owned) {
                    self.follow(&href)?;
                }
            }
            MouseAction::Down | MouseAction::Up => {}
        }
        Ok(())
    }

    /// Deliver a pointer position to the card under it and `leave` to the
    /// card it came from.
    fn route_pointer(&mut self, x: u16, y: u16, now: u64) {
        let target = self.hits.card_at(x, y);
        let (client_x, client_y) = self.metrics.cell_center(x as i32, y as i32);

        for event in self.router.route(target) {
            match event {
                PointerEvent::Move(slot) => {
                    let Some(rect) = self.card_rects.get(slot).copied().flatten() else {
                        continue;
                    };
                    let bounds = self.metrics.bounds(rect.x, rect.y, rect.width, rect.height);
                    if let Some(card) = self.cards.get_mut(slot) {
                        card.on_pointer_move(client_x, client_y, &bounds, now);
                    }
                }
                PointerEvent::Leave(slot) => {
                    if let Some(card) = self.cards.get_mut(slot) {
                        card.on_pointer_leave(now);
                    }
                }
            }
        }
    }

    /// The pointer is gone: whichever card had it fades out.
    fn leave_all(&mut self, now: u64) {
        self.pointer = None;
        if let Some(PointerEvent::Leave(slot)) = self.router.reset() {
            if let Some(card) = self.cards.get_mut(slot) {
                card.on_pointer_leave(now);
            }
        }
    }

    /// Activate a link: `#name` scrolls to a section, anything else is
    /// reported since the terminal cannot open it.
    pub fn follow(&mut self, href: &str) -> Result<()> {
        match href.strip_prefix('#') {
            Some("") => {
                self.scroll.scroll_to_top();
            }
            Some(anchor) => self.jump(anchor)?,
            None => {
                info!(href, "external link activated");
                self.status = Some(format!("↗ {href}"));
            }
        }
        Ok(())
    }

    fn jump(&mut self, anchor: &str) -> Result<()> {
        let layout = self.page_layout()?;
        if self.scroll.scroll_to_anchor(&layout.root.anchors, anchor) {
            info!(anchor, row = self.scroll.offset(), "jumped to section");
        } else {
            warn!(anchor, "no such section");
        }
        Ok(())
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop the typewriter and fade nothing further. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(mut typewriter) = self.typewriter.take() {
            typewriter.stop();
            debug!(revealed = typewriter.revealed_count(), "typewriter torn down");
        }
        self.running = false;
        info!("portfolio unmounted");
    }

    fn event_loop(&mut self, renderer: &mut DiffRenderer, clock: Instant) -> Result<()> {
        while self.running {
            let now = elapsed_ms(clock);
            let frame = self.frame(now)?;
            renderer.render(&frame.buffer)?;

            let wake = self.next_wake(now);
            let mut timeout = Duration::from_millis(wake.saturating_sub(elapsed_ms(clock)));
            // Drain whatever is queued, then paint again.
            while let Some(event) = poll_event(timeout)? {
                self.handle_event(event, elapsed_ms(clock))?;
                if !self.running {
                    break;
                }
                timeout = Duration::ZERO;
            }
        }
        Ok(())
    }
}

impl Drop for Portfolio {
    fn drop(&mut self) {
        if self.typewriter.is_some() {
            self.unmount();
        }
    }
}

/// One presence slot per node, by preorder id.
fn presences(root: &Node, reduced: bool) -> Vec<Option<Presence>> {
    let mut out = Vec::with_capacity(root.count());
    root.walk(&mut |_, node| {
        out.push(node.motion.map(|m| Presence::new(m, reduced)));
    });
    out
}

fn elapsed_ms(clock: Instant) -> u64 {
    clock.elapsed().as_millis() as u64
}

// =============================================================================
// Entry points
// =============================================================================

/// Take over the terminal and run the page until the user quits.
///
/// The typewriter is torn down before the terminal is restored, on error
/// paths as well.
pub fn run(content: Content, settings: Settings) -> Result<()> {
    let size = TerminalSize::detect();
    let mut portfolio = Portfolio::new(content, settings, size.width(), size.height())?;

    let mut guard = TerminalGuard::enter()?;
    let mut renderer = DiffRenderer::new();
    let result = portfolio.event_loop(&mut renderer, Instant::now());

    portfolio.unmount();
    guard.restore();
    result
}

/// Render the page headlessly as it looks `at_ms` after mount.
///
/// A first frame at 0 places the page, so sections already on screen have
/// started their reveal by the time the second frame is painted.
pub fn render_snapshot(
    content: Content,
    settings: Settings,
    width: u16,
    height: u16,
    at_ms: u64,
) -> Result<String> {
    let mut portfolio = Portfolio::new(content, settings, width, height)?;
    portfolio.frame(0)?;
    let frame = portfolio.frame(at_ms)?;
    portfolio.unmount();
    Ok(to_plain_text(&frame.buffer))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::hologram::relative_position;
    use crate::state::keyboard::KeyboardEvent;

    fn setup() -> Portfolio {
        Portfolio::new(Content::embedded().unwrap(), Settings::default(), 100, 30).unwrap()
    }

    fn key(name: &str) -> InputEvent {
        InputEvent::Key(KeyboardEvent::new(name))
    }

    #[test]
    fn test_typewriter_follows_clock() {
        let mut portfolio = setup();
        portfolio.frame(0).unwrap();
        assert_eq!(portfolio.typed(), "");

        portfolio.frame(90).unwrap();
        assert_eq!(portfolio.typed(), "> I");
    }

    #[test]
    fn test_typewriter_completes_and_stops() {
        let mut portfolio = setup();
        let len = portfolio.typewriter().unwrap().len() as u64;
        portfolio.frame(len * 30 + 1_000).unwrap();

        let typewriter = portfolio.typewriter().unwrap();
        assert!(typewriter.is_complete());
        assert!(!typewriter.is_ticking());
        assert_eq!(portfolio.timers().active_count(), 0);
    }

    #[test]
    fn test_unmount_cancels_typewriter() {
        let mut portfolio = setup();
        portfolio.frame(60).unwrap();
        assert_eq!(portfolio.timers().active_count(), 1);

        portfolio.unmount();
        assert_eq!(portfolio.timers().active_count(), 0);
        assert!(portfolio.typewriter().is_none());
        assert!(!portfolio.is_running());
    }

    #[test]
    fn test_keys_scroll_and_quit() {
        let mut portfolio = setup();
        portfolio.frame(0).unwrap();

        portfolio.handle_event(key("j"), 0).unwrap();
        assert_eq!(portfolio.scroll_offset(), 1);
        portfolio.handle_event(key("G"), 0).unwrap();
        assert!(portfolio.scroll_offset() > 1);
        portfolio.handle_event(key("g"), 0).unwrap();
        assert_eq!(portfolio.scroll_offset(), 0);

        portfolio.handle_event(key("q"), 0).unwrap();
        assert!(!portfolio.is_running());
    }

    #[test]
    fn test_section_keys_jump_to_anchor() {
        let mut portfolio = setup();
        portfolio.frame(0).unwrap();
        let anchors = portfolio.page_layout().unwrap().root.anchors.clone();

        portfolio.handle_event(key("2"), 0).unwrap();
        assert_eq!(portfolio.scroll_offset(), anchors["projects"]);
    }

    #[test]
    fn test_wheel_scrolls_three_rows() {
        let mut portfolio = setup();
        portfolio.frame(0).unwrap();
        let wheel = MouseEvent::scroll(10, 10, ScrollDirection::Down);
        portfolio.handle_event(InputEvent::Mouse(wheel), 0).unwrap();
        assert_eq!(portfolio.scroll_offset(), 3);
    }

    #[test]
    fn test_external_link_sets_status() {
        let mut portfolio = setup();
        portfolio.follow("https://example.com").unwrap();
        assert_eq!(portfolio.status(), Some("↗ https://example.com"));
        assert_eq!(portfolio.scroll_offset(), 0);
    }

    #[test]
    fn test_pointer_moves_light_one_card() {
        let mut portfolio = setup();
        portfolio.handle_event(key("1"), 0).unwrap();
        let frame = portfolio.frame(0).unwrap();

        let rect = frame.card_rects[0].expect("featured card on screen");
        let (x, y) = ((rect.x + 2) as u16, (rect.y + 2) as u16);
        portfolio
            .handle_event(InputEvent::Mouse(MouseEvent::move_to(x, y)), 100)
            .unwrap();

        assert!(portfolio.cards()[0].is_hovered());
        assert!(portfolio.cards()[1..].iter().all(|c| !c.is_hovered()));

        portfolio.handle_event(InputEvent::FocusLost, 200).unwrap();
        assert!(!portfolio.cards()[0].is_hovered());
    }

    /// First cell routed to card `slot` in the last painted frame.
    fn card_cell(portfolio: &Portfolio, slot: usize) -> Option<(u16, u16)> {
        let (width, height) = (portfolio.size.width(), portfolio.size.height());
        (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .find(|&(x, y)| portfolio.hits.card_at(x, y) == Some(slot))
    }

    #[test]
    fn test_pointer_hands_glow_from_card_to_card() {
        let mut portfolio =
            Portfolio::new(Content::embedded().unwrap(), Settings::default(), 100, 80).unwrap();
        portfolio.handle_event(key("1"), 0).unwrap();

        // Scroll until the featured card and the first artifact share a frame.
        let mut now = 0;
        let (first, second) = loop {
            portfolio.frame(now).unwrap();
            if let (Some(a), Some(b)) = (card_cell(&portfolio, 0), card_cell(&portfolio, 1)) {
                break (a, b);
            }
            assert!(now < 30_000, "cards never on screen together");
            portfolio.handle_event(key("j"), now).unwrap();
            now += 100;
        };

        let start = now + 100;
        portfolio
            .handle_event(InputEvent::Mouse(MouseEvent::move_to(first.0, first.1)), start)
            .unwrap();
        let kept = portfolio.cards()[0].position();
        assert!(portfolio.cards()[0].is_hovered());

        let switch = start + 400;
        portfolio
            .handle_event(InputEvent::Mouse(MouseEvent::move_to(second.0, second.1)), switch)
            .unwrap();

        let rect = portfolio.card_rects[1].unwrap();
        let bounds = portfolio.metrics.bounds(rect.x, rect.y, rect.width, rect.height);
        let (cx, cy) = portfolio.metrics.cell_center(second.0 as i32, second.1 as i32);
        let expected = relative_position(cx, cy, &bounds);

        let cards = portfolio.cards();
        assert!(!cards[0].is_hovered());
        assert_eq!(cards[0].position(), kept);
        assert_eq!(cards[0].opacity(switch), 1.0);
        assert!(cards[0].opacity(switch + 150) < 1.0);
        assert_eq!(cards[0].opacity(switch + 300), 0.0);

        assert!(cards[1].is_hovered());
        assert_eq!(cards[1].position(), expected);
        assert_eq!(cards[1].opacity(switch), 0.0);
        assert!(cards[1].opacity(switch + 150) > 0.0);
        assert_eq!(cards[1].opacity(switch + 300), 1.0);

        assert!(cards[2..].iter().all(|c| !c.is_hovered()));
    }

    #[test]
    fn test_resize_relays_out() {
        let mut portfolio = setup();
        portfolio.frame(0).unwrap();
        portfolio
            .handle_event(InputEvent::Resize(60, 20), 0)
            .unwrap();
        let frame = portfolio.frame(16).unwrap();
        assert_eq!(frame.buffer.width(), 60);
        assert_eq!(frame.buffer.height(), 20);
    }

    #[test]
    fn test_snapshot_has_headline() {
        let text =
            render_snapshot(Content::embedded().unwrap(), Settings::default(), 100, 30, 0).unwrap();
        assert!(text.contains("BUILDING THE"));
        // The navigation is still above the screen at 0 ms.
        assert!(!text.contains("Amit Shah."));
        assert_eq!(text.lines().count(), 30);
    }
}
