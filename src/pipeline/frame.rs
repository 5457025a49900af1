//! Frame painting - from a laid-out page to a FrameBuffer.
//!
//! Unlike the layout, a frame depends on the clock (typewriter, motion,
//! glow fades, pulses), so it is painted on demand rather than derived.
//! Painting collects hit regions and the screen rows of animated nodes as
//! data; the host applies them after the frame is drawn.
//!
//! Layers, bottom to top:
//!
//! ```text
//! background (screen space) → page (scrolled) → navigation (fixed) → status line
//! ```

use crate::layout::{ComputedLayout, LayoutRect, string_width, wrap_spans};
use crate::motion::{Presence, pulse_opacity};
use crate::primitives::{Node, NodeKind, TerminalProps, TextProps, span};
use crate::renderer::FrameBuffer;
use crate::state::hologram::{CellMetrics, HolographicCard};
use crate::state::mouse::HitRegion;
use crate::theme::Theme;
use crate::types::{Attr, ClipRect, TextAlign};
use crate::views::background::{Grid, paint_background};

use super::layout_derived::PageLayout;

/// Below this a node and its subtree are not drawn.
const INVISIBLE: f32 = 0.01;

// =============================================================================
// Types
// =============================================================================

/// Everything a frame is painted from.
pub struct FrameInputs<'a> {
    pub layout: &'a PageLayout,
    pub theme: &'a Theme,
    pub grid: Grid,
    pub metrics: CellMetrics,
    /// Page scroll offset in rows.
    pub scroll: u16,
    /// Milliseconds since mount.
    pub now: u64,
    /// Text the typewriter shows so far.
    pub typed: &'a str,
    /// Card state by hologram slot.
    pub cards: &'a [HolographicCard],
    /// Motion state of the page, by preorder id.
    pub page_motion: &'a [Option<Presence>],
    /// Motion state of the navigation, by preorder id.
    pub nav_motion: &'a [Option<Presence>],
    /// One-line message for the bottom row.
    pub status: Option<&'a str>,
}

/// Result of painting one frame.
#[derive(Debug, Clone)]
pub struct FrameResult {
    pub buffer: FrameBuffer,
    /// Pointer targets, later entries on top.
    pub hit_regions: Vec<HitRegion>,
    /// Screen rows `[top, bottom)` of each page node, by preorder id,
    /// before its own motion offset. `None` when the node was not reached.
    pub page_bounds: Vec<Option<(i32, i32)>>,
    /// Unclipped screen rect of each painted card, by hologram slot.
    pub card_rects: Vec<Option<LayoutRect>>,
}

/// Inherited drawing state.
#[derive(Debug, Clone, Copy)]
struct Context {
    dx: i32,
    dy: i32,
    opacity: f32,
    clip: ClipRect,
    /// Enclosing holographic card.
    card: Option<usize>,
    /// Screen row where the parent ends; sticky nodes stop here.
    parent_bottom: i32,
}

// =============================================================================
// Frame
// =============================================================================

/// Paint a full frame `width` x `height` cells.
pub fn paint_frame(inputs: &FrameInputs<'_>, width: u16, height: u16) -> FrameResult {
    let mut painter = Painter {
        inputs,
        buffer: FrameBuffer::new(width, height),
        hit_regions: Vec::new(),
        bounds: Vec::new(),
        card_rects: vec![None; inputs.cards.len()],
    };
    paint_background(&mut painter.buffer, inputs.theme, inputs.grid);

    let page = &inputs.layout.page;
    painter.paint_layer(
        &page.root,
        &inputs.layout.root,
        inputs.page_motion,
        inputs.scroll as i32,
        true,
    );
    painter.paint_layer(
        &page.overlay,
        &inputs.layout.overlay,
        inputs.nav_motion,
        0,
        false,
    );
    if let Some(status) = inputs.status {
        painter.paint_status(status);
    }

    FrameResult {
        buffer: painter.buffer,
        hit_regions: painter.hit_regions,
        page_bounds: painter.bounds,
        card_rects: painter.card_rects,
    }
}

struct Painter<'a> {
    inputs: &'a FrameInputs<'a>,
    buffer: FrameBuffer,
    hit_regions: Vec<HitRegion>,
    bounds: Vec<Option<(i32, i32)>>,
    card_rects: Vec<Option<LayoutRect>>,
}

/// One tree with its layout and motion, painted at a scroll offset.
struct Layer<'a> {
    layout: &'a ComputedLayout,
    motion: &'a [Option<Presence>],
    scroll: i32,
    track_bounds: bool,
}

impl Painter<'_> {
    fn paint_layer(
        &mut self,
        root: &Node,
        layout: &ComputedLayout,
        motion: &[Option<Presence>],
        scroll: i32,
        track_bounds: bool,
    ) {
        if track_bounds {
            self.bounds = vec![None; layout.rects.len()];
        }
        let layer = Layer {
            layout,
            motion,
            scroll,
            track_bounds,
        };
        let context = Context {
            dx: 0,
            dy: 0,
            opacity: 1.0,
            clip: self.buffer.bounds(),
            card: None,
            parent_bottom: i32::MAX,
        };
        let mut id = 0;
        self.paint_node(&layer, root, &mut id, context);
    }

    /// Paint `node` (preorder id `*id`) and its subtree.
    fn paint_node(&mut self, layer: &Layer<'_>, node: &Node, id: &mut usize, parent: Context) {
        let node_id = *id;
        let Some(rect) = layer.layout.rect(node_id) else {
            *id += node.count();
            return;
        };
        let mut context = parent;

        // Page position, then sticky.
        let mut screen = rect.offset(context.dx, context.dy - layer.scroll);
        if let Some(top) = node.sticky_top {
            let stuck = sticky_y(screen, top as i32, context.parent_bottom);
            context.dy += stuck - screen.y;
            screen.y = stuck;
        }
        if layer.track_bounds {
            if let Some(slot) = self.bounds.get_mut(node_id) {
                *slot = Some((screen.y, screen.bottom()));
            }
        }

        // Motion.
        if let Some(presence) = layer.motion.get(node_id).and_then(Option::as_ref) {
            let state = presence.sample(self.inputs.now);
            let (ox, oy) = state.offset_cells();
            context.dx += ox;
            context.dy += oy;
            context.opacity *= state.opacity;
            screen = screen.offset(ox, oy);
        }
        if context.opacity < INVISIBLE {
            *id += node.count();
            return;
        }

        *id += 1;
        let visible = visible_rect(&screen, &context.clip);
        match &node.kind {
            NodeKind::Box(props) => {
                let fade = context.opacity;
                if let Some(bg) = props.background {
                    self.buffer.fill_rect(
                        screen.x,
                        screen.y,
                        screen.width,
                        screen.height,
                        bg.fade(fade),
                        Some(&context.clip),
                    );
                }
                self.buffer.draw_border(
                    screen.x,
                    screen.y,
                    screen.width,
                    screen.height,
                    props.border,
                    props.border_color.fade(fade),
                    Some(&context.clip),
                );
            }
            NodeKind::Text(props) => self.paint_text(props, &screen, &context),
            NodeKind::Terminal(props) => self.paint_terminal(props, &screen, &context),
        }

        // The glow sits over the card's background, under its children.
        if let (Some(slot), Some(area)) = (node.hologram, visible) {
            self.paint_glow(slot, &screen, &area, context.opacity);
            if let Some(rect) = self.card_rects.get_mut(slot) {
                *rect = Some(screen);
            }
            self.hit_regions.push(HitRegion::card(area, slot));
            context.card = Some(slot);
            context.clip = area;
        }
        if let (Some(href), Some(area)) = (&node.href, visible) {
            self.hit_regions
                .push(HitRegion::link(area, href.as_str(), context.card));
        }

        context.parent_bottom = screen.bottom();
        for child in &node.children {
            self.paint_node(layer, child, id, context);
        }
    }

    fn paint_glow(&mut self, slot: usize, screen: &LayoutRect, area: &ClipRect, opacity: f32) {
        let Some(card) = self.inputs.cards.get(slot) else {
            return;
        };
        let now = self.inputs.now;
        if card.opacity(now) <= 0.0 {
            return;
        }
        let metrics = self.inputs.metrics;
        let (left, top) = (screen.x, screen.y);
        self.buffer.tint_bg(
            screen.x,
            screen.y,
            screen.width,
            screen.height,
            Some(area),
            |col, row| {
                let (px, py) = metrics.cell_center(col as i32 - left, row as i32 - top);
                card.glow_color(px, py, now).fade(opacity)
            },
        );
    }

    fn paint_text(&mut self, props: &TextProps, screen: &LayoutRect, context: &Context) {
        let mut fade = context.opacity;
        if props.pulse {
            fade *= pulse_opacity(self.inputs.now);
        }
        let lines = wrap_spans(&props.spans, props.wrap.then_some(screen.width));

        for (row, line) in lines.iter().enumerate().take(screen.height as usize) {
            let y = screen.y + row as i32;
            let mut x = screen.x + align_offset(props.align, screen.width, line.width);
            for fragment in &line.fragments {
                let Some(span) = props.spans.get(fragment.span) else {
                    continue;
                };
                let width = string_width(&fragment.text);
                self.buffer.draw_text_with(
                    x,
                    y,
                    &fragment.text,
                    span.attrs,
                    Some(&context.clip),
                    |col| span.fill.color_at(col, width).fade(fade),
                );
                x += width as i32;
            }
        }
    }

    /// The typewriter: whatever has been typed so far, then the caret.
    fn paint_terminal(&mut self, props: &TerminalProps, screen: &LayoutRect, context: &Context) {
        let color = props.color.fade(context.opacity);
        let typed = [span(self.inputs.typed, color).attrs(props.attrs)];
        let lines = wrap_spans(&typed, Some(screen.width));

        for (row, line) in lines.iter().enumerate() {
            self.buffer.draw_text(
                screen.x,
                screen.y + row as i32,
                &line.plain(),
                color,
                props.attrs,
                Some(&context.clip),
            );
        }

        let (mut caret_x, mut caret_row) = lines
            .last()
            .map_or((0, 0), |line| (line.width, lines.len() - 1));
        if caret_x >= screen.width {
            caret_x = 0;
            caret_row += 1;
        }
        let caret = props
            .color
            .fade(context.opacity * pulse_opacity(self.inputs.now));
        self.buffer.set_glyph(
            screen.x + caret_x as i32,
            screen.y + caret_row as i32,
            props.caret as u32,
            caret,
            props.attrs,
            Some(&context.clip),
        );
    }

    fn paint_status(&mut self, status: &str) {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        if height == 0 {
            return;
        }
        let theme = self.inputs.theme;
        let row = height as i32 - 1;
        self.buffer
            .fill_rect(0, row, width, 1, theme.surface_raised, None);
        self.buffer
            .draw_text(1, row, status, theme.text_muted, Attr::NONE, None);
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Row a sticky node is drawn on: held at `top` while its parent still
/// has room below, then carried off with the parent.
fn sticky_y(rect: LayoutRect, top: i32, parent_bottom: i32) -> i32 {
    let limit = parent_bottom.saturating_sub(rect.height as i32);
    rect.y.max(top.min(limit))
}

fn visible_rect(rect: &LayoutRect, clip: &ClipRect) -> Option<ClipRect> {
    ClipRect::from_signed(rect.x, rect.y, rect.width as i32, rect.height as i32)?.intersect(clip)
}

fn align_offset(align: TextAlign, width: u16, line_width: u16) -> i32 {
    let free = width.saturating_sub(line_width) as i32;
    match align {
        TextAlign::Left => 0,
        TextAlign::Center => free / 2,
        TextAlign::Right => free,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::motion::MotionDescriptor;
    use crate::pipeline::layout_derived::layout_page;
    use crate::primitives::{BoxProps, box_node, terminal_node, text_node};
    use crate::renderer::to_plain_text;
    use crate::state::hologram::GlowStyle;
    use crate::types::{Dimension, Rgba};
    use crate::views::{Page, build_page};

    const NO_GRID: Grid = Grid { cols: 0, rows: 0 };

    fn setup(root: Node) -> PageLayout {
        let page = Page {
            root,
            overlay: box_node(BoxProps::default(), vec![]),
            hologram_count: 0,
            typewriter_text: String::new(),
        };
        layout_page(page, 40).unwrap()
    }

    fn inputs<'a>(layout: &'a PageLayout, theme: &'a Theme) -> FrameInputs<'a> {
        FrameInputs {
            layout,
            theme,
            grid: NO_GRID,
            metrics: CellMetrics::default(),
            scroll: 0,
            now: 0,
            typed: "",
            cards: &[],
            page_motion: &[],
            nav_motion: &[],
            status: None,
        }
    }

    fn sized(height: u16, children: Vec<Node>) -> Node {
        box_node(
            BoxProps {
                height: Dimension::Cells(height),
                ..Default::default()
            },
            children,
        )
    }

    fn row_text(buffer: &FrameBuffer, row: usize) -> String {
        to_plain_text(buffer)
            .lines()
            .nth(row)
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_text_is_painted() {
        let theme = Theme::default();
        let layout = setup(sized(3, vec![text_node(vec![span("hello", Rgba::WHITE)])]));
        let frame = paint_frame(&inputs(&layout, &theme), 40, 5);
        assert_eq!(row_text(&frame.buffer, 0), "hello");
    }

    #[test]
    fn test_scroll_moves_page() {
        let theme = Theme::default();
        let root = box_node(
            BoxProps::default(),
            vec![
                text_node(vec![span("first", Rgba::WHITE)]),
                text_node(vec![span("second", Rgba::WHITE)]),
            ],
        );
        let layout = setup(root);
        let frame = paint_frame(
            &FrameInputs {
                scroll: 1,
                ..inputs(&layout, &theme)
            },
            40,
            5,
        );
        assert_eq!(row_text(&frame.buffer, 0), "second");
    }

    #[test]
    fn test_terminal_shows_typed_text_and_caret() {
        let theme = Theme::default();
        let layout = setup(sized(3, vec![terminal_node("> abc\n> def", Rgba::WHITE)]));
        let frame = paint_frame(
            &FrameInputs {
                typed: "> abc\n> d",
                ..inputs(&layout, &theme)
            },
            40,
            5,
        );
        assert_eq!(row_text(&frame.buffer, 0), "> abc");
        assert_eq!(row_text(&frame.buffer, 1), "> d_");
    }

    #[test]
    fn test_terminal_ignores_carriage_returns() {
        let theme = Theme::default();
        let layout = setup(sized(3, vec![terminal_node("> abc\r\n> def", Rgba::WHITE)]));
        let frame = paint_frame(
            &FrameInputs {
                typed: "> abc\r\n> d",
                ..inputs(&layout, &theme)
            },
            40,
            5,
        );
        assert_eq!(row_text(&frame.buffer, 0), "> abc");
        assert_eq!(row_text(&frame.buffer, 1), "> d_");
        assert!(!to_plain_text(&frame.buffer).contains('\r'));
    }

    #[test]
    fn test_empty_terminal_shows_only_caret() {
        let theme = Theme::default();
        let layout = setup(sized(3, vec![terminal_node("> abc", Rgba::WHITE)]));
        let frame = paint_frame(&inputs(&layout, &theme), 40, 5);
        assert_eq!(row_text(&frame.buffer, 0), "_");
    }

    #[test]
    fn test_hidden_motion_skips_subtree() {
        let theme = Theme::default();
        let root = sized(
            3,
            vec![
                text_node(vec![span("shy", Rgba::WHITE)])
                    .with_motion(MotionDescriptor::fade_scale(0.9, 1000)),
            ],
        );
        let layout = setup(root);
        let motion = vec![None, Some(Presence::new(MotionDescriptor::fade_scale(0.9, 1000), false))];
        let frame = paint_frame(
            &FrameInputs {
                page_motion: &motion,
                ..inputs(&layout, &theme)
            },
            40,
            5,
        );
        // Not entered yet: still at the initial, transparent state.
        assert_eq!(row_text(&frame.buffer, 0), "");
        assert_eq!(frame.page_bounds[1], Some((0, 1)));
    }

    #[test]
    fn test_sticky_node_holds_position() {
        let theme = Theme::default();
        let root = box_node(
            BoxProps::default(),
            vec![sized(
                20,
                vec![
                    text_node(vec![span("pinned", Rgba::WHITE)]).with_sticky_top(2),
                ],
            )],
        );
        let layout = setup(root);
        let frame = paint_frame(
            &FrameInputs {
                scroll: 5,
                ..inputs(&layout, &theme)
            },
            40,
            10,
        );
        assert_eq!(row_text(&frame.buffer, 2), "pinned");
        assert_eq!(frame.page_bounds[2], Some((2, 3)));
    }

    #[test]
    fn test_sticky_node_leaves_with_parent() {
        let parent = LayoutRect {
            x: 0,
            y: 0,
            width: 10,
            height: 3,
        };
        // Parent ends at row 4: a 3-row node can sit no lower than row 1.
        assert_eq!(sticky_y(parent.offset(0, -5), 6, 4), 1);
        // Below the sticky line it scrolls normally.
        assert_eq!(sticky_y(parent.offset(0, 9), 6, 40), 9);
    }

    #[test]
    fn test_cards_and_links_become_hit_regions() {
        let theme = Theme::default();
        let root = sized(
            6,
            vec![
                sized(4, vec![text_node(vec![span("go", Rgba::WHITE)]).with_href("#work")])
                    .with_hologram(0),
            ],
        );
        let layout = setup(root);
        let frame = paint_frame(&inputs(&layout, &theme), 40, 10);

        assert_eq!(frame.hit_regions.len(), 2);
        assert_eq!(frame.hit_regions[0].card, Some(0));
        assert_eq!(frame.hit_regions[1].href.as_deref(), Some("#work"));
        assert_eq!(frame.hit_regions[1].card, Some(0));
    }

    #[test]
    fn test_hovered_card_glows_under_pointer() {
        let theme = Theme::default();
        let layout = setup(sized(8, vec![sized(8, vec![]).with_hologram(0)]));
        let metrics = CellMetrics::default();

        let mut card = HolographicCard::new(GlowStyle::default());
        let bounds = metrics.bounds(0, 0, 40, 8);
        let (px, py) = metrics.cell_center(2, 2);
        card.on_pointer_move(px, py, &bounds, 0);
        let cards = [card];

        let frame = paint_frame(
            &FrameInputs {
                cards: &cards,
                now: 1_000,
                ..inputs(&layout, &theme)
            },
            40,
            8,
        );
        let near = frame.buffer.get(2, 2).unwrap().bg;
        let far = frame.buffer.get(39, 7).unwrap().bg;
        assert!(near.r > far.r, "near {near:?} far {far:?}");
    }

    #[test]
    fn test_full_page_frame() {
        let content = Content::embedded().unwrap();
        let theme = Theme::default();
        let layout = layout_page(build_page(&content, &theme, 30), 100).unwrap();
        let frame = paint_frame(
            &FrameInputs {
                status: Some("hello status"),
                ..inputs(&layout, &theme)
            },
            100,
            30,
        );
        let text = to_plain_text(&frame.buffer);
        assert!(text.contains("Amit Shah."));
        assert!(row_text(&frame.buffer, 29).contains("hello status"));
    }
}
