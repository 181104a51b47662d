//! Pixel geometry of the stat overlay.
//!
//! Everything here is a pure function of the measured viewport rect and the
//! static anchor list, so the overlay can be recomputed every frame.

use bevy::math::Vec2;
use pp_utils::ViewportRect;

/// Upward lift of each connector's control point, in pixels.
pub const CONNECTOR_LIFT_PX: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorSpec {
    pub id: &'static str,
    pub left_percent: f32,
    pub top_percent: f32,
}

pub const STAT_ANCHORS: [AnchorSpec; 4] = [
    AnchorSpec {
        id: "head",
        left_percent: 50.0,
        top_percent: 8.0,
    },
    AnchorSpec {
        id: "chest",
        left_percent: 72.0,
        top_percent: 40.0,
    },
    AnchorSpec {
        id: "shoulder",
        left_percent: 18.0,
        top_percent: 40.0,
    },
    AnchorSpec {
        id: "knee",
        left_percent: 50.0,
        top_percent: 78.0,
    },
];

/// Quadratic curve from the viewport center to a card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Connector {
    pub start: Vec2,
    pub control: Vec2,
    pub end: Vec2,
}

impl Connector {
    pub fn between(start: Vec2, end: Vec2, lift: f32) -> Self {
        let mid = (start + end) * 0.5;
        Self {
            start,
            control: Vec2::new(mid.x, mid.y - lift),
            end,
        }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.start * (u * u) + self.control * (2.0 * u * t) + self.end * (t * t)
    }

    pub fn offset(&self, by: Vec2) -> Self {
        Self {
            start: self.start + by,
            control: self.control + by,
            end: self.end + by,
        }
    }

    /// SVG path data, `M x0 y0 Q cx cy x1 y1`.
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCard {
    pub id: &'static str,
    /// Where the card's center goes.
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    /// Viewport rect the layout was computed for.
    pub rect: ViewportRect,
    pub center: Vec2,
    pub cards: Vec<PlacedCard>,
    pub connectors: Vec<Connector>,
}

impl OverlayLayout {
    /// Translation from viewport-local to screen coordinates.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.rect.left, self.rect.top)
    }

    pub fn card(&self, id: &str) -> Option<&PlacedCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn is_degenerate(&self) -> bool {
        !self.rect.has_area()
    }
}

pub fn layout(rect: &ViewportRect, anchors: &[AnchorSpec]) -> OverlayLayout {
    layout_with_lift(rect, anchors, CONNECTOR_LIFT_PX)
}

/// Card positions and connectors for `anchors` inside `rect`.
///
/// A rect without visible area yields all-zero geometry, one entry per anchor.
pub fn layout_with_lift(rect: &ViewportRect, anchors: &[AnchorSpec], lift: f32) -> OverlayLayout {
    if !rect.has_area() {
        return OverlayLayout {
            rect: *rect,
            center: Vec2::ZERO,
            cards: anchors
                .iter()
                .map(|a| PlacedCard {
                    id: a.id,
                    position: Vec2::ZERO,
                })
                .collect(),
            connectors: vec![Connector::default(); anchors.len()],
        };
    }

    let center = Vec2::new(rect.width / 2.0, rect.height / 2.0);
    let cards: Vec<PlacedCard> = anchors
        .iter()
        .map(|a| PlacedCard {
            id: a.id,
            position: Vec2::new(
                a.left_percent / 100.0 * rect.width,
                a.top_percent / 100.0 * rect.height,
            ),
        })
        .collect();
    let connectors = cards
        .iter()
        .map(|card| Connector::between(center, card.position, lift))
        .collect();

    OverlayLayout {
        rect: *rect,
        center,
        cards,
        connectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(width: f32, height: f32) -> ViewportRect {
        ViewportRect::new(width, height, 0.0, 0.0)
    }

    #[test]
    fn card_position_is_percentage_of_rect() {
        let anchors = [AnchorSpec {
            id: "head",
            left_percent: 50.0,
            top_percent: 8.0,
        }];
        let out = layout(&rect(400.0, 800.0), &anchors);
        assert_eq!(out.cards[0].position, Vec2::new(200.0, 64.0));
        assert_eq!(out.center, Vec2::new(200.0, 400.0));
    }

    #[test]
    fn follows_latest_rect_after_resize() {
        let anchors = [AnchorSpec {
            id: "mid",
            left_percent: 50.0,
            top_percent: 50.0,
        }];
        let first = layout(&rect(400.0, 800.0), &anchors);
        let second = layout(&rect(800.0, 400.0), &anchors);
        assert_eq!(first.cards[0].position, Vec2::new(200.0, 400.0));
        assert_eq!(second.cards[0].position, Vec2::new(400.0, 200.0));
        assert_eq!(second.connectors[0].end, Vec2::new(400.0, 200.0));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let r = ViewportRect::new(913.5, 611.25, 400.0, 20.0);
        let a = layout(&r, &STAT_ANCHORS);
        let b = layout(&r, &STAT_ANCHORS);
        assert_eq!(a, b);
        for (x, y) in a.connectors.iter().zip(&b.connectors) {
            assert_eq!(x.control.x.to_bits(), y.control.x.to_bits());
            assert_eq!(x.control.y.to_bits(), y.control.y.to_bits());
        }
    }

    #[test]
    fn connector_control_point_is_lifted_midpoint() {
        let out = layout(&rect(400.0, 800.0), &STAT_ANCHORS);
        let head = &out.connectors[0];
        assert_eq!(head.start, Vec2::new(200.0, 400.0));
        assert_eq!(head.end, Vec2::new(200.0, 64.0));
        assert_eq!(head.control, Vec2::new(200.0, 232.0 - CONNECTOR_LIFT_PX));

        let knee = &out.connectors[3];
        assert_eq!(knee.end, Vec2::new(200.0, 624.0));
        assert_eq!(knee.control, Vec2::new(200.0, 512.0 - CONNECTOR_LIFT_PX));
    }

    #[test]
    fn curve_passes_through_endpoints_and_bows_upward() {
        let c = Connector::between(Vec2::new(0.0, 100.0), Vec2::new(100.0, 100.0), 30.0);
        assert_eq!(c.point_at(0.0), c.start);
        assert_eq!(c.point_at(1.0), c.end);
        let mid = c.point_at(0.5);
        assert_eq!(mid.x, 50.0);
        assert!(mid.y < 100.0);
    }

    #[test]
    fn zero_area_rect_gives_zero_geometry() {
        for r in [rect(0.0, 0.0), rect(0.0, 500.0), rect(500.0, 0.0), rect(-5.0, 10.0)] {
            let out = layout(&r, &STAT_ANCHORS);
            assert!(out.is_degenerate());
            assert_eq!(out.center, Vec2::ZERO);
            assert_eq!(out.cards.len(), STAT_ANCHORS.len());
            assert!(out.cards.iter().all(|c| c.position == Vec2::ZERO));
            assert!(out.connectors.iter().all(|c| *c == Connector::default()));
        }
    }

    #[test]
    fn anchor_order_and_ids_are_preserved() {
        let out = layout(&rect(1000.0, 1000.0), &STAT_ANCHORS);
        let ids: Vec<_> = out.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, ["head", "chest", "shoulder", "knee"]);
        assert_eq!(out.card("chest").unwrap().position, Vec2::new(720.0, 400.0));
        assert_eq!(out.card("shoulder").unwrap().position, Vec2::new(180.0, 400.0));
    }

    #[test]
    fn origin_offsets_to_screen_space() {
        let r = ViewportRect::new(400.0, 800.0, 400.0, 20.0);
        let out = layout(&r, &STAT_ANCHORS);
        assert_eq!(out.cards[0].position, Vec2::new(200.0, 64.0));
        let screen = out.connectors[0].offset(out.origin());
        assert_eq!(screen.end, Vec2::new(600.0, 84.0));
    }

    #[test]
    fn svg_path_lists_endpoints_and_control() {
        let c = Connector::between(Vec2::new(200.0, 400.0), Vec2::new(200.0, 64.0), 30.0);
        assert_eq!(c.svg_path(), "M 200 400 Q 200 202 200 64");
    }
}
