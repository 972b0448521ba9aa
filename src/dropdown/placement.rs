//! Panel placement relative to the trigger.

/// Gap between the trigger and the panel, in pixels.
pub const PANEL_GAP: f32 = 4.0;

/// A rectangle in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns whether the point lies inside the rectangle.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Where the open panel is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelPlacement {
    /// Below the trigger inside the container, scrolling with the page.
    Inline {
        /// Offset from the container's top edge.
        top: f32,
    },
    /// Pinned to window coordinates; used inside modal overlays, which
    /// clip content laid out in the normal flow.
    Fixed { x: f32, y: f32, width: f32 },
}

impl PanelPlacement {
    /// Computes the placement from the trigger's current bounds.
    pub fn compute(trigger: Rect, in_overlay: bool) -> Self {
        if in_overlay {
            PanelPlacement::Fixed {
                x: trigger.x,
                y: trigger.bottom() + PANEL_GAP,
                width: trigger.width,
            }
        } else {
            PanelPlacement::Inline {
                top: trigger.height + PANEL_GAP,
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, PanelPlacement::Fixed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_uses_window_coordinates() {
        let trigger = Rect::new(120.0, 80.0, 240.0, 32.0);
        assert_eq!(
            PanelPlacement::compute(trigger, true),
            PanelPlacement::Fixed {
                x: 120.0,
                y: 116.0,
                width: 240.0
            }
        );
    }

    #[test]
    fn normal_flow_is_relative_to_container() {
        let trigger = Rect::new(120.0, 80.0, 240.0, 32.0);
        let placement = PanelPlacement::compute(trigger, false);
        assert_eq!(placement, PanelPlacement::Inline { top: 36.0 });
        assert!(!placement.is_fixed());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.9, 9.9));
        assert!(!rect.contains(10.0, 5.0));
        assert!(!rect.contains(-1.0, 5.0));
    }
}
