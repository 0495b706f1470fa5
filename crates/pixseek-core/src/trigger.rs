//! Viewport proximity trigger.
//!
//! A sentinel sits at the end of the rendered gallery. The trigger reports
//! when that sentinel comes within `margin` of the visible area, so the next
//! page can be requested before the user actually reaches the bottom.

use tracing::trace;

use crate::domain::SessionId;

/// Default look-ahead distance, in pixels for browser-like hosts.
pub const DEFAULT_MARGIN: f64 = 200.0;

/// Scroll geometry of the gallery, in host units (pixels, terminal rows...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Distance scrolled from the top of the content.
    pub offset: f64,
    /// Visible height.
    pub height: f64,
    /// Height of everything rendered so far; the sentinel sits here.
    pub content_height: f64,
}

impl Viewport {
    /// Creates a viewport description.
    #[must_use]
    pub const fn new(offset: f64, height: f64, content_height: f64) -> Self {
        Self {
            offset,
            height,
            content_height,
        }
    }

    /// Distance between the bottom edge of the view and the sentinel.
    ///
    /// Negative once the sentinel is inside the visible area.
    #[must_use]
    pub fn distance_to_end(&self) -> f64 {
        self.content_height - (self.offset + self.height)
    }

    /// True when the sentinel is within `margin` of the view.
    #[must_use]
    pub fn is_near_end(&self, margin: f64) -> bool {
        self.distance_to_end() <= margin
    }
}

/// Edge-triggered observer of the end-of-content sentinel.
///
/// Fires once per transition into the margin and re-arms only after the
/// sentinel has left it again, either by scrolling up or because new content
/// pushed it further down. One trigger belongs to one search session and must
/// be disconnected when the session is superseded.
#[derive(Debug)]
pub struct ProximityTrigger {
    session: SessionId,
    margin: f64,
    near: bool,
    connected: bool,
}

impl ProximityTrigger {
    /// Starts observing for `session`.
    #[must_use]
    pub const fn new(session: SessionId, margin: f64) -> Self {
        Self {
            session,
            margin,
            near: false,
            connected: true,
        }
    }

    /// Session this trigger was created for.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Look-ahead distance.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Whether the trigger is still observing.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feeds new geometry; returns true if the sentinel just came near.
    pub fn observe(&mut self, viewport: Viewport) -> bool {
        if !self.connected {
            return false;
        }
        let near = viewport.is_near_end(self.margin);
        let fired = near && !self.near;
        self.near = near;
        if fired {
            trace!(
                "Proximity trigger fired for session {} ({:.0} from end)",
                self.session,
                viewport.distance_to_end()
            );
        }
        fired
    }

    /// Stops observing; later geometry never fires.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.near = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> ProximityTrigger {
        ProximityTrigger::new(SessionId::default(), 200.0)
    }

    #[test]
    fn test_distance_to_end() {
        let viewport = Viewport::new(100.0, 800.0, 1500.0);
        assert!((viewport.distance_to_end() - 600.0).abs() < f64::EPSILON);
        assert!(!viewport.is_near_end(200.0));
        assert!(viewport.is_near_end(600.0));
    }

    #[test]
    fn test_fires_inside_margin_before_true_end() {
        let mut trigger = trigger();
        // 150 away from the end: not visible yet but inside the margin.
        assert!(trigger.observe(Viewport::new(550.0, 800.0, 1500.0)));
    }

    #[test]
    fn test_does_not_fire_outside_margin() {
        let mut trigger = trigger();
        assert!(!trigger.observe(Viewport::new(0.0, 800.0, 1500.0)));
    }

    #[test]
    fn test_edge_triggered_not_level_triggered() {
        let mut trigger = trigger();
        assert!(trigger.observe(Viewport::new(600.0, 800.0, 1500.0)));
        assert!(!trigger.observe(Viewport::new(650.0, 800.0, 1500.0)));
        assert!(!trigger.observe(Viewport::new(700.0, 800.0, 1500.0)));
    }

    #[test]
    fn test_rearms_when_content_grows() {
        let mut trigger = trigger();
        assert!(trigger.observe(Viewport::new(700.0, 800.0, 1500.0)));
        // A page was appended: the sentinel moved away.
        assert!(!trigger.observe(Viewport::new(700.0, 800.0, 3000.0)));
        assert!(trigger.observe(Viewport::new(2100.0, 800.0, 3000.0)));
    }

    #[test]
    fn test_rearms_after_scrolling_up() {
        let mut trigger = trigger();
        assert!(trigger.observe(Viewport::new(700.0, 800.0, 1500.0)));
        assert!(!trigger.observe(Viewport::new(0.0, 800.0, 1500.0)));
        assert!(trigger.observe(Viewport::new(700.0, 800.0, 1500.0)));
    }

    #[test]
    fn test_disconnected_never_fires() {
        let mut trigger = trigger();
        trigger.disconnect();
        assert!(!trigger.is_connected());
        assert!(!trigger.observe(Viewport::new(700.0, 800.0, 1500.0)));
    }

    #[test]
    fn test_short_content_fires_immediately() {
        let mut trigger = trigger();
        assert!(trigger.observe(Viewport::new(0.0, 800.0, 300.0)));
    }
}
