// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use draggable_controller::{Bounds, EventTypes, InputSource, OptionSet};
use draggable_coords::SurfaceKind;
use kurbo::Point;

/// Where a diagram's clamping rectangle comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundsRule {
    /// Fixed for the diagram's lifetime.
    Static(Bounds),
    /// Recomputed before every move from the container's and element's live sizes,
    /// so the element stays inside its container across resizes.
    FitContainer,
}

/// Which starts a diagram accepts, before the controller's own option gating.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StartGate {
    /// Any start on the element.
    #[default]
    Anywhere,
    /// Only starts within `radius` (local units) of the position, for a drag
    /// handle drawn inside a larger surface.
    Handle {
        /// Handle radius.
        radius: f64,
    },
}

impl StartGate {
    /// Returns `true` if a pointer at `local` may start a drag of an element at `position`.
    #[must_use]
    pub fn admits(&self, position: Point, local: Point) -> bool {
        match *self {
            Self::Anywhere => true,
            Self::Handle { radius } => (local - position).length_squared() <= radius * radius,
        }
    }
}

/// When pointer capture is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CapturePolicy {
    /// On start, as governed by [`OptionSet::pointer_capture`].
    #[default]
    OnStart,
    /// On the first move of a drag. A click following a moved drag is
    /// suppressed, so a plain click on a link inside the element still
    /// follows the link while a drag does not.
    OnFirstMove,
}

/// Declarative description of one diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramConfig {
    /// Selector of the draggable element inside its figure.
    pub selector: String,
    /// How client coordinates map into the element's space.
    pub surface: SurfaceKind,
    /// Position at construction and on reset.
    pub initial: Point,
    /// Clamping rectangle.
    pub bounds: BoundsRule,
    /// Controller options.
    pub options: OptionSet,
    /// Event family.
    pub source: InputSource,
    /// Start gate.
    pub gate: StartGate,
    /// Capture timing.
    pub capture: CapturePolicy,
    /// Text drawn with the element, if any.
    pub label: Option<String>,
}

impl DiagramConfig {
    /// A diagram for `selector` with default options, unbounded, at the origin.
    #[must_use]
    pub fn new(selector: impl Into<String>, surface: SurfaceKind) -> Self {
        Self {
            selector: selector.into(),
            surface,
            initial: Point::ZERO,
            bounds: BoundsRule::Static(Bounds::UNBOUNDED),
            options: OptionSet::default(),
            source: InputSource::default(),
            gate: StartGate::default(),
            capture: CapturePolicy::default(),
            label: None,
        }
    }

    /// Sets static bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = BoundsRule::Static(bounds);
        self
    }

    /// Keeps the element inside its container.
    #[must_use]
    pub fn fit_container(mut self) -> Self {
        self.bounds = BoundsRule::FitContainer;
        self
    }

    /// Sets the initial position.
    #[must_use]
    pub fn with_initial(mut self, initial: Point) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the controller options.
    #[must_use]
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }

    /// Sets the event family.
    #[must_use]
    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    /// Restricts starts to a round handle of `radius` around the position.
    #[must_use]
    pub fn with_handle(mut self, radius: f64) -> Self {
        self.gate = StartGate::Handle { radius };
        self
    }

    /// Sets the capture policy.
    #[must_use]
    pub fn with_capture(mut self, capture: CapturePolicy) -> Self {
        self.capture = capture;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Radius of the drag handle, if starts are gated by one.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self.gate {
            StartGate::Handle { radius } => Some(radius),
            StartGate::Anywhere => None,
        }
    }

    /// Element events a diagram built from this config consumes.
    ///
    /// The controller's subscriptions, plus `click` for deferred capture,
    /// `touchstart` for the handle's scroll guard, and the capture
    /// notifications for pointer sources.
    #[must_use]
    pub fn subscriptions(&self) -> EventTypes {
        let mut types = self.options.subscriptions(self.source);
        if self.capture == CapturePolicy::OnFirstMove {
            types |= EventTypes::CLICK;
        }
        if self.radius().is_some() {
            types |= EventTypes::TOUCH_START;
        }
        if self.source == InputSource::Pointer {
            types |= EventTypes::GOT_POINTER_CAPTURE | EventTypes::LOST_POINTER_CAPTURE;
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use draggable_controller::{Bounds, EventTypes, InputSource};
    use draggable_coords::SurfaceKind;
    use kurbo::Point;

    use super::{BoundsRule, CapturePolicy, DiagramConfig, StartGate};

    #[test]
    fn handle_gate_admits_inside_radius_only() {
        let gate = StartGate::Handle { radius: 45.0 };
        let at = Point::new(100.0, 50.0);
        assert!(gate.admits(at, Point::new(100.0, 50.0)));
        assert!(gate.admits(at, Point::new(145.0, 50.0)), "edge counts");
        assert!(!gate.admits(at, Point::new(132.0, 82.0)));
        assert!(StartGate::Anywhere.admits(at, Point::new(1e6, 1e6)));
    }

    #[test]
    fn builder_sets_fields() {
        let config = DiagramConfig::new("svg circle", SurfaceKind::Vector)
            .with_bounds(Bounds::new(0.0, 0.0, 10.0, 10.0))
            .with_initial(Point::new(5.0, 5.0))
            .with_handle(3.0)
            .with_capture(CapturePolicy::OnFirstMove)
            .with_label("Drag me");
        assert_eq!(config.bounds, BoundsRule::Static(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(config.radius(), Some(3.0));
        assert_eq!(config.label.as_deref(), Some("Drag me"));
        assert_eq!(config.capture, CapturePolicy::OnFirstMove);

        let config = config.fit_container();
        assert_eq!(config.bounds, BoundsRule::FitContainer);
    }

    #[test]
    fn subscriptions_cover_diagram_behaviors() {
        let plain = DiagramConfig::new("div", SurfaceKind::Client);
        let types = plain.subscriptions();
        assert!(types.contains(EventTypes::POINTER_DOWN | EventTypes::GOT_POINTER_CAPTURE));
        assert!(!types.contains(EventTypes::CLICK));

        let deferred = plain.clone().with_capture(CapturePolicy::OnFirstMove);
        assert!(deferred.subscriptions().contains(EventTypes::CLICK));

        let mut options = plain.options;
        options.suppress_scroll = false;
        let handle = plain.clone().with_options(options).with_handle(10.0);
        assert!(handle.subscriptions().contains(EventTypes::TOUCH_START));

        let mouse = plain.with_source(InputSource::Mouse);
        assert!(!mouse.subscriptions().contains(EventTypes::GOT_POINTER_CAPTURE));
    }
}
