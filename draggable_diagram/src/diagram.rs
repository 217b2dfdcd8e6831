// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use draggable_controller::{
    Bounds, DragController, DragEvent, DragHost, EventResponse, EventRole, EventType, Handled,
    InputSource, PointerId, Position, Transition,
};
use kurbo::{Point, Size};
use tracing::trace;

use crate::config::{BoundsRule, CapturePolicy, DiagramConfig, StartGate};

/// Mouse cursor shown over a diagram element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// The platform default.
    #[default]
    Default,
    /// Over a handle that can be dragged.
    Grab,
    /// While dragging.
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value; empty for [`Cursor::Default`], which clears the inline style.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Live layout sizes used by [`BoundsRule::FitContainer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerLayout {
    /// Size of the element's container.
    pub container: Size,
    /// Size of the element.
    pub element: Size,
}

/// Platform services a [`Diagram`] needs beyond the controller's.
pub trait DiagramHost: DragHost {
    /// Current container and element sizes, queried fresh on each call.
    fn layout(&self) -> Option<ContainerLayout>;

    /// Sets the element's cursor.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// What a draw callback gets to see.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// Current position.
    pub position: Point,
    /// Whether a drag is active.
    pub dragging: bool,
}

/// One draggable element bound to one drag controller.
///
/// The diagram owns the controller and a draw callback. It adds the
/// per-diagram behaviors that sit around the controller: container-fitted
/// bounds, a start gate for handles, deferred capture with click
/// suppression, and cursor feedback.
pub struct Diagram<L = ()> {
    config: DiagramConfig,
    controller: DragController<L>,
    draw: Box<dyn FnMut(&DrawState)>,
    moved: bool,
    deferred_capture: Option<PointerId>,
}

impl<L> fmt::Debug for Diagram<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("config", &self.config)
            .field("position", &self.controller.position())
            .field("dragging", &self.controller.is_dragging())
            .field("moved", &self.moved)
            .field("deferred_capture", &self.deferred_capture)
            .finish_non_exhaustive()
    }
}

impl<L> Diagram<L> {
    /// Creates a diagram and draws it once at its initial position.
    pub fn new(config: DiagramConfig, draw: impl FnMut(&DrawState) + 'static) -> Self {
        let bounds = match config.bounds {
            BoundsRule::Static(bounds) => bounds,
            BoundsRule::FitContainer => Bounds::UNBOUNDED,
        };
        let controller = DragController::new(
            config.options,
            config.source,
            Position::new(config.initial, bounds),
        );
        let mut diagram = Self {
            config,
            controller,
            draw: Box::new(draw),
            moved: false,
            deferred_capture: None,
        };
        diagram.redraw();
        diagram
    }

    /// The diagram's configuration.
    #[must_use]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// The underlying controller.
    #[must_use]
    pub fn controller(&self) -> &DragController<L> {
        &self.controller
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.controller.position()
    }

    /// Returns `true` while dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Invokes the draw callback with the current state.
    pub fn redraw(&mut self) {
        let state = DrawState {
            position: self.controller.position(),
            dragging: self.controller.is_dragging(),
        };
        (self.draw)(&state);
    }

    /// Moves back to the initial position and redraws.
    pub fn reset(&mut self) {
        self.controller.set_position(self.config.initial);
        self.redraw();
    }

    /// Recomputes container-fitted bounds from the host's layout.
    ///
    /// Does nothing for static bounds or when the host has no layout.
    pub fn refresh_bounds<H>(&mut self, host: &H)
    where
        H: DiagramHost<Listeners = L>,
    {
        if self.config.bounds != BoundsRule::FitContainer {
            return;
        }
        if let Some(layout) = host.layout() {
            self.controller
                .set_bounds(Bounds::fit_container(layout.container, layout.element));
        }
    }

    /// Ends any active drag, for example before detaching from the page.
    pub fn cancel<H>(&mut self, host: &mut H)
    where
        H: DiagramHost<Listeners = L>,
    {
        if self.controller.cancel(host).is_some() {
            self.release_deferred(host);
            self.redraw();
        }
    }

    /// Handles one platform event and redraws if anything changed.
    pub fn handle<H>(&mut self, host: &mut H, event: &DragEvent) -> Handled
    where
        H: DiagramHost<Listeners = L>,
    {
        let role = self.config.source.role(event.ty);
        let handle = matches!(self.config.gate, StartGate::Handle { .. });
        let over_handle = handle.then(|| self.over_handle(host, event));
        let mut extra = EventResponse::empty();

        match (role, event.ty) {
            (Some(EventRole::Start), _) if over_handle == Some(false) => {
                trace!("start outside the drag handle ignored");
                return self.touch_guard(event, over_handle, Handled::default());
            }
            (Some(EventRole::Start), _) => self.moved = false,
            (Some(EventRole::Move), _) if self.controller.is_dragging() => {
                self.refresh_bounds(host);
            }
            (None, EventType::Click)
                if self.config.capture == CapturePolicy::OnFirstMove && self.moved =>
            {
                extra |= EventResponse::PREVENT_DEFAULT;
            }
            _ => {}
        }

        let mut handled = self.controller.handle(host, event);
        handled.response |= extra;

        if handled.moved && self.controller.is_dragging() {
            if !self.moved {
                self.defer_capture(host, event);
            }
            self.moved = true;
        }

        if let Some(Transition::Ended(_)) = handled.transition {
            self.release_deferred(host);
        }
        if handle {
            let cursor = match (over_handle, self.controller.is_dragging()) {
                (_, true) => Cursor::Grabbing,
                (Some(true), false) => Cursor::Grab,
                _ => Cursor::Default,
            };
            if role.is_some() {
                host.set_cursor(cursor);
            }
        }
        if handled.needs_draw() {
            self.redraw();
        }
        self.touch_guard(event, over_handle, handled)
    }

    fn over_handle<H>(&self, host: &H, event: &DragEvent) -> bool
    where
        H: DiagramHost<Listeners = L>,
    {
        host.map_to_local(&event.input)
            .is_ok_and(|local| self.config.gate.admits(self.controller.position(), local))
    }

    /// Handle diagrams keep page scrolling outside the handle: the touch start
    /// is only prevented over the handle or while dragging.
    fn touch_guard(
        &self,
        event: &DragEvent,
        over_handle: Option<bool>,
        mut handled: Handled,
    ) -> Handled {
        let Some(over) = over_handle else {
            return handled;
        };
        if event.ty == EventType::TouchStart && (over || self.controller.is_dragging()) {
            handled.response |= EventResponse::PREVENT_DEFAULT;
        }
        handled
    }

    /// Captures on the first real move of a drag, for pointer sources only.
    fn defer_capture<H>(&mut self, host: &mut H, event: &DragEvent)
    where
        H: DiagramHost<Listeners = L>,
    {
        if self.config.capture != CapturePolicy::OnFirstMove
            || self.config.source != InputSource::Pointer
        {
            return;
        }
        if let Some(id) = event.input.pointer_id {
            host.set_pointer_capture(id);
            self.deferred_capture = Some(id);
        }
    }

    fn release_deferred<H>(&mut self, host: &mut H)
    where
        H: DiagramHost<Listeners = L>,
    {
        if let Some(id) = self.deferred_capture.take() {
            host.release_pointer_capture(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use draggable_controller::{
        Buttons, DragEvent, EventResponse, EventType, InputSource, OptionSet, PointerId,
        PointerInput, Transition,
    };
    use draggable_coords::{CoordinateMapper, StaticGeometry, SurfaceKind};
    use kurbo::{Affine, Point, Rect, Size};

    use super::{ContainerLayout, Cursor, Diagram};
    use crate::config::DiagramConfig;
    use crate::headless::{DocumentListeners, HeadlessHost};
    use crate::presets;

    fn canvas_host() -> HeadlessHost<&'static str> {
        let mut geometry = StaticGeometry::new();
        geometry.insert("canvas", None, Affine::IDENTITY);
        geometry.set_client_rect("canvas", Rect::new(0.0, 0.0, 500.0, 75.0));
        geometry.set_backing_size("canvas", Size::new(1000.0, 150.0));
        HeadlessHost::new(geometry, "canvas", CoordinateMapper::new(SurfaceKind::Raster))
    }

    fn div_host(container_width: f64) -> HeadlessHost<&'static str> {
        let mut host = HeadlessHost::new(
            StaticGeometry::new(),
            "div",
            CoordinateMapper::new(SurfaceKind::Client),
        );
        host.layout = Some(ContainerLayout {
            container: Size::new(container_width, 100.0),
            element: Size::new(50.0, 20.0),
        });
        host
    }

    fn ev(ty: EventType, x: f64, y: f64) -> DragEvent {
        DragEvent::new(ty, PointerInput::primary(Point::new(x, y), 1))
    }

    fn counted(config: DiagramConfig) -> (Diagram<DocumentListeners>, Rc<Cell<usize>>) {
        let draws = Rc::new(Cell::new(0));
        let counter = draws.clone();
        let diagram = Diagram::new(config, move |_| counter.set(counter.get() + 1));
        (diagram, draws)
    }

    #[test]
    fn draws_once_on_creation_and_on_changes() {
        let mut host = div_host(500.0);
        let (mut diagram, draws) = counted(presets::div_positioned());
        assert_eq!(draws.get(), 1, "initial draw");

        diagram.handle(&mut host, &ev(EventType::PointerDown, 10.0, 10.0));
        assert_eq!(draws.get(), 2, "start redraws");
        diagram.handle(&mut host, &ev(EventType::PointerMove, 30.0, 20.0));
        assert_eq!(draws.get(), 3, "move redraws");
        assert_eq!(diagram.position(), Point::new(20.0, 10.0));

        diagram.handle(&mut host, &ev(EventType::PointerMove, 30.0, 20.0));
        assert_eq!(draws.get(), 3, "no change, no redraw");

        diagram.reset();
        assert_eq!(diagram.position(), Point::ZERO);
        assert_eq!(draws.get(), 4, "reset redraws");
    }

    #[test]
    fn handle_gate_and_cursor() {
        let mut host = canvas_host();
        let (mut diagram, _) = counted(presets::canvas_handle());
        assert_eq!(diagram.position(), Point::new(46.0, 46.0), "initial clamps");

        // Client (100, 50) is raster (200, 100): far from the handle.
        let handled = diagram.handle(&mut host, &ev(EventType::PointerDown, 100.0, 50.0));
        assert!(!diagram.is_dragging());
        assert_eq!(handled.transition, None);
        assert_eq!(host.state().captured, None);

        // Raster (50, 50): on the handle.
        diagram.handle(&mut host, &ev(EventType::PointerDown, 25.0, 25.0));
        assert!(diagram.is_dragging());
        assert_eq!(host.state().cursor, Cursor::Grabbing);
        assert_eq!(host.state().captured, Some(PointerId(1)));

        diagram.handle(&mut host, &ev(EventType::PointerMove, 50.0, 30.0));
        assert_eq!(diagram.position(), Point::new(96.0, 56.0), "offset kept");
        assert_eq!(host.state().cursor, Cursor::Grabbing);

        let handled = diagram.handle(&mut host, &ev(EventType::PointerUp, 50.0, 30.0));
        assert!(matches!(handled.transition, Some(Transition::Ended(_))));
        assert_eq!(host.state().cursor, Cursor::Grab, "still over the handle");
        assert_eq!(host.state().captured, None);

        diagram.handle(&mut host, &ev(EventType::PointerMove, 400.0, 70.0));
        assert_eq!(host.state().cursor, Cursor::Default);
    }

    #[test]
    fn handle_touch_start_prevented_only_over_handle() {
        let mut host = canvas_host();
        let (mut diagram, _) = counted(presets::canvas_handle());

        let away = diagram.handle(&mut host, &ev(EventType::TouchStart, 100.0, 50.0));
        assert!(!away.response.contains(EventResponse::PREVENT_DEFAULT));

        let over = diagram.handle(&mut host, &ev(EventType::TouchStart, 25.0, 25.0));
        assert!(over.response.contains(EventResponse::PREVENT_DEFAULT));
    }

    #[test]
    fn deferred_capture_suppresses_click_after_drag() {
        let mut host = div_host(500.0);
        let (mut diagram, _) = counted(presets::div_link_click_wins());

        // A plain click follows the link.
        diagram.handle(&mut host, &ev(EventType::PointerDown, 10.0, 10.0));
        assert_eq!(host.state().captured, None, "no capture on start");
        diagram.handle(&mut host, &ev(EventType::PointerUp, 10.0, 10.0));
        let click = diagram.handle(&mut host, &ev(EventType::Click, 10.0, 10.0));
        assert!(!click.response.contains(EventResponse::PREVENT_DEFAULT));

        // A drag captures on its first move and swallows the click.
        diagram.handle(&mut host, &ev(EventType::PointerDown, 10.0, 10.0));
        diagram.handle(&mut host, &ev(EventType::PointerMove, 600.0, 50.0));
        assert_eq!(host.state().captured, Some(PointerId(1)));
        assert_eq!(diagram.position(), Point::new(450.0, 40.0), "fitted bounds");
        diagram.handle(&mut host, &ev(EventType::PointerUp, 600.0, 50.0));
        assert_eq!(host.state().captured, None, "released on end");
        let click = diagram.handle(&mut host, &ev(EventType::Click, 600.0, 50.0));
        assert!(click.response.contains(EventResponse::PREVENT_DEFAULT));
    }

    #[test]
    fn click_after_drag_that_never_moved_goes_through() {
        let mut host = div_host(500.0);
        let (mut diagram, _) = counted(presets::div_link_click_wins());

        diagram.handle(&mut host, &ev(EventType::PointerDown, 10.0, 10.0));
        // The button was released outside the page: chord loss ends the drag.
        let mut lost = ev(EventType::PointerMove, 80.0, 10.0);
        lost.input.buttons = Buttons::empty();
        let handled = diagram.handle(&mut host, &lost);
        assert!(matches!(handled.transition, Some(Transition::Ended(_))));
        assert_eq!(diagram.position(), Point::ZERO);
        assert_eq!(host.state().captured, None, "no capture for a move that did nothing");

        let click = diagram.handle(&mut host, &ev(EventType::Click, 80.0, 10.0));
        assert!(!click.response.contains(EventResponse::PREVENT_DEFAULT));
    }

    #[test]
    fn touch_source_defers_no_capture() {
        let mut host = div_host(500.0);
        let config = presets::div_link_click_wins().with_source(InputSource::Touch);
        let (mut diagram, _) = counted(config);

        diagram.handle(&mut host, &ev(EventType::TouchStart, 10.0, 10.0));
        diagram.handle(&mut host, &ev(EventType::TouchMove, 60.0, 10.0));
        assert_eq!(diagram.position(), Point::new(50.0, 0.0));
        assert_eq!(host.state().captured, None);
    }

    #[test]
    fn tracked_finger_ends_drag_when_lifted_with_another() {
        let mut host = div_host(500.0);
        let config = presets::div_positioned().with_source(InputSource::Touch);
        let options = OptionSet {
            pointer_id_tracking: true,
            ..config.options
        };
        let (mut diagram, _) = counted(config.with_options(options));
        let touch = |ty, x, id| DragEvent::new(ty, PointerInput::primary(Point::new(x, 10.0), id));

        diagram.handle(&mut host, &touch(EventType::TouchStart, 10.0, 0));
        assert!(diagram.is_dragging());

        // Both fingers lift in one frame; the other finger's touch comes first.
        let h = diagram.handle(&mut host, &touch(EventType::TouchEnd, 80.0, 1));
        assert_eq!(h.transition, None);
        assert!(diagram.is_dragging(), "another finger cannot end the drag");
        diagram.handle(&mut host, &touch(EventType::TouchEnd, 10.0, 0));
        assert!(!diagram.is_dragging(), "the tracked finger ends the drag");
        assert_eq!(host.live_document_listeners(), 0);
    }

    #[test]
    fn fitted_bounds_follow_layout() {
        let mut host = div_host(500.0);
        let (mut diagram, _) = counted(presets::div_transformed());
        diagram.handle(&mut host, &ev(EventType::PointerDown, 0.0, 0.0));
        diagram.handle(&mut host, &ev(EventType::PointerMove, 1000.0, 0.0));
        assert_eq!(diagram.position(), Point::new(450.0, 0.0));

        host.layout = Some(ContainerLayout {
            container: Size::new(300.0, 100.0),
            element: Size::new(50.0, 20.0),
        });
        diagram.handle(&mut host, &ev(EventType::PointerMove, 1000.0, 0.0));
        assert_eq!(diagram.position(), Point::new(250.0, 0.0));
    }

    #[test]
    fn cancel_releases_everything() {
        let mut host = div_host(500.0);
        let config = DiagramConfig::new("div", SurfaceKind::Client)
            .with_source(InputSource::MouseGlobal);
        let (mut diagram, draws) = counted(config);

        let mouse = PointerInput {
            pointer_id: None,
            ..PointerInput::primary(Point::new(5.0, 5.0), 0)
        };
        diagram.handle(&mut host, &DragEvent::new(EventType::MouseDown, mouse));
        assert!(diagram.is_dragging());
        assert_eq!(host.live_document_listeners(), 1);
        assert!(!host.state().text_selection);

        let before = draws.get();
        diagram.cancel(&mut host);
        assert!(!diagram.is_dragging());
        assert_eq!(host.live_document_listeners(), 0);
        assert!(host.state().text_selection);
        assert_eq!(draws.get(), before + 1, "cancel redraws");

        diagram.cancel(&mut host);
        assert_eq!(draws.get(), before + 1, "idle cancel is a no-op");
    }
}
