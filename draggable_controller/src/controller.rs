// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag state machine.
//!
//! ## Usage
//!
//! 1) Build a [`DragController`] with an [`OptionSet`], an [`InputSource`]
//!    and a clamped [`Position`].
//! 2) Subscribe the element to [`OptionSet::subscriptions`].
//! 3) Feed every received event to [`DragController::handle`] together with
//!    the element's [`DragHost`], then apply the returned [`EventResponse`]
//!    and redraw if [`Handled::moved`] or a [`Transition`] happened.

use kurbo::{Point, Vec2};
use tracing::{debug, trace};

use crate::bounds::{Bounds, Position};
use crate::host::{DragHost, EventResponse};
use crate::input::{Button, DragEvent, EventType, PointerInput};
use crate::options::{InputSource, OptionSet};
use crate::session::DragSession;

/// Why a drag ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The button or contact was released.
    Released,
    /// The platform cancelled the interaction.
    Cancelled,
    /// A move arrived without the originating button held.
    ChordLost,
    /// The platform took pointer capture away.
    CaptureLost,
    /// A new start replaced a session whose end was never observed.
    Superseded,
    /// [`DragController::cancel`] was called.
    Aborted,
}

/// A change of drag state caused by an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Idle → Dragging.
    Started,
    /// Dragging → Idle.
    Ended(EndReason),
}

/// Result of handling one event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Handled {
    /// State change, if any.
    pub transition: Option<Transition>,
    /// `true` if the position changed.
    pub moved: bool,
    /// What to do with the platform event.
    pub response: EventResponse,
}

impl Handled {
    /// Returns `true` if the caller should redraw.
    #[must_use]
    pub fn needs_draw(&self) -> bool {
        self.moved || self.transition.is_some()
    }
}

/// What an event means to a controller driven by a given [`InputSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventRole {
    /// Begins a drag.
    Start,
    /// Moves the pointer.
    Move,
    /// Ends a drag.
    End(EndReason),
    /// Pointer capture was taken away.
    CaptureLost,
}

impl InputSource {
    /// Classifies `ty` for this source. Events of other families have no role.
    #[must_use]
    pub fn role(self, ty: EventType) -> Option<EventRole> {
        use EventType as E;
        match (self, ty) {
            (_, E::LostPointerCapture) => Some(EventRole::CaptureLost),
            (Self::Pointer, E::PointerDown)
            | (Self::Mouse | Self::MouseGlobal, E::MouseDown)
            | (Self::Touch, E::TouchStart) => Some(EventRole::Start),
            (Self::Pointer, E::PointerMove)
            | (Self::Mouse | Self::MouseGlobal, E::MouseMove)
            | (Self::Touch, E::TouchMove) => Some(EventRole::Move),
            (Self::Pointer, E::PointerUp)
            | (Self::Mouse | Self::MouseGlobal, E::MouseUp)
            | (Self::Touch, E::TouchEnd) => Some(EventRole::End(EndReason::Released)),
            (Self::Pointer, E::PointerCancel) | (Self::Touch, E::TouchCancel) => {
                Some(EventRole::End(EndReason::Cancelled))
            }
            _ => None,
        }
    }
}

/// Option-driven drag state machine for one element.
///
/// Owns the element's [`Position`] and, while dragging, its
/// [`DragSession`]. `L` is the host's document-listener handle type.
///
/// ```
/// use draggable_controller::{
///     Bounds, DragController, DragEvent, DragHost, EventType, InputSource, OptionSet,
///     PointerId, PointerInput, Position,
/// };
/// use draggable_coords::MapError;
/// use kurbo::Point;
///
/// struct Host;
/// impl DragHost for Host {
///     type Listeners = ();
///     fn map_to_local(&self, input: &PointerInput) -> Result<Point, MapError> {
///         Ok(input.client)
///     }
///     fn set_pointer_capture(&mut self, _: PointerId) {}
///     fn release_pointer_capture(&mut self, _: PointerId) {}
///     fn set_text_selection(&mut self, _: bool) {}
///     fn set_dragging_class(&mut self, _: bool) {}
///     fn listen_document(&mut self) {}
/// }
///
/// let bounds = Bounds::new(-300.0, -20.0, 300.0, 20.0);
/// let mut drag = DragController::new(
///     OptionSet::default(),
///     InputSource::Pointer,
///     Position::new(Point::ZERO, bounds),
/// );
///
/// let down = PointerInput::primary(Point::new(10.0, 5.0), 1);
/// drag.handle(&mut Host, &DragEvent::new(EventType::PointerDown, down));
///
/// let moved = PointerInput::primary(Point::new(400.0, 5.0), 1);
/// drag.handle(&mut Host, &DragEvent::new(EventType::PointerMove, moved));
/// assert_eq!(drag.position(), Point::new(300.0, 0.0));
/// ```
#[derive(Debug)]
pub struct DragController<L = ()> {
    options: OptionSet,
    source: InputSource,
    position: Position,
    session: Option<DragSession<L>>,
}

impl<L> DragController<L> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(options: OptionSet, source: InputSource, position: Position) -> Self {
        Self {
            options,
            source,
            position,
            session: None,
        }
    }

    /// The controller's options.
    #[must_use]
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// The event family driving this controller.
    #[must_use]
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// Current bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.position.bounds()
    }

    /// Writes the position, clamped. Returns `true` if it changed.
    pub fn set_position(&mut self, p: Point) -> bool {
        self.position.set(p)
    }

    /// Replaces the bounds, re-clamping the position. Returns `true` if it moved.
    pub fn set_bounds(&mut self, bounds: Bounds) -> bool {
        self.position.set_bounds(bounds)
    }

    /// Returns `true` while a drag session exists.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if dragging.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<L>> {
        self.session.as_ref()
    }

    /// Handles one platform event.
    ///
    /// Events that do not apply in the current state are no-ops.
    pub fn handle<H>(&mut self, host: &mut H, event: &DragEvent) -> Handled
    where
        H: DragHost<Listeners = L>,
    {
        let mut handled = Handled::default();
        let options = self.options;

        match event.ty {
            EventType::TouchStart if options.suppress_scroll => {
                handled.response |= EventResponse::PREVENT_DEFAULT;
            }
            EventType::NativeDragStart if options.suppress_native_drag => {
                handled.response |= EventResponse::PREVENT_DEFAULT;
            }
            EventType::ContextMenu if options.suppress_context_menu => {
                handled.response |= EventResponse::PREVENT_DEFAULT;
            }
            _ => {}
        }

        match self.source.role(event.ty) {
            Some(EventRole::Start) => self.start(host, &event.input, &mut handled),
            Some(EventRole::Move) => self.drag_to(host, &event.input, &mut handled),
            Some(EventRole::End(reason)) => {
                if self.owns(&event.input) {
                    handled.transition = self.finish(host, reason);
                } else if self.session.is_some() {
                    trace!(ty = event.ty.name(), "end from another pointer ignored");
                }
            }
            Some(EventRole::CaptureLost) => {
                if self.owns(&event.input) {
                    handled.transition = self.finish(host, EndReason::CaptureLost);
                }
            }
            None => {}
        }
        handled
    }

    /// Ends any active drag without a platform event (for example, on detach).
    pub fn cancel<H>(&mut self, host: &mut H) -> Option<Transition>
    where
        H: DragHost<Listeners = L>,
    {
        self.finish(host, EndReason::Aborted)
    }

    fn owns(&self, input: &PointerInput) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.accepts(input.pointer_id))
    }

    fn start<H>(&mut self, host: &mut H, input: &PointerInput, handled: &mut Handled)
    where
        H: DragHost<Listeners = L>,
    {
        let options = self.options;
        if options.left_button_only && input.button != Some(Button::Primary) {
            trace!(button = ?input.button, "start ignored: not the primary button");
            return;
        }
        if options.ignore_ctrl && input.ctrl() {
            trace!("start ignored: ctrl held");
            return;
        }
        if options.stop_propagation {
            handled.response |= EventResponse::STOP_PROPAGATION;
        }
        if let Some(session) = &self.session {
            if !session.accepts(input.pointer_id) {
                trace!(pointer = ?input.pointer_id, "start ignored: another pointer is dragging");
                return;
            }
        }

        let local = match host.map_to_local(input) {
            Ok(local) => local,
            Err(err) => {
                trace!(%err, "start ignored: pointer could not be mapped");
                return;
            }
        };

        if self.session.is_some() {
            // The previous end was never delivered.
            self.finish(host, EndReason::Superseded);
        }

        let offset = options
            .offset_tracking
            .then(|| self.position.get() - local);
        let pointer_id = if options.pointer_id_tracking {
            input.pointer_id
        } else {
            None
        };
        if options.dragging_class {
            host.set_dragging_class(true);
        }
        // Touch identifiers are not pointer ids; only pointer events can capture.
        let captured = if options.pointer_capture && self.source == InputSource::Pointer {
            input.pointer_id
        } else {
            None
        };
        if let Some(id) = captured {
            host.set_pointer_capture(id);
        }
        if options.suppress_text_selection {
            host.set_text_selection(false);
        }
        let listeners =
            (self.source == InputSource::MouseGlobal).then(|| host.listen_document());

        debug!(?local, ?offset, pointer = ?input.pointer_id, "drag started");
        self.session = Some(DragSession {
            offset,
            pointer_id,
            captured,
            button: input.button.unwrap_or(Button::Primary),
            start: local,
            listeners,
        });
        handled.transition = Some(Transition::Started);
    }

    fn drag_to<H>(&mut self, host: &mut H, input: &PointerInput, handled: &mut Handled)
    where
        H: DragHost<Listeners = L>,
    {
        let options = self.options;
        let Some(session) = &self.session else {
            return;
        };
        if !session.accepts(input.pointer_id) {
            trace!(pointer = ?input.pointer_id, "move from another pointer ignored");
            return;
        }
        if options.stop_propagation {
            handled.response |= EventResponse::STOP_PROPAGATION;
        }
        if options.chord_checking && !input.buttons.contains(session.button.mask()) {
            handled.transition = self.finish(host, EndReason::ChordLost);
            return;
        }
        let offset = session.offset.unwrap_or(Vec2::ZERO);

        match host.map_to_local(input) {
            Ok(local) => handled.moved = self.position.set(local + offset),
            Err(err) => trace!(%err, "move ignored: pointer could not be mapped"),
        }
    }

    fn finish<H>(&mut self, host: &mut H, reason: EndReason) -> Option<Transition>
    where
        H: DragHost<Listeners = L>,
    {
        let session = self.session.take()?;
        if self.options.dragging_class {
            host.set_dragging_class(false);
        }
        if self.options.suppress_text_selection {
            host.set_text_selection(true);
        }
        if let Some(id) = session.captured {
            if reason != EndReason::CaptureLost {
                host.release_pointer_capture(id);
            }
        }
        debug!(?reason, position = ?self.position.get(), "drag ended");
        // Dropping the session drops any document listeners it holds.
        drop(session);
        Some(Transition::Ended(reason))
    }
}
