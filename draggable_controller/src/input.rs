// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-specific event records and their normalized form.
//!
//! Mouse, touch and pointer events carry their data in different shapes. The
//! controller only ever sees a [`PointerInput`]; [`RawEvent::normalize`] is
//! the single place where device differences are folded away.

use kurbo::Point;

bitflags::bitflags! {
    /// Set of mouse buttons currently held, in DOM `buttons` bit order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        /// Primary (usually left) button, or a touch/pen contact.
        const PRIMARY   = 1 << 0;
        /// Secondary (usually right) button.
        const SECONDARY = 1 << 1;
        /// Auxiliary (usually middle/wheel) button.
        const AUXILIARY = 1 << 2;
        /// Back button.
        const BACK      = 1 << 3;
        /// Forward button.
        const FORWARD   = 1 << 4;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CTRL  = 1 << 0;
        /// Shift key.
        const SHIFT = 1 << 1;
        /// Alt/Option key.
        const ALT   = 1 << 2;
        /// Meta/Command key.
        const META  = 1 << 3;
    }
}

/// The button whose state change triggered an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// DOM button `0`.
    Primary,
    /// DOM button `1`.
    Auxiliary,
    /// DOM button `2`.
    Secondary,
    /// DOM button `3`.
    Back,
    /// DOM button `4`.
    Forward,
    /// Any other non-negative DOM button code.
    Other(u8),
}

impl Button {
    /// Decodes a DOM `button` value. Negative values (pointer moves report `-1`) decode to `None`.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        Some(match code {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            3 => Self::Back,
            4 => Self::Forward,
            c if c < 0 => return None,
            c => Self::Other(u8::try_from(c).unwrap_or(u8::MAX)),
        })
    }

    /// The bit this button occupies in a [`Buttons`] set.
    #[must_use]
    pub fn mask(self) -> Buttons {
        match self {
            Self::Primary => Buttons::PRIMARY,
            Self::Auxiliary => Buttons::AUXILIARY,
            Self::Secondary => Buttons::SECONDARY,
            Self::Back => Buttons::BACK,
            Self::Forward => Buttons::FORWARD,
            Self::Other(_) => Buttons::empty(),
        }
    }
}

/// Identifier of a pointer or touch contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

/// Kind of device behind an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    Mouse,
    /// Stylus.
    Pen,
    /// Finger.
    Touch,
    /// Unreported or unrecognized.
    #[default]
    Unknown,
}

impl PointerKind {
    /// Decodes a DOM `pointerType` string.
    #[must_use]
    pub fn from_dom(name: &str) -> Self {
        match name {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Unknown,
        }
    }
}

/// A `MouseEvent`'s fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseLike {
    /// Client-space position.
    pub client: Point,
    /// DOM `button` code.
    pub button: i16,
    /// DOM `buttons` bit set.
    pub buttons: u16,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

/// One `Touch` from a `TouchEvent`'s changed touches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    /// Touch `identifier`.
    pub identifier: i32,
    /// Client-space position.
    pub client: Point,
    /// `true` for start/move, `false` for end/cancel.
    pub in_contact: bool,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

/// A `PointerEvent`'s fields.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerLike {
    /// `pointerId`.
    pub pointer_id: i32,
    /// `pointerType`.
    pub kind: PointerKind,
    /// Client-space position.
    pub client: Point,
    /// DOM `button` code, `-1` when no button changed.
    pub button: i16,
    /// DOM `buttons` bit set.
    pub buttons: u16,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

/// A device event before normalization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawEvent {
    /// Mouse event.
    Mouse(MouseLike),
    /// Touch event (one changed touch).
    Touch(TouchPoint),
    /// Pointer event.
    Pointer(PointerLike),
}

impl RawEvent {
    /// Folds device-specific fields into a [`PointerInput`].
    ///
    /// - Mouse events carry no pointer id.
    /// - A touch acts as the primary button, held while in contact, and uses
    ///   the touch identifier as its pointer id.
    #[must_use]
    pub fn normalize(&self) -> PointerInput {
        match *self {
            Self::Mouse(m) => PointerInput {
                client: m.client,
                buttons: Buttons::from_bits_truncate(m.buttons),
                button: Button::from_dom(m.button),
                pointer_id: None,
                modifiers: m.modifiers,
                kind: PointerKind::Mouse,
            },
            Self::Touch(t) => PointerInput {
                client: t.client,
                buttons: if t.in_contact {
                    Buttons::PRIMARY
                } else {
                    Buttons::empty()
                },
                button: Some(Button::Primary),
                pointer_id: Some(PointerId(t.identifier)),
                modifiers: t.modifiers,
                kind: PointerKind::Touch,
            },
            Self::Pointer(p) => PointerInput {
                client: p.client,
                buttons: Buttons::from_bits_truncate(p.buttons),
                button: Button::from_dom(p.button),
                pointer_id: Some(PointerId(p.pointer_id)),
                modifiers: p.modifiers,
                kind: p.kind,
            },
        }
    }
}

impl From<RawEvent> for PointerInput {
    fn from(raw: RawEvent) -> Self {
        raw.normalize()
    }
}

/// Device-agnostic event record consumed by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Client-space position.
    pub client: Point,
    /// Buttons held after this event.
    pub buttons: Buttons,
    /// Button that changed, if any.
    pub button: Option<Button>,
    /// Pointer or touch id; `None` for mouse events.
    pub pointer_id: Option<PointerId>,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Device kind.
    pub kind: PointerKind,
}

impl PointerInput {
    /// A primary-button press at `client` from pointer `id`.
    ///
    /// Handy for tests and synthetic input.
    #[must_use]
    pub fn primary(client: Point, id: i32) -> Self {
        Self {
            client,
            buttons: Buttons::PRIMARY,
            button: Some(Button::Primary),
            pointer_id: Some(PointerId(id)),
            modifiers: Modifiers::empty(),
            kind: PointerKind::Mouse,
        }
    }

    /// Returns `true` if ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

macro_rules! event_types {
    ($($variant:ident => $flag:ident, $name:literal;)*) => {
        /// Platform events the controller knows how to consume.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum EventType {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )*
        }

        bitflags::bitflags! {
            /// A set of [`EventType`]s, used to describe listener subscriptions.
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
            pub struct EventTypes: u32 {
                $(
                    #[doc = concat!("`", $name, "`")]
                    const $flag = 1 << (EventType::$variant as u32);
                )*
            }
        }

        impl EventType {
            /// All event types, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// The DOM event name.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// The bit for this event type.
            #[must_use]
            pub fn flag(self) -> EventTypes {
                match self {
                    $(Self::$variant => EventTypes::$flag,)*
                }
            }
        }
    };
}

event_types! {
    PointerDown => POINTER_DOWN, "pointerdown";
    PointerUp => POINTER_UP, "pointerup";
    PointerCancel => POINTER_CANCEL, "pointercancel";
    PointerMove => POINTER_MOVE, "pointermove";
    GotPointerCapture => GOT_POINTER_CAPTURE, "gotpointercapture";
    LostPointerCapture => LOST_POINTER_CAPTURE, "lostpointercapture";
    MouseDown => MOUSE_DOWN, "mousedown";
    MouseUp => MOUSE_UP, "mouseup";
    MouseMove => MOUSE_MOVE, "mousemove";
    TouchStart => TOUCH_START, "touchstart";
    TouchEnd => TOUCH_END, "touchend";
    TouchCancel => TOUCH_CANCEL, "touchcancel";
    TouchMove => TOUCH_MOVE, "touchmove";
    Click => CLICK, "click";
    ContextMenu => CONTEXT_MENU, "contextmenu";
    NativeDragStart => NATIVE_DRAG_START, "dragstart";
}

impl EventTypes {
    /// Iterates the [`EventType`]s contained in this set.
    pub fn types(self) -> impl Iterator<Item = EventType> {
        EventType::ALL
            .iter()
            .copied()
            .filter(move |ty| self.contains(ty.flag()))
    }
}

/// An event delivered to a controller: what happened, and where.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    /// Event type.
    pub ty: EventType,
    /// Normalized event data.
    pub input: PointerInput,
}

impl DragEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(ty: EventType, input: PointerInput) -> Self {
        Self { ty, input }
    }

    /// Creates an event from a raw device record.
    #[must_use]
    pub fn from_raw(ty: EventType, raw: &RawEvent) -> Self {
        Self {
            ty,
            input: raw.normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    #[test]
    fn dom_button_codes_decode() {
        assert_eq!(Button::from_dom(0), Some(Button::Primary));
        assert_eq!(Button::from_dom(2), Some(Button::Secondary));
        assert_eq!(Button::from_dom(-1), None);
        assert_eq!(Button::from_dom(9), Some(Button::Other(9)));
        assert_eq!(Button::Secondary.mask(), Buttons::SECONDARY);
        assert_eq!(Button::Auxiliary.mask(), Buttons::AUXILIARY);
    }

    #[test]
    fn mouse_has_no_pointer_id() {
        let raw = RawEvent::Mouse(MouseLike {
            client: Point::new(1.0, 2.0),
            button: 0,
            buttons: 1,
            modifiers: Modifiers::CTRL,
        });
        let input = raw.normalize();
        assert_eq!(input.pointer_id, None);
        assert_eq!(input.button, Some(Button::Primary));
        assert_eq!(input.buttons, Buttons::PRIMARY);
        assert!(input.ctrl());
        assert_eq!(input.kind, PointerKind::Mouse);
    }

    #[test]
    fn touch_acts_as_primary_while_in_contact() {
        let down = RawEvent::Touch(TouchPoint {
            identifier: 3,
            client: Point::new(5.0, 5.0),
            in_contact: true,
            modifiers: Modifiers::empty(),
        });
        let input = PointerInput::from(down);
        assert_eq!(input.pointer_id, Some(PointerId(3)));
        assert_eq!(input.button, Some(Button::Primary));
        assert_eq!(input.buttons, Buttons::PRIMARY);

        let up = RawEvent::Touch(TouchPoint {
            in_contact: false,
            ..TouchPoint::default()
        });
        assert!(up.normalize().buttons.is_empty());
    }

    #[test]
    fn pointer_move_has_no_changed_button() {
        let raw = RawEvent::Pointer(PointerLike {
            pointer_id: 7,
            kind: PointerKind::from_dom("pen"),
            client: Point::ZERO,
            button: -1,
            buttons: 0b11,
            modifiers: Modifiers::empty(),
        });
        let input = raw.normalize();
        assert_eq!(input.button, None);
        assert_eq!(input.buttons, Buttons::PRIMARY | Buttons::SECONDARY);
        assert_eq!(input.pointer_id, Some(PointerId(7)));
        assert_eq!(input.kind, PointerKind::Pen);
    }

    #[test]
    fn unknown_button_bits_are_dropped() {
        let raw = RawEvent::Mouse(MouseLike {
            buttons: 0b1000_0001,
            ..MouseLike::default()
        });
        assert_eq!(raw.normalize().buttons, Buttons::PRIMARY);
    }

    #[test]
    fn event_type_flags_are_distinct() {
        let mut all = EventTypes::empty();
        for ty in EventType::ALL {
            assert!(!all.contains(ty.flag()), "{} shares a bit", ty.name());
            all |= ty.flag();
        }
        assert_eq!(all.types().count(), EventType::ALL.len());
    }

    #[test]
    fn event_names_match_dom() {
        assert_eq!(EventType::PointerDown.name(), "pointerdown");
        assert_eq!(EventType::LostPointerCapture.name(), "lostpointercapture");
        assert_eq!(EventType::NativeDragStart.name(), "dragstart");
    }
}
