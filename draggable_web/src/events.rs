// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM events to controller input.

use alloc::vec;
use alloc::vec::Vec;

use draggable_controller::{
    EventResponse, EventType, Modifiers, MouseLike, PointerKind, PointerLike, RawEvent, TouchPoint,
};
use kurbo::Point;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent};

fn modifiers(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Modifiers {
    let mut m = Modifiers::empty();
    m.set(Modifiers::CTRL, ctrl);
    m.set(Modifiers::SHIFT, shift);
    m.set(Modifiers::ALT, alt);
    m.set(Modifiers::META, meta);
    m
}

fn mouse_like(e: &MouseEvent) -> MouseLike {
    MouseLike {
        client: Point::new(f64::from(e.client_x()), f64::from(e.client_y())),
        button: e.button(),
        buttons: e.buttons(),
        modifiers: modifiers(e.ctrl_key(), e.shift_key(), e.alt_key(), e.meta_key()),
    }
}

/// Reads a DOM event into [`RawEvent`]s.
///
/// A touch event yields one record per changed touch, so a tracked finger is
/// seen even when other fingers change in the same frame. Events that carry
/// no position yield nothing.
pub(crate) fn raw_events(ty: EventType, event: &Event) -> Vec<RawEvent> {
    if let Some(e) = event.dyn_ref::<PointerEvent>() {
        let m = mouse_like(e);
        return vec![RawEvent::Pointer(PointerLike {
            pointer_id: e.pointer_id(),
            kind: PointerKind::from_dom(&e.pointer_type()),
            client: m.client,
            button: m.button,
            buttons: m.buttons,
            modifiers: m.modifiers,
        })];
    }
    if let Some(e) = event.dyn_ref::<MouseEvent>() {
        return vec![RawEvent::Mouse(mouse_like(e))];
    }
    let Some(e) = event.dyn_ref::<TouchEvent>() else {
        return Vec::new();
    };
    let in_contact = matches!(ty, EventType::TouchStart | EventType::TouchMove);
    let mods = modifiers(e.ctrl_key(), e.shift_key(), e.alt_key(), e.meta_key());
    let touches = e.changed_touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|touch| {
            RawEvent::Touch(TouchPoint {
                identifier: touch.identifier(),
                client: Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())),
                in_contact,
                modifiers: mods,
            })
        })
        .collect()
}

/// Applies a handler's response to the DOM event.
pub(crate) fn apply(event: &Event, response: EventResponse) {
    if response.contains(EventResponse::PREVENT_DEFAULT) {
        event.prevent_default();
    }
    if response.contains(EventResponse::STOP_PROPAGATION) {
        event.stop_propagation();
    }
}
