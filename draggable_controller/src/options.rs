// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-controller behavior toggles.
//!
//! Each field of [`OptionSet`] switches one independent piece of drag
//! handling on or off. Fields are positive statements of the behavior that is
//! performed ("ignore ctrl", "suppress scroll"); flag strings parsed by
//! [`OptionSet::from_str`](core::str::FromStr::from_str) use short names
//! (`noctrl`, `noscroll`) instead.
//!
//! ```
//! use draggable_controller::OptionSet;
//!
//! let options: OptionSet = "capture offset left pointerid".parse().unwrap();
//! assert!(options.pointer_capture);
//! assert!(options.pointer_id_tracking);
//! assert!(!options.ignore_ctrl);
//! assert_eq!(options.to_string(), "left capture offset pointerid");
//! ```

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::input::EventTypes;

/// Which event family drives a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum InputSource {
    /// `pointerdown`/`pointermove`/`pointerup`/`pointercancel` on the element.
    #[default]
    Pointer,
    /// `mousedown`/`mousemove`/`mouseup` on the element.
    Mouse,
    /// `mousedown` on the element; `mousemove`/`mouseup` on the document, only while dragging.
    MouseGlobal,
    /// `touchstart`/`touchmove`/`touchend`/`touchcancel` on the element.
    Touch,
}

/// Independent boolean toggles read by every handler.
///
/// By default left-button-only, ignore ctrl, offset tracking, pointer capture, and the text-selection, scroll and
/// native-drag suppressions are on; everything else is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct OptionSet {
    /// Reject a start not triggered by the primary button.
    pub left_button_only: bool,
    /// Reject a start while ctrl is held (ctrl+click is a context click on macOS).
    pub ignore_ctrl: bool,
    /// Stop propagation of start and move events, for nested draggables.
    pub stop_propagation: bool,
    /// Keep the pointer-to-position offset from the start; otherwise snap to the pointer.
    pub offset_tracking: bool,
    /// Capture the pointer on start. Only the pointer event family can capture.
    pub pointer_capture: bool,
    /// Ignore moves and ends from any pointer but the one that started the drag.
    pub pointer_id_tracking: bool,
    /// Disable text selection on the element while dragging.
    pub suppress_text_selection: bool,
    /// Prevent default on `touchstart` so touch drags do not scroll the page.
    pub suppress_scroll: bool,
    /// Prevent default on `dragstart` so the platform drag-and-drop does not engage.
    pub suppress_native_drag: bool,
    /// Prevent default on `contextmenu`, for right-button dragging.
    pub suppress_context_menu: bool,
    /// End the drag on a move that no longer holds the originating button.
    pub chord_checking: bool,
    /// Toggle a `dragging` class on the element while dragging.
    pub dragging_class: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            left_button_only: true,
            ignore_ctrl: true,
            stop_propagation: false,
            offset_tracking: true,
            pointer_capture: true,
            pointer_id_tracking: false,
            suppress_text_selection: true,
            suppress_scroll: true,
            suppress_native_drag: true,
            suppress_context_menu: false,
            chord_checking: false,
            dragging_class: false,
        }
    }
}

/// Flag names in display order.
const FLAG_NAMES: [&str; 12] = [
    "class",
    "left",
    "noctrl",
    "nopropagate",
    "capture",
    "offset",
    "pointerid",
    "noselect",
    "noscroll",
    "nosystemdrag",
    "nocontextmenu",
    "chords",
];

impl OptionSet {
    /// Every option disabled: the position simply follows the pointer.
    pub const NONE: Self = Self {
        left_button_only: false,
        ignore_ctrl: false,
        stop_propagation: false,
        offset_tracking: false,
        pointer_capture: false,
        pointer_id_tracking: false,
        suppress_text_selection: false,
        suppress_scroll: false,
        suppress_native_drag: false,
        suppress_context_menu: false,
        chord_checking: false,
        dragging_class: false,
    };

    /// Every option enabled.
    pub const ALL: Self = Self {
        left_button_only: true,
        ignore_ctrl: true,
        stop_propagation: true,
        offset_tracking: true,
        pointer_capture: true,
        pointer_id_tracking: true,
        suppress_text_selection: true,
        suppress_scroll: true,
        suppress_native_drag: true,
        suppress_context_menu: true,
        chord_checking: true,
        dragging_class: true,
    };

    /// Returns `true` if the named flag is enabled, `None` for an unknown name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        let mut copy = *self;
        copy.field_mut(name).map(|field| *field)
    }

    /// Sets the named flag. Returns `false` for an unknown name.
    pub fn set_flag(&mut self, name: &str, enabled: bool) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                *field = enabled;
                true
            }
            None => false,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut bool> {
        Some(match name {
            "class" => &mut self.dragging_class,
            "left" => &mut self.left_button_only,
            "noctrl" => &mut self.ignore_ctrl,
            "nopropagate" => &mut self.stop_propagation,
            "capture" => &mut self.pointer_capture,
            "offset" => &mut self.offset_tracking,
            "pointerid" => &mut self.pointer_id_tracking,
            "noselect" => &mut self.suppress_text_selection,
            "noscroll" => &mut self.suppress_scroll,
            "nosystemdrag" => &mut self.suppress_native_drag,
            "nocontextmenu" => &mut self.suppress_context_menu,
            "chords" | "chord" => &mut self.chord_checking,
            _ => return None,
        })
    }

    /// Element listener subscriptions needed for `source` under these options.
    ///
    /// For [`InputSource::MouseGlobal`], the move/up listeners live on the
    /// document and are listed by [`OptionSet::document_subscriptions`].
    #[must_use]
    pub fn subscriptions(&self, source: InputSource) -> EventTypes {
        let mut types = match source {
            InputSource::Pointer => {
                EventTypes::POINTER_DOWN
                    | EventTypes::POINTER_UP
                    | EventTypes::POINTER_CANCEL
                    | EventTypes::POINTER_MOVE
            }
            InputSource::Mouse => {
                EventTypes::MOUSE_DOWN | EventTypes::MOUSE_UP | EventTypes::MOUSE_MOVE
            }
            InputSource::MouseGlobal => EventTypes::MOUSE_DOWN,
            InputSource::Touch => {
                EventTypes::TOUCH_START
                    | EventTypes::TOUCH_MOVE
                    | EventTypes::TOUCH_END
                    | EventTypes::TOUCH_CANCEL
            }
        };
        if self.pointer_capture && source == InputSource::Pointer {
            types |= EventTypes::LOST_POINTER_CAPTURE;
        }
        if self.suppress_scroll {
            types |= EventTypes::TOUCH_START;
        }
        if self.suppress_native_drag {
            types |= EventTypes::NATIVE_DRAG_START;
        }
        if self.suppress_context_menu {
            types |= EventTypes::CONTEXT_MENU;
        }
        types
    }

    /// Document listener subscriptions held only while dragging.
    #[must_use]
    pub fn document_subscriptions(source: InputSource) -> EventTypes {
        match source {
            InputSource::MouseGlobal => EventTypes::MOUSE_MOVE | EventTypes::MOUSE_UP,
            _ => EventTypes::empty(),
        }
    }
}

/// Error from parsing an [`OptionSet`] flag list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptionsError {
    /// The flag name that was not recognized.
    pub name: String,
}

impl fmt::Display for ParseOptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drag option {:?}", self.name)
    }
}

impl core::error::Error for ParseOptionsError {}

impl FromStr for OptionSet {
    type Err = ParseOptionsError;

    /// Parses a whitespace-separated list of flag names.
    ///
    /// Listed flags are enabled and every other flag is disabled.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Self::NONE;
        for name in s.split_whitespace() {
            if !options.set_flag(name, true) {
                return Err(ParseOptionsError {
                    name: name.to_string(),
                });
            }
        }
        Ok(options)
    }
}

impl fmt::Display for OptionSet {
    /// Writes the enabled flag names, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut copy = *self;
        let mut first = true;
        for name in FLAG_NAMES {
            if copy.field_mut(name).is_some_and(|on| *on) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn default_flags() {
        let o = OptionSet::default();
        assert_eq!(
            o.to_string(),
            "left noctrl capture offset noselect noscroll nosystemdrag"
        );
    }

    #[test]
    fn parse_enables_only_listed_flags() {
        let o: OptionSet = "offset chords".parse().unwrap();
        assert!(o.offset_tracking);
        assert!(o.chord_checking);
        assert!(!o.pointer_capture);
        assert!(!o.left_button_only);
    }

    #[test]
    fn parse_accepts_chord_alias() {
        let o: OptionSet = "chord".parse().unwrap();
        assert!(o.chord_checking);
        assert_eq!(o.flag("chord"), Some(true));
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let err = "offset wiggle".parse::<OptionSet>().unwrap_err();
        assert_eq!(err.name, "wiggle");
        assert_eq!(err.to_string(), "unknown drag option \"wiggle\"");
    }

    #[test]
    fn empty_string_is_none() {
        assert_eq!("  ".parse::<OptionSet>(), Ok(OptionSet::NONE));
        assert_eq!(OptionSet::NONE.to_string(), "");
    }

    #[test]
    fn display_parses_back() {
        let o = OptionSet::ALL;
        assert_eq!(o.to_string().parse::<OptionSet>(), Ok(o));
    }

    #[test]
    fn flag_lookup_and_set() {
        let mut o = OptionSet::NONE;
        assert_eq!(o.flag("nocontextmenu"), Some(false));
        assert!(o.set_flag("nocontextmenu", true));
        assert!(o.suppress_context_menu);
        assert_eq!(o.flag("bogus"), None);
        assert!(!o.set_flag("bogus", true));
    }

    #[test]
    fn pointer_subscriptions_follow_options() {
        let types = OptionSet::NONE.subscriptions(InputSource::Pointer);
        assert_eq!(
            types,
            EventTypes::POINTER_DOWN
                | EventTypes::POINTER_UP
                | EventTypes::POINTER_CANCEL
                | EventTypes::POINTER_MOVE
        );

        let types = OptionSet::default().subscriptions(InputSource::Pointer);
        assert!(types.contains(EventTypes::LOST_POINTER_CAPTURE));
        assert!(types.contains(EventTypes::TOUCH_START));
        assert!(types.contains(EventTypes::NATIVE_DRAG_START));
        assert!(!types.contains(EventTypes::CONTEXT_MENU));
    }

    #[test]
    fn global_mouse_moves_listen_on_document() {
        let element = OptionSet::NONE.subscriptions(InputSource::MouseGlobal);
        assert_eq!(element, EventTypes::MOUSE_DOWN);
        assert_eq!(
            OptionSet::document_subscriptions(InputSource::MouseGlobal),
            EventTypes::MOUSE_MOVE | EventTypes::MOUSE_UP
        );
        assert!(OptionSet::document_subscriptions(InputSource::Mouse).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults_for_missing_fields() {
        let o: OptionSet =
            serde_json::from_str(r#"{ "chord-checking": true, "pointer-capture": false }"#)
                .unwrap();
        assert!(o.chord_checking);
        assert!(!o.pointer_capture);
        assert!(o.offset_tracking);

        let source: InputSource = serde_json::from_str(r#""mouse-global""#).unwrap();
        assert_eq!(source, InputSource::MouseGlobal);
    }
}
