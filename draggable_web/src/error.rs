// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use draggable_diagram::BindError;
use wasm_bindgen::{JsCast, JsValue};

/// Failure while wiring diagrams into a page.
#[derive(Clone, Debug)]
pub enum WebError {
    /// No global `window` or `document`.
    NoDocument,
    /// A config could not be bound to the page.
    Bind(BindError),
    /// A DOM call threw.
    Js {
        /// What was being done.
        context: &'static str,
        /// The thrown value, rendered.
        message: String,
    },
}

impl WebError {
    pub(crate) fn js(context: &'static str, value: &JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| e.message().into()))
            .unwrap_or_else(|| String::from("unknown JavaScript error"));
        Self::Js { context, message }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => f.write_str("no document to attach to"),
            Self::Bind(err) => err.fmt(f),
            Self::Js { context, message } => write!(f, "{context}: {message}"),
        }
    }
}

impl core::error::Error for WebError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Bind(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for WebError {
    fn from(err: BindError) -> Self {
        Self::Bind(err)
    }
}
