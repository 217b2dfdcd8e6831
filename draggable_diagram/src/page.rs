// Copyright 2025 the Draggable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page wiring: pair diagram configs with the figures on a page.
//!
//! A page is a sequence of figures; the i-th config is bound to the element
//! its selector finds inside the i-th figure. A missing figure or element is
//! reported immediately instead of leaving a diagram silently inert.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use tracing::debug;

use crate::config::DiagramConfig;

/// Element lookup on a page.
pub trait ElementLookup {
    /// A figure (the container of one diagram).
    type Figure;
    /// A draggable element.
    type Element;

    /// Figures on the page, in document order.
    fn figures(&self) -> Vec<Self::Figure>;

    /// Finds the first element matching `selector` inside `figure`.
    fn query(&self, figure: &Self::Figure, selector: &str) -> Option<Self::Element>;
}

/// Failure to bind a config to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// There are fewer figures than configs.
    MissingFigure {
        /// Index of the config without a figure.
        index: usize,
    },
    /// The selector matched nothing inside its figure.
    MissingElement {
        /// Index of the config (and figure).
        index: usize,
        /// The selector that matched nothing.
        selector: String,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFigure { index } => write!(f, "no figure #{index} on the page"),
            Self::MissingElement { index, selector } => {
                write!(f, "figure #{index} has no element matching {selector:?}")
            }
        }
    }
}

impl core::error::Error for BindError {}

/// A config paired with the figure and element it was bound to.
#[derive(Clone, Debug)]
pub struct Binding<F, E> {
    /// Position of the figure on the page.
    pub index: usize,
    /// The figure.
    pub figure: F,
    /// The draggable element.
    pub element: E,
    /// The config.
    pub config: DiagramConfig,
}

/// Binds the i-th config to the i-th figure.
///
/// Fails on the first config whose figure or element is missing. Extra
/// figures without a config are left alone.
pub fn bind_all<P>(
    page: &P,
    configs: impl IntoIterator<Item = DiagramConfig>,
) -> Result<Vec<Binding<P::Figure, P::Element>>, BindError>
where
    P: ElementLookup,
{
    let mut figures = page.figures().into_iter();
    let mut bindings = Vec::new();
    for (index, config) in configs.into_iter().enumerate() {
        let figure = figures.next().ok_or(BindError::MissingFigure { index })?;
        let element =
            page.query(&figure, &config.selector)
                .ok_or_else(|| BindError::MissingElement {
                    index,
                    selector: config.selector.clone(),
                })?;
        debug!(index, selector = %config.selector, "bound diagram");
        bindings.push(Binding {
            index,
            figure,
            element,
            config,
        });
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{BindError, bind_all};
    use crate::headless::StaticPage;
    use crate::presets;

    #[test]
    fn binds_in_figure_order() {
        let mut page = StaticPage::new();
        page.push_figure([("svg circle", 10_u32)]);
        page.push_figure([("svg circle", 20), ("svg g", 21)]);
        page.push_figure([("canvas", 30)]);

        let bindings = bind_all(&page, vec![presets::svg_circle(), presets::svg_group()])
            .expect("both figures have their element");
        assert_eq!(bindings.len(), 2, "the spare figure is left alone");
        assert_eq!((bindings[0].index, bindings[0].element), (0, 10));
        assert_eq!((bindings[1].figure, bindings[1].element), (1, 21));
    }

    #[test]
    fn missing_element_is_reported() {
        let mut page = StaticPage::new();
        page.push_figure([("svg circle", 1_u32)]);
        page.push_figure([("svg circle", 2)]);

        let err = bind_all(&page, vec![presets::svg_circle(), presets::svg_group()])
            .expect_err("second figure has no group");
        assert_eq!(
            err,
            BindError::MissingElement {
                index: 1,
                selector: "svg g".to_string(),
            }
        );
        assert_eq!(err.to_string(), "figure #1 has no element matching \"svg g\"");
    }

    #[test]
    fn missing_figure_is_reported() {
        let page = StaticPage::<u32>::new();
        let err = bind_all(&page, presets::tutorial_page()).expect_err("empty page");
        assert_eq!(err, BindError::MissingFigure { index: 0 });
    }
}
