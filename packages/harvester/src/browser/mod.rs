//! Page rendering.
//!
//! The catalog renders its content client-side, so pages are loaded in a
//! browser and handed to the extractors as rendered HTML. [`PageSource`] is
//! the seam between the two: the harvester only ever asks for "the HTML of
//! this URL once this marker is present".

mod chromium;

use std::fmt;
use std::time::Duration;

use scraper::{Html, Selector};

use crate::error::Result;

pub use chromium::{with_chromium, BrowserOptions, ChromiumSession};

/// An element whose presence signals that a page has rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Element with the given `id` attribute.
    Id(&'static str),
    /// Element carrying the given class.
    Class(&'static str),
}

impl Marker {
    /// CSS selector matching this marker.
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Class(class) => format!(".{class}"),
        }
    }

    /// Check whether the marker occurs in a parsed document.
    #[must_use]
    pub fn is_present(&self, document: &Html) -> bool {
        Selector::parse(&self.css())
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    }

    /// Check whether the marker occurs in an HTML string.
    #[must_use]
    pub fn is_present_in(&self, html: &str) -> bool {
        self.is_present(&Html::parse_document(html))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

/// Something that can load a URL and return its rendered HTML.
pub trait PageSource {
    /// Load `url`, force a reload, and block until `marker` is present.
    ///
    /// Returns the rendered document. Fails with
    /// [`HarvesterError::RenderTimeout`](crate::error::HarvesterError::RenderTimeout)
    /// if the marker does not appear within `timeout`.
    fn render(&mut self, url: &str, marker: Marker, timeout: Duration) -> Result<String>;
}

impl<P: PageSource + ?Sized> PageSource for &mut P {
    fn render(&mut self, url: &str, marker: Marker, timeout: Duration) -> Result<String> {
        (**self).render(url, marker, timeout)
    }
}
