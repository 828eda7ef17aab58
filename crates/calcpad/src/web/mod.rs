//! Browser page model
//!
//! The calculator page is modeled by a mock DOM so the page wiring can be
//! tested without a browser.

pub mod dom;
mod driver;

pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::{DomDriver, ACTIVE_CLASS, ERROR_CLASS};
