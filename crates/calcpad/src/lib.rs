//! calcpad - keypad calculator with a pluggable arithmetic backend
//!
//! The calculator is split in two:
//!
//! - an input/display state machine ([`machine::CalculatorState`]) that owns
//!   the display, the pending operator and the error state, and
//! - an arithmetic gateway ([`gateway::ArithmeticGateway`]) that resolves
//!   `(operation, x, y)` triples, in-process or over HTTP.
//!
//! A [`session::Session`] pairs the two and runs each keypad action to
//! completion.
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut session = Session::new(LocalGateway::new());
//! futures::executor::block_on(async {
//!     for key in ["1", "2", "+", "8", "Enter"] {
//!         session.press_key(key).await;
//!     }
//! });
//! assert_eq!(session.state().display(), "20");
//! assert_eq!(session.state().expression(), "12 + 8 =");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod gateway;
pub mod keypad;
pub mod machine;
pub mod session;
pub mod web;

/// Arithmetic service (axum)
#[cfg(feature = "server")]
pub mod service;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::format::{
        format_result, number_to_string, parse_operand, render_display, DisplaySize,
    };
    pub use crate::core::{Arithmetic, ArithmeticError, ErrorCode, Operation};
    pub use crate::driver::CalculatorDriver;
    pub use crate::gateway::{
        ArithmeticGateway, ComputeRequest, GatewayError, GatewayResult, LocalGateway,
        RecordingGateway,
    };
    pub use crate::keypad::{Keypad, KeypadAction};
    pub use crate::machine::{CalculatorState, DIVIDE_BY_ZERO_TOKEN, ERROR_TOKEN};
    pub use crate::session::Session;
    pub use crate::web::{DomDriver, DomElement, DomEvent, MockDom};

    #[cfg(feature = "http")]
    pub use crate::gateway::HttpGateway;

    #[cfg(feature = "server")]
    pub use crate::service::{ArithmeticService, ServiceConfig};
}
