//! Every line of user-facing output goes through [`Message`].
//!
//! Variants are declared in [`types`], rendered in [`display`] and printed
//! with the macros in [`macros`].

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
