//! Terminal front-end for the artwork gallery.

#![allow(missing_docs)]

pub mod commands;
pub mod logging;
pub mod render;
pub mod session;
