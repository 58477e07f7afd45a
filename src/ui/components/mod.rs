//! Shared UI components
//!
//! Reusable components like buttons, spinners, and other primitives.

pub mod button;
pub mod loading;
