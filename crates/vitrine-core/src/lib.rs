//! Core types and traits for Vitrine UI widgets.
//!
//! This crate provides the foundational pieces used throughout Vitrine:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`Key`], [`MouseButton`]
//! - The [`Widget`] trait and the [`Canvas`] paint abstraction
//! - [`RecordingCanvas`] for inspecting paint output in tests

mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod widget;

pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget, WidgetId,
};
