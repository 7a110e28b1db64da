//! Topograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Topograph layout
//! engine, scene renderer, and exporters. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes and polar placement ([`geometry`] module)
//! - **Draw**: Strokes and drawable primitives for scenes ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
