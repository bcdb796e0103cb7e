//! Dendra Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Dendra radial
//! cluster renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support and ordinal palettes ([`color`])
//! - **Geometry**: Points, sizes, bounds and polar helpers ([`geometry`] module)
//! - **Hierarchy**: The input tree data model ([`hierarchy::HierarchyNode`])
//! - **Draw**: SVG drawing primitives such as layers, strokes, glyphs and text ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod hierarchy;
