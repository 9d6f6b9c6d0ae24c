//! Stratus Core Types and Definitions
//!
//! This crate provides the foundational types for the Stratus diagram
//! library. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Node kinds**: Glyph categories and the provider catalog ([`kind`] module)
//! - **Directions**: Rendering direction for diagram layout ([`direction::Direction`])
//! - **Attributes**: Insertion-ordered style attribute maps ([`attr::AttrMap`])

pub mod attr;
pub mod direction;
pub mod identifier;
pub mod kind;
