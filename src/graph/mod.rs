//! Composable building blocks for constructing voice graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what instrument design
//! needs: note events and block-based rendering. The `extensions` module adds
//! fluent helpers so patches read as a chain.

/// Multiply two signals together (amplitude control).
pub mod amplify;
/// Envelope generator node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`, `.through()`).
pub mod extensions;
/// State-variable filter node.
pub mod filter;
/// Linear mixing for layered oscillators.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
