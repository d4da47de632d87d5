//! Public library API for decomposing runtime values into navigable member trees.

/// Reflection tables, descriptors, member evaluation, and composition entry points.
pub mod engine;
