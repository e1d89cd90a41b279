//! Curve instances.

pub mod p192;
