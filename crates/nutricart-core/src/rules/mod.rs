//! Boundary validation rules.

pub mod validation;
