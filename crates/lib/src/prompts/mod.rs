//! # Prompt Template Modules
//!
//! This module organizes all prompt templates used by the generators. It is
//! divided into sub-modules by the form they belong to, plus the shared
//! rendering helpers in `core`.

pub mod core;
pub mod ng911;
pub mod qa;
pub mod tert;
