//! Rendering subsystem for drawing the table
//!
//! - Row rendering (cells, selection and stripe backgrounds)
//! - Text utilities (text measurement and truncation)

pub mod row_renderer;
pub mod text_utils;
