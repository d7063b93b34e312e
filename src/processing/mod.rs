//! Resume text processing and skill matching

pub mod resume_matcher;
pub mod text_processor;
