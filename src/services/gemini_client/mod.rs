pub mod gemini_service;
pub mod types;
