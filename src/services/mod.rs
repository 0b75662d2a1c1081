pub mod completion_client;
pub mod gemini_client;
pub mod stays_finder;
