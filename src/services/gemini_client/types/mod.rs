pub mod gemini_generate_content_request;
pub mod gemini_generate_content_response;
