pub mod prompt_builder;
pub mod response_parser;
pub mod stays_finder_service;
