pub mod app_state;
pub mod config;
pub mod dom;
pub mod extractor;
pub mod health;
pub mod history;
pub mod languages;
pub mod markdown;
pub mod pipeline;
pub mod reassembler;
pub mod routes;
pub mod sanitizer;
pub mod translations;
pub mod translator;
