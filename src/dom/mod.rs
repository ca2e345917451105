pub mod model;
pub mod parser;
pub mod serializer;

pub use model::{Element, Fragment, Node};
pub use parser::parse_fragment;
pub use serializer::RAW_TEXT_ELEMENTS;
