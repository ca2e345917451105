pub mod visitor;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::Fragment;

pub use visitor::{
    CODE_TAGS, Leaf, TextLeaves, accepts, for_each_accepted_leaf_mut, is_excluded_tag,
};

/// One translatable text leaf, addressed by its position in extraction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub index: usize,
    pub value: String,
    /// Units flagged here are left untouched by reassembly.
    pub skip: bool,
}

/// Collect the translatable leaves of `fragment`.
///
/// Whitespace-only leaves and anything under an excluded element are left
/// out; indices are contiguous from zero.
pub fn extract(fragment: &Fragment) -> Vec<TextUnit> {
    let units: Vec<TextUnit> = TextLeaves::new(fragment)
        .filter(Leaf::is_accepted)
        .enumerate()
        .map(|(index, leaf)| TextUnit {
            index,
            value: leaf.value.to_string(),
            skip: false,
        })
        .collect();

    debug!(units = units.len(), "extracted text units");
    units
}

/// The strings to send for translation, in index order.
pub fn unit_values(units: &[TextUnit]) -> Vec<String> {
    units.iter().map(|unit| unit.value.clone()).collect()
}
