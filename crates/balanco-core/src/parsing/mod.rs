pub mod header;
pub mod normalize;
pub mod values;

pub use header::extract_entity_name;
pub use normalize::{normalize_phrase, normalize_text};
pub use values::parse_currency;
