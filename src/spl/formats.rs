//! Output formats for the syntax tree
//!
//! - [`serializer`]: tree <-> generic nested map (JSON/YAML), the interchange
//!   format for external consumers
//! - [`treeviz`]: one-line-per-node tree view for humans

pub mod serializer;
pub mod treeviz;

pub use serializer::{
    from_json_str, from_value, from_yaml_str, to_json_string, to_value, to_yaml_string,
    DecodeError,
};
pub use treeviz::to_treeviz_str;
