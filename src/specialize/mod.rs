//! One module per recognized pattern shape. Each exposes
//! a `try_build(pattern: &str) -> Option<Self>` recognizer and an
//! `is_match(&self, text: &[u8]) -> bool`; `dispatch::recognize` tries them
//! in the frozen priority order.

pub(crate) mod advanced_alt;
pub(crate) mod both_anchors;
pub(crate) mod literal_alt;
pub(crate) mod url_shape;
