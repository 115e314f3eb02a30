//! Data module: strided block views, label maps and layout descriptors
#![warn(missing_docs)]

pub mod label;
pub mod label_map;
pub mod layout;
pub mod view;

pub use crate::debug_invariants::DebugInvariants;

pub use label::Label;
pub use label_map::LabelMap;
pub use layout::Axis;
pub use view::{BlockView, Elements};
