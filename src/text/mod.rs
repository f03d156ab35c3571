//! Feedback text pipeline: normalization, anchor splitting, and section formatting.

mod blocks;
mod html;
mod normalize;
mod patterns;
mod plain;
mod split;

pub(crate) use blocks::Block;
pub(crate) use html::{format_verbal_html, format_written_html, render_blocks};
pub(crate) use normalize::normalize;
pub(crate) use patterns::patterns;
pub(crate) use plain::{format_verbal_plain, format_written_plain};
pub use split::SectionPair;
pub(crate) use split::split_combined;
