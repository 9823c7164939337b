pub mod attributes;
pub mod block;
pub mod custom;
pub mod dump;
pub mod ids;
pub mod inline;
pub mod parse;
pub mod walk;

pub use attributes::{AttrValue, AttributeSet};
pub use block::{Block, Document, block_to_events};
pub use custom::{InlineNode, NodeKind};
pub use dump::dump;
pub use ids::{HeadingIds, assign_heading_ids};
pub use inline::{Inline, inline_to_events};
pub use parse::{Parser, parse_events_to_blocks};
pub use walk::{NodeMut, Phase, WalkStatus, walk_mut};
