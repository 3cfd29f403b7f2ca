//! CMS entry → view-model adapters.
//!
//! Everything here is a pure mapping over `domain` types: no I/O and no error
//! type. Entries that cannot be mapped come back as `None`.

pub mod dispatch;
pub mod entry;
pub mod links;
pub mod section;

pub use dispatch::{item_card, list_card, ListKind};
pub use links::Links;
pub use section::{resolve_section, Component, Placeholder, SectionView};
