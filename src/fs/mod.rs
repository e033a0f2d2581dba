pub mod entry;
pub mod listing;

pub use entry::{DirEntry, EntryKind};
pub use listing::{ListingError, list_entries};
