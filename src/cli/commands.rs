pub mod events;
pub mod serve;

pub use events::list_events;
pub use serve::serve;
