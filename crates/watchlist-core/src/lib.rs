pub mod controller;
pub mod stats;
pub mod transitions;

pub use controller::{ActionOutcome, TransitionController};
pub use stats::{completion_rate, recent};
pub use transitions::{menu_entries, quick_actions, EntryAction, MenuEntry, QuickAction, TrackingState};
