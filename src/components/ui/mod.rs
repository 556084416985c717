pub mod alert;
pub mod button;
pub mod forum_box;
pub mod spinner;
pub mod textarea;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
pub use forum_box::*;
pub use spinner::*;
pub use textarea::*;
