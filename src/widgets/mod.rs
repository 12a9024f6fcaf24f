pub mod modal;
pub mod status_bar;
pub mod text_area;
pub mod toast;

pub use modal::{PathPrompt, Prompt, PromptAction};
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
pub use text_area::TextArea;
pub use toast::{Toast, ToastManager, ToastType, ToastWidget};
