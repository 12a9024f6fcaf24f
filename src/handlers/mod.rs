/// Input handlers for the application
pub mod keyboard;
pub mod mouse;
