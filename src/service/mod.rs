pub mod calendar_service;
pub mod intent;
pub mod range;
pub mod setup;
pub mod tokens;
