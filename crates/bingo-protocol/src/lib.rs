pub mod events;
pub mod frames;
