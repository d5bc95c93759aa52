pub mod mood;
pub mod streak;
pub mod tone;
