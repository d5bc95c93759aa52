pub mod goal;
pub mod journal;
pub mod motivation;
