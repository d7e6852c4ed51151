pub mod info;
pub mod snitch;
pub mod tags;
