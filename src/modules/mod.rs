pub mod activities;
pub mod students;
pub mod waitlist;
