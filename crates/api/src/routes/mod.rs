pub mod booking;
pub mod health;
pub mod profile;
pub mod room;
