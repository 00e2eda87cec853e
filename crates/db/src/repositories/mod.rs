pub mod profile;
pub mod reservation;
pub mod room;
