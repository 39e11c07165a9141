pub mod booking;
pub mod credentials;
pub mod licence_class;
pub mod location;
