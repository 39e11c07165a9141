pub mod login;
pub mod scan;
