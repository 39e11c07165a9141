pub mod constants;
pub mod prompt;
pub mod resolver;
pub mod scanner;
pub mod session;
