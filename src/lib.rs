pub mod error;
pub mod printer;
pub mod scanner;
pub mod token;
