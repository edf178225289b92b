pub mod basics;
pub mod console;
pub mod error;
pub mod hypo;
pub mod logger;
