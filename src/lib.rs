pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod icons;
pub mod scanner;
