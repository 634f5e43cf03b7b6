pub mod write;
pub mod read;
pub mod clear;
pub mod status;
