pub mod file;
pub mod score;
