pub mod generate;
pub mod verify;
pub mod versions;
