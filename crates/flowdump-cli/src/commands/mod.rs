pub mod decode;
pub mod dump;
