pub mod deploy;
pub mod export;
pub mod validate;
