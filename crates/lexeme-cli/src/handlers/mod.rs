pub mod export;
pub mod interactive;
pub mod load;
