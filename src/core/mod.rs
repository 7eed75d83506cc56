pub mod engine;
pub mod error;
pub mod narration;
pub mod pool;
pub mod seats;
pub mod shuffle;
pub mod validate;
