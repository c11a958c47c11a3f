pub mod commands;
pub mod entities;
pub mod intent;
pub mod validation;

pub use commands::*;
pub use entities::*;
pub use intent::*;
pub use validation::*;
