pub mod templates;
pub mod validator;

pub use templates::{CommandTemplater, supported_services};
pub use validator::{CommandValidator, HeuristicValidator, risk_level};
