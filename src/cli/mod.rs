pub mod check;
pub mod generate;

pub use check::check;
pub use generate::{GenerateArgs, generate};
