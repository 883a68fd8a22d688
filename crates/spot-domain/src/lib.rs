// spot-domain library entry point
pub mod color;
pub mod error;
pub mod outcome;
pub mod solution;
pub mod table;
pub use color::Rgb;
pub use error::DomainError;
pub use outcome::{OutcomeKind, OutcomeRecord};
pub use solution::{Solution, Swatch};
pub use table::{CationEntry, ReactionTable};
