pub mod icons;
pub mod progress;
pub mod prompt;

pub use progress::{Spinner, with_spinner};
