mod edition;
mod manager;

pub use edition::Edition;
pub use manager::{EditionCreateOptions, EditionManager};
