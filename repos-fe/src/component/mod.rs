mod navbar;
mod repo_card;
mod title;

pub use navbar::*;
pub use repo_card::*;
pub use title::*;
