mod repos;

pub use repos::*;
