pub mod error;
pub mod homology;
pub mod io;
pub mod window;
