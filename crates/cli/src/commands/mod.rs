pub mod bootlog;
pub mod fragments;
pub mod generate;
pub mod paths;
pub mod scope;
pub mod util;

pub use bootlog::*;
pub use fragments::*;
pub use generate::*;
pub use paths::*;
pub use scope::*;
pub use util::*;
