pub mod classifier;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;


pub use classifier::*;
pub use error::*;
pub use normalize::*;
pub use traits::*;
pub use types::*;
