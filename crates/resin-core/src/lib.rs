pub mod alert;
pub mod model;
pub mod recovery;
pub mod report;
pub mod reset;

pub use alert::*;
pub use model::*;
pub use recovery::*;
pub use report::*;
pub use reset::*;
