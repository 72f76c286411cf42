mod aggregation;
mod category;
mod chart;
mod filter;
mod money;
mod transaction;

pub use aggregation::*;
pub use category::*;
pub use chart::*;
pub use filter::*;
pub use money::*;
pub use transaction::*;
