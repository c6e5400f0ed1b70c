pub mod input;
pub mod router;

pub use input::{classify, InboundInput, InputKind};
pub use router::{InputRouter, RouteOutcome};
