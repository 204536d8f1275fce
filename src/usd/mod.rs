mod attribute;
mod edit_target;
mod model_api;
mod object;
mod prim;
mod prim_range;
mod property;
mod references;
mod relationship;
mod stage;
mod variant_sets;

pub use attribute::*;
pub use edit_target::*;
pub use model_api::*;
pub use object::*;
pub use prim::*;
pub use prim_range::*;
pub use property::*;
pub use references::*;
pub use relationship::*;
pub use stage::*;
pub use variant_sets::*;
