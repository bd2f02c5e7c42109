mod binder;
mod refinement;
mod render;

pub use binder::{FinalPrompt, bind, bind_template};
pub use refinement::{RefinementInput, build_refinement_prompt};
