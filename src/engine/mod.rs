// Engine modules: input and frame timing

pub mod clock;
pub mod input;
