// Rebindable keyboard and gamepad controls

pub mod engine;
