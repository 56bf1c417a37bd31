pub mod annotations;
pub mod check;
pub mod diff;
pub mod mask;
pub mod matrix;
pub mod validate;
