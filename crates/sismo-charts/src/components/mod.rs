pub mod annotations;
pub mod legend;
