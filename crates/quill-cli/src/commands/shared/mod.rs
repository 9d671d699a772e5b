pub mod collaborators;
pub mod input;
