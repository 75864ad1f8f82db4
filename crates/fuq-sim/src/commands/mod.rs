pub mod extract;
pub mod inspect;
pub mod submit;
