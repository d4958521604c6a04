pub mod cancel;
pub mod remove;
pub mod result;
pub mod submit;
