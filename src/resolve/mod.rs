pub mod anchor;
pub mod frame;
