pub mod common;
pub mod domain;
pub mod estimate;
pub mod extract;
pub mod numerics;
