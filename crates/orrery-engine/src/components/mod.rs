pub mod mesh;
pub mod object;
