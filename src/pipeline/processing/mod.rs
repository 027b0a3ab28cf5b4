pub mod assemble;
pub mod clean;
pub mod columns;
pub mod extract;
pub mod title;
