//! Word assembly — committed letters → confirmed words.

pub mod assembler;

pub use assembler::WordAssembler;
