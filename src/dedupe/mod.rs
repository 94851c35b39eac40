pub mod finder;
pub mod hasher;
