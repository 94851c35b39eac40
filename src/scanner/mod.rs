pub mod caches;
pub mod dev;
pub mod large;
pub mod orphans;
pub mod walker;
