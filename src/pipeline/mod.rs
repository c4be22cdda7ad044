// Pipeline: end-to-end attribution over a directory of known samples.

pub mod attribution;
