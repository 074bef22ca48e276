//! Common constants.

/// Initial capacity of the chunk buffer, in characters.
pub const DEFAULT_INITIAL_CHUNK_SIZE: usize = 32 * 1024;

/// Factor by which the chunk buffer grows when a read fills it.
pub const DEFAULT_GROWTH_FACTOR: usize = 8;

/// Hard ceiling of the chunk buffer, in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 1024 * 1024;
