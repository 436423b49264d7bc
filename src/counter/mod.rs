pub mod flush_loop;
pub mod flush_sink;
pub mod unique_counter;

/// identifier supplied by the caller in the `id` query parameter
pub type Identifier = i64;
