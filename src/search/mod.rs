pub mod matcher;
pub mod partition;

pub use matcher::{search_word_in_direction, search_word_in_range, search_words};
pub use partition::{partition, partition_all};
