//! Small containers shared by the step generators
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod frequency;
pub mod linked_list;
pub mod pointers;
pub mod recency;

pub use self::frequency::FrequencyMap;
pub use self::linked_list::ArenaList;
pub use self::pointers::PointerPair;
pub use self::recency::{PutResult, RecencyList};
