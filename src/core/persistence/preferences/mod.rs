pub mod preference_fs_adapter;
pub mod preference_memory_adapter;
pub mod preference_store_trait;
