pub mod files;
pub mod kv;
pub mod settings;
pub mod task_list;

pub use files::{ensure_data_dir, init_local_dir, log_file};
pub use kv::{FileStore, KeyValueStore};
pub use settings::SettingsStore;
pub use task_list::{read_tasks, TaskList};

#[cfg(test)]
pub use kv::MemoryStore;
