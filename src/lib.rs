pub mod collections;
pub mod geometry;
pub mod metaball;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use collections::{BatchKey, MetaBallKey, ObjectKey};
pub use metaball::{BatchDirtyMode, MetaBallDrawCache};

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
