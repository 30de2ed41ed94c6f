mod model_loaders;

pub use model_loaders::{ModelLoaderDeps, load_task_middleware};
