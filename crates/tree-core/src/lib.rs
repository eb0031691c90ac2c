pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod morph;
pub mod photo;
pub mod pipeline;
pub mod pool;
pub mod scene;
pub mod settings;
pub mod shape;
pub mod state;
pub mod status;

pub use config::*;
pub use error::*;
pub use gesture::*;
pub use photo::*;
pub use pipeline::*;
pub use scene::*;
pub use settings::*;
pub use state::*;
pub use status::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
