pub mod animation;
pub mod backend;
pub mod composite;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod noise;
pub mod particles;
pub mod scene;
pub mod shaders;
pub mod state;
pub mod uniforms;

pub use animation::*;
pub use backend::*;
pub use composite::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use noise::{curl_noise3, noise3};
pub use particles::*;
pub use scene::*;
pub use state::*;
pub use uniforms::*;
