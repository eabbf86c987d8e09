//! Policies for Border without a deep learning backend.
//!
//! Parameters trained with a backend are exported into plain matrices ([`Mat`])
//! and serialized with `bincode`. [`DiscreteMlpPolicy`] loads such an artifact
//! and selects discrete actions from image observations on the CPU.
mod mat;
mod mlp;
mod policy;
pub use mat::Mat;
pub use mlp::Mlp;
pub use policy::DiscreteMlpPolicy;
