pub mod stateless_llm_interface;
pub mod openai_llm;
pub mod claude_llm;
pub mod factory;

pub use stateless_llm_interface::*;
pub use openai_llm::*;
pub use claude_llm::*;
pub use factory::*;

/// Sampling temperature used for every translation call.
pub const TRANSLATION_TEMPERATURE: f32 = 0.2;
