pub mod interface;
pub mod prompt;
pub mod relay;

pub use interface::*;
pub use prompt::build_prompt;
pub use relay::TranslationRelay;
