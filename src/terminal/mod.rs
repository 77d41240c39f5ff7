mod prompt;

pub use prompt::PromptHost;
