// Generative-language side of INSPIRØØ: instruction templates, the Gemini
// streaming client, and the analysis orchestrator that ties them together.

pub mod analyzer;
pub mod client;
pub mod prompt;

#[cfg(test)]
mod test_support;
