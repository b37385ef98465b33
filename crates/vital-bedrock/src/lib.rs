//! vital-bedrock
//!
//! The LLM boundary: prompt assembly, Bedrock Converse invocation, lenient
//! parsing of model replies into a sum type, and strict whitelist
//! validation of every patient id the model returns. Nothing downstream
//! ever trusts a model-supplied id that is not in the known pool.

pub mod client;
pub mod criteria;
pub mod error;
pub mod grouping;
pub mod matching;
pub mod medications;
pub mod prompt;
pub mod reply;
