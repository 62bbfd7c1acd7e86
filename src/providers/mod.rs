//! Built-in speech providers.
//!
//! The default chain tries [`vad_filtered`] first and falls back to
//! [`whole_file`] only when the primary's model artifacts are not installed.

mod engine;
pub mod vad_filtered;
pub mod whole_file;

use crate::provider::ProviderFactory;

/// The ordered factory chain the adapter walks.
pub fn default_chain() -> Vec<Box<dyn ProviderFactory>> {
    vec![
        Box::new(vad_filtered::VadFilteredFactory),
        Box::new(whole_file::WholeFileFactory),
    ]
}
