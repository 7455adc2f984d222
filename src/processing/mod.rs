//! The file-processing pipeline.
//!
//! A file flows one way through this module:
//!
//! 1. [`FileProcessor`] checks size and extension against the
//!    [`ProcessingConfig`] before reading anything
//! 2. [`sniff::detect`] decides the format from filename and MIME type
//! 3. The matching parser produces a payload and a validation result
//! 4. [`insights`] derives observations, warnings and recommendations
//! 5. Everything is assembled into a
//!    [`FileProcessingResult`](crate::core::result::FileProcessingResult)
//!
//! ## Example
//!
//! ```rust
//! use lab_ingest::processing::{FileProcessor, InputFile, ProcessingConfig};
//!
//! let processor = FileProcessor::new(ProcessingConfig::default());
//! let file = InputFile::from_bytes("plate.csv", "text/csv", b"well,od\nA1,0.42\n".to_vec());
//! let result = processor.process_file(&file).unwrap();
//! assert_eq!(result.record_count, Some(1));
//! ```

pub mod config;
pub mod input;
pub mod insights;
pub mod processor;
pub mod sniff;

pub use config::{ConfigError, ProcessingConfig};
pub use input::InputFile;
pub use processor::{FileProcessor, ProcessingError};
