//! Types and traits for recording values during evaluation.
//!
//! # Core Components
//!
//! * [`Record`] - A container for storing key-value pairs of various data types
//! * [`RecordValue`] - An enum representing the types of values that can be stored
//! * [`Recorder`] - A trait defining the interface for writing records
//! * [`BufferedRecorder`] - A recorder that keeps records in memory
//! * [`NullRecorder`] - A recorder that discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use border_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some process in reality
//! let act = 2;
//! let reward = -4f32;
//!
//! let mut record = Record::empty();
//! record.insert("action", RecordValue::Scalar(act as f32));
//! record.insert("reward", RecordValue::Scalar(reward));
//! assert_eq!(record.get_scalar("reward").unwrap(), -4.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
