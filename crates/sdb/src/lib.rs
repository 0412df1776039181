//! Services Descriptor Bundle (SDB) encoding and decoding.
//!
//! An SDB is an ordered list of service descriptor records (connection
//! endpoints: transport, protocol, host, port, query parameters) packed
//! into a dense, tagged binary document. Repeated field values across
//! records are collapsed into history-table back-references, and the
//! document projects to either Base85/Ascii85 or Base64 printable text.
//! An optional caller-supplied transform stage (compression, encryption)
//! can be spliced between binary assembly and text encoding.
//!
//! # Example
//!
//! ```
//! use sdb::{EntityKind, Field, ServiceBundle, ServiceRecord, TextEncoding};
//!
//! let records = vec![
//!     ServiceRecord::new(EntityKind::Api)
//!         .with(Field::Name("svc".into()))
//!         .with(Field::Port(8090)),
//!     ServiceRecord::new(EntityKind::Api)
//!         .with(Field::Name("svc".into()))
//!         .with(Field::Port(8091)),
//! ];
//!
//! let mut bundle = ServiceBundle::new();
//! bundle.set_records(records.clone());
//! let text = futures::executor::block_on(bundle.encode(TextEncoding::Base85, None))
//!     .unwrap()
//!     .unwrap();
//!
//! let mut decoded = ServiceBundle::new();
//! let out = futures::executor::block_on(decoded.decode(text, None, None)).unwrap();
//! assert_eq!(out, &records[..]);
//! ```

mod bundle;
mod constants;
mod descriptor;
mod error;
mod history;
mod json;

pub mod codec;

pub use bundle::{
    BoxFuture, BundleInput, ServiceBundle, StageOutcome, TextEncoding, TransformStage,
};
pub use codec::{DocumentDecoder, DocumentEncoder, FieldTag};
pub use constants::FORMAT_VERSION;
pub use descriptor::{
    EntityKind, Field, FieldKind, Host, Protocol, ServiceRecord, Transport,
};
pub use error::{SdbError, StageError};
pub use history::{History, HistoryEntry};
pub use json::{record_from_json, records_from_json, records_to_json};
