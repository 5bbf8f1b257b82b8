// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod event;
pub mod ioc;
pub mod record;

pub use event::{Effect, Event, EventKey, ExtractionMethod};
pub use ioc::IocType;
pub use record::{RawRecord, SentenceRecord};
