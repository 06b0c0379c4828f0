//! promptconduit-core: canonical event model shared by all adapters.
//! Defines the normalized envelope, its payloads and contexts, the
//! loosely-typed native event accessor, and the adapter trait.

pub mod adapt;
pub mod error;
pub mod native;
pub mod types;

pub use adapt::{AdapterOptions, EventMapping, HookAdapter, Outcome, infer_outcome, lookup};
pub use error::ConduitError;
pub use native::NativeEvent;
pub use types::{
    Attachment, CanonicalEvent, EventType, GitContext, PayloadKind, PromptPayload,
    SessionPayload, Tool, ToolPayload, WorkspaceContext,
};
