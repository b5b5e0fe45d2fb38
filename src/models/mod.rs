mod event;
mod request;

pub use event::{ChatEventType, EventInfo, LastStatus, MediaType, MemberLink};
pub use request::{OutboundRequest, Payload, PayloadValue, RequestKind, Seq};
