//! Domain entities - core business objects

mod identity;
mod message;
mod reaction;
mod route;
mod ticket;

pub use identity::Identity;
pub use message::{Message, ThreadRoot};
pub use reaction::{ItemRef, ReactionEvent, ReactionKind, ReactionSummary, Reactions};
pub use route::{RouteOverride, RoutingTable, TicketRoute};
pub use ticket::{CreatedTicket, IssueRequest};
