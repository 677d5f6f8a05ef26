//! HTTP Gateway Adapters
//!
//! Reqwest-backed implementations of the invoicing domain's external
//! ports. One adapter per upstream endpoint:
//!
//! - [`PartnerDirectoryGateway`]: GET, JSON array of partner records
//! - [`EventCountGateway`]: GET with `eventType`/`partnerId`/`timestamp`
//!   query parameters, count taken from the `eventEntity` array length
//! - [`NotificationGateway`]: POST with an `Accept: application/json`
//!   header, body echoed back from the `data` field
//!
//! Every request carries the configured timeout; transport failures map
//! into the shared `PortError` taxonomy (see [`http`]), and the domain
//! decides whether to degrade or propagate.

pub mod http;
pub mod partner_directory;
pub mod event_source;
pub mod notification;

pub use http::build_client;
pub use partner_directory::PartnerDirectoryGateway;
pub use event_source::EventCountGateway;
pub use notification::NotificationGateway;
