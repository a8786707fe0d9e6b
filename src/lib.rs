// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup wiring
// - infrastructure: Postgres and blob storage adapters
// - presentation: HTTP handlers and routing
// - application: ports and use cases
// - domain: core models and the data URL decoder

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
