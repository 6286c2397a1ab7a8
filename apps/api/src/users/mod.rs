// User registry: the shared record store, its derived projections, and the
// detail screen's edit/block/delete protocols.

pub mod detail;
pub mod handlers;
pub mod models;
pub mod projections;
pub mod seed;
pub mod store;
