pub mod http_gateway;
pub mod in_memory;
mod wire;

pub use http_gateway::HttpLedgerGateway;
pub use in_memory::InMemoryLedger;
