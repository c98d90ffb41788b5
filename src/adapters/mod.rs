// Adapters layer: concrete implementations for external systems (backend, maps, storage, terminal).

pub mod console;
pub mod google;
pub mod http;
pub mod storage;
