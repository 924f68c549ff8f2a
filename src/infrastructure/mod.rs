pub mod gateways;
pub mod storage;
