/// Pool persistence backends.
pub mod pool_store;
/// Storage abstraction layer shared by the backends.
pub mod storage;
