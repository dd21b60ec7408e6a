pub mod health;
pub mod player;
pub mod sse;
pub mod team;
pub mod validation;
pub mod wheel;
