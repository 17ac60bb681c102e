pub mod advertise;
pub mod glove;
pub mod sampler;
pub mod server;
pub mod session;
