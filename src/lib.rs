mod bindings;
mod client;
mod components;
mod config;
mod donation;
mod error;
mod flow;
mod interop;
mod logging;
mod scheduler;
mod state;

pub use bindings::*;
pub use client::*;
pub use components::*;
pub use config::*;
pub use donation::*;
pub use error::{DonationError, GatewayError};
pub use flow::*;
pub use interop::*;
pub use logging::*;
pub use scheduler::*;
pub use state::*;
