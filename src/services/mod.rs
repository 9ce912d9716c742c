//! Services provided by the relay client.

mod relay;

pub use relay::RelayService;
