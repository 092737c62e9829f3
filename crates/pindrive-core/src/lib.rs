#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "Capability traits shared by pindrive drivers and adaptors."]
#![doc = ""]
#![doc = "A driver never owns hardware directly. It is handed a value implementing"]
#![doc = "the capability it needs (for example [`PinWriter`]) and issues every"]
#![doc = "hardware access through it."]

pub mod driver;
pub mod pin;

pub use driver::{Adaptor, Driver};
pub use pin::{Level, PinWriter};
