#![warn(missing_docs)]
#![doc = "I2C support for pindrive drivers."]
#![doc = ""]
#![doc = "Provides the [`I2c`] bus capability and [`I2cTestAdaptor`], a fake adaptor"]
#![doc = "that I2C drivers are unit-tested against."]

pub mod test_helper;

pub use test_helper::I2cTestAdaptor;

/// Capability to talk to a device on an I2C bus.
///
/// A transaction starts with [`I2c::i2c_start`] addressing the device; reads
/// and writes that follow go to that device.
pub trait I2c {
    /// Bus failure reported by the adaptor.
    type Error;

    /// Address the device at 7-bit `address`.
    fn i2c_start(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Read up to `len` bytes from the addressed device.
    fn i2c_read(&mut self, len: usize) -> Result<Vec<u8>, Self::Error>;

    /// Write `data` to the addressed device.
    fn i2c_write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}
