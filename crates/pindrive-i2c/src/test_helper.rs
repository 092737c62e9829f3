//! Fake I2C adaptor for driver tests.
//!
//! [`I2cTestAdaptor`] never fails. Reads return whatever the installed read
//! closure produces (nothing by default) and writes are recorded so a test
//! can assert on the bytes a driver put on the bus.

use core::convert::Infallible;
use core::fmt;

use pindrive_core::Adaptor;
use tracing::trace;

use crate::I2c;

type ReadImpl = Box<dyn FnMut(usize) -> Vec<u8> + Send>;

/// A named, in-memory I2C adaptor.
pub struct I2cTestAdaptor {
    name: String,
    read_impl: ReadImpl,
    address: Option<u8>,
    written: Vec<Vec<u8>>,
}

impl I2cTestAdaptor {
    /// A fresh adaptor whose reads return no bytes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read_impl: Box::new(|_| Vec::new()),
            address: None,
            written: Vec::new(),
        }
    }

    /// Replace what [`I2c::i2c_read`] returns. The closure receives the
    /// requested length.
    pub fn set_read_impl<F>(&mut self, read_impl: F)
    where
        F: FnMut(usize) -> Vec<u8> + Send + 'static,
    {
        self.read_impl = Box::new(read_impl);
    }

    /// Builder form of [`I2cTestAdaptor::set_read_impl`].
    pub fn with_read_impl<F>(mut self, read_impl: F) -> Self
    where
        F: FnMut(usize) -> Vec<u8> + Send + 'static,
    {
        self.set_read_impl(read_impl);
        self
    }

    /// Address passed to the last [`I2c::i2c_start`].
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Every buffer written so far, oldest first.
    pub fn written(&self) -> &[Vec<u8>] {
        &self.written
    }
}

impl I2c for I2cTestAdaptor {
    type Error = Infallible;

    fn i2c_start(&mut self, address: u8) -> Result<(), Self::Error> {
        trace!(adaptor = %self.name, address, "i2c start");
        self.address = Some(address);
        Ok(())
    }

    fn i2c_read(&mut self, len: usize) -> Result<Vec<u8>, Self::Error> {
        let data = (self.read_impl)(len);
        trace!(adaptor = %self.name, len, returned = data.len(), "i2c read");
        Ok(data)
    }

    fn i2c_write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        trace!(adaptor = %self.name, ?data, "i2c write");
        self.written.push(data.to_vec());
        Ok(())
    }
}

impl Adaptor for I2cTestAdaptor {
    type Error = Infallible;

    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl fmt::Debug for I2cTestAdaptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I2cTestAdaptor")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads a big-endian register through any [`I2c`] bus, the way a
    /// sensor driver would.
    fn read_register<B: I2c>(bus: &mut B, address: u8, register: u8) -> Result<u16, B::Error> {
        bus.i2c_start(address)?;
        bus.i2c_write(&[register])?;
        let data = bus.i2c_read(2)?;
        Ok(match data.as_slice() {
            [hi, lo] => u16::from_be_bytes([*hi, *lo]),
            _ => 0,
        })
    }

    #[test]
    fn test_default_read_is_empty() {
        let mut adaptor = I2cTestAdaptor::new("bus");
        assert_eq!(adaptor.i2c_read(4), Ok(Vec::new()));
        assert_eq!(adaptor.name(), "bus");
    }

    #[test]
    fn test_connect_and_finalize_succeed() {
        let mut adaptor = I2cTestAdaptor::new("bus");
        assert!(adaptor.connect().is_ok());
        assert!(adaptor.finalize().is_ok());
    }

    #[test]
    fn test_read_impl_is_used() {
        let mut adaptor = I2cTestAdaptor::new("bus").with_read_impl(|len| vec![0xAB; len]);
        assert_eq!(adaptor.i2c_read(3), Ok(vec![0xAB, 0xAB, 0xAB]));

        let mut calls = 0u8;
        adaptor.set_read_impl(move |_| {
            calls += 1;
            vec![calls]
        });
        assert_eq!(adaptor.i2c_read(1), Ok(vec![1]));
        assert_eq!(adaptor.i2c_read(1), Ok(vec![2]));
    }

    #[test]
    fn test_driver_traffic_is_recorded() {
        let mut adaptor = I2cTestAdaptor::new("bus").with_read_impl(|_| vec![0x01, 0x02]);
        let value = read_register(&mut adaptor, 0x09, 0x3C).unwrap();
        assert_eq!(value, 0x0102);
        assert_eq!(adaptor.address(), Some(0x09));
        assert_eq!(adaptor.written(), &[vec![0x3Cu8]]);
    }

    #[test]
    fn test_short_read_is_passed_through() {
        let mut adaptor = I2cTestAdaptor::new("bus");
        let value = read_register(&mut adaptor, 0x09, 0x3C).unwrap();
        assert_eq!(value, 0);
    }
}
