//! Lifecycle contracts between the host framework, its drivers and the
//! adaptors drivers are bound to.

/// A named device driver bound to a connection.
///
/// The host framework calls [`Driver::start`] once the connection is up and
/// [`Driver::halt`] on shutdown.
pub trait Driver {
    /// Connection (adaptor or capability) the driver issues its IO through.
    type Connection;
    /// Error returned by the lifecycle hooks.
    type Error;

    /// Name the driver was registered under.
    fn name(&self) -> &str;

    /// The connection this driver is bound to.
    fn connection(&self) -> &Self::Connection;

    /// Bring the driver up.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Shut the driver down.
    fn halt(&mut self) -> Result<(), Self::Error>;
}

/// A named connection to hardware.
pub trait Adaptor {
    /// Error returned while connecting or finalizing.
    type Error;

    /// Name of the adaptor.
    fn name(&self) -> &str;

    /// Open the connection.
    fn connect(&mut self) -> Result<(), Self::Error>;

    /// Release the connection.
    fn finalize(&mut self) -> Result<(), Self::Error>;
}
