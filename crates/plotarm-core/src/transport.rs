//! Transport boundary
//!
//! The core only ever writes textual commands and never waits for an
//! acknowledgment. Anything the device echoes back can be collected with
//! [`Transport::drain_incoming`] for display. Opening and closing ports
//! belong to the implementations in `plotarm-communication`.

use crate::Result;

/// Fire-and-forget sink for device commands
pub trait Transport {
    /// Write one command verbatim
    fn write(&mut self, command: &str) -> Result<()>;

    /// Human-readable name of the transport
    fn name(&self) -> String {
        "transport".to_string()
    }

    /// Bytes the device has sent back so far, without blocking
    ///
    /// Transports with no return channel report nothing.
    fn drain_incoming(&mut self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, command: &str) -> Result<()> {
        (**self).write(command)
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn drain_incoming(&mut self) -> Result<Vec<u8>> {
        (**self).drain_incoming()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, command: &str) -> Result<()> {
        (**self).write(command)
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn drain_incoming(&mut self) -> Result<Vec<u8>> {
        (**self).drain_incoming()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink(Vec<String>);

    impl Transport for Sink {
        fn write(&mut self, command: &str) -> Result<()> {
            self.0.push(command.to_string());
            Ok(())
        }
    }

    struct Echo(Vec<u8>);

    impl Transport for Echo {
        fn write(&mut self, command: &str) -> Result<()> {
            self.0.extend_from_slice(command.as_bytes());
            Ok(())
        }

        fn drain_incoming(&mut self) -> Result<Vec<u8>> {
            Ok(std::mem::take(&mut self.0))
        }
    }

    #[test]
    fn test_default_drain_is_empty() {
        let mut sink = Sink(Vec::new());
        sink.write("5b5agw").unwrap();
        assert!(sink.drain_incoming().unwrap().is_empty());
        assert_eq!(sink.name(), "transport");
    }

    #[test]
    fn test_boxed_transport_forwards_drain() {
        let mut boxed: Box<dyn Transport> = Box::new(Echo(Vec::new()));
        boxed.write("ok").unwrap();
        assert_eq!(boxed.drain_incoming().unwrap(), b"ok");
        assert!(boxed.drain_incoming().unwrap().is_empty());

        fn write_and_drain<T: Transport>(mut transport: T) -> Vec<u8> {
            transport.write("u").unwrap();
            transport.drain_incoming().unwrap()
        }
        let mut echo = Echo(Vec::new());
        assert_eq!(write_and_drain(&mut echo), b"u");
    }
}
