//! HID transport abstraction.

use hidapi::{HidApi, HidDevice};

use crate::error::Error;

/// Access to HID devices on the bus.
pub trait HidTransport {
    type Handle: HidHandle;

    /// Open the first device matching the USB IDs.
    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Self::Handle, Error>;
}

/// Open HID device, closed when dropped.
pub trait HidHandle {
    /// Write an output report, the first byte is the report ID.
    fn write(&mut self, report: &[u8]) -> Result<(), Error>;
}

/// Transport using the system's hidapi backend.
pub struct HidApiTransport {
    api: HidApi,
}

impl HidApiTransport {
    pub fn new() -> Result<Self, Error> {
        Ok(Self { api: HidApi::new()? })
    }
}

impl HidTransport for HidApiTransport {
    type Handle = HidDevice;

    fn open(&self, vendor_id: u16, product_id: u16) -> Result<HidDevice, Error> {
        self.api
            .open(vendor_id, product_id)
            .map_err(|err| Error::DeviceNotFound { product_id, reason: err.to_string() })
    }
}

impl HidHandle for HidDevice {
    fn write(&mut self, report: &[u8]) -> Result<(), Error> {
        HidDevice::write(self, report).map_err(|err| Error::WriteFailed(err.to_string()))?;
        Ok(())
    }
}
