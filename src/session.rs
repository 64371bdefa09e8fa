//! Keyboard connection state.

use tracing::{debug, info, warn};

use crate::color::Color;
use crate::error::Error;
use crate::model::{self, Generation, ModelDescriptor, VENDOR_ID};
use crate::report;
use crate::transport::{HidHandle, HidTransport};

/// Selected keyboard and its open HID handle.
///
/// A handle is only ever open for the selected model.
pub struct DeviceSession<T: HidTransport> {
    transport: T,
    model: Option<&'static ModelDescriptor>,
    handle: Option<T::Handle>,
}

impl<T: HidTransport> DeviceSession<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, model: None, handle: None }
    }

    /// Currently selected model.
    pub fn model(&self) -> Option<&'static ModelDescriptor> {
        self.model
    }

    /// Select the model used for the next connection.
    ///
    /// Selecting a different model while connected closes the open handle.
    pub fn select_model(&mut self, label: &str) -> Result<&'static ModelDescriptor, Error> {
        let model = model::resolve(label)?;
        self.select(model);
        Ok(model)
    }

    pub(crate) fn select(&mut self, model: &'static ModelDescriptor) {
        if self.handle.is_some() && self.model != Some(model) {
            warn!("Closing {} before selecting {}", self.model.map_or("device", |m| m.label), model.label);
            self.close();
        }

        self.model = Some(model);
    }

    /// Open the selected model and reset its LEDs.
    ///
    /// Does nothing if the device is already open.
    pub fn connect(&mut self) -> Result<String, Error> {
        let model = self.model.ok_or(Error::NoModelSelected)?;

        if self.handle.is_none() {
            let mut handle = self.transport.open(VENDOR_ID, model.product_id)?;

            let init = report::init_report(model.generation);
            debug!("Sending init report: {:02X?}", &init[..]);
            handle.write(&init)?;

            info!("Opened {} (PID 0x{:04X})", model.label, model.product_id);
            self.handle = Some(handle);
        }

        Ok(format!(
            "Connected to {} (mode {}, PID 0x{:04X}).",
            model.label, model.generation, model.product_id
        ))
    }

    /// Send key up and key down color codes for all keys.
    pub fn apply_colors(&mut self, up: u8, down: u8) -> Result<(), Error> {
        let model = self.model.ok_or(Error::NoModelSelected)?;
        let handle = self.handle.as_mut().ok_or(Error::NotConnected)?;

        if model.generation == Generation::Mk1 {
            return Err(Error::UnsupportedOnMk1(model.label));
        }

        let report = report::color_report(up, down);
        debug!("Sending color report: {:02X?}", &report[..]);
        handle.write(&report)
    }

    /// Apply key up and key down colors, returning a status line.
    pub fn apply(&mut self, up: Color, down: Color) -> Result<String, Error> {
        self.apply_colors(up.code(), down.code())?;
        Ok(format!("Applied: Up={}, Down={}", up, down))
    }

    /// Release the HID handle, keeping the selected model.
    pub fn close(&mut self) -> String {
        if self.handle.take().is_some() {
            info!("Closed {}", self.model.map_or("device", |m| m.label));
        }

        String::from("Disconnected.")
    }
}
