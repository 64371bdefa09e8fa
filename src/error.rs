//! Error kinds surfaced to the user.

use thiserror::Error;

/// Failure of a single session or encoder operation.
///
/// None of these are fatal, the session stays usable for a corrected call.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown model: {0:?}")]
    UnknownModel(String),

    #[error("invalid color spec: {0:?}")]
    InvalidColorSpec(String),

    #[error("no model selected")]
    NoModelSelected,

    #[error("unable to open device 0x{product_id:04x}: {reason} (root permissions required)")]
    DeviceNotFound { product_id: u16, reason: String },

    #[error("device not connected")]
    NotConnected,

    #[error("key up/down color scheme is only supported on MK2, {0} is MK1")]
    UnsupportedOnMk1(&'static str),

    #[error("unable to write report: {0}")]
    WriteFailed(String),

    #[error("unable to access HID: {0}")]
    Hid(#[from] hidapi::HidError),
}
