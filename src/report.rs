//! HID reports for Komplete Kontrol keyboards.

use bytes::{BufMut, Bytes, BytesMut};

use crate::model::Generation;

/// Length of the MK2 key color report.
pub const REPORT_LEN: usize = 136;

/// Report ID of the MK2 key color report.
const REPORT_ID: u8 = 0xa4;

/// Number of key slots in the MK2 key color report.
const SLOT_COUNT: usize = 16;

/// Offset of the global key up color code.
pub const UP_OFFSET: usize = 5;

/// Offset of the global key down color code.
pub const DOWN_OFFSET: usize = 6;

/// Codes sent on connect: off when released, red when pressed.
const INIT_CODES: (u8, u8) = (0x03, 0x06);

/// MK1 LED reset.
const MK1_RESET: [u8; 3] = [0xa0, 0x00, 0x00];

/// Fixed framing of the MK2 key color report.
///
/// Bytes [`UP_OFFSET`] and [`DOWN_OFFSET`] carry the codes applied to every
/// key, all other bytes must be sent unchanged.
pub const TEMPLATE: [u8; REPORT_LEN] = template();

const fn template() -> [u8; REPORT_LEN] {
    let mut buf = [0; REPORT_LEN];
    buf[0] = REPORT_ID;

    let mut slot = 0;
    while slot < SLOT_COUNT {
        let start = 1 + slot * 8;
        buf[start] = 0x7f;
        buf[start + 3] = 0x33;
        if slot > 0 {
            buf[start + 4] = 0x2c;
            buf[start + 5] = 0x2e;
        }
        slot += 1;
    }

    // Everything past the last slot is zero padding.
    buf
}

/// Build the MK2 report applying `up` and `down` to all keys.
pub fn color_report(up: u8, down: u8) -> Bytes {
    let mut buf = BytesMut::with_capacity(REPORT_LEN);

    buf.put_slice(&TEMPLATE[..UP_OFFSET]);
    buf.put_u8(up);
    buf.put_u8(down);
    buf.put_slice(&TEMPLATE[DOWN_OFFSET + 1..]);

    buf.freeze()
}

/// Report sent right after opening the device.
pub fn init_report(generation: Generation) -> Bytes {
    match generation {
        Generation::Mk2 => color_report(INIT_CODES.0, INIT_CODES.1),
        Generation::Mk1 => Bytes::from_static(&MK1_RESET),
    }
}
