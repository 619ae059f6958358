//! The name table: Windows Unicode-BMP records, English only.

use font_types::Tag;

use crate::sfnt::TableBuffer;

pub(crate) const TAG: Tag = Tag::new(b"name");

const WINDOWS_PLATFORM: u16 = 3;
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_ENGLISH_US: u16 = 0x0409;

pub(crate) const FAMILY: u16 = 1;
pub(crate) const SUBFAMILY: u16 = 2;
pub(crate) const UNIQUE_ID: u16 = 3;
pub(crate) const FULL_NAME: u16 = 4;
pub(crate) const POSTSCRIPT_NAME: u16 = 6;

/// Builds the table from `(name id, value)` records, already sorted by id.
pub(crate) fn build(records: &[(u16, &str)]) -> Vec<u8> {
    let mut storage = TableBuffer::new();
    let mut table = TableBuffer::new();
    table.write_u16(0); // format
    table.write_u16(records.len() as u16);
    table.write_u16(6 + 12 * records.len() as u16); // storage offset
    for (name_id, value) in records {
        let offset = storage.len();
        for unit in value.encode_utf16() {
            storage.write_u16(unit);
        }
        table.write_u16(WINDOWS_PLATFORM);
        table.write_u16(WINDOWS_UNICODE_BMP);
        table.write_u16(WINDOWS_ENGLISH_US);
        table.write_u16(*name_id);
        table.write_u16((storage.len() - offset) as u16);
        table.write_u16(offset as u16);
    }
    table.write_bytes(&storage.finish());
    table.finish()
}
