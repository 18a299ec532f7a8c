// crates/dgus-core/src/decode.rs
//! Discriminant chase shared by the record families.
//!
//! A family decodes its common header, reads the type byte and looks it up in
//! a table that either names the final layout or points at a second table
//! keyed by another header byte. The same offset is then re-read under the
//! resolved layout into an owned value.

use tracing::trace;

use crate::{DgusError, RecordView, Result};

/// One concrete fixed-size record shape.
pub struct Layout<T: 'static> {
    pub name: &'static str,
    pub size: usize,
    pub decode: fn(&RecordView<'_>) -> Result<T>,
}

impl<T> Layout<T> {
    pub fn check_size(&self, allowed: &[usize]) -> Result<()> {
        if allowed.contains(&self.size) {
            Ok(())
        } else {
            Err(DgusError::BadRecordSize {
                shape: self.name,
                size: self.size,
            })
        }
    }
}

/// Result of looking up an outer type code.
pub enum Dispatch<T: 'static> {
    /// The type code alone decides the shape.
    Leaf(&'static Layout<T>),
    /// The shape depends on a second header byte.
    Chain {
        field: usize,
        table: &'static [(u8, &'static Layout<T>)],
    },
}

/// A family of records sharing a header and a type byte.
pub trait RecordFamily: Sized + 'static {
    const FAMILY: &'static str;
    const HEADER_LEN: usize;
    const TYPE_FIELD: usize;
    /// Permitted sizes of shapes resolved straight from the type byte.
    const LEAF_SIZES: &'static [usize];
    /// Permitted sizes of shapes resolved through a second table.
    const CHAINED_SIZES: &'static [usize];

    fn dispatch(code: u8) -> Option<Dispatch<Self>>;

    /// Structural checks on the common header before any shape is chosen.
    fn check_header(_header: &RecordView<'_>) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub record: T,
    pub shape: &'static str,
    pub size: usize,
}

pub fn resolve_layout<T: RecordFamily>(header: &RecordView<'_>) -> Result<&'static Layout<T>> {
    let code = header.u8(T::TYPE_FIELD);
    let dispatch = T::dispatch(code).ok_or(DgusError::UnknownType {
        family: T::FAMILY,
        offset: header.offset(),
        code,
    })?;

    match dispatch {
        Dispatch::Leaf(layout) => {
            layout.check_size(T::LEAF_SIZES)?;
            Ok(layout)
        }
        Dispatch::Chain { field, table } => {
            let subcode = header.u8(field);
            let layout = table
                .iter()
                .find(|(candidate, _)| *candidate == subcode)
                .map(|(_, layout)| *layout)
                .ok_or(DgusError::UnknownSubtype {
                    family: T::FAMILY,
                    offset: header.offset(),
                    code: subcode,
                })?;
            layout.check_size(T::CHAINED_SIZES)?;
            Ok(layout)
        }
    }
}

/// Decode the most specific record of family `T` starting at `offset`.
pub fn decode_record<T: RecordFamily>(buf: &[u8], offset: usize) -> Result<Decoded<T>> {
    let header = RecordView::new(buf, offset, T::HEADER_LEN, T::FAMILY)?;
    T::check_header(&header)?;

    let layout = resolve_layout::<T>(&header)?;
    let view = RecordView::new(buf, offset, layout.size, layout.name)?;
    let record = (layout.decode)(&view)?;

    trace!(offset, shape = layout.name, size = layout.size, "decoded record");

    Ok(Decoded {
        record,
        shape: layout.name,
        size: layout.size,
    })
}
