// Two-segment logical address space.
//
// A dictionary lives in a fixed original segment followed by an append-only
// additional segment. Logical positions below `original_size` address the
// original segment; the rest address the additional segment at
// `pos - original_size`.

use lexitrie_core::DictPos;

use crate::FormatError;

/// Physical segment of the address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Original,
    Additional,
}

/// Read access to a two-segment dictionary buffer.
///
/// Implementors provide the two segments; the provided methods map logical
/// positions onto them. Decoders always run against a single segment, so a
/// record never straddles the boundary.
pub trait AddressableBuffer {
    /// Size of the original segment in bytes.
    fn original_size(&self) -> usize;

    /// Raw bytes of one segment.
    fn segment_bytes(&self, segment: Segment) -> &[u8];

    /// One past the last addressable logical position.
    fn tail_position(&self) -> usize {
        self.original_size() + self.segment_bytes(Segment::Additional).len()
    }

    /// Returns `true` if `pos` lies in the additional segment.
    #[inline]
    fn is_in_additional_buffer(&self, pos: DictPos) -> bool {
        usize::try_from(pos).is_ok_and(|p| p >= self.original_size())
    }

    /// Translate a logical position to its segment and segment-relative offset.
    ///
    /// Returns `None` for the sentinel, negative positions and positions at or
    /// past the tail.
    fn translate(&self, pos: DictPos) -> Option<(Segment, usize)> {
        let pos = usize::try_from(pos).ok()?;
        if pos >= self.tail_position() {
            return None;
        }
        let original_size = self.original_size();
        if pos >= original_size {
            Some((Segment::Additional, pos - original_size))
        } else {
            Some((Segment::Original, pos))
        }
    }

    /// Bytes of the segment containing `pos`, starting at `pos`.
    fn read(&self, pos: DictPos) -> Option<&[u8]> {
        let (segment, offset) = self.translate(pos)?;
        self.segment_bytes(segment).get(offset..)
    }

    /// Run a segment-relative decoder at a logical position.
    ///
    /// `decode` receives the whole segment and a cursor at the translated
    /// offset. The advanced cursor is translated back, so the returned
    /// position is logical again.
    fn decode_at<T, F>(&self, pos: DictPos, decode: F) -> Result<(T, DictPos), FormatError>
    where
        Self: Sized,
        F: FnOnce(&[u8], &mut usize) -> Result<T, FormatError>,
    {
        let (segment, mut offset) = self
            .translate(pos)
            .ok_or(FormatError::InvalidPosition(pos))?;
        let value = decode(self.segment_bytes(segment), &mut offset)?;
        let base = match segment {
            Segment::Original => 0,
            Segment::Additional => self.original_size(),
        };
        let next = DictPos::try_from(base + offset).map_err(|_| FormatError::InvalidPosition(pos))?;
        Ok((value, next))
    }
}

/// Borrowed original segment plus an owned, growable additional segment.
#[derive(Debug, Clone)]
pub struct ExtendableBuffer<'a> {
    original: &'a [u8],
    additional: Vec<u8>,
}

impl<'a> ExtendableBuffer<'a> {
    /// Wrap an original segment with an empty additional segment.
    pub fn new(original: &'a [u8]) -> Self {
        Self {
            original,
            additional: Vec::new(),
        }
    }

    /// Wrap an original segment together with existing additional bytes.
    pub fn with_additional(original: &'a [u8], additional: Vec<u8>) -> Self {
        Self {
            original,
            additional,
        }
    }

    /// Append bytes to the additional segment, returning the logical
    /// position of the first appended byte.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let pos = self.tail_position();
        self.additional.extend_from_slice(bytes);
        pos
    }
}

impl AddressableBuffer for ExtendableBuffer<'_> {
    #[inline]
    fn original_size(&self) -> usize {
        self.original.len()
    }

    #[inline]
    fn segment_bytes(&self, segment: Segment) -> &[u8] {
        match segment {
            Segment::Original => self.original,
            Segment::Additional => &self.additional,
        }
    }
}
