//! This module contains the implementation for an in-memory DICOM data set.

use dicoview_core::dictionary::{DataDictionary, StandardDataDictionary};
use dicoview_core::header::{ByteSpan, DataElement, HasLength, Header, Length};
use dicoview_core::value::{C, Value};
use dicoview_core::{Tag, VR};
use dicoview_parser::dataset::read::{self, DataSetReader};
use dicoview_parser::dataset::write::{self, DataSetWriter};
use dicoview_parser::dataset::DataToken;
use snafu::{Backtrace, ResultExt, Snafu};
use std::collections::BTreeMap;

/// A full in-memory DICOM data element,
/// where sequence items are in-memory data sets
/// and pixel data fragments are byte buffers.
pub type InMemElement = DataElement<DataSet, Vec<u8>>;

/// An error when looking up an element of a data set.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum AccessError {
    /// The requested element is not present.
    #[snafu(display("No such data element {}", tag))]
    NoSuchDataElement {
        /// the requested tag
        tag: Tag,
        /// backtrace of the failed lookup
        backtrace: Backtrace,
    },
    /// The requested attribute keyword is not in the dictionary.
    #[snafu(display("No such attribute keyword `{}`", name))]
    NoSuchAttributeName {
        /// the requested keyword
        name: String,
        /// backtrace of the failed lookup
        backtrace: Backtrace,
    },
}

/// An error when building a data set out of a token stream.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum BuildError {
    /// The token reader failed.
    #[snafu(display("Could not read data set token"))]
    ReadToken {
        /// the underlying token reading error
        #[snafu(backtrace)]
        source: read::Error,
    },
    /// An element header was not followed by a value token.
    #[snafu(display("Missing data element value"))]
    MissingElementValue {
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// A token arrived out of the data set grammar's order.
    #[snafu(display("Unexpected token {}", token))]
    UnexpectedToken {
        /// a rendering of the offending token
        token: String,
        /// backtrace of the failure
        backtrace: Backtrace,
    },
    /// The token stream ended before the data set was complete.
    #[snafu(display("Premature data set end"))]
    PrematureEnd {
        /// backtrace of the failure
        backtrace: Backtrace,
    },
}

type BuildResult<T> = Result<T, BuildError>;

/// A DICOM data set that is fully contained in memory:
/// an ordered mapping from attribute tags to data elements,
/// in ascending tag order.
///
/// Conforming DICOM streams encode their elements in ascending tag order,
/// so the storage order matches the order in which the elements were
/// parsed, and determines the order in which they are written back.
#[derive(Debug, Clone)]
pub struct DataSet {
    /// the element map
    entries: BTreeMap<Tag, InMemElement>,
    /// The length of the data set in bytes.
    /// It is usually undefined, unless it is part of an item
    /// in a sequence with a specified length in its item header.
    len: Length,
}

impl Default for DataSet {
    fn default() -> Self {
        DataSet::create_empty()
    }
}

impl PartialEq for DataSet {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl HasLength for DataSet {
    fn length(&self) -> Length {
        self.len
    }
}

impl DataSet {
    /// Create a new empty data set.
    pub fn create_empty() -> Self {
        DataSet {
            entries: BTreeMap::new(),
            len: Length::UNDEFINED,
        }
    }

    /// Construct a data set from an iterator of structured elements.
    pub fn from_element_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = InMemElement>,
    {
        let entries = iter.into_iter().map(|e| (e.tag(), e)).collect();
        DataSet {
            entries,
            len: Length::UNDEFINED,
        }
    }

    /// The number of top-level elements in the data set.
    pub fn element_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the data set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether an element with the given tag is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Retrieve a particular DICOM element by its tag.
    pub fn element(&self, tag: Tag) -> Result<&InMemElement, AccessError> {
        self.entries
            .get(&tag)
            .ok_or_else(|| NoSuchDataElementSnafu { tag }.build())
    }

    /// Retrieve a particular DICOM element by its tag,
    /// or `None` if it is not present.
    pub fn get(&self, tag: Tag) -> Option<&InMemElement> {
        self.entries.get(&tag)
    }

    /// Retrieve a particular DICOM element by its attribute keyword.
    pub fn element_by_name(&self, name: &str) -> Result<&InMemElement, AccessError> {
        let tag = self.lookup_name(name)?;
        self.element(tag)
    }

    /// Retrieve a particular DICOM element by its canonical tag key form
    /// (`x` followed by 8 lowercase hex digits).
    pub fn element_by_key(&self, key: &str) -> Result<&InMemElement, AccessError> {
        let tag = Tag::from_key(key).ok_or_else(|| {
            NoSuchAttributeNameSnafu {
                name: key.to_string(),
            }
            .build()
        })?;
        self.element(tag)
    }

    /// Insert a data element to the data set, replacing (and returning) any
    /// previous element of the same attribute.
    pub fn put(&mut self, elt: InMemElement) -> Option<InMemElement> {
        self.entries.insert(elt.tag(), elt)
    }

    /// Remove the element with the given tag,
    /// returning it if it was present.
    pub fn remove(&mut self, tag: Tag) -> Option<InMemElement> {
        self.entries.remove(&tag)
    }

    /// Obtain an iterator over the elements, in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = &InMemElement> {
        self.entries.values()
    }

    fn lookup_name(&self, name: &str) -> Result<Tag, AccessError> {
        StandardDataDictionary
            .by_name(name)
            .map(|e| e.tag)
            .ok_or_else(|| {
                NoSuchAttributeNameSnafu {
                    name: name.to_string(),
                }
                .build()
            })
    }

    // --- token stream interface ---

    /// Build a data set by consuming a data set token reader until the end
    /// of its input.
    pub fn build_object(dataset: &mut DataSetReader) -> BuildResult<Self> {
        Self::build(dataset, false, Length::UNDEFINED)
    }

    /// Build a data set by consuming a token reader,
    /// stopping at the matching item end when inside an item.
    fn build(
        dataset: &mut DataSetReader,
        in_item: bool,
        len: Length,
    ) -> BuildResult<Self> {
        let mut entries: BTreeMap<Tag, InMemElement> = BTreeMap::new();
        while let Some(token) = dataset.next() {
            let elem = match token.context(ReadTokenSnafu)? {
                DataToken::ElementHeader(header) => {
                    let start = DataSetReader::position(dataset) as u64;
                    // fetch respective value, place it in the entries
                    let next_token = dataset
                        .next()
                        .ok_or_else(|| MissingElementValueSnafu.build())?;
                    match next_token.context(ReadTokenSnafu)? {
                        DataToken::PrimitiveValue(v) => {
                            let end = DataSetReader::position(dataset) as u64;
                            InMemElement::new_with_span(
                                header.tag,
                                header.vr,
                                header.len,
                                Value::Primitive(v),
                                ByteSpan::new(start, end),
                            )
                        }
                        token => {
                            return UnexpectedTokenSnafu {
                                token: token.to_string(),
                            }
                            .fail();
                        }
                    }
                }
                DataToken::SequenceStart { tag, len } => {
                    let start = DataSetReader::position(dataset) as u64;
                    // delegate sequence building to another function
                    let items = Self::build_sequence(dataset)?;
                    let end = DataSetReader::position(dataset) as u64;
                    InMemElement::new_with_span(
                        tag,
                        VR::SQ,
                        len,
                        Value::Sequence { items, size: len },
                        ByteSpan::new(start, end),
                    )
                }
                DataToken::PixelSequenceStart { header } => {
                    let start = DataSetReader::position(dataset) as u64;
                    let (offset_table, fragments, table_byte_len) =
                        Self::build_pixel_sequence(dataset)?;
                    let end = DataSetReader::position(dataset) as u64;
                    let mut elem = InMemElement::new_with_span(
                        header.tag,
                        header.vr,
                        Length::UNDEFINED,
                        Value::PixelSequence {
                            offset_table,
                            fragments,
                        },
                        ByteSpan::new(start, end),
                    );
                    // the element's effective value starts after the
                    // Basic Offset Table
                    elem.advance_span_start(table_byte_len);
                    elem
                }
                DataToken::ItemEnd if in_item => {
                    // end of item, leave now
                    return Ok(DataSet { entries, len });
                }
                token => {
                    return UnexpectedTokenSnafu {
                        token: token.to_string(),
                    }
                    .fail()
                }
            };
            entries.insert(elem.tag(), elem);
        }

        if in_item {
            // token stream ended before the item was closed
            return PrematureEndSnafu.fail();
        }
        Ok(DataSet { entries, len })
    }

    /// Build a DICOM sequence by consuming a data set token reader.
    fn build_sequence(dataset: &mut DataSetReader) -> BuildResult<C<DataSet>> {
        let mut items: C<DataSet> = C::new();
        while let Some(token) = dataset.next() {
            match token.context(ReadTokenSnafu)? {
                DataToken::ItemStart { len } => {
                    items.push(Self::build(dataset, true, len)?);
                }
                DataToken::SequenceEnd => {
                    return Ok(items);
                }
                token => {
                    return UnexpectedTokenSnafu {
                        token: token.to_string(),
                    }
                    .fail()
                }
            };
        }

        // iterator fully consumed without a sequence delimiter
        PrematureEndSnafu.fail()
    }

    /// Build an encapsulated pixel data value by consuming a data set
    /// token reader, returning the Basic Offset Table contents, the
    /// fragments, and the byte length of the offset table value.
    #[allow(clippy::type_complexity)]
    fn build_pixel_sequence(
        dataset: &mut DataSetReader,
    ) -> BuildResult<(C<u32>, C<Vec<u8>>, u64)> {
        let mut offset_table: C<u32> = C::new();
        let mut table_byte_len = 0u64;
        let mut fragments: C<Vec<u8>> = C::new();
        while let Some(token) = dataset.next() {
            match token.context(ReadTokenSnafu)? {
                DataToken::ItemStart { .. } | DataToken::ItemEnd => {}
                DataToken::OffsetTable(table) => {
                    table_byte_len = (table.len() * 4) as u64;
                    offset_table = table;
                }
                DataToken::ItemValue(data) => {
                    fragments.push(data);
                }
                DataToken::SequenceEnd => {
                    return Ok((offset_table, fragments, table_byte_len));
                }
                token => {
                    return UnexpectedTokenSnafu {
                        token: token.to_string(),
                    }
                    .fail()
                }
            }
        }
        PrematureEndSnafu.fail()
    }

    /// Write all elements of this data set as tokens into the given writer.
    pub fn write_to(&self, writer: &mut DataSetWriter) -> Result<(), write::Error> {
        for elem in self.entries.values() {
            Self::write_element(elem, writer)?;
        }
        Ok(())
    }

    fn write_element(
        elem: &InMemElement,
        writer: &mut DataSetWriter,
    ) -> Result<(), write::Error> {
        match elem.value() {
            Value::Primitive(v) => {
                writer.write_token(DataToken::ElementHeader(*elem.header()))?;
                writer.write_token(DataToken::PrimitiveValue(v.clone()))?;
            }
            Value::Sequence { items, size } => {
                writer.write_token(DataToken::SequenceStart {
                    tag: elem.tag(),
                    len: *size,
                })?;
                for item in items {
                    writer.write_token(DataToken::ItemStart { len: item.length() })?;
                    item.write_to(writer)?;
                    writer.write_token(DataToken::ItemEnd)?;
                }
                writer.write_token(DataToken::SequenceEnd)?;
            }
            Value::PixelSequence {
                offset_table,
                fragments,
            } => {
                writer.write_token(DataToken::PixelSequenceStart {
                    header: *elem.header(),
                })?;
                writer.write_token(DataToken::OffsetTable(offset_table.clone()))?;
                for fragment in fragments {
                    writer.write_token(DataToken::ItemValue(fragment.clone()))?;
                }
                writer.write_token(DataToken::SequenceEnd)?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a InMemElement;
    type IntoIter = std::collections::btree_map::Values<'a, Tag, InMemElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl IntoIterator for DataSet {
    type Item = InMemElement;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.entries.into_iter(),
        }
    }
}

/// Base iterator type for an in-memory DICOM data set.
#[derive(Debug)]
pub struct Iter {
    inner: std::collections::btree_map::IntoIter<Tag, InMemElement>,
}

impl Iterator for Iter {
    type Item = InMemElement;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|x| x.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicoview_core::value::PrimitiveValue;

    #[test]
    fn inmem_object_put_get() {
        let patient_name = InMemElement::new(
            Tag(0x0010, 0x0010),
            VR::PN,
            Value::from(PrimitiveValue::Strs(["Doe^John".to_owned()].as_ref().into())),
        );
        let mut obj = DataSet::create_empty();
        obj.put(patient_name.clone());
        let elem = obj.element(Tag(0x0010, 0x0010)).unwrap();
        assert_eq!(elem, &patient_name);

        let elem = obj.element_by_name("PatientName").unwrap();
        assert_eq!(elem, &patient_name);

        let elem = obj.element_by_key("x00100010").unwrap();
        assert_eq!(elem, &patient_name);

        assert!(obj.element(Tag(0x0010, 0x0020)).is_err());
        assert!(obj.element_by_name("NoSuchThing").is_err());
    }

    #[test]
    fn inmem_object_equality_ignores_spans() {
        let mut obj1 = DataSet::create_empty();
        let mut obj2 = DataSet::create_empty();
        assert_eq!(obj1, obj2);
        let empty_patient_name = InMemElement::empty(Tag(0x0010, 0x0010), VR::PN);
        obj1.put(empty_patient_name.clone());
        assert_ne!(obj1, obj2);
        obj2.put(empty_patient_name);
        assert_eq!(obj1, obj2);
    }
}
