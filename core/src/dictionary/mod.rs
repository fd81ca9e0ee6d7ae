//! This module contains the concept of a DICOM data dictionary,
//! and the standard attribute dictionary used when decoding and encoding
//! data sets.
//!
//! The standard dictionary is a singleton initialized on first use,
//! built from the static [`ENTRIES`](entries::ENTRIES) table.

pub mod entries;

use crate::header::{Tag, VR};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

use self::entries::ENTRIES;

/// A data type for a dictionary entry, comprising the attribute tag,
/// its keyword (alias), the default value representation,
/// and the value multiplicity.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DictionaryEntryRef<'a> {
    /// The attribute tag.
    pub tag: Tag,
    /// The standard keyword, in UpperCamelCase (e.g. `PatientName`).
    pub alias: &'a str,
    /// The default value representation.
    pub vr: VR,
    /// The value multiplicity, in standard notation (`1`, `1-n`, `3`, …).
    pub vm: &'a str,
}

/// A view into the named groups of the standard dictionary.
/// Group names classify data elements for coarse-grained handling,
/// such as group-level write rules.
static GROUP_NAMES: &[(u16, &str)] = &[
    (0x0000, "Command"),
    (0x0002, "Meta Element"),
    (0x0004, "File Set"),
    (0x0008, "General"),
    (0x0010, "Patient"),
    (0x0012, "Clinical Trial"),
    (0x0018, "Acquisition"),
    (0x0020, "Image"),
    (0x0022, "Ophtalmology"),
    (0x0028, "Image Presentation"),
    (0x0032, "Study"),
    (0x0038, "Visit"),
    (0x003A, "Waveform"),
    (0x0040, "Procedure"),
    (0x0042, "Encapsulated Document"),
    (0x0050, "Device Informations"),
    (0x0054, "Nuclear Medicine"),
    (0x0060, "Histogram"),
    (0x0070, "Presentation State"),
    (0x0072, "Hanging Protocol"),
    (0x0088, "Storage"),
    (0x0100, "Authorization"),
    (0x0400, "Digital Signature"),
    (0x2000, "Film Session"),
    (0x2010, "Film Box"),
    (0x2020, "Image Box"),
    (0x2030, "Annotation"),
    (0x2040, "Overlay Box"),
    (0x2050, "Presentation LUT"),
    (0x2100, "Print Job"),
    (0x2110, "Printer"),
    (0x2120, "Queue"),
    (0x2130, "Print Content"),
    (0x2200, "Media Creation"),
    (0x3002, "RT Image"),
    (0x3004, "RT Dose"),
    (0x3006, "RT StructureSet"),
    (0x3008, "RT Treatment"),
    (0x300A, "RT Plan"),
    (0x300C, "RT Relationship"),
    (0x300E, "RT Approval"),
    (0x4008, "Results"),
    (0x4FFE, "MAC Parameters"),
    (0x5400, "Waveform Data"),
    (0x7FE0, "Pixel Data"),
    (0xFFFC, "Generic"),
    (0xFFFE, "Item"),
];

/// Retrieve the standard name of the given attribute group,
/// if one is assigned.
pub fn group_name(group: u16) -> Option<&'static str> {
    GROUP_NAMES
        .iter()
        .find(|(g, _)| *g == group)
        .map(|(_, name)| *name)
}

/// An interface for DICOM data dictionaries:
/// mapping a tag to the respective entry
/// and resolving an attribute keyword back to its tag.
pub trait DataDictionary {
    /// Fetch the dictionary entry for the given tag.
    fn by_tag(&self, tag: Tag) -> Option<&DictionaryEntryRef<'static>>;

    /// Fetch the dictionary entry with the given attribute keyword.
    fn by_name(&self, name: &str) -> Option<&DictionaryEntryRef<'static>>;

    /// Fetch the default value representation for the given tag,
    /// as done when reading implicit VR data sets:
    /// dictionary VR for known tags, `UN` otherwise.
    fn vr_of(&self, tag: Tag) -> VR {
        self.by_tag(tag).map(|e| e.vr).unwrap_or(VR::UN)
    }
}

static DICT: Lazy<StandardDictionaryRegistry> = Lazy::new(init_dictionary);

/// Retrieve a singleton instance of the standard dictionary registry.
pub fn registry() -> &'static StandardDictionaryRegistry {
    &DICT
}

/// The data struct actually containing the standard dictionary.
///
/// This structure is made opaque via the unit type
/// [`StandardDataDictionary`], which provides a lazily loaded singleton.
pub struct StandardDictionaryRegistry {
    /// mapping: keyword → entry
    by_name: HashMap<&'static str, &'static DictionaryEntryRef<'static>>,
    /// mapping: tag → entry
    by_tag: HashMap<Tag, &'static DictionaryEntryRef<'static>>,
}

impl fmt::Debug for StandardDictionaryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("StandardDictionaryRegistry")
            .field("entries", &self.by_tag.len())
            .finish()
    }
}

impl StandardDictionaryRegistry {
    fn new() -> StandardDictionaryRegistry {
        StandardDictionaryRegistry {
            by_name: HashMap::with_capacity(ENTRIES.len()),
            by_tag: HashMap::with_capacity(ENTRIES.len()),
        }
    }

    fn index(&mut self, entry: &'static DictionaryEntryRef<'static>) -> &mut Self {
        self.by_name.insert(entry.alias, entry);
        self.by_tag.insert(entry.tag, entry);
        self
    }
}

/// Generic group length dictionary entry,
/// for any element of the form (gggg,0000).
static GROUP_LENGTH_ENTRY: DictionaryEntryRef<'static> = DictionaryEntryRef {
    tag: Tag(0x0000, 0x0000),
    alias: "GenericGroupLength",
    vr: VR::UL,
    vm: "1",
};

fn init_dictionary() -> StandardDictionaryRegistry {
    let mut d = StandardDictionaryRegistry::new();
    for entry in ENTRIES {
        d.index(entry);
    }
    d
}

/// A data dictionary which consults the library's global
/// DICOM attribute registry.
///
/// This is the type which would generally be used whenever a data
/// dictionary is needed, such as when reading implicit VR data sets.
/// The dictionary index is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardDataDictionary;

impl DataDictionary for StandardDataDictionary {
    fn by_tag(&self, tag: Tag) -> Option<&DictionaryEntryRef<'static>> {
        let r = registry();
        r.by_tag.get(&tag).copied().or({
            // group length elements not listed individually
            if tag.element() == 0x0000 {
                Some(&GROUP_LENGTH_ENTRY)
            } else {
                None
            }
        })
    }

    fn by_name(&self, name: &str) -> Option<&DictionaryEntryRef<'static>> {
        registry().by_name.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lookup_by_tag() {
        let dict = StandardDataDictionary;
        let entry = dict.by_tag(Tag(0x0010, 0x0010)).unwrap();
        assert_eq!(entry.alias, "PatientName");
        assert_eq!(entry.vr, VR::PN);

        let entry = dict.by_tag(Tag(0x0028, 0x0010)).unwrap();
        assert_eq!(entry.alias, "Rows");
        assert_eq!(entry.vr, VR::US);

        assert_eq!(dict.vr_of(Tag(0x0008, 0x0018)), VR::UI);
        // unknown tags decode as UN in implicit VR
        assert_eq!(dict.vr_of(Tag(0x0099, 0x1234)), VR::UN);
        // generic group length
        assert_eq!(dict.vr_of(Tag(0x0008, 0x0000)), VR::UL);
    }

    #[test]
    fn standard_lookup_by_name() {
        let dict = StandardDataDictionary;
        let entry = dict.by_name("TransferSyntaxUID").unwrap();
        assert_eq!(entry.tag, Tag(0x0002, 0x0010));
        assert!(dict.by_name("NoSuchAttribute").is_none());
    }

    #[test]
    fn group_names() {
        assert_eq!(group_name(0x0002), Some("Meta Element"));
        assert_eq!(group_name(0x0028), Some("Image Presentation"));
        assert_eq!(group_name(0x7FE0), Some("Pixel Data"));
        assert_eq!(group_name(0x0666), None);
    }
}
