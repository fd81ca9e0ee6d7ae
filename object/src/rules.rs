//! Per-element write actions, the mechanism behind anonymization-style
//! rewrites.
//!
//! A [`RuleSet`] maps rule keys to [`Action`]s. A key may be an element's
//! canonical tag key (`x00100010`), its dictionary keyword
//! (`PatientName`), the name of its group (`Patient`), or the literal
//! `default`. Resolution follows that order, so element-level rules win
//! over group-level rules, which win over the default.

use crate::mem::{DataSet, InMemElement};
use dicoview_core::dictionary::{group_name, DataDictionary, StandardDataDictionary};
use dicoview_core::value::PrimitiveValue;
use dicoview_core::{Header, Tag};
use std::collections::HashMap;

/// The action to take on a data element when writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Pass the element through unchanged.
    Copy,
    /// Drop the element from the written data set.
    Remove,
    /// Keep the element, with an empty value.
    Clear,
    /// Keep the element, with the given single value.
    Replace(String),
}

/// The key of the fallback rule.
const DEFAULT_RULE: &str = "default";

/// A table of write rules, applied element by element when writing a data
/// set.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, Action>,
}

impl RuleSet {
    /// Create an empty rule set.
    /// With no rules, every element is copied.
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Add a rule, builder style.
    pub fn rule(mut self, key: &str, action: Action) -> Self {
        self.rules.insert(key.to_string(), action);
        self
    }

    /// Add a rule in place.
    pub fn insert(&mut self, key: &str, action: Action) {
        self.rules.insert(key.to_string(), action);
    }

    /// Resolve the action for the element with the given tag:
    /// first by its canonical key or dictionary keyword,
    /// then by its group name,
    /// then the `default` rule, and finally [`Action::Copy`].
    pub fn resolve(&self, tag: Tag) -> &Action {
        if let Some(action) = self.rules.get(&tag.key()) {
            return action;
        }
        if let Some(entry) = StandardDataDictionary.by_tag(tag) {
            if let Some(action) = self.rules.get(entry.alias) {
                return action;
            }
        }
        if let Some(name) = group_name(tag.group()) {
            if let Some(action) = self.rules.get(name) {
                return action;
            }
        }
        self.rules.get(DEFAULT_RULE).unwrap_or(&Action::Copy)
    }

    /// Apply the rules over a data set, producing the data set to write.
    pub fn apply(&self, elements: &DataSet) -> DataSet {
        let mut out = DataSet::create_empty();
        for elem in elements.iter() {
            match self.resolve(elem.tag()) {
                Action::Copy => {
                    out.put(elem.clone());
                }
                Action::Remove => {}
                Action::Clear => {
                    out.put(InMemElement::empty(elem.tag(), elem.vr()));
                }
                Action::Replace(value) => {
                    out.put(InMemElement::new(
                        elem.tag(),
                        elem.vr(),
                        PrimitiveValue::Strs([value.clone()].as_ref().into()),
                    ));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicoview_core::{HasLength, Length, VR};

    #[test]
    fn rule_priority() {
        let rules = RuleSet::new()
            .rule("default", Action::Remove)
            .rule("Patient", Action::Clear)
            .rule("PatientName", Action::Replace("Anonymized".into()));

        // element rule beats group rule
        assert_eq!(
            rules.resolve(Tag(0x0010, 0x0010)),
            &Action::Replace("Anonymized".into())
        );
        // group rule beats default
        assert_eq!(rules.resolve(Tag(0x0010, 0x0020)), &Action::Clear);
        // default applies elsewhere
        assert_eq!(rules.resolve(Tag(0x0008, 0x0060)), &Action::Remove);

        // canonical key form is also honored
        let rules = RuleSet::new().rule("x00181030", Action::Clear);
        assert_eq!(rules.resolve(Tag(0x0018, 0x1030)), &Action::Clear);
        // without a default rule, elements are copied
        assert_eq!(rules.resolve(Tag(0x0008, 0x0060)), &Action::Copy);
    }

    #[test]
    fn apply_transforms_the_data_set() {
        let mut data = DataSet::create_empty();
        data.put(InMemElement::new(
            Tag(0x0010, 0x0010),
            VR::PN,
            PrimitiveValue::Strs(["Doe^John".to_owned()].as_ref().into()),
        ));
        data.put(InMemElement::new(
            Tag(0x0010, 0x1030),
            VR::DS,
            PrimitiveValue::Strs(["70".to_owned()].as_ref().into()),
        ));
        data.put(InMemElement::new(
            Tag(0x0008, 0x0060),
            VR::CS,
            PrimitiveValue::Strs(["MR".to_owned()].as_ref().into()),
        ));

        let rules = RuleSet::new()
            .rule("PatientName", Action::Replace("Anonymized".into()))
            .rule("PatientWeight", Action::Clear)
            .rule("Modality", Action::Copy);
        let out = rules.apply(&data);

        assert_eq!(
            out.element(Tag(0x0010, 0x0010)).unwrap().value().to_str().unwrap(),
            "Anonymized"
        );
        let cleared = out.element(Tag(0x0010, 0x1030)).unwrap();
        assert_eq!(cleared.length(), Length(0));
        assert_eq!(
            out.element(Tag(0x0008, 0x0060)).unwrap().value().to_str().unwrap(),
            "MR"
        );
    }
}
