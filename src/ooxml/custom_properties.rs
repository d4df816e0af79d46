//! Custom document properties (`docProps/custom.xml`).
//!
//! Custom properties attach named, typed values to a document. Word shows
//! them under *File > Properties > Custom*.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use longan::ooxml::custom_properties::{CustomProperties, PropertyValue};
//!
//! let mut props = CustomProperties::new();
//! props.add_property("Project", PropertyValue::Text("Orchard".to_string()))?;
//! props.add_property("Revision", PropertyValue::Number(3))?;
//! let xml = props.to_xml()?;
//! ```

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

/// Fixed GUID format ID every custom property carries.
const FORMAT_ID: &str = "{D5CDD505-2E9C-101B-9397-08002B2CF9AE}";

/// First property id; ids 0 and 1 are reserved.
const FIRST_PID: u32 = 2;

/// A custom property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// `vt:lpwstr`
    Text(String),
    /// `vt:i4`
    Number(i32),
    /// `vt:bool`
    Boolean(bool),
    /// `vt:filetime`
    Date(DateTime<Utc>),
}

impl PropertyValue {
    fn element_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "vt:lpwstr",
            PropertyValue::Number(_) => "vt:i4",
            PropertyValue::Boolean(_) => "vt:bool",
            PropertyValue::Date(_) => "vt:filetime",
        }
    }

    fn to_xml_string(&self) -> String {
        match self {
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Number(i) => i.to_string(),
            PropertyValue::Boolean(b) => b.to_string(),
            PropertyValue::Date(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

/// A named custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomProperty {
    pub name: String,
    pub value: PropertyValue,
}

/// Custom properties in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomProperties {
    properties: Vec<CustomProperty>,
}

impl CustomProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, replacing any property with the same name.
    ///
    /// Names must not be blank.
    pub fn add_property(&mut self, name: impl Into<String>, value: PropertyValue) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OoxmlError::validation(
                "custom property",
                "name",
                "must not be empty",
            ));
        }
        if let PropertyValue::Text(text) = &value
            && text.is_empty()
        {
            return Err(OoxmlError::validation(
                "custom property",
                "value",
                "must not be empty",
            ));
        }
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(CustomProperty { name, value }),
        }
        Ok(())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CustomProperty> {
        self.properties.iter()
    }

    /// Serialize to the `docProps/custom.xml` part.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let mut properties_elem = BytesStart::new("Properties");
        properties_elem.push_attribute(("xmlns", namespace::OFC_CUSTOM_PROPERTIES));
        properties_elem.push_attribute(("xmlns:vt", namespace::OFC_DOC_PROPS_VTYPES));
        writer.write_event(Event::Start(properties_elem))?;

        for (pid, prop) in (FIRST_PID..).zip(&self.properties) {
            let mut property_elem = BytesStart::new("property");
            property_elem.push_attribute(("fmtid", FORMAT_ID));
            property_elem.push_attribute(("pid", pid.to_string().as_str()));
            property_elem.push_attribute(("name", prop.name.as_str()));
            writer.write_event(Event::Start(property_elem))?;

            let value_elem_name = prop.value.element_name();
            writer.write_event(Event::Start(BytesStart::new(value_elem_name)))?;
            let value_text = prop.value.to_xml_string();
            writer.write_event(Event::Text(BytesText::new(&value_text)))?;
            writer.write_event(Event::End(BytesEnd::new(value_elem_name)))?;

            writer.write_event(Event::End(BytesEnd::new("property")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("Properties")))?;

        let result = writer.into_inner().into_inner();
        String::from_utf8(result)
            .map_err(|e| OoxmlError::Xml(format!("Invalid UTF-8 in generated XML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_property_value_conversion() {
        assert_eq!(PropertyValue::Number(42).to_xml_string(), "42");
        assert_eq!(PropertyValue::Boolean(true).to_xml_string(), "true");
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(PropertyValue::Date(date).to_xml_string(), "2024-03-01T08:30:00Z");
        assert_eq!(PropertyValue::Date(date).element_name(), "vt:filetime");
    }

    #[test]
    fn test_add_replaces_by_name() {
        let mut props = CustomProperties::new();
        props.add_property("Version", PropertyValue::Number(1)).unwrap();
        props.add_property("Owner", PropertyValue::Text("ops".into())).unwrap();
        props.add_property("Version", PropertyValue::Number(2)).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get_property("Version"), Some(&PropertyValue::Number(2)));
        assert!(props.add_property(" ", PropertyValue::Boolean(true)).is_err());
        assert!(props.add_property("Empty", PropertyValue::Text(String::new())).is_err());
    }

    #[test]
    fn test_xml_generation() {
        let mut props = CustomProperties::new();
        props.add_property("Client", PropertyValue::Text("A & B".into())).unwrap();
        props.add_property("Approved", PropertyValue::Boolean(false)).unwrap();
        let xml = props.to_xml().unwrap();

        let doc = roxmltree::Document::parse(&xml).unwrap();
        let names: Vec<_> = doc
            .descendants()
            .filter(|n| n.has_tag_name("property"))
            .map(|n| (n.attribute("pid").unwrap(), n.attribute("name").unwrap()))
            .collect();
        assert_eq!(names, vec![("2", "Client"), ("3", "Approved")]);
        assert!(xml.contains("<vt:lpwstr>A &amp; B</vt:lpwstr>"));
        assert!(xml.contains("<vt:bool>false</vt:bool>"));
    }
}
