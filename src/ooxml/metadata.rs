/// Document metadata parts.
///
/// Core properties (`docProps/core.xml`) carry the Dublin Core fields such as
/// title, creator and timestamps; extended properties (`docProps/app.xml`)
/// name the producing application.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

const DEFAULT_APPLICATION: &str = "longan";

/// Standard document properties.
///
/// Unset timestamps are filled with the render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub application: String,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: None,
            subject: None,
            creator: None,
            description: None,
            keywords: None,
            created: None,
            modified: None,
            application: DEFAULT_APPLICATION.to_string(),
        }
    }
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = application.into();
        self
    }

    /// Serialize `docProps/core.xml`.
    pub fn core_xml(&self) -> Result<String> {
        let now = Utc::now();
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            namespace::OPC_CORE_PROPERTIES
        )?;

        for (tag, value) in [
            ("dc:title", &self.title),
            ("dc:subject", &self.subject),
            ("dc:creator", &self.creator),
            ("cp:keywords", &self.keywords),
            ("dc:description", &self.description),
            ("cp:lastModifiedBy", &self.creator),
        ] {
            if let Some(value) = value {
                write!(xml, "<{tag}>{}</{tag}>", escape_xml(value))?;
            }
        }
        xml.push_str("<cp:revision>1</cp:revision>");

        for (tag, value) in [
            ("dcterms:created", self.created),
            ("dcterms:modified", self.modified),
        ] {
            let stamp = value.unwrap_or(now).format("%Y-%m-%dT%H:%M:%SZ");
            write!(xml, r#"<{tag} xsi:type="dcterms:W3CDTF">{stamp}</{tag}>"#)?;
        }

        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    /// Serialize `docProps/app.xml`.
    pub fn app_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(
            xml,
            r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
            namespace::OFC_EXTENDED_PROPERTIES,
            namespace::OFC_DOC_PROPS_VTYPES
        )?;
        write!(xml, "<Application>{}</Application>", escape_xml(&self.application))?;
        xml.push_str("<DocSecurity>0</DocSecurity>");
        xml.push_str("<ScaleCrop>false</ScaleCrop>");
        xml.push_str("<LinksUpToDate>false</LinksUpToDate>");
        xml.push_str("<SharedDoc>false</SharedDoc>");
        xml.push_str("<HyperlinksChanged>false</HyperlinksChanged>");
        xml.push_str("</Properties>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_core_xml_fields() {
        let stamp = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let props = DocumentProperties::new()
            .title("Q1 <draft>")
            .creator("Finance")
            .created(stamp)
            .modified(stamp);
        let xml = props.core_xml().unwrap();
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let title = doc
            .descendants()
            .find(|n| n.tag_name().name() == "title")
            .and_then(|n| n.text());
        assert_eq!(title, Some("Q1 <draft>"));
        assert!(xml.contains("2025-01-02T03:04:05Z"));
        assert!(!xml.contains("dc:subject"));
    }

    #[test]
    fn test_app_xml_names_application() {
        let xml = DocumentProperties::new().app_xml().unwrap();
        assert!(roxmltree::Document::parse(&xml).is_ok());
        assert!(xml.contains("<Application>longan</Application>"));
    }
}
