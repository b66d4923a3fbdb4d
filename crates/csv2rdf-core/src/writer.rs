//! RDF/XML output.

use crate::error::Result;
use crate::schema::TOP_CLASS;
use std::borrow::Cow;
use std::io::Write;

/// RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// RDF schema namespace.
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// OWL namespace.
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
/// Range given to every property.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
/// Default namespace for the `sample:` property elements.
pub const DEFAULT_VOCABULARY: &str = "http://www.test.nql.org/schemas/sample#";

/// Streams an RDF/XML document: header, class and property descriptions,
/// then instances.
#[derive(Debug)]
pub struct RdfWriter<W: Write> {
    out: W,
    vocabulary: String,
    in_instance: bool,
}

impl<W: Write> RdfWriter<W> {
    /// Create a writer using the default vocabulary namespace.
    pub fn new(out: W) -> Self {
        Self::with_vocabulary(out, DEFAULT_VOCABULARY)
    }

    /// Create a writer with a custom vocabulary namespace.
    pub fn with_vocabulary(out: W, vocabulary: impl Into<String>) -> Self {
        Self {
            out,
            vocabulary: vocabulary.into(),
            in_instance: false,
        }
    }

    /// Write the document header.
    pub fn start(&mut self) -> Result<()> {
        writeln!(self.out, "<rdf:RDF")?;
        writeln!(self.out, "  xmlns:rdf=\"{}\"", RDF_NS)?;
        writeln!(self.out, "  xmlns:rdfs=\"{}\"", RDFS_NS)?;
        writeln!(self.out, "  xmlns:owl=\"{}\"", OWL_NS)?;
        writeln!(self.out, "  xmlns:sample=\"{}\">", escape_xml(&self.vocabulary))?;
        writeln!(self.out, "<owl:Ontology rdf:about=\"{}\"/>", RDFS_NS)?;
        writeln!(self.out, " ")?;
        Ok(())
    }

    /// Describe a class. An empty superclass means the top class.
    pub fn write_class(&mut self, name: &str, superclass: &str) -> Result<()> {
        let superclass = if superclass.is_empty() {
            TOP_CLASS
        } else {
            superclass
        };
        writeln!(self.out, "<rdf:Description rdf:ID=\"{}\">", escape_xml(name))?;
        writeln!(self.out, "  <rdf:type rdf:resource=\"{}Class\"/>", RDFS_NS)?;
        writeln!(
            self.out,
            "  <rdfs:subClassOf rdf:resource=\"#{}\"/>",
            escape_xml(superclass)
        )?;
        writeln!(self.out, "</rdf:Description>")?;
        writeln!(self.out, " ")?;
        Ok(())
    }

    /// Describe a string-valued property of `domain`.
    pub fn write_property(&mut self, name: &str, domain: &str) -> Result<()> {
        writeln!(self.out, "<rdf:Property rdf:ID=\"{}\">", escape_xml(name))?;
        writeln!(self.out, "  <rdfs:domain rdf:resource=\"#{}\"/>", escape_xml(domain))?;
        writeln!(self.out, "  <rdfs:range rdf:resource=\"{}\"/>", XSD_STRING)?;
        writeln!(self.out, "</rdf:Property>")?;
        writeln!(self.out, " ")?;
        Ok(())
    }

    /// Open an instance of `class`.
    pub fn start_instance(&mut self, id: &str, class: &str) -> Result<()> {
        if self.in_instance {
            self.end_instance()?;
        }
        writeln!(self.out, "<rdf:Description rdf:ID=\"{}\">", escape_xml(id))?;
        writeln!(self.out, "  <rdf:type rdf:resource=\"#{}\"/>", escape_xml(class))?;
        self.in_instance = true;
        Ok(())
    }

    /// Write a literal value of the open instance.
    pub fn write_literal(&mut self, property: &str, value: &str) -> Result<()> {
        let property = escape_xml(property);
        writeln!(
            self.out,
            "  <sample:{}>{}</sample:{}>",
            property,
            escape_xml(value),
            property
        )?;
        Ok(())
    }

    /// Write a reference from the open instance to another instance.
    pub fn write_reference(&mut self, property: &str, target: &str) -> Result<()> {
        writeln!(
            self.out,
            "  <sample:{} rdf:resource=\"#{}\"/>",
            escape_xml(property),
            escape_xml(target)
        )?;
        Ok(())
    }

    /// Close the open instance.
    pub fn end_instance(&mut self) -> Result<()> {
        if self.in_instance {
            writeln!(self.out, "</rdf:Description>")?;
            writeln!(self.out, " ")?;
            self.in_instance = false;
        }
        Ok(())
    }

    /// Close the document and return the underlying writer, flushed.
    pub fn finish(mut self) -> Result<W> {
        self.end_instance()?;
        writeln!(self.out, "</rdf:RDF>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
