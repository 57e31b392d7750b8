//! Reading `<string>` entries out of Android resource files.
//!
//! The document is loaded and UTF-8 checked up front, then walked lazily with
//! `quick-xml`: [`ResourceDocument::entries`] yields one [`RawEntry`] per
//! `<string>` element in document order. Well-formedness problems surface as
//! an `Err` item, after which the iterator is exhausted.

use std::{fs, path::Path};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{error::ParseError, types::RawEntry};

const STRING_TAG: &[u8] = b"string";
const NAME_ATTR: &[u8] = b"name";

/// A resource file held in memory as validated UTF-8 text.
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    text: String,
}

impl ResourceDocument {
    /// Reads a resource file from disk.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Decodes raw bytes as UTF-8. A leading byte-order mark is dropped.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ParseError> {
        let text = String::from_utf8(bytes).map_err(|e| e.utf8_error())?;
        Ok(Self::from_text(text))
    }

    /// Wraps already decoded text. A leading byte-order mark is dropped and
    /// `\r\n` or a lone `\r` become `\n`, as an XML processor does before
    /// parsing. Character references such as `&#13;` are unaffected.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{feff}') {
            text.drain(..'\u{feff}'.len_utf8());
        }
        if text.contains('\r') {
            text = text.replace("\r\n", "\n").replace('\r', "\n");
        }
        Self { text }
    }

    /// Lazily iterates the document's `<string>` entries.
    ///
    /// A `<string>` nested inside another `<string>` is treated as markup of
    /// the outer element: its text joins the outer value and it is not
    /// yielded on its own.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            reader: Reader::from_str(&self.text),
            depth: 0,
            roots: 0,
            done: false,
        }
    }
}

/// Iterator over the `<string>` elements of a [`ResourceDocument`].
pub struct Entries<'a> {
    reader: Reader<&'a [u8]>,
    depth: usize,
    roots: usize,
    done: bool,
}

impl Iterator for Entries<'_> {
    type Item = Result<RawEntry, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl Entries<'_> {
    fn advance(&mut self) -> Result<Option<RawEntry>, ParseError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    self.open()?;
                    if e.name().as_ref() == STRING_TAG {
                        let name = name_attribute(&e)?;
                        let value = self.text_content()?;
                        check_chars(&value)?;
                        return Ok(Some(RawEntry { name, value }));
                    }
                }
                Event::Empty(e) => {
                    self.open()?;
                    self.close()?;
                    if e.name().as_ref() == STRING_TAG {
                        let name = name_attribute(&e)?;
                        return Ok(Some(RawEntry {
                            name,
                            value: String::new(),
                        }));
                    }
                }
                Event::End(_) => self.close()?,
                Event::Text(e) if self.depth == 0 => {
                    if !e.iter().all(u8::is_ascii_whitespace) {
                        return Err(ParseError::malformed("text outside the root element"));
                    }
                }
                Event::CData(_) if self.depth == 0 => {
                    return Err(ParseError::malformed("CDATA outside the root element"));
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(ParseError::malformed("unclosed element at end of file"));
                    }
                    if self.roots == 0 {
                        return Err(ParseError::malformed("no root element"));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    fn open(&mut self) -> Result<(), ParseError> {
        if self.depth == 0 {
            self.roots += 1;
            if self.roots > 1 {
                return Err(ParseError::malformed("more than one root element"));
            }
        }
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParseError> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or_else(|| ParseError::malformed("unexpected closing tag"))?;
        Ok(())
    }

    // Collects all character data up to the end tag matching the element just
    // opened, descending into any nested markup.
    fn text_content(&mut self) -> Result<String, ParseError> {
        let end_depth = self.depth - 1;
        let mut value = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(e) => value.push_str(&e.unescape()?),
                Event::CData(e) => value.push_str(std::str::from_utf8(&e)?),
                Event::Start(_) => self.depth += 1,
                Event::End(_) => {
                    self.close()?;
                    if self.depth == end_depth {
                        return Ok(value);
                    }
                }
                Event::Eof => {
                    return Err(ParseError::malformed("unexpected end of file inside <string>"));
                }
                _ => {}
            }
        }
    }
}

fn name_attribute(e: &BytesStart) -> Result<String, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == NAME_ATTR {
            let value = attr.unescape_value()?;
            check_chars(&value)?;
            return Ok(value.into_owned());
        }
    }
    Ok(String::new())
}

// The XML 1.0 `Char` production. Checked after unescaping, so references
// such as `&#1;` are caught too.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}'
            | '\u{A}'
            | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn check_chars(value: &str) -> Result<(), ParseError> {
    match value.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(ParseError::malformed(format!(
            "character U+{:04X} is not allowed in XML",
            u32::from(c)
        ))),
        None => Ok(()),
    }
}

/// Parses every entry of the file at `path`.
pub fn read_entries<P: AsRef<Path>>(path: P) -> Result<Vec<RawEntry>, ParseError> {
    ResourceDocument::read_from(path)?.entries().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn parse(xml: &str) -> Result<Vec<RawEntry>, ParseError> {
        ResourceDocument::from_text(xml).entries().collect()
    }

    #[test]
    fn test_parse_basic_strings_xml() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="hello">Hello</string>
                <string name="bye" translatable="false">Goodbye</string>
                <string name="empty"></string>
                <string name="self_closing"/>
            </resources>
        "#};
        let entries = parse(xml).unwrap();
        assert_eq!(
            entries,
            vec![
                RawEntry::new("hello", "Hello"),
                RawEntry::new("bye", "Goodbye"),
                RawEntry::new("empty", ""),
                RawEntry::new("self_closing", ""),
            ]
        );
    }

    #[test]
    fn test_missing_name_is_empty_string() {
        let entries = parse("<resources><string>No name attr</string></resources>").unwrap();
        assert_eq!(entries, vec![RawEntry::new("", "No name attr")]);
    }

    #[test]
    fn test_other_elements_are_ignored() {
        let xml = indoc! {r#"
            <resources>
                <string name="hello">Hello</string>
                <plurals name="apples">
                    <item quantity="one">One apple</item>
                    <item quantity="other">%d apples</item>
                </plurals>
                <string-array name="planets"><item>Mercury</item></string-array>
                <!-- <string name="commented">Nope</string> -->
            </resources>
        "#};
        let names: Vec<_> = parse(xml).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["hello"]);
    }

    #[test]
    fn test_text_is_unescaped_and_preserved() {
        let xml = r#"<resources><string name="a">  Use &lt;tag&gt; &amp; "quotes" </string><string name="b"><![CDATA[<b>bold</b>]]></string><string name="c">caf&#233; 数据 🚀</string></resources>"#;
        let entries = parse(xml).unwrap();
        assert_eq!(entries[0].value, "  Use <tag> & \"quotes\" ");
        assert_eq!(entries[1].value, "<b>bold</b>");
        assert_eq!(entries[2].value, "café 数据 🚀");
    }

    #[test]
    fn test_nested_markup_contributes_text() {
        let xml = r#"<resources><string name="styled">Hello <b>bold</b> world</string><string name="next">N</string></resources>"#;
        let entries = parse(xml).unwrap();
        assert_eq!(
            entries,
            vec![
                RawEntry::new("styled", "Hello bold world"),
                RawEntry::new("next", "N"),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let xml = r#"<resources><string name="a">1</string><string name="a">2</string></resources>"#;
        let values: Vec<_> = parse(xml).unwrap().into_iter().map(|e| e.value).collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(br#"<resources><string name="a">A</string></resources>"#);
        let doc = ResourceDocument::from_bytes(bytes).unwrap();
        let entries: Vec<_> = doc.entries().collect::<Result<_, _>>().unwrap();
        assert_eq!(entries, vec![RawEntry::new("a", "A")]);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let bytes = b"<resources><string name=\"a\">\xff\xfe</string></resources>".to_vec();
        let err = ResourceDocument::from_bytes(bytes).unwrap_err();
        assert!(matches!(err, ParseError::Encoding(_)));
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        let cases = [
            "",
            "   ",
            "<resources><string name=\"a\">A</string>",
            "<resources><string name=\"a\">A</resources>",
            "<resources></resources><resources></resources>",
            "garbage <resources></resources>",
            "<resources><string name=\"a\">&undeclared;</string></resources>",
            "<resources><string name=\"a\">&#1;</string></resources>",
            "<resources><string name=\"a\">bell &#x7;</string></resources>",
            "<resources><string name=\"a\">&#xFFFE;</string></resources>",
            "<resources><string name=\"a\"><![CDATA[\u{1}]]></string></resources>",
            "<resources><string name=\"&#1;\">A</string></resources>",
        ];
        for xml in cases {
            assert!(parse(xml).is_err(), "accepted malformed input: {xml:?}");
        }
    }

    #[test]
    fn test_allowed_character_references() {
        let xml = r#"<resources><string name="a">tab&#9;nl&#10;cr&#13;&#xD7FF;&#xE000;&#x1F680;</string></resources>"#;
        let entries = parse(xml).unwrap();
        assert_eq!(entries[0].value, "tab\tnl\ncr\r\u{D7FF}\u{E000}🚀");
    }

    #[test]
    fn test_line_endings_are_normalized() {
        let xml = "<resources>\r\n<string name=\"a\">one\r\ntwo\rthree</string>\r\n<string name=\"b\"><![CDATA[x\r\ny]]></string></resources>";
        let entries = parse(xml).unwrap();
        assert_eq!(entries[0].value, "one\ntwo\nthree");
        assert_eq!(entries[1].value, "x\ny");
    }

    #[test]
    fn test_nested_string_joins_outer_value() {
        let xml = r#"<resources><string name="outer">a<string name="inner">b</string>c</string></resources>"#;
        assert_eq!(parse(xml).unwrap(), vec![RawEntry::new("outer", "abc")]);
    }

    #[test]
    fn test_entries_before_error_are_yielded_lazily() {
        let xml = r#"<resources><string name="a">A</string><string name="b">B</resources>"#;
        let doc = ResourceDocument::from_text(xml);
        let mut entries = doc.entries();
        assert_eq!(entries.next().unwrap().unwrap(), RawEntry::new("a", "A"));
        assert!(entries.next().unwrap().is_err());
        assert!(entries.next().is_none());
    }

    #[test]
    fn test_read_entries_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = read_entries(temp.path().join("strings.xml")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
