//! Serialization of locale bundles back into `strings.xml`-shaped files.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{error::Error, types::LocaleBundle};

const ROOT_TAG: &str = "resources";
const STRING_TAG: &str = "string";
const NAME_ATTR: &str = "name";
const INDENT: usize = 4;

/// Writes `<resources>` with one `<string>` per pair, in iteration order.
///
/// Output is UTF-8 with an XML declaration, four-space indentation and a
/// trailing newline.
pub fn to_writer<'a, I, W>(entries: I, writer: W) -> Result<(), Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    W: Write,
{
    let mut xml_writer = Writer::new_with_indent(writer, b' ', INDENT);

    xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml_writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for (name, value) in entries {
        let mut elem = BytesStart::new(STRING_TAG);
        elem.push_attribute((NAME_ATTR, name));
        xml_writer.write_event(Event::Start(elem))?;
        xml_writer.write_event(Event::Text(BytesText::new(value)))?;
        xml_writer.write_event(Event::End(BytesEnd::new(STRING_TAG)))?;
    }

    xml_writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut writer = xml_writer.into_inner();
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Renders a bundle to bytes.
pub fn render_bundle(bundle: &LocaleBundle) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    to_writer(bundle.iter(), &mut out)?;
    Ok(out)
}

/// Writes `bundle` to `target`, creating missing parent directories and
/// replacing any existing file.
pub fn write_bundle(target: &Path, bundle: &LocaleBundle) -> Result<PathBuf, Error> {
    let contents = render_bundle(bundle)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(target, contents).map_err(|source| Error::Write {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ResourceDocument;
    use indoc::indoc;
    use tempfile::TempDir;

    fn bundle(pairs: &[(&str, &str)]) -> LocaleBundle {
        let mut bundle = LocaleBundle::new("values");
        for (k, v) in pairs {
            bundle.insert(*k, *v);
        }
        bundle
    }

    #[test]
    fn test_render_layout() {
        let rendered = render_bundle(&bundle(&[
            ("tile_label_mobile_data", "Mobile data"),
            ("tile_label_nfc", "NFC"),
        ]))
        .unwrap();
        let expected = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <resources>
                <string name="tile_label_mobile_data">Mobile data</string>
                <string name="tile_label_nfc">NFC</string>
            </resources>
        "#};
        assert_eq!(String::from_utf8(rendered).unwrap(), expected);
    }

    #[test]
    fn test_render_escapes_markup() {
        let rendered = render_bundle(&bundle(&[("a&b", "Use <tag> & more")])).unwrap();
        let text = String::from_utf8(rendered).unwrap();
        assert!(text.contains(r#"name="a&amp;b""#));
        assert!(text.contains("Use &lt;tag&gt; &amp; more"));
        assert!(!text.contains("<!DOCTYPE"));
        assert!(!text.contains("standalone"));
    }

    #[test]
    fn test_rendered_output_parses_back() {
        let original = bundle(&[("a", "Café 数据 🚀"), ("b", ""), ("c", "  spaced  ")]);
        let rendered = render_bundle(&original).unwrap();
        let doc = ResourceDocument::from_bytes(rendered).unwrap();
        let parsed: Vec<_> = doc.entries().collect::<Result<_, _>>().unwrap();
        let pairs: Vec<_> = parsed
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
            .collect();
        assert_eq!(pairs, original.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_write_bundle_creates_directories_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out/values-es/strings.xml");

        write_bundle(&target, &bundle(&[("a", "first")])).unwrap();
        assert!(target.exists());

        write_bundle(&target, &bundle(&[("b", "second")])).unwrap();
        let text = fs::read_to_string(&target).unwrap();
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }

    #[test]
    fn test_write_bundle_reports_unwritable_target() {
        let temp = TempDir::new().unwrap();
        // A file where the locale directory should be.
        let blocker = temp.path().join("values");
        fs::write(&blocker, "").unwrap();

        let err = write_bundle(&blocker.join("strings.xml"), &bundle(&[("a", "A")])).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_to_writer_propagates_sink_errors() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = to_writer([("a", "A")], Broken).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("sink closed"));
    }
}
