/// Parses one `--map` value.
///
/// `SOURCE=TARGET` renames explicitly. A bare `SOURCE` keeps its name, with
/// `prefix` prepended when one is given.
pub fn parse_mapping(raw: &str, prefix: Option<&str>) -> Result<(String, String), String> {
    let (source, target) = match raw.split_once('=') {
        Some((source, target)) => (source.trim(), target.trim().to_string()),
        None => {
            let source = raw.trim();
            (source, format!("{}{}", prefix.unwrap_or(""), source))
        }
    };

    if source.is_empty() {
        return Err(format!("Invalid mapping '{}': missing source name", raw));
    }
    if target.is_empty() {
        return Err(format!("Invalid mapping '{}': missing target name", raw));
    }
    Ok((source.to_string(), target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_rename() {
        assert_eq!(
            parse_mapping("mobile_data=tile_label_mobile_data", None).unwrap(),
            (
                "mobile_data".to_string(),
                "tile_label_mobile_data".to_string()
            )
        );
    }

    #[test]
    fn test_explicit_rename_ignores_prefix() {
        let (_, target) = parse_mapping("nfc=nfc_label", Some("tile_")).unwrap();
        assert_eq!(target, "nfc_label");
    }

    #[test]
    fn test_bare_name_keeps_name_or_takes_prefix() {
        assert_eq!(parse_mapping("nfc", None).unwrap().1, "nfc");
        assert_eq!(parse_mapping("nfc", Some("tile_label_")).unwrap().1, "tile_label_nfc");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            parse_mapping(" a = b ", None).unwrap(),
            ("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_invalid_mappings() {
        assert!(parse_mapping("", None).is_err());
        assert!(parse_mapping("=b", None).is_err());
        let err = parse_mapping("a=", None).unwrap_err();
        assert!(err.contains("missing target name"));
    }
}
