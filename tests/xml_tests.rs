#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

#[cfg(test)]
mod xml_tests {
    use multiformat::test_utils::*;

    fn root_of(doc: &Document) -> NodeId {
        doc.root().expect("document should have a root")
    }

    // Basic parsing

    #[test]
    fn test_self_closing_roundtrip() -> Result<()> {
        let doc = xml::parse("<a/>");
        assert!(!doc.has_error());
        assert_eq!(
            xml::serialize(&doc)?,
            r#"<?xml version="1.0" encoding="UTF-8"?><a/>"#
        );
        Ok(())
    }

    #[test]
    fn test_attributes_enumerate_in_reverse_source_order() {
        let doc = xml::parse(r#"<a x="1" y="2"/>"#);
        let a = root_of(&doc);

        assert_eq!(doc.attribute(a, "x"), Some("1"));
        assert_eq!(doc.attribute(a, "y"), Some("2"));
        assert_eq!(doc.attribute_count(a), 2);
        // Each parsed attribute is put in front of the previous ones
        assert_eq!(doc.attribute_name(a, 0), Some("y"));
        assert_eq!(doc.attribute_name(a, 1), Some("x"));
        assert_eq!(doc.attribute_value(a, 0), Some("2"));
    }

    #[test]
    fn test_text_get_and_set() -> Result<()> {
        let mut doc = xml::parse("<a>text</a>");
        let a = root_of(&doc);
        assert_eq!(doc.node_text(a), Some("text"));

        doc.set_node_text(a, "new")?;
        assert_eq!(
            xml::serialize(&doc)?,
            r#"<?xml version="1.0" encoding="UTF-8"?><a>new</a>"#
        );
        Ok(())
    }

    #[test]
    fn test_children_in_source_order() {
        let doc = xml::parse("<list><x/><y/><z/></list>");
        let list = root_of(&doc);
        let names: Vec<_> = doc
            .children(list)
            .iter()
            .filter_map(|&c| doc.node_name(c))
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let doc = xml::parse(r#"<a title="Tom &amp; &quot;Jerry&quot;" n='&lt;1&gt;'/>"#);
        let a = root_of(&doc);
        assert_eq!(doc.attribute(a, "title"), Some("Tom & \"Jerry\""));
        assert_eq!(doc.attribute(a, "n"), Some("<1>"));
    }

    #[test]
    fn test_unterminated_entity_stops_at_delimiter() {
        let doc = xml::parse(r#"<a x='&amp' y="2"/>"#);
        assert!(!doc.has_error(), "{:?}", doc.error());
        let a = root_of(&doc);
        assert_eq!(doc.attribute(a, "x"), Some("&amp"));
        assert_eq!(doc.attribute(a, "y"), Some("2"));
    }

    #[test]
    fn test_attributes_may_span_lines() {
        let doc = xml::parse("<a\n  x='1'\n  y = \"2\"\n/>");
        assert!(!doc.has_error(), "{:?}", doc.error());
        assert_eq!(doc.attribute_count(root_of(&doc)), 2);
    }

    // Comments, CDATA and entities

    #[test]
    fn test_comment_is_dropped() {
        let doc = xml::parse("<a><!-- hi --></a>");
        let a = root_of(&doc);
        assert_eq!(doc.child_count(a), 0);
        assert_eq!(doc.node_text(a), None);
    }

    #[test]
    fn test_cdata_merged_into_text() {
        let doc = xml::parse("<a><![CDATA[<raw>]]></a>");
        let a = root_of(&doc);
        assert_eq!(doc.node_text(a), Some("<raw>"));
        assert_eq!(doc.child_count(a), 0);
    }

    #[test]
    fn test_cdata_appends_to_existing_text() {
        // Whitespace in front of each text run is skipped
        let doc = xml::parse("<a>x = <![CDATA[a<b]]> ok</a>");
        assert_eq!(doc.node_text(root_of(&doc)), Some("x = a<bok"));
    }

    #[test]
    fn test_text_decodes_only_three_entities() {
        let doc = xml::parse("<a>&lt;b&gt; &amp; &quot;q&quot; &apos;s&apos; &#65;</a>");
        assert_eq!(
            doc.node_text(root_of(&doc)),
            Some("<b> & &quot;q&quot; &apos;s&apos; &#65;")
        );
    }

    #[test]
    fn test_text_is_folded_around_children() {
        let doc = xml::parse("<p>Hello <b>big</b> world</p>");
        let p = root_of(&doc);
        assert_eq!(doc.node_text(p), Some("Hello world"));
        assert_eq!(doc.child_count(p), 1);
        let b = doc.find_child(p, "b").expect("b element");
        assert_eq!(doc.node_text(b), Some("big"));
    }

    #[test]
    fn test_declaration_and_comments_outside_root() {
        let input = "<?xml version=\"1.0\"?>\n<!-- lead -->\n<root/>\n<!-- tail -->\n";
        let doc = xml::parse(input);
        assert!(!doc.has_error(), "{:?}", doc.error());
        assert_eq!(doc.node_name(root_of(&doc)), Some("root"));
    }

    // Names

    #[test]
    fn test_name_start_rejects_underscore_and_colon() {
        for input in ["<_a/>", "<:a/>"] {
            let doc = xml::parse(input);
            assert!(doc.has_error(), "{} should not parse", input);
            assert_eq!(doc.error_message().as_deref(), Some("Expected name"));
            assert_eq!((doc.error_line(), doc.error_column()), (1, 2));
        }
    }

    #[test]
    fn test_name_continuation_characters() {
        let doc = xml::parse("<ns:item-1.x a_b='1'/>");
        let root = root_of(&doc);
        assert_eq!(doc.node_name(root), Some("ns:item-1.x"));
        assert!(doc.has_attribute(root, "a_b"));
    }

    // Errors

    #[test]
    fn test_mismatched_closing_tag_position() {
        let doc = xml::parse("<a><b></a>");
        assert!(doc.has_error());
        assert!(!doc.error_message().unwrap_or_default().is_empty());
        assert_eq!(doc.error_line(), 1);
        assert_eq!(doc.error_column(), 7);
        match doc.error().map(Error::kind) {
            Some(ErrorKind::Syntax(SyntaxError::MismatchedTag { expected, found })) => {
                assert_eq!(expected, "b");
                assert_eq!(found, "a");
            }
            other => panic!("Expected mismatched tag, got {:?}", other),
        }
    }

    #[test]
    fn test_error_position_on_later_line() {
        let doc = xml::parse("<root>\n  <item>\n  </itme>\n</root>");
        assert_eq!((doc.error_line(), doc.error_column()), (3, 3));
    }

    #[test]
    fn test_multiple_roots_position() {
        let doc = xml::parse("<a/>\n  <b/>");
        assert!(matches!(
            doc.error().map(Error::kind),
            Some(ErrorKind::Syntax(SyntaxError::MultipleRoots))
        ));
        assert_eq!((doc.error_line(), doc.error_column()), (2, 3));
        // The first root survives
        assert_eq!(doc.node_name(root_of(&doc)), Some("a"));
    }

    #[test]
    fn test_invalid_samples() {
        for (input, message) in INVALID_XML_SAMPLES {
            let doc = xml::parse(input);
            assert!(doc.has_error(), "Expected error for {:?}", input);
            let actual = doc.error_message().unwrap_or_default();
            assert!(
                actual.starts_with(message),
                "{:?}: expected {:?}, got {:?}",
                input,
                message,
                actual
            );
            assert!(doc.error_line() >= 1 && doc.error_column() >= 1);
        }
    }

    #[test]
    fn test_error_keeps_partial_tree() {
        let doc = xml::parse("<a><b/><c>");
        assert!(doc.has_error());
        let a = root_of(&doc);
        assert_eq!(doc.child_count(a), 2);
    }

    #[test]
    fn test_empty_input_has_no_root_and_no_error() {
        let doc = xml::parse("  \n ");
        assert!(!doc.has_error());
        assert!(doc.root().is_none());
        assert!(!xml::is_well_formed("  \n "));
    }

    #[test]
    fn test_size_limit() {
        let config = ParserConfig {
            max_size: 8,
            ..ParserConfig::default()
        };
        let doc = xml::parse_with_config("<abcdefgh/>", config);
        assert!(matches!(
            doc.error().map(Error::kind),
            Some(ErrorKind::Security(SecurityError::MaxSizeExceeded { .. }))
        ));
    }

    #[test]
    fn test_deep_nesting_within_limit() {
        let depth = 300;
        let input = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));
        let doc = xml::parse(&input);
        assert!(!doc.has_error(), "{:?}", doc.error());
        assert_eq!(doc.node_count(), depth);
    }

    #[test]
    fn test_retained_comments() {
        let config = ParserConfig::default().with_retain_comments(true);
        let doc = xml::parse_with_config("<a><!--one--><b/><!--two--></a>", config);
        let a = root_of(&doc);
        let kinds: Vec<_> = doc.children(a).iter().map(|&c| doc.node_type(c)).collect();
        assert_eq!(
            kinds,
            vec![NodeType::Comment, NodeType::Element, NodeType::Comment]
        );
    }

    // Files

    #[test]
    fn test_parse_catalog_file() -> Result<()> {
        let data = TestData::load()?;
        let doc = xml::parse(&data.catalog_xml);
        assert!(!doc.has_error(), "{:?}", doc.error());

        let catalog = root_of(&doc);
        assert_eq!(doc.node_name(catalog), Some("catalog"));
        assert_eq!(doc.attribute_name(catalog, 0), Some("owner"));
        assert_eq!(doc.find_children(catalog, "book").len(), 2);

        let description = doc
            .find_by_path(catalog, "book/description")
            .expect("description");
        assert_eq!(
            doc.node_text(description),
            Some("An in-depth look at creating applications with XML & friends.")
        );

        let notes = doc.find_by_path(catalog, "book/notes");
        assert!(notes.is_none(), "first book has no notes");
        let second = doc.child(catalog, 1).expect("second book");
        let notes = doc.find_child(second, "notes").expect("notes");
        assert_eq!(doc.node_text(notes), Some("Use <b>bold</b> sparingly"));
        Ok(())
    }
}
