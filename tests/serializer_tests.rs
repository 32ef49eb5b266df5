#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

#[cfg(test)]
mod serializer_tests {
    use multiformat::test_utils::*;

    const DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

    #[test]
    fn test_pretty_catalog() -> Result<()> {
        let (doc, _) = build_catalog();
        let out = xml::serialize_pretty(&doc, 2)?;
        let expected = format!(
            "{}\n<catalog>\n  <book id=\"1\">\n    <title>Dune</title>\n  </book>\n  <book id=\"2\"/>\n</catalog>\n",
            DECL
        );
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn test_indent_width_is_clamped() -> Result<()> {
        let doc = xml::parse("<a><b/></a>");
        assert_eq!(
            xml::serialize_pretty(&doc, 0)?,
            xml::serialize_pretty(&doc, 2)?
        );
        assert_eq!(
            xml::serialize_pretty(&doc, -3)?,
            xml::serialize_pretty(&doc, 2)?
        );
        assert_eq!(
            xml::serialize_pretty(&doc, 50)?,
            format!("{}\n<a>\n        <b/>\n</a>\n", DECL)
        );
        Ok(())
    }

    #[test]
    fn test_text_with_children() -> Result<()> {
        let doc = xml::parse("<p>Hello <b>big</b></p>");
        assert_eq!(
            xml::serialize(&doc)?,
            format!("{}<p>Hello <b>big</b></p>", DECL)
        );
        assert_eq!(
            xml::serialize_pretty(&doc, 2)?,
            format!("{}\n<p>Hello \n  <b>big</b>\n</p>\n", DECL)
        );
        Ok(())
    }

    #[test]
    fn test_escaping_in_text_and_attributes() -> Result<()> {
        let mut doc = Document::new();
        let root = doc.create_element("r");
        doc.set_attribute(root, "q", r#"say "hi" & 'bye' <now>"#)?;
        doc.set_node_text(root, "1 < 2 && 3 > 2")?;
        doc.set_root(root)?;

        assert_eq!(
            xml::serialize(&doc)?,
            format!(
                "{}<r q=\"say &quot;hi&quot; &amp; &apos;bye&apos; &lt;now&gt;\">1 &lt; 2 &amp;&amp; 3 &gt; 2</r>",
                DECL
            )
        );
        Ok(())
    }

    #[test]
    fn test_empty_text_is_self_closing() -> Result<()> {
        let mut doc = xml::parse("<a>x</a>");
        let a = doc.root().expect("root");
        doc.set_node_text(a, "")?;
        assert_eq!(xml::serialize(&doc)?, format!("{}<a/>", DECL));
        Ok(())
    }

    #[test]
    fn test_reparse_loses_comments_and_cdata_markers() -> Result<()> {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let note = doc.create_comment("note");
        let raw = doc.create_cdata("x<y");
        doc.add_child(a, note)?;
        doc.add_child(a, raw)?;
        doc.set_root(a)?;

        let text = xml::serialize(&doc)?;
        assert_eq!(
            text,
            format!("{}<a><!--note--><![CDATA[x<y]]></a>", DECL)
        );

        let reparsed = xml::parse(&text);
        let root = reparsed.root().expect("root");
        assert_eq!(reparsed.child_count(root), 0);
        assert_eq!(reparsed.node_text(root), Some("x<y"));
        Ok(())
    }

    #[test]
    fn test_reparse_flips_attribute_order() -> Result<()> {
        let doc = xml::parse(r#"<a x="1" y="2"/>"#);
        let text = xml::serialize(&doc)?;
        assert_eq!(text, format!("{}<a y=\"2\" x=\"1\"/>", DECL));

        let again = xml::serialize(&xml::parse(&text))?;
        assert_eq!(again, format!("{}<a x=\"1\" y=\"2\"/>", DECL));
        Ok(())
    }

    #[test]
    fn test_restricted_trees_are_idempotent() -> Result<()> {
        let inputs = [
            "<a/>",
            "<a k=\"v\"><b>text &amp; more</b><c/></a>",
            "<list><i>1</i><i>2</i><i>3</i></list>",
        ];
        for input in inputs {
            let first = xml::parse(input);
            let text = xml::serialize(&first)?;
            let second = xml::parse(&text);
            assert!(!second.has_error(), "{}: {:?}", text, second.error());
            assert_trees_equal(
                &first,
                first.root().expect("root"),
                &second,
                second.root().expect("root"),
            );
            assert_eq!(xml::serialize(&second)?, text);
        }
        Ok(())
    }

    #[test]
    fn test_constructed_tree_is_idempotent() -> Result<()> {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let hi = doc.create_text("hi & <bye>");
        let c = doc.create_element("c");
        doc.set_attribute(c, "k", "\"v\"")?;
        doc.add_child(b, hi)?;
        doc.add_child(a, b)?;
        doc.add_child(a, c)?;
        doc.set_root(a)?;

        let text = xml::serialize(&doc)?;
        assert_eq!(
            text,
            format!(
                "{}<a><b>hi &amp; &lt;bye&gt;</b><c k=\"&quot;v&quot;\"/></a>",
                DECL
            )
        );

        let reparsed = xml::parse(&text);
        assert!(!reparsed.has_error(), "{:?}", reparsed.error());
        assert_eq!(xml::serialize(&reparsed)?, text);
        Ok(())
    }

    #[test]
    fn test_pretty_output_reparses_to_same_tree() -> Result<()> {
        let data = TestData::load()?;
        let doc = xml::parse(&data.catalog_xml);

        // Attribute order flips on every reparse, so go around twice
        let once = xml::parse(&xml::serialize_pretty(&doc, 4)?);
        let twice = xml::parse(&xml::serialize_pretty(&once, 4)?);
        assert!(!twice.has_error(), "{:?}", twice.error());

        assert_trees_equal(
            &doc,
            doc.root().expect("root"),
            &twice,
            twice.root().expect("root"),
        );
        Ok(())
    }

    #[test]
    fn test_refuses_documents_with_errors() {
        let doc = xml::parse("<a><b></a>");
        assert!(matches!(
            xml::serialize(&doc).map_err(|e| e.kind().clone()),
            Err(ErrorKind::Serialize(SerializeError::DocumentHasError))
        ));
        assert!(matches!(
            xml::serialize(&Document::new()).map_err(|e| e.kind().clone()),
            Err(ErrorKind::Serialize(SerializeError::NoRoot))
        ));
    }

    #[test]
    fn test_serialize_stale_node() -> Result<()> {
        let mut doc = Document::new();
        let a = doc.create_element("a");
        doc.free_node(a)?;
        assert!(xml::serialize_node(&doc, a, &FormatConfig::compact()).is_err());
        Ok(())
    }
}
