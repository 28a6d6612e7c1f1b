use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Join `///` doc lines into one string, trimming each line.
/// Returns `None` when the item carries no docs.
pub fn doc_string(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let doc = lines.join("\n").trim().to_string();

    (!doc.is_empty()).then_some(doc)
}

/// Drop every attribute with the given name.
pub fn strip_attrs(attrs: &mut Vec<Attribute>, name: &str) {
    attrs.retain(|a| !a.path().is_ident(name));
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn doc_lines_are_trimmed_and_joined() {
        let item: syn::ItemStruct = parse_quote! {
            /// A person.
            ///   Lives somewhere.
            #[derive(Clone)]
            struct Person;
        };

        assert_eq!(
            doc_string(&item.attrs).as_deref(),
            Some("A person.\nLives somewhere.")
        );
    }

    #[test]
    fn missing_docs_are_none() {
        let item: syn::ItemStruct = parse_quote! {
            struct Person;
        };

        assert!(doc_string(&item.attrs).is_none());
    }

    #[test]
    fn strip_removes_only_named_attrs() {
        let mut item: syn::ItemStruct = parse_quote! {
            #[graph(name = "x")]
            #[serde(default)]
            struct Person;
        };
        strip_attrs(&mut item.attrs, "graph");

        assert_eq!(item.attrs.len(), 1);
        assert!(item.attrs[0].path().is_ident("serde"));
    }
}
